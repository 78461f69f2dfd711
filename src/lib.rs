//! A verifier for the stable, portable subset of an LLVM-IR-like language.
//!
//! The verifier takes an in-memory [`ir::Module`] built by a host loader and
//! runs two passes over it: the [`module_check::ModuleChecker`] validates
//! module-scope structure (globals, aliases, functions, named metadata,
//! entry-point uniqueness), then the [`function_check::FunctionChecker`]
//! walks every defined function's instructions. Both passes report through
//! a shared [`diagnostics::Reporter`] rather than returning `Result` per
//! check — a single run is expected to surface every independent violation,
//! not just the first one.

pub mod config;
pub mod diagnostics;
pub mod function_check;
pub mod intrinsics;
pub mod ir;
pub mod module_check;
pub mod pointer;
pub mod schema;
mod verify;

pub use config::VerifierConfig;
pub use diagnostics::{Diagnostic, Reporter, Severity};
pub use function_check::FunctionChecker;
pub use module_check::ModuleChecker;
pub use verify::{verify_function, verify_module, verify_module_owned, VerifierError};
