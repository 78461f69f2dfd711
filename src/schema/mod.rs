//! Enumerations describing the fixed vocabulary of the IR: linkage and
//! calling-convention tags, and atomic ordering/operation codes.
//!
//! These mirror the corresponding `enum`s in LLVM's own headers; values are
//! assigned to match so that a loader producing numeric codes can decode
//! them with [`num_enum::TryFromPrimitive`] rather than a hand-written
//! `match`.

mod atomic;
mod linkage;

pub use atomic::{AtomicOrdering, RmwOperation};
pub use linkage::{CallConv, Linkage, Visibility};
