//! The top-level entry point tying the module pass and function pass
//! together in the order the host invokes them (§5).

use std::fmt;

use crate::config::VerifierConfig;
use crate::diagnostics::Reporter;
use crate::function_check::FunctionChecker;
use crate::ir::Module;
use crate::module_check::ModuleChecker;

/// Host-facing misuse that is not itself a subset-membership diagnostic —
/// the one place this crate returns a conventional `Result` instead of
/// reporting through a [`Reporter`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifierError {
    /// [`verify_function`] was asked to check a function the module doesn't
    /// contain.
    UnknownFunction(String),
}

impl fmt::Display for VerifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownFunction(name) => write!(f, "no function named {name} in module"),
        }
    }
}

impl std::error::Error for VerifierError {}

/// Runs the module pass, then the function pass over every function,
/// against a caller-owned reporter. Module-pass diagnostics always precede
/// function-pass diagnostics, matching the host's pass ordering.
pub fn verify_module(module: &Module, config: &VerifierConfig, reporter: &mut Reporter) {
    let mut module_checker = ModuleChecker::new(module, config, reporter);
    module_checker.run();

    if reporter.is_fatal() {
        log::debug!("module pass crossed the fatal threshold; skipping function pass");
        return;
    }

    let mut function_checker = FunctionChecker::new(module, config, reporter);
    for function in &module.functions {
        if function.is_intrinsic() || function.is_declaration() {
            continue;
        }
        function_checker.check_function(function);
        if reporter.is_fatal() {
            log::debug!("function pass crossed the fatal threshold; halting early");
            break;
        }
    }
}

/// Convenience wrapper that owns its own `Reporter` and returns the
/// collected diagnostics, for callers that don't need to reuse a reporter
/// across runs (§6: Reporter ownership may be caller- or pass-owned).
pub fn verify_module_owned(module: &Module, config: &VerifierConfig) -> Reporter {
    let mut reporter = Reporter::new();
    verify_module(module, config, &mut reporter);
    reporter
}

/// Re-runs the function pass for a single function, by name, without
/// re-running the module pass. Useful to a host that has already verified
/// the module once and wants to re-check one function after an edit.
///
/// Returns [`VerifierError::UnknownFunction`] if `module` has no function by
/// that name; this is host misuse, not a subset-membership violation, so it
/// is returned rather than folded into the `Reporter`'s diagnostics.
pub fn verify_function(
    module: &Module,
    name: &str,
    config: &VerifierConfig,
    reporter: &mut Reporter,
) -> Result<(), VerifierError> {
    let function = module
        .functions
        .iter()
        .find(|f| f.attrs.name == name)
        .ok_or_else(|| VerifierError::UnknownFunction(name.to_string()))?;
    let mut function_checker = FunctionChecker::new(module, config, reporter);
    function_checker.check_function(function);
    Ok(())
}
