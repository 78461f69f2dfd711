//! Diagnostics are collected data, not thrown errors (§5, §7).
//!
//! A [`Reporter`] accumulates [`Diagnostic`]s in the order passes run: all
//! module-pass diagnostics before any function-pass diagnostics, and within
//! a function pass, instructions in block order. It never halts a pass on
//! its own; [`Reporter::is_fatal`] only reports whether the host-visible
//! fatal threshold has been crossed, leaving the decision to stop invoking
//! further passes to the caller.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Diagnostic {
    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }

    pub fn variable_attr(name: &str, attr: &str) -> Self {
        Self::error(format!(
            "Variable {name} has disallowed \"{attr}\" attribute"
        ))
    }

    pub fn variable_linkage(name: &str) -> Self {
        Self::error(format!("Variable {name} has disallowed linkage type"))
    }

    pub fn variable_alias(name: &str) -> Self {
        Self::error(format!("Variable {name} is an alias (disallowed)"))
    }

    pub fn variable_bad_initializer(name: &str) -> Self {
        Self::error(format!("Variable {name} has non-flattened initializer"))
    }

    pub fn variable_missing_initializer(name: &str) -> Self {
        Self::error(format!("Variable {name} has no initializer"))
    }

    pub fn function_attr(name: &str, attr: &str) -> Self {
        Self::error(format!(
            "Function {name} has disallowed \"{attr}\" attribute"
        ))
    }

    pub fn function_linkage(name: &str) -> Self {
        Self::error(format!("Function {name} has disallowed linkage type"))
    }

    pub fn function_invalid_type(name: &str) -> Self {
        Self::error(format!("Function {name} has disallowed function type"))
    }

    pub fn function_is_declaration(name: &str) -> Self {
        Self::error(format!("Function {name} has disallowed declaration (no body)"))
    }

    pub fn function_not_admissible_intrinsic(name: &str) -> Self {
        Self::error(format!(
            "Function {name} disallowed: not an admissible intrinsic"
        ))
    }

    pub fn function_forbidden_intrinsic(name: &str) -> Self {
        Self::error(format!("Function {name} disallowed: forbidden intrinsic"))
    }

    pub fn not_valid_external_symbol(name: &str) -> Self {
        Self::error(format!("{name} is not a valid external symbol"))
    }

    pub fn multiple_entry_points() -> Self {
        Self::error("Module has multiple entry points".to_string())
    }

    pub fn no_entry_point() -> Self {
        Self::error("Module has no entry point".to_string())
    }

    pub fn top_level_inline_asm() -> Self {
        Self::error("Module has disallowed top-level inline assembly".to_string())
    }

    pub fn named_metadata(name: &str) -> Self {
        Self::error(format!("Named metadata {name} is disallowed"))
    }

    pub fn bad_opcode(func: &str, opname: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: bad instruction opcode: {opname}"
        ))
    }

    pub fn unknown_opcode(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: unknown instruction opcode"
        ))
    }

    pub fn bad_pointer(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: bad pointer"))
    }

    pub fn bad_operand(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: bad operand"))
    }

    pub fn operand_not_inherent_ptr(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: operand not InherentPtr"
        ))
    }

    pub fn bad_callee_operand(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: bad function callee operand"
        ))
    }

    pub fn bad_intrinsic_operand(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: bad intrinsic operand"
        ))
    }

    pub fn bad_switch_condition(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: bad switch condition"))
    }

    pub fn bad_switch_case(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: bad switch case"))
    }

    pub fn bad_alignment(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: bad alignment"))
    }

    pub fn non_i32_inttoptr(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: non-i32 inttoptr"))
    }

    pub fn non_i32_ptrtoint(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: non-i32 ptrtoint"))
    }

    pub fn arithmetic_on_i1(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: arithmetic on i1"))
    }

    pub fn arithmetic_on_vector_of_i1(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: arithmetic on vector of i1"
        ))
    }

    pub fn non_constant_vector_index(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: non-constant vector insert/extract index"
        ))
    }

    pub fn vector_index_out_of_range(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: vector index out of range"
        ))
    }

    pub fn inline_asm_call(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: inline assembly"))
    }

    pub fn bad_call_attributes(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: bad call attributes"
        ))
    }

    pub fn invalid_memory_order(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: invalid memory order"))
    }

    pub fn invalid_atomic_rmw_operation(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: invalid atomicRMW operation"
        ))
    }

    pub fn invalid_atomic_lock_free_size(func: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: invalid atomic lock-free byte size"
        ))
    }

    pub fn arith_flag(func: &str, flag: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: has \"{flag}\" attribute"
        ))
    }

    pub fn bad_result_type(func: &str) -> Self {
        Self::error(format!("Function {func} disallowed: bad result type"))
    }

    pub fn disallowed_metadata(func: &str, kind: &str) -> Self {
        Self::error(format!(
            "Function {func} disallowed: metadata \"{kind}\" is disallowed"
        ))
    }
}

/// Accumulates diagnostics across a verification run.
#[derive(Debug, Clone)]
pub struct Reporter {
    diagnostics: Vec<Diagnostic>,
    fatal_threshold: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            diagnostics: Vec::new(),
            fatal_threshold: usize::MAX,
        }
    }

    /// A reporter that becomes fatal after `threshold` diagnostics have
    /// been recorded.
    #[must_use]
    pub fn with_fatal_threshold(threshold: usize) -> Self {
        Self {
            diagnostics: Vec::new(),
            fatal_threshold: threshold,
        }
    }

    pub fn report(&mut self, diagnostic: Diagnostic) {
        log::debug!("diagnostic: {diagnostic}");
        self.diagnostics.push(diagnostic);
    }

    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Whether the host-visible fatal threshold has been crossed. A
    /// library has no business calling `process::exit`; this just signals
    /// the caller that it may choose to stop invoking further passes.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        self.diagnostics.len() >= self.fatal_threshold
    }

    pub fn reset(&mut self) {
        self.diagnostics.clear();
    }
}
