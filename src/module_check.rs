//! The Module Checker (§4.3): globals, aliases, functions, and named
//! metadata, plus the module-wide entry-point invariant.

use crate::config::VerifierConfig;
use crate::diagnostics::{Diagnostic, Reporter};
use crate::intrinsics::IntrinsicLookup;
use crate::ir::{Constant, ConstantExpr, GlobalVariable, Module, Function};
use crate::schema::Linkage;

/// The sole external function symbol a program may start at.
const ENTRY_FUNCTION_SYMBOL: &str = "_start";
/// The alternative external-variable entry symbol used by the stable
/// initialization record.
const ENTRY_VARIABLE_SYMBOL: &str = "__pnacl_pso_root";

pub struct ModuleChecker<'a> {
    module: &'a Module,
    config: &'a VerifierConfig,
    reporter: &'a mut Reporter,
    seen_entry: bool,
}

impl<'a> ModuleChecker<'a> {
    pub fn new(module: &'a Module, config: &'a VerifierConfig, reporter: &'a mut Reporter) -> Self {
        Self {
            module,
            config,
            reporter,
            seen_entry: false,
        }
    }

    /// Runs the full module pass. Returns `true` if no diagnostic was
    /// recorded.
    pub fn run(&mut self) -> bool {
        log::debug!("module pass: checking {} globals", self.module.globals.len());
        for global in &self.module.globals {
            self.check_global(global);
        }
        for alias in &self.module.aliases {
            self.reporter.report(Diagnostic::variable_alias(&alias.name));
        }
        log::debug!("module pass: checking {} functions", self.module.functions.len());
        for function in &self.module.functions {
            self.check_function(function);
        }
        for nm in &self.module.named_metadata {
            let allowed = self.config.allow_debug_metadata && nm.name.starts_with("llvm.dbg.");
            if !allowed {
                self.reporter.report(Diagnostic::named_metadata(&nm.name));
            }
        }
        if self.module.inline_asm.is_some() {
            self.reporter.report(Diagnostic::top_level_inline_asm());
        }
        if !self.seen_entry {
            self.reporter.report(Diagnostic::no_entry_point());
        }
        !self.reporter.has_errors()
    }

    fn check_global(&mut self, global: &GlobalVariable) {
        let name = &global.attrs.name;
        if !global.attrs.linkage.is_allowed() {
            self.reporter.report(Diagnostic::variable_linkage(name));
            return;
        }
        if global.attrs.visibility != crate::schema::Visibility::Default {
            self.reporter
                .report(Diagnostic::variable_attr(name, "visibility"));
            return;
        }
        if global.attrs.section.is_some() {
            self.reporter.report(Diagnostic::variable_attr(name, "section"));
            return;
        }
        if global.attrs.address_space != 0 {
            self.reporter.report(Diagnostic::variable_attr(name, "addrspace"));
            return;
        }
        if global.attrs.unnamed_addr {
            self.reporter
                .report(Diagnostic::variable_attr(name, "unnamed_addr"));
            return;
        }
        if global.thread_local {
            self.reporter
                .report(Diagnostic::variable_attr(name, "thread_local"));
            return;
        }
        if global.externally_initialized {
            self.reporter
                .report(Diagnostic::variable_attr(name, "externally_initialized"));
            return;
        }
        self.check_entry(name, global.attrs.linkage, ENTRY_VARIABLE_SYMBOL);
        match &global.initializer {
            None => self.reporter.report(Diagnostic::variable_missing_initializer(name)),
            Some(init) => {
                if !is_flattened_initializer(init) {
                    self.reporter.report(Diagnostic::variable_bad_initializer(name));
                }
            }
        }
    }

    fn check_function(&mut self, function: &Function) {
        let name = &function.attrs.name;
        if !function.attrs.linkage.is_allowed() {
            self.reporter.report(Diagnostic::function_linkage(name));
            return;
        }
        if function.attrs.visibility != crate::schema::Visibility::Default {
            self.reporter
                .report(Diagnostic::function_attr(name, "visibility"));
            return;
        }
        if function.attrs.section.is_some() {
            self.reporter.report(Diagnostic::function_attr(name, "section"));
            return;
        }
        if function.attrs.address_space != 0 {
            self.reporter.report(Diagnostic::function_attr(name, "addrspace"));
            return;
        }
        if function.attrs.unnamed_addr {
            self.reporter
                .report(Diagnostic::function_attr(name, "unnamed_addr"));
            return;
        }
        if function.gc_name.is_some() {
            self.reporter.report(Diagnostic::function_attr(name, "gc"));
            return;
        }
        if function.attrs.alignment.is_some() {
            self.reporter.report(Diagnostic::function_attr(name, "align"));
            return;
        }

        if function.is_intrinsic() {
            self.check_intrinsic_function(function);
            return;
        }

        self.check_entry(name, function.attrs.linkage, ENTRY_FUNCTION_SYMBOL);

        if !crate::ir::is_valid_function_type(
            &self.module.types,
            match self.module.types.get(function.function_type) {
                crate::ir::Type::Function(ft) => ft,
                _ => return,
            },
        ) {
            self.reporter.report(Diagnostic::function_invalid_type(name));
            return;
        }
        if function.is_declaration() && !self.config.streaming_mode {
            self.reporter.report(Diagnostic::function_is_declaration(name));
            return;
        }
        if !function.attributes.is_empty() {
            self.reporter.report(Diagnostic::function_attr(name, "attributes"));
            return;
        }
        if !function.calling_conv.is_platform_default() {
            self.reporter
                .report(Diagnostic::function_attr(name, "calling_convention"));
        }
    }

    /// Intrinsic function declarations are recognized by name rather than
    /// `_start`/`__pnacl_pso_root`, so they are exempt from the entry-point
    /// trigger (an open question resolution: see `DESIGN.md`).
    fn check_intrinsic_function(&mut self, function: &Function) {
        let name = &function.attrs.name;
        let registry = crate::intrinsics::IntrinsicRegistry::new(self.config);
        match registry.lookup(name) {
            IntrinsicLookup::Admitted(kind) => {
                let sig = match self.module.types.get(function.function_type) {
                    crate::ir::Type::Function(ft) => ft,
                    _ => {
                        self.reporter
                            .report(Diagnostic::function_not_admissible_intrinsic(name));
                        return;
                    }
                };
                if !registry.is_admissible_signature(kind, &self.module.types, sig) {
                    self.reporter
                        .report(Diagnostic::function_not_admissible_intrinsic(name));
                }
            }
            IntrinsicLookup::Forbidden => {
                self.reporter.report(Diagnostic::function_forbidden_intrinsic(name));
            }
            IntrinsicLookup::Unrecognized => {
                self.reporter
                    .report(Diagnostic::function_not_admissible_intrinsic(name));
            }
        }
    }

    fn check_entry(&mut self, name: &str, linkage: Linkage, admitted_name: &str) {
        if linkage != Linkage::External {
            return;
        }
        if name != admitted_name {
            self.reporter.report(Diagnostic::not_valid_external_symbol(name));
            return;
        }
        if self.seen_entry {
            self.reporter.report(Diagnostic::multiple_entry_points());
        } else {
            self.seen_entry = true;
        }
    }
}

/// A `SimpleElement` is a data array, or one of the two admitted
/// `ptrtoint`-rooted expressions. A `CompoundElement` is a packed struct of
/// at least two `SimpleElement`s (§4.3).
fn is_flattened_initializer(constant: &Constant) -> bool {
    is_simple_element(constant) || is_compound_element(constant)
}

fn is_simple_element(constant: &Constant) -> bool {
    match constant {
        Constant::DataArray { .. } => true,
        Constant::Expr(ConstantExpr::PtrToInt(_) | ConstantExpr::AddPtrToIntConst(_, _)) => true,
        _ => false,
    }
}

fn is_compound_element(constant: &Constant) -> bool {
    match constant {
        Constant::PackedStruct(fields) => {
            fields.len() >= 2 && fields.iter().all(is_simple_element)
        }
        _ => false,
    }
}
