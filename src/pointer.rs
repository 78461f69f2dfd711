//! Pointer-form classification (§4.4.3).
//!
//! `InherentPtr` is the set of values a pointer can originate from:
//! an `alloca` result, a reference to a non-intrinsic global, or the result
//! of a call to an intrinsic that returns a pointer. `NormalizedPtr` widens
//! that set with the two casts allowed to carry a pointer forward:
//! `inttoptr` and `bitcast`, when their own result type is a valid pointer
//! type. Constant expressions, `null`, and `undef` are excluded from both —
//! a conforming module never uses them as a pointer operand.

use crate::ir::{Function, GlobalRef, Module, Opcode, Operand, TypeArena};

/// A value produced directly by `alloca`, by naming a non-intrinsic global,
/// or by calling an intrinsic that returns a pointer.
#[must_use]
pub fn is_inherent_ptr(module: &Module, func: &Function, op: &Operand) -> bool {
    match op {
        Operand::Inst(id) => {
            let inst = func.instruction(*id);
            match inst.opcode {
                Opcode::Alloca => true,
                Opcode::Call => call_callee_function(module, inst.operands.last())
                    .is_some_and(|callee| callee.is_intrinsic()),
                _ => false,
            }
        }
        Operand::Global(GlobalRef::Variable(_)) => true,
        Operand::Global(GlobalRef::Function(idx)) => {
            !module.functions[*idx as usize].is_intrinsic()
        }
        _ => false,
    }
}

/// `InherentPtr`, plus the result of `inttoptr`/`bitcast` when that result
/// is itself a valid pointer type.
#[must_use]
pub fn is_normalized_ptr(module: &Module, func: &Function, types: &TypeArena, op: &Operand) -> bool {
    if is_inherent_ptr(module, func, op) {
        return true;
    }
    match op {
        Operand::Inst(id) => {
            let inst = func.instruction(*id);
            matches!(inst.opcode, Opcode::IntToPtr | Opcode::BitCast)
                && inst
                    .result_type
                    .is_some_and(|t| crate::ir::is_valid_pointer_type(types, t))
        }
        _ => false,
    }
}

/// Resolves a `call`'s callee operand to the `Function` it names, if the
/// callee is a direct reference to a module-scope function.
#[must_use]
pub fn call_callee_function<'m>(module: &'m Module, callee: Option<&Operand>) -> Option<&'m Function> {
    match callee {
        Some(Operand::Global(GlobalRef::Function(idx))) => {
            module.functions.get(*idx as usize)
        }
        _ => None,
    }
}
