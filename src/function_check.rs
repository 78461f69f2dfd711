//! The Function Checker (§4.4): per-instruction opcode, operand, pointer,
//! alignment, and result-type rules.
//!
//! Each instruction produces at most one diagnostic (first-match-wins per
//! phase, §7); checking continues with the next instruction regardless, so
//! a single run surfaces every independent violation in a function.

use crate::config::VerifierConfig;
use crate::diagnostics::{Diagnostic, Reporter};
use crate::intrinsics::IntrinsicKind;
use crate::ir::{
    is_i1, is_valid_pointer_type, is_valid_scalar_type, is_valid_vector_type, scalar_byte_size,
    BlockId, Constant, Function, InstFlags, InstId, Instruction, Module, Opcode, Operand, Type,
    TypeArena, TypeId,
};
use crate::pointer::{call_callee_function, is_inherent_ptr, is_normalized_ptr};
use crate::schema::AtomicOrdering;

enum Class {
    Forbidden,
    Allowed,
    Constrained,
    Unknown,
}

fn classify_opcode(opcode: Opcode) -> Class {
    match opcode {
        Opcode::GetElementPtr
        | Opcode::VaArg
        | Opcode::Invoke
        | Opcode::LandingPad
        | Opcode::Resume
        | Opcode::IndirectBr
        | Opcode::ShuffleVector
        | Opcode::ExtractValue
        | Opcode::InsertValue
        | Opcode::AtomicCmpXchg
        | Opcode::AtomicRMW
        | Opcode::Fence => Class::Forbidden,
        Opcode::Unknown(_) => Class::Unknown,
        Opcode::Ret
        | Opcode::Br
        | Opcode::Unreachable
        | Opcode::FAdd
        | Opcode::FSub
        | Opcode::FMul
        | Opcode::FDiv
        | Opcode::FRem
        | Opcode::And
        | Opcode::Or
        | Opcode::Xor
        | Opcode::Trunc
        | Opcode::ZExt
        | Opcode::SExt
        | Opcode::FPTrunc
        | Opcode::FPExt
        | Opcode::FPToUI
        | Opcode::FPToSI
        | Opcode::UIToFP
        | Opcode::SIToFP
        | Opcode::FCmp
        | Opcode::Phi
        | Opcode::Select => Class::Allowed,
        Opcode::ICmp
        | Opcode::Add
        | Opcode::Sub
        | Opcode::Mul
        | Opcode::UDiv
        | Opcode::SDiv
        | Opcode::URem
        | Opcode::SRem
        | Opcode::Shl
        | Opcode::LShr
        | Opcode::AShr
        | Opcode::ExtractElement
        | Opcode::InsertElement
        | Opcode::Load
        | Opcode::Store
        | Opcode::BitCast
        | Opcode::IntToPtr
        | Opcode::PtrToInt
        | Opcode::Alloca
        | Opcode::Call
        | Opcode::Switch => Class::Constrained,
    }
}

/// Whether the instruction is entirely handled by its opcode-specific check
/// and should never reach the generic operand/result-type phases.
enum Outcome {
    /// Proceed to phases (c)/(d); operands at the listed indices were
    /// already validated and should be skipped by the generic loop.
    Continue(Vec<usize>),
    /// Instruction fully handled; stop.
    Bypass,
    /// A diagnostic was already reported; stop.
    Fail,
}

pub struct FunctionChecker<'a> {
    module: &'a Module,
    config: &'a VerifierConfig,
    reporter: &'a mut Reporter,
}

impl<'a> FunctionChecker<'a> {
    pub fn new(module: &'a Module, config: &'a VerifierConfig, reporter: &'a mut Reporter) -> Self {
        Self {
            module,
            config,
            reporter,
        }
    }

    fn types(&self) -> &TypeArena {
        &self.module.types
    }

    pub fn check_function(&mut self, func: &Function) {
        log::debug!("function pass: checking {}", func.attrs.name);
        for (block_idx, block) in func.blocks.iter().enumerate() {
            let block_id = BlockId(block_idx as u32);
            for (inst_idx, inst) in block.instructions.iter().enumerate() {
                let id = InstId {
                    block: block_id,
                    index: inst_idx as u32,
                };
                self.check_instruction(func, id, inst);
            }
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        self.reporter.report(diagnostic);
    }

    fn check_instruction(&mut self, func: &Function, _id: InstId, inst: &Instruction) {
        let name = &func.attrs.name;
        match classify_opcode(inst.opcode) {
            Class::Forbidden => {
                self.report(Diagnostic::bad_opcode(name, inst.opcode.name()));
                return;
            }
            Class::Unknown => {
                self.report(Diagnostic::unknown_opcode(name));
                return;
            }
            Class::Allowed | Class::Constrained => {}
        }

        let excluded = match self.check_opcode_specific(func, inst) {
            Outcome::Fail => return,
            Outcome::Bypass => return,
            Outcome::Continue(excluded) => excluded,
        };

        for (idx, op) in inst.operands.iter().enumerate() {
            if excluded.contains(&idx) {
                continue;
            }
            if !self.is_valid_generic_operand(func, op) {
                self.report(Diagnostic::bad_operand(name));
                return;
            }
        }

        if !self.check_result_type(inst) {
            self.report(Diagnostic::bad_result_type(name));
            return;
        }
        self.check_metadata(func, inst);
    }

    fn check_opcode_specific(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        match inst.opcode {
            Opcode::ICmp
            | Opcode::Add
            | Opcode::Sub
            | Opcode::Mul
            | Opcode::UDiv
            | Opcode::SDiv
            | Opcode::URem
            | Opcode::SRem
            | Opcode::Shl
            | Opcode::LShr
            | Opcode::AShr => self.check_binary_op(func, inst),
            Opcode::ExtractElement | Opcode::InsertElement => self.check_vector_index(func, inst),
            Opcode::Load | Opcode::Store => self.check_load_store(func, inst),
            Opcode::BitCast => self.check_bitcast(func, inst),
            Opcode::IntToPtr => self.check_inttoptr(func, inst),
            Opcode::PtrToInt => self.check_ptrtoint(func, inst),
            Opcode::Alloca => self.check_alloca(func, inst),
            Opcode::Call => self.check_call(func, inst),
            Opcode::Switch => self.check_switch(func, inst),
            _ => Outcome::Continue(Vec::new()),
        }
    }

    fn operand_type(&self, func: &Function, op: &Operand) -> Option<TypeId> {
        match op {
            Operand::Inst(id) => func.instruction(*id).result_type,
            Operand::Arg(idx) => func.param_type(*idx, self.types()),
            Operand::Const(c) => c.type_id(),
            Operand::Global(_) | Operand::Block(_) | Operand::Metadata(_) => None,
        }
    }

    fn is_valid_generic_operand(&self, func: &Function, op: &Operand) -> bool {
        match op {
            Operand::Inst(_) | Operand::Arg(_) | Operand::Block(_) => true,
            Operand::Const(Constant::Int { ty, .. } | Constant::Float { ty, .. }) => {
                is_valid_scalar_type(self.types().get(*ty))
            }
            Operand::Const(Constant::Undef(ty)) => {
                let t = self.types().get(*ty);
                is_valid_scalar_type(t) || is_valid_vector_type(self.types(), t)
            }
            _ => false,
        }
    }

    fn check_binary_op(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = func.attrs.name.clone();
        let operand_ty = inst
            .operands
            .first()
            .and_then(|op0| self.operand_type(func, op0))
            .map(|ty| self.types().get(ty).clone());
        match operand_ty {
            Some(Type::Integer(1)) => {
                self.report(Diagnostic::arithmetic_on_i1(&name));
                return Outcome::Fail;
            }
            Some(Type::Vector { element, .. }) if is_i1(self.types().get(element)) => {
                self.report(Diagnostic::arithmetic_on_vector_of_i1(&name));
                return Outcome::Fail;
            }
            _ => {}
        }
        if inst.flags.contains(InstFlags::NUW) {
            self.report(Diagnostic::arith_flag(&name, "nuw"));
            return Outcome::Fail;
        }
        if inst.flags.contains(InstFlags::NSW) {
            self.report(Diagnostic::arith_flag(&name, "nsw"));
            return Outcome::Fail;
        }
        if matches!(inst.opcode, Opcode::UDiv | Opcode::SDiv | Opcode::LShr | Opcode::AShr)
            && inst.flags.contains(InstFlags::EXACT)
        {
            self.report(Diagnostic::arith_flag(&name, "exact"));
            return Outcome::Fail;
        }
        Outcome::Continue(Vec::new())
    }

    fn check_vector_index(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        let Some(index_op) = inst.operands.last() else {
            self.report(Diagnostic::non_constant_vector_index(name));
            return Outcome::Fail;
        };
        let Operand::Const(Constant::Int { value, .. }) = index_op else {
            self.report(Diagnostic::non_constant_vector_index(name));
            return Outcome::Fail;
        };
        let vector_op = inst.operands.first();
        let len = vector_op
            .and_then(|op| self.operand_type(func, op))
            .map(|ty| self.types().get(ty))
            .and_then(|ty| match ty {
                Type::Vector { len, .. } => Some(*len),
                _ => None,
            });
        match len {
            Some(len) if *value < u64::from(len) => {
                Outcome::Continue(vec![inst.operands.len() - 1])
            }
            _ => {
                self.report(Diagnostic::vector_index_out_of_range(name));
                Outcome::Fail
            }
        }
    }

    fn check_load_store(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        if inst.flags.contains(InstFlags::ATOMIC) || inst.flags.contains(InstFlags::VOLATILE) {
            self.report(Diagnostic::bad_pointer(name));
            return Outcome::Fail;
        }
        let ptr_idx = if inst.opcode == Opcode::Load { 0 } else { 1 };
        let Some(ptr_op) = inst.operands.get(ptr_idx) else {
            self.report(Diagnostic::bad_pointer(name));
            return Outcome::Fail;
        };
        if !is_normalized_ptr(self.module, func, self.types(), ptr_op) {
            self.report(Diagnostic::bad_pointer(name));
            return Outcome::Fail;
        }
        let accessed_ty = if inst.opcode == Opcode::Load {
            inst.result_type
        } else {
            inst.operands.first().and_then(|op| self.operand_type(func, op))
        };
        let (Some(accessed_ty), Some(align)) = (accessed_ty, inst.alignment) else {
            self.report(Diagnostic::bad_alignment(name));
            return Outcome::Fail;
        };
        if !self.allowed_alignment(accessed_ty, align) {
            self.report(Diagnostic::bad_alignment(name));
            return Outcome::Fail;
        }
        Outcome::Continue(vec![ptr_idx])
    }

    fn allowed_alignment(&self, ty: TypeId, align: u32) -> bool {
        if u64::from(align) > u64::MAX / 8 {
            return false;
        }
        match self.types().get(ty) {
            Type::Vector { element, .. } => {
                let element = self.types().get(*element);
                if is_i1(element) {
                    return false;
                }
                scalar_byte_size(element) == Some(align)
            }
            Type::Double => align == 1 || align == 8,
            Type::Float => align == 1 || align == 4,
            _ => align == 1,
        }
    }

    fn check_bitcast(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        let is_ptr_result = inst
            .result_type
            .is_some_and(|t| is_valid_pointer_type(self.types(), t));
        if !is_ptr_result {
            return Outcome::Continue(Vec::new());
        }
        let Some(src) = inst.operands.first() else {
            self.report(Diagnostic::operand_not_inherent_ptr(name));
            return Outcome::Fail;
        };
        if is_inherent_ptr(self.module, func, src) {
            Outcome::Continue(vec![0])
        } else {
            self.report(Diagnostic::operand_not_inherent_ptr(name));
            Outcome::Fail
        }
    }

    fn check_inttoptr(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        let Some(src) = inst.operands.first() else {
            self.report(Diagnostic::non_i32_inttoptr(name));
            return Outcome::Fail;
        };
        match self.operand_type(func, src) {
            Some(ty)
                if matches!(self.types().get(ty), Type::Integer(32))
                    && self.is_valid_generic_operand(func, src) =>
            {
                Outcome::Continue(vec![0])
            }
            _ => {
                self.report(Diagnostic::non_i32_inttoptr(name));
                Outcome::Fail
            }
        }
    }

    fn check_ptrtoint(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        let Some(src) = inst.operands.first() else {
            self.report(Diagnostic::operand_not_inherent_ptr(name));
            return Outcome::Fail;
        };
        if !is_inherent_ptr(self.module, func, src) {
            self.report(Diagnostic::operand_not_inherent_ptr(name));
            return Outcome::Fail;
        }
        match inst.result_type {
            Some(ty) if matches!(self.types().get(ty), Type::Integer(32)) => {
                Outcome::Continue(vec![0])
            }
            _ => {
                self.report(Diagnostic::non_i32_ptrtoint(name));
                Outcome::Fail
            }
        }
    }

    fn check_alloca(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        let Some(size_op) = inst.operands.first() else {
            self.report(Diagnostic::bad_operand(name));
            return Outcome::Fail;
        };
        match self.operand_type(func, size_op) {
            Some(ty) if matches!(self.types().get(ty), Type::Integer(32)) => {
                Outcome::Continue(Vec::new())
            }
            _ => {
                self.report(Diagnostic::bad_operand(name));
                Outcome::Fail
            }
        }
    }

    fn check_switch(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        let Some(cond) = inst.operands.first() else {
            self.report(Diagnostic::bad_switch_condition(name));
            return Outcome::Fail;
        };
        let ok_cond = self
            .operand_type(func, cond)
            .is_some_and(|ty| matches!(self.types().get(ty), Type::Integer(w) if *w >= 8))
            && self.is_valid_generic_operand(func, cond);
        if !ok_cond {
            self.report(Diagnostic::bad_switch_condition(name));
            return Outcome::Fail;
        }
        for case in &inst.operands[1..] {
            if !matches!(case, Operand::Const(Constant::Int { .. })) {
                self.report(Diagnostic::bad_switch_case(name));
                return Outcome::Fail;
            }
        }
        // §4.4.2: only the generic operand check is bypassed for `switch` —
        // result type (d) and attached-metadata admission (§4.4.9) still run.
        Outcome::Continue((0..inst.operands.len()).collect())
    }

    fn check_call(&mut self, func: &Function, inst: &Instruction) -> Outcome {
        let name = &func.attrs.name;
        if inst.is_inline_asm_call {
            self.report(Diagnostic::inline_asm_call(name));
            return Outcome::Fail;
        }
        if !inst.attributes.is_empty() {
            self.report(Diagnostic::bad_call_attributes(name));
            return Outcome::Fail;
        }
        if inst.call_conv.is_some_and(|cc| !cc.is_platform_default()) {
            self.report(Diagnostic::bad_call_attributes(name));
            return Outcome::Fail;
        }
        let Some(callee) = inst.operands.last() else {
            self.report(Diagnostic::bad_callee_operand(name));
            return Outcome::Fail;
        };
        let callee_fn = call_callee_function(self.module, Some(callee));
        // Invoking an intrinsic by its direct name isn't "taking its address"
        // (§4.4.3's InherentPtr exclusion targets the latter) — a call's callee
        // position is exempt from the generic NormalizedPtr gate when it names
        // an intrinsic directly, or §4.4.5 could never run.
        let callee_is_direct_intrinsic = callee_fn.is_some_and(|f| f.is_intrinsic());
        if !callee_is_direct_intrinsic && !is_normalized_ptr(self.module, func, self.types(), callee)
        {
            self.report(Diagnostic::bad_callee_operand(name));
            return Outcome::Fail;
        }
        if let Some(callee_fn) = callee_fn {
            if callee_fn.is_intrinsic() {
                return self.check_intrinsic_call(func, inst, callee_fn);
            }
        }
        Outcome::Continue(vec![inst.operands.len() - 1])
    }

    fn check_intrinsic_call(
        &mut self,
        func: &Function,
        inst: &Instruction,
        callee: &Function,
    ) -> Outcome {
        let name = &func.attrs.name;
        let args = &inst.operands[..inst.operands.len() - 1];
        for arg in args {
            let valid = self.is_valid_generic_operand(func, arg)
                || is_normalized_ptr(self.module, func, self.types(), arg)
                || matches!(arg, Operand::Metadata(_));
            if !valid {
                self.report(Diagnostic::bad_intrinsic_operand(name));
                return Outcome::Fail;
            }
        }
        let Some(kind) = callee.intrinsic_kind else {
            return Outcome::Bypass;
        };
        if kind.is_memory_intrinsic() {
            match args.get(3) {
                Some(Operand::Const(Constant::Int { value, .. })) if *value == 1 => {}
                _ => {
                    self.report(Diagnostic::bad_alignment(name));
                    return Outcome::Fail;
                }
            }
        }
        if kind.is_atomic() {
            if kind == IntrinsicKind::AtomicRmw && !Self::rmw_operation_ok(args) {
                self.report(Diagnostic::invalid_atomic_rmw_operation(name));
                return Outcome::Fail;
            }
            if !self.atomic_orders_ok(kind, args) {
                self.report(Diagnostic::invalid_memory_order(name));
                return Outcome::Fail;
            }
        }
        if kind == IntrinsicKind::IsLockFree {
            let ok_size = matches!(
                args.first(),
                Some(Operand::Const(Constant::Int { value, .. })) if matches!(value, 1 | 2 | 4 | 8)
            );
            if !ok_size {
                self.report(Diagnostic::invalid_atomic_lock_free_size(name));
                return Outcome::Fail;
            }
        }
        Outcome::Bypass
    }

    fn order_at(args: &[Operand], idx: usize) -> bool {
        matches!(
            args.get(idx),
            Some(Operand::Const(Constant::Int { value, .. }))
                if u8::try_from(*value)
                    .ok()
                    .and_then(|v| AtomicOrdering::try_from(v).ok())
                    .is_some_and(AtomicOrdering::is_admitted)
        )
    }

    fn rmw_operation_ok(args: &[Operand]) -> bool {
        matches!(
            args.first(),
            Some(Operand::Const(Constant::Int { value, .. }))
                if u8::try_from(*value)
                    .ok()
                    .and_then(|v| crate::schema::RmwOperation::try_from(v).ok())
                    .is_some()
        )
    }

    /// Validates the positional memory-order parameters of an atomic
    /// intrinsic call (§4.4.5 rule 3). Position conventions are this
    /// crate's own (the spec leaves exact positions to the dialect); see
    /// `DESIGN.md`.
    fn atomic_orders_ok(&self, kind: IntrinsicKind, args: &[Operand]) -> bool {
        match kind {
            IntrinsicKind::AtomicLoad => Self::order_at(args, 1),
            IntrinsicKind::AtomicStore => Self::order_at(args, 2),
            IntrinsicKind::AtomicRmw => Self::order_at(args, 3),
            IntrinsicKind::AtomicCmpxchg => Self::order_at(args, 3) && Self::order_at(args, 4),
            IntrinsicKind::Fence | IntrinsicKind::FenceAll => Self::order_at(args, 0),
            _ => true,
        }
    }

    fn check_result_type(&self, inst: &Instruction) -> bool {
        let Some(ty) = inst.result_type else {
            return true;
        };
        let t = self.types().get(ty);
        if is_valid_scalar_type(t) || is_valid_vector_type(self.types(), t) {
            return true;
        }
        match inst.opcode {
            Opcode::Alloca => matches!(
                t,
                Type::Pointer { pointee, address_space: 0 }
                    if matches!(self.types().get(*pointee), Type::Integer(8))
            ),
            Opcode::BitCast | Opcode::IntToPtr => is_valid_pointer_type(self.types(), ty),
            _ => false,
        }
    }

    fn check_metadata(&mut self, func: &Function, inst: &Instruction) {
        let name = &func.attrs.name;
        for (kind, _id) in &inst.metadata {
            if kind != "dbg" || !self.config.allow_debug_metadata {
                self.report(Diagnostic::disallowed_metadata(name, kind));
            }
        }
    }
}
