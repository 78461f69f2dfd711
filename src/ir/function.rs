//! Functions, basic blocks, and instructions (§3, §4.4).

use bitflags::bitflags;

use crate::intrinsics::IntrinsicKind;
use crate::schema::CallConv;

use super::module::GlobalAttrs;
use super::types::{FunctionType, Type, TypeArena, TypeId};
use super::value::{MetadataId, Operand};

bitflags! {
    /// Arithmetic and memory-access flags an instruction may carry. Every
    /// flag here is forbidden somewhere in the stable subset (§4.4.7); the
    /// type exists so the function checker can name which one fired rather
    /// than rejecting the instruction as a whole with no detail.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct InstFlags: u16 {
        const NUW      = 1 << 0;
        const NSW      = 1 << 1;
        const EXACT    = 1 << 2;
        const VOLATILE = 1 << 3;
        const ATOMIC   = 1 << 4;
    }
}

/// An instruction opcode.
///
/// `Unknown` models the default arm of the dense switch the function
/// checker runs over opcodes: a loader may hand the verifier an opcode this
/// enum has no variant for, and that must be rejected the same way an
/// opcode that is recognized but always-forbidden is (§4.4.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Ret,
    Br,
    Switch,
    Unreachable,
    IndirectBr,
    Invoke,
    Resume,

    Alloca,
    Load,
    Store,
    GetElementPtr,

    Trunc,
    ZExt,
    SExt,
    FPTrunc,
    FPExt,
    FPToUI,
    FPToSI,
    UIToFP,
    SIToFP,
    BitCast,
    PtrToInt,
    IntToPtr,

    Add,
    Sub,
    Mul,
    UDiv,
    SDiv,
    URem,
    SRem,
    Shl,
    LShr,
    AShr,
    And,
    Or,
    Xor,
    FAdd,
    FSub,
    FMul,
    FDiv,
    FRem,

    ICmp,
    FCmp,

    ExtractElement,
    InsertElement,
    ShuffleVector,
    ExtractValue,
    InsertValue,

    AtomicCmpXchg,
    AtomicRMW,
    Fence,
    VaArg,
    LandingPad,

    Phi,
    Select,
    Call,

    Unknown(u32),
}

impl Opcode {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Opcode::Ret => "ret",
            Opcode::Br => "br",
            Opcode::Switch => "switch",
            Opcode::Unreachable => "unreachable",
            Opcode::IndirectBr => "indirectbr",
            Opcode::Invoke => "invoke",
            Opcode::Resume => "resume",
            Opcode::Alloca => "alloca",
            Opcode::Load => "load",
            Opcode::Store => "store",
            Opcode::GetElementPtr => "getelementptr",
            Opcode::Trunc => "trunc",
            Opcode::ZExt => "zext",
            Opcode::SExt => "sext",
            Opcode::FPTrunc => "fptrunc",
            Opcode::FPExt => "fpext",
            Opcode::FPToUI => "fptoui",
            Opcode::FPToSI => "fptosi",
            Opcode::UIToFP => "uitofp",
            Opcode::SIToFP => "sitofp",
            Opcode::BitCast => "bitcast",
            Opcode::PtrToInt => "ptrtoint",
            Opcode::IntToPtr => "inttoptr",
            Opcode::Add => "add",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::UDiv => "udiv",
            Opcode::SDiv => "sdiv",
            Opcode::URem => "urem",
            Opcode::SRem => "srem",
            Opcode::Shl => "shl",
            Opcode::LShr => "lshr",
            Opcode::AShr => "ashr",
            Opcode::And => "and",
            Opcode::Or => "or",
            Opcode::Xor => "xor",
            Opcode::FAdd => "fadd",
            Opcode::FSub => "fsub",
            Opcode::FMul => "fmul",
            Opcode::FDiv => "fdiv",
            Opcode::FRem => "frem",
            Opcode::ICmp => "icmp",
            Opcode::FCmp => "fcmp",
            Opcode::ExtractElement => "extractelement",
            Opcode::InsertElement => "insertelement",
            Opcode::ShuffleVector => "shufflevector",
            Opcode::ExtractValue => "extractvalue",
            Opcode::InsertValue => "insertvalue",
            Opcode::AtomicCmpXchg => "cmpxchg",
            Opcode::AtomicRMW => "atomicrmw",
            Opcode::Fence => "fence",
            Opcode::VaArg => "va_arg",
            Opcode::LandingPad => "landingpad",
            Opcode::Phi => "phi",
            Opcode::Select => "select",
            Opcode::Call => "call",
            Opcode::Unknown(_) => "<unknown>",
        }
    }
}

/// One instruction within a basic block.
///
/// Operand order is opcode-specific and documented per opcode in
/// `function_check`; this mirrors how a loader would lay out a record's
/// fields rather than giving every instruction kind its own Rust type.
#[derive(Debug, Clone)]
pub struct Instruction {
    pub opcode: Opcode,
    pub operands: Vec<Operand>,
    /// `None` for instructions that produce no value (`ret`, `br`, `store`,
    /// `switch`, `unreachable`, `fence`-like forms).
    pub result_type: Option<TypeId>,
    pub flags: InstFlags,
    /// `load`/`store` alignment, in bytes.
    pub alignment: Option<u32>,
    /// Calling convention named at a `call` site (distinct from the
    /// callee's own declared convention).
    pub call_conv: Option<CallConv>,
    /// Non-empty only when the host attaches function-call attributes to a
    /// `call` instruction; the stable subset forbids any (§4.4.2).
    pub attributes: Vec<String>,
    pub is_inline_asm_call: bool,
    pub metadata: Vec<(String, MetadataId)>,
}

impl Instruction {
    #[must_use]
    pub fn new(opcode: Opcode, operands: Vec<Operand>) -> Self {
        Self {
            opcode,
            operands,
            result_type: None,
            flags: InstFlags::empty(),
            alignment: None,
            call_conv: None,
            attributes: Vec::new(),
            is_inline_asm_call: false,
            metadata: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct BasicBlock {
    pub name: Option<String>,
    pub instructions: Vec<Instruction>,
}

#[derive(Debug, Clone)]
pub struct Function {
    pub attrs: GlobalAttrs,
    /// Interned `Type::Function` describing this function's signature.
    pub function_type: TypeId,
    pub calling_conv: CallConv,
    pub gc_name: Option<String>,
    /// Function-level attributes (`noinline`, `alignstack`, ...); the
    /// stable subset forbids any being present (§4.3 rule 5).
    pub attributes: Vec<String>,
    pub intrinsic_kind: Option<IntrinsicKind>,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    #[must_use]
    pub fn is_declaration(&self) -> bool {
        self.blocks.is_empty()
    }

    #[must_use]
    pub fn is_intrinsic(&self) -> bool {
        self.intrinsic_kind.is_some()
    }

    #[must_use]
    pub fn instruction(&self, id: super::value::InstId) -> &Instruction {
        &self.blocks[id.block.0 as usize].instructions[id.index as usize]
    }

    /// The type of the `idx`-th parameter, resolved through `arena`.
    #[must_use]
    pub fn param_type(&self, idx: u32, arena: &TypeArena) -> Option<TypeId> {
        match arena.get(self.function_type) {
            Type::Function(FunctionType { params, .. }) => params.get(idx as usize).copied(),
            _ => None,
        }
    }

    #[must_use]
    pub fn signature<'a>(&self, arena: &'a TypeArena) -> Option<&'a FunctionType> {
        match arena.get(self.function_type) {
            Type::Function(ft) => Some(ft),
            _ => None,
        }
    }
}
