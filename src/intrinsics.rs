//! The Intrinsic Registry (§4.2): the fixed table of admissible
//! `(kind, signature)` pairs, plus the explicit deny-list used to give a
//! sharper diagnostic than "unrecognized" to the intrinsics this dialect is
//! known to forbid.
//!
//! A loader names an intrinsic by its fully-qualified `llvm.*` name; the
//! registry's job is to map that name to a [`IntrinsicKind`] (or reject it)
//! and then check the call site's resolved signature against the shape that
//! kind admits.

use crate::config::VerifierConfig;
use crate::ir::{FunctionType, Type, TypeArena};

/// A recognized, admissible intrinsic kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrinsicKind {
    Bswap,
    Ctlz,
    Cttz,
    Ctpop,
    ReadThreadPointer,
    Setjmp,
    Longjmp,
    Sqrt,
    AtomicLoad,
    AtomicStore,
    AtomicRmw,
    AtomicCmpxchg,
    Fence,
    FenceAll,
    IsLockFree,
    Stacksave,
    Stackrestore,
    Trap,
    Memcpy,
    Memmove,
    Memset,
    DbgDeclare,
    DbgValue,
}

impl IntrinsicKind {
    #[must_use]
    pub fn is_atomic(self) -> bool {
        matches!(
            self,
            Self::AtomicLoad
                | Self::AtomicStore
                | Self::AtomicRmw
                | Self::AtomicCmpxchg
                | Self::Fence
                | Self::FenceAll
        )
    }

    #[must_use]
    pub fn is_memory_intrinsic(self) -> bool {
        matches!(self, Self::Memcpy | Self::Memmove | Self::Memset)
    }

    #[must_use]
    pub fn is_debug(self) -> bool {
        matches!(self, Self::DbgDeclare | Self::DbgValue)
    }
}

/// Result of resolving a function name against the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntrinsicLookup {
    Admitted(IntrinsicKind),
    /// Recognized by name, but named on the explicit deny-list (§4.2:
    /// "forbidden deny-list").
    Forbidden,
    Unrecognized,
}

/// Name prefixes admitted into the registry. Matching is by prefix because
/// LLVM intrinsic names carry an overload suffix (`llvm.bswap.i32`).
const ADMITTED: &[(&str, IntrinsicKind)] = &[
    ("llvm.bswap", IntrinsicKind::Bswap),
    ("llvm.ctlz", IntrinsicKind::Ctlz),
    ("llvm.cttz", IntrinsicKind::Cttz),
    ("llvm.ctpop", IntrinsicKind::Ctpop),
    ("llvm.nacl.read.tp", IntrinsicKind::ReadThreadPointer),
    ("llvm.nacl.setjmp", IntrinsicKind::Setjmp),
    ("llvm.nacl.longjmp", IntrinsicKind::Longjmp),
    ("llvm.sqrt", IntrinsicKind::Sqrt),
    ("llvm.nacl.atomic.load", IntrinsicKind::AtomicLoad),
    ("llvm.nacl.atomic.store", IntrinsicKind::AtomicStore),
    ("llvm.nacl.atomic.rmw", IntrinsicKind::AtomicRmw),
    ("llvm.nacl.atomic.cmpxchg", IntrinsicKind::AtomicCmpxchg),
    ("llvm.nacl.atomic.fence.all", IntrinsicKind::FenceAll),
    ("llvm.nacl.atomic.fence", IntrinsicKind::Fence),
    ("llvm.nacl.atomic.is.lock.free", IntrinsicKind::IsLockFree),
    ("llvm.stacksave", IntrinsicKind::Stacksave),
    ("llvm.stackrestore", IntrinsicKind::Stackrestore),
    ("llvm.trap", IntrinsicKind::Trap),
    ("llvm.memcpy", IntrinsicKind::Memcpy),
    ("llvm.memmove", IntrinsicKind::Memmove),
    ("llvm.memset", IntrinsicKind::Memset),
    ("llvm.dbg.declare", IntrinsicKind::DbgDeclare),
    ("llvm.dbg.value", IntrinsicKind::DbgValue),
];

/// Intrinsics named explicitly so the registry can say "forbidden" instead
/// of "unrecognized" (§4.2).
const FORBIDDEN: &[&str] = &[
    "llvm.init.trampoline",
    "llvm.adjust.trampoline",
    "llvm.eh.",
    "llvm.frameaddress",
    "llvm.returnaddress",
    "llvm.stackprotector",
    "llvm.stackguard",
    "llvm.va_start",
    "llvm.va_end",
    "llvm.va_copy",
    "llvm.sadd.with.overflow",
    "llvm.uadd.with.overflow",
    "llvm.ssub.with.overflow",
    "llvm.usub.with.overflow",
    "llvm.smul.with.overflow",
    "llvm.umul.with.overflow",
    "llvm.lifetime.start",
    "llvm.lifetime.end",
    "llvm.invariant.start",
    "llvm.invariant.end",
    "llvm.cos",
    "llvm.sin",
    "llvm.exp",
    "llvm.log",
    "llvm.pow",
    "llvm.expect",
    "llvm.flt.rounds",
];

/// The intrinsic registry. Holds only the configuration that gates debug
/// intrinsics — built once per verification run, per §4.2.
#[derive(Debug, Clone, Copy)]
pub struct IntrinsicRegistry {
    allow_debug_metadata: bool,
}

impl IntrinsicRegistry {
    #[must_use]
    pub fn new(config: &VerifierConfig) -> Self {
        Self {
            allow_debug_metadata: config.allow_debug_metadata,
        }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> IntrinsicLookup {
        for (prefix, kind) in ADMITTED {
            if name.starts_with(prefix) {
                if kind.is_debug() && !self.allow_debug_metadata {
                    return IntrinsicLookup::Forbidden;
                }
                return IntrinsicLookup::Admitted(*kind);
            }
        }
        if FORBIDDEN.iter().any(|prefix| name.starts_with(prefix)) {
            return IntrinsicLookup::Forbidden;
        }
        IntrinsicLookup::Unrecognized
    }

    /// Whether `sig` is a shape the registry admits for `kind`. Intrinsics
    /// with platform-specific signatures (`setjmp`, thread pointer, stack
    /// save/restore, trap, fences, debug markers) are only checked for
    /// arity; the ones with a well-defined overload set are checked for it
    /// exactly.
    #[must_use]
    pub fn is_admissible_signature(
        &self,
        kind: IntrinsicKind,
        arena: &TypeArena,
        sig: &FunctionType,
    ) -> bool {
        if sig.is_var_arg {
            return false;
        }
        match kind {
            IntrinsicKind::Bswap => single_param_matches_return(arena, sig, &[16, 32, 64]),
            IntrinsicKind::Ctlz | IntrinsicKind::Cttz | IntrinsicKind::Ctpop => {
                single_param_matches_return(arena, sig, &[32, 64])
            }
            IntrinsicKind::Sqrt => is_float_unary(arena, sig),
            IntrinsicKind::Memcpy | IntrinsicKind::Memmove | IntrinsicKind::Memset => {
                sig.params.len() == 4
                    && matches!(arena.get(sig.return_type), Type::Void)
                    && is_normalized_pointer_param(arena, sig, 0)
                    && is_normalized_pointer_param(arena, sig, 1)
                    && is_i32_param(arena, sig, 2)
                    && is_i32_param(arena, sig, 3)
            }
            IntrinsicKind::IsLockFree => {
                sig.params.len() == 1
                    && matches!(arena.get(sig.return_type), Type::Integer(32))
                    && is_i32_param(arena, sig, 0)
            }
            IntrinsicKind::AtomicLoad => {
                sig.params.len() == 2
                    && is_normalized_pointer_param(arena, sig, 0)
                    && is_i32_param(arena, sig, 1)
                    && is_atomic_value_width(arena.get(sig.return_type))
            }
            IntrinsicKind::AtomicStore => {
                sig.params.len() == 3
                    && matches!(arena.get(sig.return_type), Type::Void)
                    && is_atomic_value_width(arena.get(sig.params[0]))
                    && is_normalized_pointer_param(arena, sig, 1)
                    && is_i32_param(arena, sig, 2)
            }
            IntrinsicKind::AtomicRmw => {
                sig.params.len() == 4
                    && is_i32_param(arena, sig, 0)
                    && is_normalized_pointer_param(arena, sig, 1)
                    && is_atomic_value_width(arena.get(sig.params[2]))
                    && is_i32_param(arena, sig, 3)
                    && is_atomic_value_width(arena.get(sig.return_type))
            }
            IntrinsicKind::AtomicCmpxchg => {
                sig.params.len() == 5
                    && is_normalized_pointer_param(arena, sig, 0)
                    && is_atomic_value_width(arena.get(sig.params[1]))
                    && is_atomic_value_width(arena.get(sig.params[2]))
                    && is_i32_param(arena, sig, 3)
                    && is_i32_param(arena, sig, 4)
                    && is_atomic_value_width(arena.get(sig.return_type))
            }
            IntrinsicKind::Fence | IntrinsicKind::FenceAll => {
                sig.params.len() == 1
                    && matches!(arena.get(sig.return_type), Type::Void)
                    && is_i32_param(arena, sig, 0)
            }
            IntrinsicKind::ReadThreadPointer => {
                sig.params.is_empty() && matches!(arena.get(sig.return_type), Type::Pointer { .. })
            }
            IntrinsicKind::Stacksave => {
                sig.params.is_empty() && matches!(arena.get(sig.return_type), Type::Pointer { .. })
            }
            IntrinsicKind::Stackrestore | IntrinsicKind::Trap => {
                matches!(arena.get(sig.return_type), Type::Void)
            }
            IntrinsicKind::Setjmp => {
                sig.params.len() == 1
                    && is_normalized_pointer_param(arena, sig, 0)
                    && matches!(arena.get(sig.return_type), Type::Integer(32))
            }
            IntrinsicKind::Longjmp => {
                sig.params.len() == 2
                    && matches!(arena.get(sig.return_type), Type::Void)
                    && is_normalized_pointer_param(arena, sig, 0)
                    && is_i32_param(arena, sig, 1)
            }
            IntrinsicKind::DbgDeclare | IntrinsicKind::DbgValue => self.allow_debug_metadata,
        }
    }
}

fn single_param_matches_return(arena: &TypeArena, sig: &FunctionType, widths: &[u32]) -> bool {
    if sig.params.len() != 1 {
        return false;
    }
    let param = arena.get(sig.params[0]);
    let ret = arena.get(sig.return_type);
    param == ret
        && matches!(param, Type::Integer(w) if widths.contains(w))
}

fn is_float_unary(arena: &TypeArena, sig: &FunctionType) -> bool {
    if sig.params.len() != 1 {
        return false;
    }
    let param = arena.get(sig.params[0]);
    let ret = arena.get(sig.return_type);
    param == ret && matches!(param, Type::Float | Type::Double)
}

/// Whether `sig`'s parameter at `idx` is a valid pointer type (the
/// registry checks the resolved *type*, not the operand's provenance —
/// `NormalizedPtr`-ness of the actual argument is the function checker's
/// job at the call site).
fn is_normalized_pointer_param(arena: &TypeArena, sig: &FunctionType, idx: usize) -> bool {
    sig.params
        .get(idx)
        .is_some_and(|ty| crate::ir::is_valid_pointer_type(arena, *ty))
}

fn is_i32_param(arena: &TypeArena, sig: &FunctionType, idx: usize) -> bool {
    sig.params
        .get(idx)
        .is_some_and(|ty| matches!(arena.get(*ty), Type::Integer(32)))
}

/// The atomic intrinsics are "one family, overloaded over {i8,i16,i32,i64}"
/// (§4.2): the value operand/result may be any of those four widths.
fn is_atomic_value_width(ty: &Type) -> bool {
    matches!(ty, Type::Integer(8 | 16 | 32 | 64))
}
