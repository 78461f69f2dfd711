use num_enum::TryFromPrimitive;

/// Memory-ordering constants admitted on atomic intrinsics.
///
/// The full LLVM ordering lattice is enumerated so the verifier can name the
/// rejected ordering, even though presently only [`AtomicOrdering::SeqCst`]
/// is admitted (§4.4.5 rule 3) — the rest of the lattice is a placeholder
/// for a future relaxation, not dead code: `RmwOperation`/`AtomicOrdering`
/// ranges are also used to validate that an operand is *some* member of the
/// enum before the stricter single-value check runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive)]
#[repr(u8)]
pub enum AtomicOrdering {
    #[default]
    Notatomic = 0,
    Unordered = 1,
    Monotonic = 2,
    Acquire = 3,
    Release = 4,
    AcqRel = 5,
    SeqCst = 6,
}

impl AtomicOrdering {
    /// The only ordering presently admitted by the verifier (§4.4.5 rule 3).
    pub const ADMITTED: Self = Self::SeqCst;

    #[must_use]
    pub fn is_admitted(self) -> bool {
        self == Self::ADMITTED
    }
}

/// Atomic read-modify-write operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
#[non_exhaustive]
pub enum RmwOperation {
    Xchg = 0,
    Add = 1,
    Sub = 2,
    And = 3,
    Nand = 4,
    Or = 5,
    Xor = 6,
    Max = 7,
    Min = 8,
    Umax = 9,
    Umin = 10,
    Fadd = 11,
    Fsub = 12,
    Fmax = 13,
    Fmin = 14,
    UincWrap = 15,
    UdecWrap = 16,
}
