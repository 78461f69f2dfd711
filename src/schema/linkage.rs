use num_enum::TryFromPrimitive;

/// Linkage types a `GlobalValue` (variable, function, or alias) may carry.
///
/// Only [`Linkage::External`] and [`Linkage::Internal`] lie within the
/// stable subset; every other variant exists so the module checker can
/// name the offending linkage in its diagnostic rather than saying
/// "unknown".
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum Linkage {
    External = 0,
    Weak = 1,
    Appending = 2,
    Internal = 3,
    Linkonce = 4,
    Dllimport = 5,
    Dllexport = 6,
    ExternWeak = 7,
    Common = 8,
    Private = 9,
    WeakOdr = 10,
    LinkonceOdr = 11,
    AvailableExternally = 12,
}

impl Linkage {
    /// Whether this linkage lies within the stable subset.
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::External | Self::Internal)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::External => "external",
            Self::Weak => "weak",
            Self::Appending => "appending",
            Self::Internal => "internal",
            Self::Linkonce => "linkonce",
            Self::Dllimport => "dllimport",
            Self::Dllexport => "dllexport",
            Self::ExternWeak => "extern_weak",
            Self::Common => "common",
            Self::Private => "private",
            Self::WeakOdr => "weak_odr",
            Self::LinkonceOdr => "linkonce_odr",
            Self::AvailableExternally => "available_externally",
        }
    }
}

/// Visibility styles a `GlobalValue` may carry. Only [`Visibility::Default`]
/// lies within the stable subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, TryFromPrimitive)]
#[repr(u8)]
pub enum Visibility {
    #[default]
    Default = 0,
    Hidden = 1,
    Protected = 2,
}

/// Calling conventions a `Function` or `call` instruction may carry.
///
/// Only [`CallConv::C`] is the platform-default convention admitted by the
/// verifier; the rest of the table exists purely so a rejected function can
/// be diagnosed by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, TryFromPrimitive)]
#[repr(u8)]
pub enum CallConv {
    C = 0,
    Fast = 8,
    Cold = 9,
    GHC = 10,
    HiPE = 11,
    AnyReg = 13,
    PreserveMost = 14,
    PreserveAll = 15,
    Swift = 16,
    /// `CXX_FAST_TLS`
    CxxFastTls = 17,
    Tail = 18,
    /// `CFGuard_Check`
    CFGuardCheck = 19,
    SwiftTail = 20,
    PreserveNone = 21,
    /// `X86_StdCall`
    X86StdCall = 64,
    /// `X86_FastCall`
    X86FastCall = 65,
    /// `ARM_APCS`
    ArmApcs = 66,
    /// `ARM_AAPCS`
    ArmAapcs = 67,
    /// `ARM_AAPCS_VFP`
    ArmAapcsVfp = 68,
    /// `X86_ThisCall`
    X86ThisCall = 70,
    /// `X86_VectorCall`
    X86VectorCall = 80,
    /// `Win64`
    Win64 = 79,
    /// `X86_64_SysV`
    X8664SysV = 78,
}

impl CallConv {
    /// The single calling convention admitted by the verifier.
    pub const PLATFORM_DEFAULT: Self = Self::C;

    #[must_use]
    pub fn is_platform_default(self) -> bool {
        self == Self::PLATFORM_DEFAULT
    }
}

impl Default for CallConv {
    fn default() -> Self {
        Self::PLATFORM_DEFAULT
    }
}
