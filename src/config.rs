//! Verifier configuration (§9 Design Notes: "explicit configuration struct
//! instead of global mutable state").
//!
//! There is no configuration file and nothing here crosses a process
//! boundary, so this is a plain `Copy` struct rather than something
//! `serde`-derived — a host embedding this crate builds one directly.

/// Tunables that narrow or widen the admitted subset at the margins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifierConfig {
    /// Admit `llvm.dbg.declare` / `llvm.dbg.value` and `!dbg` instruction
    /// metadata. Off by default: debug metadata is usually stripped before
    /// a module reaches this verifier.
    pub allow_debug_metadata: bool,
    /// Tolerate a function declaration (no body) where the stable subset
    /// would otherwise reject it outright (§6) — set by a host that is
    /// still streaming a module in and hasn't seen the function's
    /// definition block yet.
    pub streaming_mode: bool,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            allow_debug_metadata: false,
            streaming_mode: false,
        }
    }
}
