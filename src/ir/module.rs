//! Module-scope structure: globals, aliases, named metadata (§3, §4.3).

use crate::schema::{CallConv, Linkage, Visibility};

use super::function::Function;
use super::types::{TypeArena, TypeId};
use super::value::{Constant, MetadataId};

/// Attributes shared by every `GlobalValue` — a variable or a function.
#[derive(Debug, Clone)]
pub struct GlobalAttrs {
    pub name: String,
    pub linkage: Linkage,
    pub visibility: Visibility,
    pub section: Option<String>,
    pub address_space: u32,
    pub unnamed_addr: bool,
    pub alignment: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct GlobalVariable {
    pub attrs: GlobalAttrs,
    /// The type of the variable itself (the pointee type of `@name`).
    pub value_type: TypeId,
    pub initializer: Option<Constant>,
    pub thread_local: bool,
    pub externally_initialized: bool,
}

/// An alias. The stable subset forbids aliases outright (§4.3 rule 2); this
/// type carries only enough to name the offending symbol in a diagnostic.
#[derive(Debug, Clone)]
pub struct Alias {
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct NamedMetadata {
    pub name: String,
    pub operands: Vec<MetadataId>,
}

#[derive(Debug, Clone, Default)]
pub struct Module {
    pub types: TypeArena,
    pub globals: Vec<GlobalVariable>,
    pub aliases: Vec<Alias>,
    pub functions: Vec<Function>,
    pub named_metadata: Vec<NamedMetadata>,
    pub inline_asm: Option<String>,
}

impl Module {
    #[must_use]
    pub fn new(types: TypeArena) -> Self {
        Self {
            types,
            globals: Vec::new(),
            aliases: Vec::new(),
            functions: Vec::new(),
            named_metadata: Vec::new(),
            inline_asm: None,
        }
    }
}

/// The one calling convention the verifier admits anywhere a `GlobalAttrs`
/// or `call` site names a convention.
pub const PLATFORM_CALL_CONV: CallConv = CallConv::PLATFORM_DEFAULT;
