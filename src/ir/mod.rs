//! The in-memory IR model the verifier reads (§3 DATA MODEL).
//!
//! This crate does not parse or own a textual/bitstream representation — a
//! host loader is expected to build these types directly, the same way a
//! visitor in the rest of this crate's lineage would be fed records already
//! split into fields rather than raw bits. Types are interned in a
//! [`TypeArena`] and everything else is addressed through small `Copy`
//! identifiers, so cyclic references (a type naming a function type naming
//! itself through a pointer) never require unsafe aliasing.

mod function;
mod module;
mod types;
mod value;

pub use function::{BasicBlock, Function, Instruction, InstFlags, Opcode};
pub use module::{Alias, GlobalAttrs, GlobalVariable, Module, NamedMetadata, PLATFORM_CALL_CONV};
pub use types::{
    is_i1, is_valid_function_type, is_valid_param_type, is_valid_pointer_type,
    is_valid_return_type, is_valid_scalar_type, is_valid_vector_type, scalar_byte_size,
    FunctionType, Type, TypeArena, TypeId,
};
pub use value::{BlockId, Constant, ConstantExpr, GlobalRef, InstId, MetadataId, Operand};
