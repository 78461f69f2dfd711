//! The Type Classifier (§4.1): an interned type arena plus the pure
//! predicates that decide which types lie within the stable subset.
//!
//! These predicates never look at a `Module` or a `Function` — they only
//! ever dereference [`TypeId`]s through the [`TypeArena`] they were interned
//! in, mirroring the spec's "stateless, pure function of a type" framing.

/// Stable index into a [`TypeArena`]. Two `TypeId`s compare equal exactly
/// when the types they name are structurally equal, because `intern`
/// deduplicates before handing one out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(u32);

/// One of the IR's type constructors (§3 DATA MODEL).
///
/// Aggregate types are not decomposed into field lists: the verifier only
/// ever needs to know *that* a type is an aggregate, to reject it wherever a
/// scalar or vector is required, never its layout.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Void,
    Integer(u32),
    Float,
    Double,
    Vector { element: TypeId, len: u32 },
    Pointer { pointee: TypeId, address_space: u32 },
    Function(FunctionType),
    Aggregate,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FunctionType {
    pub return_type: TypeId,
    pub params: Vec<TypeId>,
    pub is_var_arg: bool,
}

/// Arena of interned types, shared by a `Module` and every `Function` in it
/// so that `TypeId` equality is a valid stand-in for type equality.
#[derive(Debug, Clone, Default)]
pub struct TypeArena {
    types: Vec<Type>,
}

impl TypeArena {
    #[must_use]
    pub fn new() -> Self {
        Self { types: Vec::new() }
    }

    pub fn intern(&mut self, ty: Type) -> TypeId {
        if let Some(pos) = self.types.iter().position(|t| *t == ty) {
            return TypeId(pos as u32);
        }
        self.types.push(ty);
        TypeId((self.types.len() - 1) as u32)
    }

    #[must_use]
    pub fn get(&self, id: TypeId) -> &Type {
        &self.types[id.0 as usize]
    }
}

/// Integer widths admitted as scalars (§4.1 rule 1).
const SCALAR_INT_WIDTHS: &[u32] = &[1, 8, 16, 32, 64];

#[must_use]
pub fn is_i1(ty: &Type) -> bool {
    matches!(ty, Type::Integer(1))
}

/// `i1`, `i8`, `i16`, `i32`, `i64`, `float`, `double`.
#[must_use]
pub fn is_valid_scalar_type(ty: &Type) -> bool {
    match ty {
        Type::Integer(w) => SCALAR_INT_WIDTHS.contains(w),
        Type::Float | Type::Double => true,
        _ => false,
    }
}

/// The admissible vector lane counts, keyed by element bit width. Vectors
/// model a 128-bit-wide SIMD register file: sixteen lanes of `i8`, eight of
/// `i16`, four of `i32`, two of `i64`, and the `i1` predicate vectors that
/// shadow the integer lane counts (§4.1 rule 2, Design Notes open question 2).
fn allowed_vector_lengths(element: &Type) -> &'static [u32] {
    match element {
        Type::Integer(1) => &[4, 8, 16],
        Type::Integer(8) => &[16],
        Type::Integer(16) => &[8],
        Type::Integer(32) => &[4],
        Type::Integer(64) => &[2],
        _ => &[],
    }
}

/// A vector whose element is a valid scalar type (`i1` included) and whose
/// length appears in the fixed table for that element width.
#[must_use]
pub fn is_valid_vector_type(arena: &TypeArena, ty: &Type) -> bool {
    match ty {
        Type::Vector { element, len } => {
            let element = arena.get(*element);
            is_valid_scalar_type(element) && allowed_vector_lengths(element).contains(len)
        }
        _ => false,
    }
}

/// Valid as a function parameter: a valid scalar type other than `i1`, or a
/// valid vector type.
#[must_use]
pub fn is_valid_param_type(arena: &TypeArena, id: TypeId) -> bool {
    let ty = arena.get(id);
    if is_valid_scalar_type(ty) {
        return !is_i1(ty);
    }
    is_valid_vector_type(arena, ty)
}

/// Valid as a function return type: everything a parameter accepts, plus
/// `void`.
#[must_use]
pub fn is_valid_return_type(arena: &TypeArena, id: TypeId) -> bool {
    matches!(arena.get(id), Type::Void) || is_valid_param_type(arena, id)
}

/// A non-variadic function type whose return and parameter types are all
/// individually valid (§4.1 rule 3).
#[must_use]
pub fn is_valid_function_type(arena: &TypeArena, ft: &FunctionType) -> bool {
    !ft.is_var_arg
        && is_valid_return_type(arena, ft.return_type)
        && ft.params.iter().all(|p| is_valid_param_type(arena, *p))
}

/// A pointer in address space zero whose pointee is a valid scalar type
/// other than `i1`, a valid vector type with a non-`i1` element, or a valid
/// function type (§4.1 rule 4).
#[must_use]
pub fn is_valid_pointer_type(arena: &TypeArena, id: TypeId) -> bool {
    match arena.get(id) {
        Type::Pointer {
            pointee,
            address_space,
        } => {
            if *address_space != 0 {
                return false;
            }
            let pointee_ty = arena.get(*pointee);
            match pointee_ty {
                Type::Integer(1) => false,
                _ if is_valid_scalar_type(pointee_ty) => true,
                Type::Vector { element, .. } => {
                    is_valid_vector_type(arena, pointee_ty) && !is_i1(arena.get(*element))
                }
                Type::Function(ft) => is_valid_function_type(arena, ft),
                _ => false,
            }
        }
        _ => false,
    }
}

/// Byte size of a scalar integer or floating-point type, used to validate
/// alignment (§4.4.4). Returns `None` for anything else.
#[must_use]
pub fn scalar_byte_size(ty: &Type) -> Option<u32> {
    match ty {
        Type::Integer(w) if *w % 8 == 0 => Some(w / 8),
        Type::Integer(1) => Some(1),
        Type::Float => Some(4),
        Type::Double => Some(8),
        _ => None,
    }
}
