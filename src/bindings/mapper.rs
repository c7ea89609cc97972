//! Mapping from c2ffi type descriptors to native FFI types.

use std::collections::HashMap;

use super::native::NativeType;
use super::types::{Field, Type};

/// Map a tag from the fixed primitive table.
///
/// `:long-double` is truncated to `f64`; the runtime has no wider float.
/// `:long` is 64 bits (LP64).
pub fn primitive(tag: &str) -> Option<NativeType> {
    let native = match tag {
        // Fixed-width typedef names
        "int8_t" => NativeType::I8,
        "uint8_t" => NativeType::U8,
        "int16_t" => NativeType::I16,
        "uint16_t" => NativeType::U16,
        "int32_t" => NativeType::I32,
        "uint32_t" => NativeType::U32,
        "int64_t" => NativeType::I64,
        "uint64_t" => NativeType::U64,

        // Builtin integer types
        ":char" | ":signed-char" => NativeType::I8,
        ":unsigned-char" => NativeType::U8,
        ":short" => NativeType::I16,
        ":unsigned-short" => NativeType::U16,
        ":int" => NativeType::I32,
        ":unsigned-int" => NativeType::U32,
        ":long" | ":long-long" => NativeType::I64,
        ":unsigned-long" | ":unsigned-long-long" => NativeType::U64,

        ":double" | ":long-double" => NativeType::F64,

        ":pointer" | ":function-pointer" => NativeType::Pointer,
        ":void" => NativeType::Void,

        _ => return None,
    };
    Some(native)
}

/// Maps type descriptors against the primitive table and a typedef table.
///
/// `None` means "no mapping yet"; it is never an error.
#[derive(Debug, Clone, Copy)]
pub struct TypeMapper<'a> {
    typedefs: &'a HashMap<String, NativeType>,
}

impl<'a> TypeMapper<'a> {
    /// Create a mapper over a resolved-typedef table.
    pub fn new(typedefs: &'a HashMap<String, NativeType>) -> Self {
        TypeMapper { typedefs }
    }

    /// Map one type. `hint` names the owning entity in diagnostics.
    pub fn map(&self, ty: &Type, hint: Option<&str>) -> Option<NativeType> {
        if ty.is_aggregate() {
            return match &ty.fields {
                Some(fields) => self.map_aggregate(fields, hint),
                None => self.map_struct_ref(ty),
            };
        }

        primitive(&ty.tag).or_else(|| self.typedefs.get(&ty.tag).cloned())
    }

    /// Map every field of a struct, in order. One unmapped field fails the
    /// whole aggregate.
    pub fn map_aggregate(&self, fields: &[Field], hint: Option<&str>) -> Option<NativeType> {
        let mut members = Vec::with_capacity(fields.len());
        for field in fields {
            match self.map(&field.ty, Some(&field.name)) {
                Some(native) => members.push(native),
                None => {
                    tracing::warn!(
                        "cannot map field `{}` of struct `{}`: unmapped type `{}`",
                        field.name,
                        hint.unwrap_or("<anonymous>"),
                        field.ty.tag
                    );
                    return None;
                }
            }
        }
        Some(NativeType::Struct(members))
    }

    /// `struct foo` without a body: use whatever `foo` resolved to.
    fn map_struct_ref(&self, ty: &Type) -> Option<NativeType> {
        let name = ty.name.as_deref().filter(|n| !n.is_empty())?;
        self.typedefs.get(name).cloned()
    }
}
