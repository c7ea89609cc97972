//! The native ABI type vocabulary understood by the host runtime's FFI.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

/// A native FFI type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NativeType {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    U64,
    I64,
    F64,
    Pointer,
    Void,

    /// Ordered member types of a C struct, expanded inline at each use site
    Struct(Vec<NativeType>),
}

impl NativeType {
    /// Runtime name of a primitive; `None` for aggregates.
    pub fn as_str(&self) -> Option<&'static str> {
        let name = match self {
            NativeType::U8 => "u8",
            NativeType::I8 => "i8",
            NativeType::U16 => "u16",
            NativeType::I16 => "i16",
            NativeType::U32 => "u32",
            NativeType::I32 => "i32",
            NativeType::U64 => "u64",
            NativeType::I64 => "i64",
            NativeType::F64 => "f64",
            NativeType::Pointer => "pointer",
            NativeType::Void => "void",
            NativeType::Struct(_) => return None,
        };
        Some(name)
    }

    /// Check if this is the void type.
    pub fn is_void(&self) -> bool {
        matches!(self, NativeType::Void)
    }

    /// Render as a Deno FFI type literal.
    pub fn as_deno(&self) -> String {
        match self {
            NativeType::Struct(members) => {
                let members: Vec<String> = members.iter().map(NativeType::as_deno).collect();
                format!("{{ struct: [{}] }}", members.join(", "))
            }
            primitive => format!("\"{}\"", primitive),
        }
    }
}

impl fmt::Display for NativeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NativeType::Struct(members) => {
                write!(f, "struct {{ ")?;
                for (i, member) in members.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", member)?;
                }
                write!(f, " }}")
            }
            primitive => f.write_str(primitive.as_str().unwrap_or_default()),
        }
    }
}

impl Serialize for NativeType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            NativeType::Struct(members) => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("struct", members)?;
                map.end()
            }
            primitive => serializer.serialize_str(primitive.as_str().unwrap_or_default()),
        }
    }
}
