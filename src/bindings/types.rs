//! Type definitions for c2ffi declaration records.
//!
//! These types mirror the JSON emitted by the header introspector. Members the
//! mapper does not need (`ns`, `id`, bit offsets) are accepted and dropped.

use serde::{Deserialize, Serialize};

/// Tag every function parameter record must carry.
pub const PARAMETER_TAG: &str = "parameter";

/// Tag of an aggregate type that carries its own field list.
pub const STRUCT_TAG: &str = "struct";

/// Tag of a struct reference (`struct foo` used as a type).
pub const STRUCT_REF_TAG: &str = ":struct";

/// One top-level declaration record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "tag", rename_all = "lowercase")]
pub enum Definition {
    /// `typedef <type> <name>;`
    Typedef(TypedefDefinition),

    /// `struct <name> { ... };`
    Struct(StructDefinition),

    /// A function prototype.
    Function(FunctionDefinition),
}

impl Definition {
    /// The declared name.
    pub fn name(&self) -> &str {
        match self {
            Definition::Typedef(t) => &t.name,
            Definition::Struct(s) => &s.name,
            Definition::Function(f) => &f.name,
        }
    }

    /// Source location (`file:line:column`), empty when the record has none.
    pub fn location(&self) -> &str {
        match self {
            Definition::Typedef(t) => &t.location,
            Definition::Struct(s) => &s.location,
            Definition::Function(f) => &f.location,
        }
    }

    /// The record's discriminant as it appears in the stream.
    pub fn tag(&self) -> &'static str {
        match self {
            Definition::Typedef(_) => "typedef",
            Definition::Struct(_) => "struct",
            Definition::Function(_) => "function",
        }
    }
}

/// A typedef record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypedefDefinition {
    /// New type name
    pub name: String,

    /// Source location
    #[serde(default)]
    pub location: String,

    /// Underlying type
    #[serde(rename = "type")]
    pub ty: Type,
}

impl TypedefDefinition {
    /// Create a new typedef.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        TypedefDefinition {
            name: name.into(),
            location: String::new(),
            ty,
        }
    }

    /// Set the source location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }
}

/// A struct record. Its fields sit directly on the record rather than in a
/// nested type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct StructDefinition {
    /// Struct name (empty for anonymous structs)
    #[serde(default)]
    pub name: String,

    /// Source location
    #[serde(default)]
    pub location: String,

    /// Size in bits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_size: Option<u64>,

    /// Alignment in bits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_alignment: Option<u64>,

    /// Ordered fields
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl StructDefinition {
    /// Create a new struct.
    pub fn new(name: impl Into<String>) -> Self {
        StructDefinition {
            name: name.into(),
            location: String::new(),
            bit_size: None,
            bit_alignment: None,
            fields: Vec::new(),
        }
    }

    /// Add a field.
    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Convert into the typedef that names this struct's aggregate type.
    ///
    /// Struct records go through typedef resolution under their own name.
    pub fn into_typedef(self) -> TypedefDefinition {
        let ty = Type {
            bit_size: self.bit_size,
            bit_alignment: self.bit_alignment,
            ..Type::aggregate(self.fields)
        };
        TypedefDefinition {
            name: self.name,
            location: self.location,
            ty,
        }
    }
}

/// A function prototype record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FunctionDefinition {
    /// Function name
    pub name: String,

    /// Source location
    #[serde(default)]
    pub location: String,

    /// Declared parameters, in order
    #[serde(default)]
    pub parameters: Vec<Parameter>,

    /// Return type
    pub return_type: Type,

    /// Whether this is a variadic function
    #[serde(default)]
    pub variadic: bool,

    /// Whether this function is declared inline
    #[serde(default)]
    pub inline: bool,

    /// Storage class (`none`, `extern`, `static`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_class: Option<String>,
}

impl FunctionDefinition {
    /// Create a new function with the given name and return type.
    pub fn new(name: impl Into<String>, return_type: Type) -> Self {
        FunctionDefinition {
            name: name.into(),
            location: String::new(),
            parameters: Vec::new(),
            return_type,
            variadic: false,
            inline: false,
            storage_class: None,
        }
    }

    /// Add a parameter.
    pub fn with_param(mut self, param: Parameter) -> Self {
        self.parameters.push(param);
        self
    }

    /// Set the source location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    /// Documentation string attached to the generated symbol.
    pub fn doc(&self) -> String {
        format!("{} @ {}", self.name, self.location)
    }
}

/// A function parameter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Record tag, always `parameter` in well-formed input
    pub tag: String,

    /// Parameter name (may be empty for unnamed params)
    #[serde(default)]
    pub name: String,

    /// Parameter type
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Parameter {
    /// Create a new parameter.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Parameter {
            tag: PARAMETER_TAG.to_string(),
            name: name.into(),
            ty,
        }
    }
}

/// A struct field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// Field name
    #[serde(default)]
    pub name: String,

    /// Field type
    #[serde(rename = "type")]
    pub ty: Type,
}

impl Field {
    /// Create a new field.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        Field {
            name: name.into(),
            ty,
        }
    }
}

/// A type descriptor.
///
/// `tag` is either a primitive marker (`:int`, `:pointer`), a typedef name
/// (`uint32_t`), or one of the struct tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Type {
    /// Type tag
    pub tag: String,

    /// Referenced name, set on `:struct` references
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Size in bits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_size: Option<u64>,

    /// Alignment in bits
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_alignment: Option<u64>,

    /// Ordered fields of an inline aggregate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<Field>>,

    /// Pointee or element type
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub inner: Option<Box<Type>>,
}

impl Type {
    /// Create a type with just a tag.
    pub fn new(tag: impl Into<String>) -> Self {
        Type {
            tag: tag.into(),
            name: None,
            bit_size: None,
            bit_alignment: None,
            fields: None,
            inner: None,
        }
    }

    /// Create an inline aggregate with the given fields.
    pub fn aggregate(fields: Vec<Field>) -> Self {
        Type {
            fields: Some(fields),
            ..Type::new(STRUCT_TAG)
        }
    }

    /// Create a pointer to `pointee`.
    pub fn pointer(pointee: Type) -> Self {
        Type {
            inner: Some(Box::new(pointee)),
            ..Type::new(":pointer")
        }
    }

    /// Create a `struct <name>` reference.
    pub fn struct_ref(name: impl Into<String>) -> Self {
        Type {
            name: Some(name.into()),
            ..Type::new(STRUCT_REF_TAG)
        }
    }

    /// Name of the struct this type refers to without carrying a body.
    pub fn referenced_struct(&self) -> Option<&str> {
        match (&self.fields, &self.name) {
            (None, Some(name)) if self.tag == STRUCT_REF_TAG => Some(name),
            _ => None,
        }
    }

    /// Check if this tag denotes a struct.
    pub fn is_aggregate(&self) -> bool {
        self.tag == STRUCT_TAG || self.tag == STRUCT_REF_TAG
    }
}
