//! Type references.
//!
//! A `TypeReference` names a type structurally. User-defined types are
//! referenced by `(module, name)` through `CustomTypeReference` and are only
//! resolved when the analysis layer asks for their declaration.
//!
//! Several places hold a `Vec<TypeReference>` instead of a single reference:
//! an empty vector is `void`, and alias declarations may list alternatives.

use std::fmt;

use crate::expression::Statement;

/// Built-in scalar types with a fixed representation.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum FundamentalType {
    Bool,
    Byte,
    Float16,
    Float32,
    Float64,
    String,
    AnyType,
    // C interop types, sized like the target C compiler's.
    CBool,
    CChar,
    CSchar,
    CUchar,
    CShort,
    CUshort,
    CInt,
    CUint,
    CLong,
    CUlong,
    CLonglong,
    CUlonglong,
    CLongdouble,
}

impl FundamentalType {
    pub const ALL: [FundamentalType; 20] = [
        Self::Bool,
        Self::Byte,
        Self::Float16,
        Self::Float32,
        Self::Float64,
        Self::String,
        Self::AnyType,
        Self::CBool,
        Self::CChar,
        Self::CSchar,
        Self::CUchar,
        Self::CShort,
        Self::CUshort,
        Self::CInt,
        Self::CUint,
        Self::CLong,
        Self::CUlong,
        Self::CLonglong,
        Self::CUlonglong,
        Self::CLongdouble,
    ];

    /// The name used for this type in source code.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::Byte => "Byte",
            Self::Float16 => "Float16",
            Self::Float32 => "Float32",
            Self::Float64 => "Float64",
            Self::String => "String",
            Self::AnyType => "Any_type",
            Self::CBool => "C_bool",
            Self::CChar => "C_char",
            Self::CSchar => "C_schar",
            Self::CUchar => "C_uchar",
            Self::CShort => "C_short",
            Self::CUshort => "C_ushort",
            Self::CInt => "C_int",
            Self::CUint => "C_uint",
            Self::CLong => "C_long",
            Self::CUlong => "C_ulong",
            Self::CLonglong => "C_longlong",
            Self::CUlonglong => "C_ulonglong",
            Self::CLongdouble => "C_longdouble",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|value| value.name() == name)
    }
}

impl fmt::Display for FundamentalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A builtin type known by name only, such as the meta-type `Type`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct BuiltinTypeReference {
    pub value: String,
}

/// Fixed-size array, `T[size]`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstantArrayType {
    /// Element type; empty while the element type is unknown.
    pub value_type: Vec<TypeReference>,
    pub size: u64,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ModuleReference {
    pub name: String,
}

/// Deferred by-name reference to a declaration of some module.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomTypeReference {
    pub module_reference: ModuleReference,
    pub name: String,
}

impl CustomTypeReference {
    pub fn new(module_name: impl Into<String>, name: impl Into<String>) -> Self {
        CustomTypeReference {
            module_reference: ModuleReference {
                name: module_name.into(),
            },
            name: name.into(),
        }
    }

    pub fn module_name(&self) -> &str {
        &self.module_reference.name
    }
}

/// Signature shared by function declarations and function pointer types.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionType {
    pub input_parameter_types: Vec<TypeReference>,
    pub output_parameter_types: Vec<TypeReference>,
    pub is_variadic: bool,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionPointerType {
    pub function_type: FunctionType,
    pub input_parameter_names: Vec<String>,
    pub output_parameter_names: Vec<String>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IntegerType {
    pub number_of_bits: u32,
    pub is_signed: bool,
}

/// Reference to a parameter of the enclosing type or function constructor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ParameterType {
    pub name: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PointerType {
    /// Pointee type; empty for `*void`.
    pub element_type: Vec<TypeReference>,
    pub is_mutable: bool,
}

/// Instantiation of a type constructor with compile-time arguments.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeInstance {
    pub type_constructor: CustomTypeReference,
    pub arguments: Vec<Statement>,
}

/// A reference to a type.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeReference {
    Builtin(BuiltinTypeReference),
    ConstantArray(ConstantArrayType),
    Custom(CustomTypeReference),
    Fundamental(FundamentalType),
    FunctionPointer(FunctionPointerType),
    Integer(IntegerType),
    /// Type of the `null` literal.
    NullPointer,
    Parameter(ParameterType),
    Pointer(PointerType),
    TypeInstance(TypeInstance),
}

impl TypeReference {
    pub fn as_custom(&self) -> Option<&CustomTypeReference> {
        match self {
            TypeReference::Custom(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<&PointerType> {
        match self {
            TypeReference::Pointer(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::types::get_type_name(std::slice::from_ref(self), None))
    }
}
