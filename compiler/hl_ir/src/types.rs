//! Type utilities.
//!
//! Builders for `TypeReference` values, builtin type name resolution and the
//! display names used by hovers and diagnostics.

use crate::declaration::{FunctionDeclaration, Module};
use crate::expression::{Expression, Statement};
use crate::type_reference::{
    BuiltinTypeReference, ConstantArrayType, CustomTypeReference, FunctionPointerType,
    FundamentalType, IntegerType, ParameterType, PointerType, TypeReference,
};


/// Widest integer type the language accepts.
pub const MAX_INTEGER_BITS: u32 = 64;

/// Name of the meta-type taken by type and function constructors.
pub const TYPE_BUILTIN_NAME: &str = "Type";

/// Result of looking a builtin type up by name.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum BuiltinTypeLookup {
    Found(TypeReference),
    /// The name is not one of the builtin types.
    Unknown(String),
}

impl BuiltinTypeLookup {
    pub fn found(self) -> Option<TypeReference> {
        match self {
            BuiltinTypeLookup::Found(value) => Some(value),
            BuiltinTypeLookup::Unknown(_) => None,
        }
    }
}

pub fn create_integer_type(number_of_bits: u32, is_signed: bool) -> TypeReference {
    TypeReference::Integer(IntegerType {
        number_of_bits,
        is_signed,
    })
}

pub fn create_fundamental_type(fundamental_type: FundamentalType) -> TypeReference {
    TypeReference::Fundamental(fundamental_type)
}

pub fn create_boolean_type() -> TypeReference {
    create_fundamental_type(FundamentalType::Bool)
}

pub fn create_string_type() -> TypeReference {
    create_fundamental_type(FundamentalType::String)
}

/// `*C_char`, the type of `"..."c` literals.
pub fn create_c_string_type() -> TypeReference {
    create_pointer_type(vec![create_fundamental_type(FundamentalType::CChar)], false)
}

pub fn create_pointer_type(element_type: Vec<TypeReference>, is_mutable: bool) -> TypeReference {
    TypeReference::Pointer(PointerType {
        element_type,
        is_mutable,
    })
}

pub fn create_custom_type_reference(
    module_name: impl Into<String>,
    name: impl Into<String>,
) -> TypeReference {
    TypeReference::Custom(CustomTypeReference::new(module_name, name))
}

pub fn create_parameter_type(name: impl Into<String>) -> TypeReference {
    TypeReference::Parameter(ParameterType { name: name.into() })
}

pub fn create_constant_array_type(value_type: Vec<TypeReference>, size: u64) -> TypeReference {
    TypeReference::ConstantArray(ConstantArrayType { value_type, size })
}

/// `Int32`, the type of unsuffixed integer literals.
pub fn create_default_type_reference() -> TypeReference {
    create_integer_type(32, true)
}

pub fn create_null_type() -> TypeReference {
    TypeReference::NullPointer
}

/// The function pointer type a function declaration can be assigned to.
pub fn create_function_pointer_type_from_declaration(
    declaration: &FunctionDeclaration,
) -> TypeReference {
    TypeReference::FunctionPointer(FunctionPointerType {
        function_type: declaration.function_type.clone(),
        input_parameter_names: declaration.input_parameter_names.clone(),
        output_parameter_names: declaration.output_parameter_names.clone(),
    })
}

/// Resolves one of the builtin type names: integers (`Int1`..`Int64`,
/// `Uint1`..`Uint64`), fundamentals (`Bool`, `Float32`, `C_int`, ...) and the
/// meta-type `Type`.
pub fn create_builtin_type_reference(name: &str) -> BuiltinTypeLookup {
    if let Some(integer_type) = parse_integer_type(name) {
        return BuiltinTypeLookup::Found(TypeReference::Integer(integer_type));
    }
    if let Some(fundamental_type) = FundamentalType::from_name(name) {
        return BuiltinTypeLookup::Found(TypeReference::Fundamental(fundamental_type));
    }
    if name == TYPE_BUILTIN_NAME {
        return BuiltinTypeLookup::Found(TypeReference::Builtin(BuiltinTypeReference {
            value: name.to_owned(),
        }));
    }
    BuiltinTypeLookup::Unknown(name.to_owned())
}

pub fn get_integer_name(integer_type: IntegerType) -> String {
    let prefix = if integer_type.is_signed { "Int" } else { "Uint" };
    format!("{prefix}{}", integer_type.number_of_bits)
}

/// Parses `Int<N>` and `Uint<N>` with `1 <= N <= 64`.
pub fn parse_integer_type(name: &str) -> Option<IntegerType> {
    let (digits, is_signed) = if let Some(digits) = name.strip_prefix("Uint") {
        (digits, false)
    } else if let Some(digits) = name.strip_prefix("Int") {
        (digits, true)
    } else {
        return None;
    };

    // Reject "Int032" and "Int+8", which u32::from_str would accept or
    // normalize.
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|byte| byte.is_ascii_digit())
    {
        return None;
    }

    let number_of_bits: u32 = digits.parse().ok()?;
    (1..=MAX_INTEGER_BITS)
        .contains(&number_of_bits)
        .then_some(IntegerType {
            number_of_bits,
            is_signed,
        })
}

pub fn is_integer_type(name: &str) -> bool {
    parse_integer_type(name).is_some()
}

pub fn is_fundamental_type(name: &str) -> bool {
    FundamentalType::from_name(name).is_some()
}

/// Parses a bare type name written in module `module_name`.
///
/// Builtin names resolve to their type, `void` to no type at all, anything
/// else to a custom reference into `module_name`.
pub fn parse_type_name(name: &str, module_name: &str) -> Vec<TypeReference> {
    if name == "void" {
        return Vec::new();
    }
    match create_builtin_type_reference(name) {
        BuiltinTypeLookup::Found(type_reference) => vec![type_reference],
        BuiltinTypeLookup::Unknown(name) => vec![create_custom_type_reference(module_name, name)],
    }
}

/// Display name of a type as seen from `module`.
///
/// Custom types declared in `module` are shown bare, custom types of an
/// imported module through the import alias, and anything else fully
/// qualified.
pub fn get_type_name(type_reference: &[TypeReference], module: Option<&Module>) -> String {
    let Some(first) = type_reference.first() else {
        return "void".to_owned();
    };

    match first {
        TypeReference::Builtin(value) => value.value.clone(),
        TypeReference::ConstantArray(value) => {
            format!("{}[{}]", get_type_name(&value.value_type, module), value.size)
        }
        TypeReference::Custom(value) => get_custom_type_name(value, module),
        TypeReference::Fundamental(value) => value.name().to_owned(),
        TypeReference::FunctionPointer(value) => {
            let function_type = &value.function_type;
            let mut inputs: Vec<String> = function_type
                .input_parameter_types
                .iter()
                .map(|value| get_type_name(std::slice::from_ref(value), module))
                .collect();
            if function_type.is_variadic {
                inputs.push("...".to_owned());
            }
            let outputs: Vec<String> = function_type
                .output_parameter_types
                .iter()
                .map(|value| get_type_name(std::slice::from_ref(value), module))
                .collect();
            format!("({}) -> ({})", inputs.join(", "), outputs.join(", "))
        }
        TypeReference::Integer(value) => get_integer_name(*value),
        TypeReference::NullPointer => "Null_pointer_type".to_owned(),
        TypeReference::Parameter(value) => value.name.clone(),
        TypeReference::Pointer(value) => {
            let mutable_keyword = if value.is_mutable { "mutable " } else { "" };
            format!(
                "*{mutable_keyword}{}",
                get_type_name(&value.element_type, module)
            )
        }
        TypeReference::TypeInstance(value) => {
            let arguments: Vec<String> = value
                .arguments
                .iter()
                .map(|argument| get_argument_name(argument, module))
                .collect();
            format!(
                "{}<{}>",
                get_custom_type_name(&value.type_constructor, module),
                arguments.join(", ")
            )
        }
    }
}

fn get_custom_type_name(value: &CustomTypeReference, module: Option<&Module>) -> String {
    let module_name = value.module_name();
    if let Some(module) = module {
        if module.name == module_name {
            return value.name.clone();
        }
        if let Some(import) = module.find_import_by_module_name(module_name) {
            return format!("{}.{}", import.alias, value.name);
        }
    }

    if module_name.is_empty() {
        value.name.clone()
    } else {
        format!("{module_name}.{}", value.name)
    }
}

fn get_argument_name(argument: &Statement, module: Option<&Module>) -> String {
    match &argument.expression {
        Expression::Type(value) => {
            get_type_name(std::slice::from_ref(&value.type_reference), module)
        }
        Expression::Constant(value) => value.data.clone(),
        Expression::Variable(value) => value.name.clone(),
        _ => "...".to_owned(),
    }
}

/// Structural equality of two type lists.
pub fn are_equal(lhs: &[TypeReference], rhs: &[TypeReference]) -> bool {
    lhs == rhs
}

/// Whether the type is `*C_char`, the type of C string literals.
pub fn is_c_string(type_reference: &TypeReference) -> bool {
    match type_reference {
        TypeReference::Pointer(pointer) => !pointer.is_mutable && matches!(
            pointer.element_type.as_slice(),
            [TypeReference::Fundamental(FundamentalType::CChar)]
        ),
        _ => false,
    }
}
