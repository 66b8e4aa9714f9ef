//! Modules, imports and declarations.

use crate::expression::Statement;
use crate::source::SourcePosition;
use crate::type_reference::{FunctionType, TypeReference};

/// A parsed H module. Owns everything it declares.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Module {
    pub name: String,
    pub imports: Vec<Import>,
    pub declarations: Vec<Declaration>,
    pub comment: Option<String>,
}

impl Module {
    pub fn find_declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|declaration| declaration.name == name)
    }

    pub fn find_import_by_alias(&self, alias: &str) -> Option<&Import> {
        self.imports.iter().find(|import| import.alias == alias)
    }

    pub fn find_import_by_module_name(&self, module_name: &str) -> Option<&Import> {
        self.imports
            .iter()
            .find(|import| import.module_name == module_name)
    }

    pub fn find_function(&self, name: &str) -> Option<&Function> {
        match self.find_declaration(name).map(|declaration| &declaration.kind) {
            Some(DeclarationKind::Function(function)) => Some(function),
            _ => None,
        }
    }
}

/// `import Module.name as alias;`
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Import {
    pub module_name: String,
    pub alias: String,
    /// Names referenced through `alias`, sorted and without duplicates.
    pub usages: Vec<String>,
}

impl Import {
    pub fn new(module_name: impl Into<String>, alias: impl Into<String>) -> Self {
        Import {
            module_name: module_name.into(),
            alias: alias.into(),
            usages: Vec::new(),
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Declaration {
    pub name: String,
    pub is_export: bool,
    pub kind: DeclarationKind,
}

impl Declaration {
    pub fn new(is_export: bool, kind: DeclarationKind) -> Self {
        Declaration {
            name: kind.name().to_owned(),
            is_export,
            kind,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum DeclarationKind {
    Alias(AliasTypeDeclaration),
    Enum(EnumDeclaration),
    Function(Function),
    FunctionConstructor(FunctionConstructor),
    GlobalVariable(GlobalVariableDeclaration),
    Struct(StructDeclaration),
    TypeConstructor(TypeConstructor),
    Union(UnionDeclaration),
}

impl DeclarationKind {
    pub fn name(&self) -> &str {
        match self {
            DeclarationKind::Alias(value) => &value.name,
            DeclarationKind::Enum(value) => &value.name,
            DeclarationKind::Function(value) => &value.declaration.name,
            DeclarationKind::FunctionConstructor(value) => &value.name,
            DeclarationKind::GlobalVariable(value) => &value.name,
            DeclarationKind::Struct(value) => &value.name,
            DeclarationKind::TypeConstructor(value) => &value.name,
            DeclarationKind::Union(value) => &value.name,
        }
    }

    pub fn comment(&self) -> Option<&str> {
        match self {
            DeclarationKind::Alias(value) => value.comment.as_deref(),
            DeclarationKind::Enum(value) => value.comment.as_deref(),
            DeclarationKind::Function(value) => value.declaration.comment.as_deref(),
            DeclarationKind::FunctionConstructor(value) => value.comment.as_deref(),
            DeclarationKind::GlobalVariable(value) => value.comment.as_deref(),
            DeclarationKind::Struct(value) => value.comment.as_deref(),
            DeclarationKind::TypeConstructor(value) => value.comment.as_deref(),
            DeclarationKind::Union(value) => value.comment.as_deref(),
        }
    }

    /// Whether the declaration introduces a type rather than a value.
    pub fn is_type(&self) -> bool {
        matches!(
            self,
            DeclarationKind::Alias(_)
                | DeclarationKind::Enum(_)
                | DeclarationKind::Struct(_)
                | DeclarationKind::TypeConstructor(_)
                | DeclarationKind::Union(_)
        )
    }
}

/// A comment attached to the member at `index`.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexedComment {
    pub index: usize,
    pub comment: String,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AliasTypeDeclaration {
    pub name: String,
    /// Aliased type; empty for `void`.
    pub type_reference: Vec<TypeReference>,
    pub comment: Option<String>,
    pub source_location: Option<SourcePosition>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum EnumValueInitializer {
    Explicit(Statement),
    /// One more than the previous value, or zero for the first value.
    AutoIncrement,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    pub name: String,
    pub value: EnumValueInitializer,
    pub comment: Option<String>,
    pub source_location: Option<SourcePosition>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumDeclaration {
    pub name: String,
    pub values: Vec<EnumValue>,
    pub comment: Option<String>,
    pub source_location: Option<SourcePosition>,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct GlobalVariableDeclaration {
    pub name: String,
    /// Explicit type annotation; the type is otherwise inferred from `initial_value`.
    pub type_reference: Option<TypeReference>,
    pub initial_value: Statement,
    pub is_mutable: bool,
    pub comment: Option<String>,
    pub source_location: Option<SourcePosition>,
}

/// Struct layout. The member arrays are parallel.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct StructDeclaration {
    pub name: String,
    pub member_types: Vec<TypeReference>,
    pub member_names: Vec<String>,
    pub member_default_values: Vec<Statement>,
    pub is_packed: bool,
    pub is_literal: bool,
    pub comment: Option<String>,
    pub member_comments: Vec<IndexedComment>,
    pub source_location: Option<SourcePosition>,
    pub member_source_positions: Option<Vec<SourcePosition>>,
}

impl StructDeclaration {
    /// A struct without comments or source positions.
    pub fn new(
        name: impl Into<String>,
        member_names: Vec<String>,
        member_types: Vec<TypeReference>,
        member_default_values: Vec<Statement>,
    ) -> Self {
        debug_assert_eq!(member_names.len(), member_types.len());
        debug_assert_eq!(member_names.len(), member_default_values.len());
        StructDeclaration {
            name: name.into(),
            member_types,
            member_names,
            member_default_values,
            is_packed: false,
            is_literal: false,
            comment: None,
            member_comments: Vec::new(),
            source_location: None,
            member_source_positions: None,
        }
    }

    pub fn member_comment(&self, index: usize) -> Option<&str> {
        find_indexed_comment(&self.member_comments, index)
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct UnionDeclaration {
    pub name: String,
    pub member_types: Vec<TypeReference>,
    pub member_names: Vec<String>,
    pub comment: Option<String>,
    pub member_comments: Vec<IndexedComment>,
    pub source_location: Option<SourcePosition>,
    pub member_source_positions: Option<Vec<SourcePosition>>,
}

impl UnionDeclaration {
    pub fn new(
        name: impl Into<String>,
        member_names: Vec<String>,
        member_types: Vec<TypeReference>,
    ) -> Self {
        debug_assert_eq!(member_names.len(), member_types.len());
        UnionDeclaration {
            name: name.into(),
            member_types,
            member_names,
            comment: None,
            member_comments: Vec::new(),
            source_location: None,
            member_source_positions: None,
        }
    }

    pub fn member_comment(&self, index: usize) -> Option<&str> {
        find_indexed_comment(&self.member_comments, index)
    }
}

fn find_indexed_comment(comments: &[IndexedComment], index: usize) -> Option<&str> {
    comments
        .iter()
        .find(|value| value.index == index)
        .map(|value| value.comment.as_str())
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Linkage {
    External,
    Private,
}

impl Linkage {
    /// Exported functions are visible to the linker.
    pub const fn from_export(is_export: bool) -> Self {
        if is_export {
            Linkage::External
        } else {
            Linkage::Private
        }
    }
}

/// A named pre- or postcondition of a function.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionCondition {
    pub description: String,
    pub condition: Statement,
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDeclaration {
    pub name: String,
    pub function_type: FunctionType,
    pub input_parameter_names: Vec<String>,
    pub output_parameter_names: Vec<String>,
    pub linkage: Linkage,
    pub preconditions: Vec<FunctionCondition>,
    pub postconditions: Vec<FunctionCondition>,
    pub comment: Option<String>,
    pub source_location: Option<SourcePosition>,
}

impl FunctionDeclaration {
    pub fn new(
        name: impl Into<String>,
        input_parameters: Vec<(String, TypeReference)>,
        output_parameters: Vec<(String, TypeReference)>,
        linkage: Linkage,
    ) -> Self {
        let (input_parameter_names, input_parameter_types) = input_parameters.into_iter().unzip();
        let (output_parameter_names, output_parameter_types) =
            output_parameters.into_iter().unzip();
        FunctionDeclaration {
            name: name.into(),
            function_type: FunctionType {
                input_parameter_types,
                output_parameter_types,
                is_variadic: false,
            },
            input_parameter_names,
            output_parameter_names,
            linkage,
            preconditions: Vec::new(),
            postconditions: Vec::new(),
            comment: None,
            source_location: None,
        }
    }
}

#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionDefinition {
    pub name: String,
    pub statements: Vec<Statement>,
    pub source_location: Option<SourcePosition>,
}

impl FunctionDefinition {
    pub fn new(name: impl Into<String>, statements: Vec<Statement>) -> Self {
        FunctionDefinition {
            name: name.into(),
            statements,
            source_location: None,
        }
    }
}

/// A function declaration and, unless it is external, its body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub declaration: FunctionDeclaration,
    pub definition: Option<FunctionDefinition>,
}

/// Compile-time parameter of a type or function constructor.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ConstructorParameter {
    pub name: String,
    pub type_reference: TypeReference,
}

/// Generator of struct types, evaluated at compile time.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeConstructor {
    pub name: String,
    pub parameters: Vec<ConstructorParameter>,
    pub statements: Vec<Statement>,
    pub comment: Option<String>,
    pub source_location: Option<SourcePosition>,
}

/// Generator of functions, evaluated at compile time.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct FunctionConstructor {
    pub name: String,
    pub parameters: Vec<ConstructorParameter>,
    pub statements: Vec<Statement>,
    pub comment: Option<String>,
    pub source_location: Option<SourcePosition>,
}
