//! Declarations behind custom type references.
//!
//! Alias chains (`using A = B; using B = C;`) are followed until a
//! non-alias type is reached. A chain that comes back to an alias it
//! already visited has no underlying type.

use hl_ir::types::{create_custom_type_reference, create_function_pointer_type_from_declaration};
use hl_ir::{
    CustomTypeReference, Declaration, DeclarationKind, GlobalVariableDeclaration, Module,
    TypeReference,
};
use rustc_hash::FxHashSet;

use crate::context::{Context, Scope};
use crate::expression_type::ExpressionType;
use crate::resolver::{ModuleRef, ModuleResolver};

/// A declaration together with the module declaring it.
#[derive(Clone, Debug)]
pub struct ModuleDeclaration<'a> {
    pub module: ModuleRef<'a>,
    index: usize,
}

impl ModuleDeclaration<'_> {
    pub fn declaration(&self) -> &Declaration {
        &self.module.declarations[self.index]
    }
}

/// A member name of a struct, union or enum.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Member {
    pub index: usize,
    pub name: String,
}

/// A named and typed member of a struct or union.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct MemberType {
    pub index: usize,
    pub name: String,
    pub type_reference: TypeReference,
}

impl<'m> Context<'m> {
    pub(crate) fn custom_type_declaration(
        &self,
        reference: &CustomTypeReference,
    ) -> Option<ModuleDeclaration<'m>> {
        let module = self.module(reference.module_name())?;
        let index = module
            .declarations
            .iter()
            .position(|declaration| declaration.name == reference.name)?;
        Some(ModuleDeclaration { module, index })
    }

    /// `type_reference` with aliases replaced by what they name. A reference
    /// to a declaration that cannot be found is returned as is.
    pub(crate) fn underlying_type(&self, type_reference: &TypeReference) -> Option<TypeReference> {
        let mut visited = FxHashSet::default();
        let mut current = type_reference.clone();
        while let TypeReference::Custom(custom) = &current {
            if !visited.insert(custom.clone()) {
                tracing::debug!(alias = %custom.name, "alias cycle");
                return None;
            }
            let Some(found) = self.custom_type_declaration(custom) else {
                break;
            };
            let DeclarationKind::Alias(alias) = &found.declaration().kind else {
                break;
            };
            match alias.type_reference.first() {
                Some(next) => current = next.clone(),
                None => break,
            }
        }
        Some(current)
    }

    pub(crate) fn underlying_declaration(
        &self,
        reference: &CustomTypeReference,
    ) -> Option<ModuleDeclaration<'m>> {
        let underlying = self.underlying_type(&TypeReference::Custom(reference.clone()))?;
        self.custom_type_declaration(underlying.as_custom()?)
    }

    /// Type of the value or type a module-level declaration names.
    pub(crate) fn declaration_type(
        &self,
        module: &Module,
        declaration: &Declaration,
    ) -> Option<ExpressionType> {
        match &declaration.kind {
            DeclarationKind::GlobalVariable(global) => self.global_variable_type(module, global),
            DeclarationKind::Function(function) => Some(ExpressionType::value(
                create_function_pointer_type_from_declaration(&function.declaration),
            )),
            _ => Some(ExpressionType::named_type(create_custom_type_reference(
                &module.name,
                &declaration.name,
            ))),
        }
    }

    pub(crate) fn global_variable_type(
        &self,
        module: &Module,
        global: &GlobalVariableDeclaration,
    ) -> Option<ExpressionType> {
        if let Some(type_reference) = &global.type_reference {
            return Some(ExpressionType::value(type_reference.clone()));
        }
        self.guarded(&module.name, &global.name, || {
            self.expression_type(Scope::module_level(module), &global.initial_value.expression)
        })
    }

    pub(crate) fn is_enum(&self, type_reference: &[TypeReference]) -> bool {
        let [TypeReference::Custom(custom)] = type_reference else {
            return false;
        };
        self.underlying_declaration(custom)
            .is_some_and(|found| matches!(found.declaration().kind, DeclarationKind::Enum(_)))
    }
}

/// The declaration `reference` names, looked up from `module`.
pub fn get_custom_type_reference_declaration<'a>(
    module: &'a Module,
    reference: &CustomTypeReference,
    resolver: &'a dyn ModuleResolver,
) -> Option<ModuleDeclaration<'a>> {
    Context::new(Some(module), resolver).custom_type_declaration(reference)
}

/// `type_reference` with its alias chain resolved; `None` on a cycle.
pub fn get_underlying_type(
    module: &Module,
    type_reference: &TypeReference,
    resolver: &dyn ModuleResolver,
) -> Option<TypeReference> {
    Context::new(Some(module), resolver).underlying_type(type_reference)
}

/// The non-alias declaration at the end of the alias chain starting at
/// `reference`.
pub fn get_underlying_type_declaration<'a>(
    module: &'a Module,
    reference: &CustomTypeReference,
    resolver: &'a dyn ModuleResolver,
) -> Option<ModuleDeclaration<'a>> {
    Context::new(Some(module), resolver).underlying_declaration(reference)
}

/// Members of a struct, union or enum declaration, following aliases.
pub fn get_declaration_members(
    module: &Module,
    declaration: &Declaration,
    resolver: &dyn ModuleResolver,
) -> Vec<Member> {
    let to_members = |names: Vec<&str>| -> Vec<Member> {
        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| Member {
                index,
                name: name.to_owned(),
            })
            .collect()
    };

    match &declaration.kind {
        DeclarationKind::Alias(_) => Context::new(Some(module), resolver)
            .underlying_declaration(&CustomTypeReference::new(&module.name, &declaration.name))
            .map(|found| to_members(member_names(found.declaration())))
            .unwrap_or_default(),
        _ => to_members(member_names(declaration)),
    }
}

fn member_names(declaration: &Declaration) -> Vec<&str> {
    match &declaration.kind {
        DeclarationKind::Enum(value) => {
            value.values.iter().map(|value| value.name.as_str()).collect()
        }
        DeclarationKind::Struct(value) => value.member_names.iter().map(String::as_str).collect(),
        DeclarationKind::Union(value) => value.member_names.iter().map(String::as_str).collect(),
        _ => Vec::new(),
    }
}

/// Names and types of the members of a struct or union declaration,
/// following aliases.
pub fn get_declaration_member_types(
    module: &Module,
    declaration: &Declaration,
    resolver: &dyn ModuleResolver,
) -> Vec<MemberType> {
    let member_types_of = |declaration: &Declaration| -> Vec<MemberType> {
        let (names, types) = match &declaration.kind {
            DeclarationKind::Struct(value) => (&value.member_names, &value.member_types),
            DeclarationKind::Union(value) => (&value.member_names, &value.member_types),
            _ => return Vec::new(),
        };
        names
            .iter()
            .zip(types)
            .enumerate()
            .map(|(index, (name, type_reference))| MemberType {
                index,
                name: name.clone(),
                type_reference: type_reference.clone(),
            })
            .collect()
    };

    match &declaration.kind {
        DeclarationKind::Alias(_) => Context::new(Some(module), resolver)
            .underlying_declaration(&CustomTypeReference::new(&module.name, &declaration.name))
            .map(|found| member_types_of(found.declaration()))
            .unwrap_or_default(),
        _ => member_types_of(declaration),
    }
}

/// Whether `type_reference` is a single enum type, possibly through aliases.
pub fn is_enum_type(
    module: &Module,
    type_reference: &[TypeReference],
    resolver: &dyn ModuleResolver,
) -> bool {
    Context::new(Some(module), resolver).is_enum(type_reference)
}

/// Whether an expression of this type is one of the values of an enum.
pub fn is_enum_value_expression(
    module: &Module,
    expression_type: &ExpressionType,
    resolver: &dyn ModuleResolver,
) -> bool {
    expression_type.is_value && is_enum_type(module, &expression_type.types, resolver)
}

/// Type of a global variable of `module`: its annotation, or the type of
/// its initial value.
pub fn get_global_variable_type(
    module: &Module,
    global: &GlobalVariableDeclaration,
    resolver: &dyn ModuleResolver,
) -> Option<ExpressionType> {
    Context::new(Some(module), resolver).global_variable_type(module, global)
}
