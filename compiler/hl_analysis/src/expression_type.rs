//! Type inference over IR expressions, in the scope of a parse tree
//! position.
//!
//! Every expression either has a type or does not: statements, invalid
//! text and anything referring to an unknown name answer `None`.

use hl_ir::types::{
    create_boolean_type, create_constant_array_type, create_custom_type_reference,
    create_function_pointer_type_from_declaration, create_null_type, create_pointer_type,
};
use hl_ir::{DeclarationKind, Expression, Import, Module, TypeReference, UnaryOperation};
use hl_parse_tree::Node;
use hl_stack::ensure_sufficient_stack;

use crate::context::{Context, Scope};
use crate::resolver::{read_module, ModuleResolver, ParseTreeModules, ParseTreeResolver};
use crate::scope::{find_binding, Binding};

/// The type of an expression, and whether the expression is a value of
/// that type or names the type itself.
///
/// `My_enum` names a type; `My_enum.Value` is a value of it. An empty
/// `types` is `void`, as returned by calls to functions without outputs.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ExpressionType {
    pub types: Vec<TypeReference>,
    pub is_value: bool,
}

impl ExpressionType {
    pub fn value(type_reference: TypeReference) -> Self {
        Self::values(vec![type_reference])
    }

    pub fn values(types: Vec<TypeReference>) -> Self {
        ExpressionType {
            types,
            is_value: true,
        }
    }

    pub fn named_type(type_reference: TypeReference) -> Self {
        ExpressionType {
            types: vec![type_reference],
            is_value: false,
        }
    }

    /// The single type of a value expression.
    pub fn into_value_type(self) -> Option<TypeReference> {
        if !self.is_value {
            return None;
        }
        self.types.into_iter().next()
    }
}

impl Context<'_> {
    pub(crate) fn expression_type(
        &self,
        scope: Scope<'_>,
        expression: &Expression,
    ) -> Option<ExpressionType> {
        ensure_sufficient_stack(|| self.infer(scope, expression))
    }

    fn infer(&self, scope: Scope<'_>, expression: &Expression) -> Option<ExpressionType> {
        match expression {
            Expression::Access(access) => {
                if let Expression::Variable(variable) = access.expression.as_ref() {
                    if let Some(import) = visible_import(scope, &variable.name) {
                        return self.imported_declaration_type(import, &access.member_name);
                    }
                }
                let left_hand_side = self.expression_type(scope, &access.expression)?;
                self.member_type(&left_hand_side, &access.member_name)
            }
            Expression::AccessArray(access) => {
                let array = self.expression_type(scope, &access.expression)?;
                let element = match array.types.first()? {
                    TypeReference::ConstantArray(array) => array.value_type.first()?,
                    TypeReference::Pointer(pointer) => pointer.element_type.first()?,
                    _ => return None,
                };
                Some(ExpressionType::value(element.clone()))
            }
            Expression::Binary(binary) => {
                if binary.operation.yields_boolean() {
                    return Some(ExpressionType::value(create_boolean_type()));
                }
                self.expression_type(scope, &binary.left_hand_side)
                    .or_else(|| self.expression_type(scope, &binary.right_hand_side))
            }
            Expression::Call(call) => {
                let callee = self.expression_type(scope, &call.expression)?;
                if !callee.is_value {
                    return None;
                }
                let TypeReference::FunctionPointer(function) =
                    self.underlying_type(callee.types.first()?)?
                else {
                    return None;
                };
                Some(ExpressionType::values(
                    function.function_type.output_parameter_types,
                ))
            }
            Expression::Cast(cast) => Some(ExpressionType::value(cast.destination_type.clone())),
            Expression::CompileTime(value) => self.expression_type(scope, &value.expression),
            Expression::Constant(constant) => {
                Some(ExpressionType::value(constant.type_reference.clone()))
            }
            Expression::ConstantArray(array) => {
                let size = u64::try_from(array.array_data.len()).ok()?;
                let Some(first) = array.array_data.first() else {
                    return Some(ExpressionType::value(create_constant_array_type(
                        Vec::new(),
                        size,
                    )));
                };
                let element = self.expression_type(scope, &first.expression)?;
                if !element.is_value {
                    return None;
                }
                Some(ExpressionType::value(create_constant_array_type(
                    element.types,
                    size,
                )))
            }
            Expression::DereferenceAndAccess(access) => {
                let pointer = self.expression_type(scope, &access.expression)?;
                let pointee = pointer.types.first()?.as_pointer()?.element_type.first()?;
                self.member_type(&ExpressionType::value(pointee.clone()), &access.member_name)
            }
            Expression::Function(function) => Some(ExpressionType::value(
                create_function_pointer_type_from_declaration(&function.declaration),
            )),
            Expression::Instantiate(_) => self
                .instantiate_type(scope)
                .map(|custom| ExpressionType::value(TypeReference::Custom(custom))),
            Expression::NullPointer => Some(ExpressionType::value(create_null_type())),
            Expression::Parenthesis(value) => self.expression_type(scope, &value.expression),
            Expression::TernaryCondition(ternary) => {
                self.expression_type(scope, &ternary.then_statement.expression)
            }
            Expression::Type(value) => {
                Some(ExpressionType::named_type(value.type_reference.clone()))
            }
            Expression::Unary(unary) => {
                let operand = self.expression_type(scope, &unary.expression)?;
                if !operand.is_value || operand.types.is_empty() {
                    return None;
                }
                match unary.operation {
                    UnaryOperation::AddressOf => Some(ExpressionType::value(
                        create_pointer_type(operand.types, false),
                    )),
                    UnaryOperation::Indirection => {
                        let pointee = operand.types.first()?.as_pointer()?.element_type.first()?;
                        Some(ExpressionType::value(pointee.clone()))
                    }
                    _ => Some(operand),
                }
            }
            Expression::Variable(variable) => self.variable_type(scope, &variable.name),
            Expression::Assert(_)
            | Expression::Assignment(_)
            | Expression::Block(_)
            | Expression::Break(_)
            | Expression::Comment(_)
            | Expression::Continue
            | Expression::Defer(_)
            | Expression::ForLoop(_)
            | Expression::If(_)
            | Expression::InstanceCall(_)
            | Expression::Invalid(_)
            | Expression::Reflection(_)
            | Expression::Return(_)
            | Expression::Struct(_)
            | Expression::Switch(_)
            | Expression::Union(_)
            | Expression::VariableDeclaration(_)
            | Expression::VariableDeclarationWithType(_)
            | Expression::WhileLoop(_) => None,
        }
    }

    fn variable_type(&self, scope: Scope<'_>, name: &str) -> Option<ExpressionType> {
        if let Some(binding) = scope
            .root
            .and_then(|root| find_binding(root, scope.position, name))
        {
            return self.binding_type(scope, &binding).map(ExpressionType::value);
        }
        let declaration = scope.module.find_declaration(name)?;
        self.declaration_type(scope.module, declaration)
    }

    /// Type of a local binding: its annotation, or the type of the value it
    /// is initialized with.
    pub(crate) fn binding_type(
        &self,
        scope: Scope<'_>,
        binding: &Binding<'_>,
    ) -> Option<TypeReference> {
        if let Some(type_node) = binding.type_node {
            return match hl_convert::parse_tree_to_types(type_node, scope.module) {
                Ok(types) => types.into_iter().next(),
                Err(error) => {
                    tracing::debug!(name = binding.name, %error, "unreadable type annotation");
                    None
                }
            };
        }

        let value = binding.value?;
        let expression = match hl_convert::parse_tree_to_expression(value, scope.module) {
            Ok(expression) => expression,
            Err(error) => {
                tracing::debug!(name = binding.name, %error, "unreadable initializer");
                return None;
            }
        };
        self.expression_type(scope.at(&binding.declaration_position), &expression)?
            .into_value_type()
    }

    fn imported_declaration_type(&self, import: &Import, name: &str) -> Option<ExpressionType> {
        let module = self.module(&import.module_name)?;
        let declaration = module.find_declaration(name)?;
        self.declaration_type(&module, declaration)
    }

    /// Type of `.member` applied to an expression of type `owner`.
    fn member_type(&self, owner: &ExpressionType, member: &str) -> Option<ExpressionType> {
        let TypeReference::Custom(custom) = owner.types.first()? else {
            return None;
        };
        let found = self.underlying_declaration(custom)?;
        let module_name = found.module.name.as_str();

        match &found.declaration().kind {
            DeclarationKind::Enum(value) => Some(ExpressionType {
                types: vec![create_custom_type_reference(module_name, &value.name)],
                is_value: value.values.iter().any(|value| value.name == member),
            }),
            DeclarationKind::Struct(value) => Some(member_of(
                module_name,
                &value.name,
                &value.member_names,
                &value.member_types,
                member,
            )),
            DeclarationKind::Union(value) => Some(member_of(
                module_name,
                &value.name,
                &value.member_names,
                &value.member_types,
                member,
            )),
            DeclarationKind::Function(function) => Some(ExpressionType::value(
                create_function_pointer_type_from_declaration(&function.declaration),
            )),
            _ => None,
        }
    }
}

/// The member's type, or the owner type itself for a name that is not one
/// of its members.
fn member_of(
    module_name: &str,
    owner_name: &str,
    member_names: &[String],
    member_types: &[TypeReference],
    member: &str,
) -> ExpressionType {
    member_names
        .iter()
        .position(|name| name == member)
        .and_then(|index| member_types.get(index))
        .map_or_else(
            || ExpressionType::named_type(create_custom_type_reference(module_name, owner_name)),
            |member_type| ExpressionType::value(member_type.clone()),
        )
}

/// The import `name` refers to, unless a local or module-level name hides it.
fn visible_import<'a>(scope: Scope<'a>, name: &str) -> Option<&'a Import> {
    let import = scope.module.find_import_by_alias(name)?;
    let is_shadowed = scope.module.find_declaration(name).is_some()
        || scope
            .root
            .is_some_and(|root| find_binding(root, scope.position, name).is_some());
    (!is_shadowed).then_some(import)
}

/// Type of `expression` as seen from `position` in the tree of `module`.
///
/// Other modules are reached through `resolver`.
pub fn get_expression_type(
    module: &Module,
    root: Option<&Node>,
    position: &[usize],
    expression: &Expression,
    resolver: &dyn ModuleResolver,
) -> Option<ExpressionType> {
    let scope = Scope {
        module,
        root,
        position,
    };
    Context::new(Some(module), resolver).expression_type(scope, expression)
}

/// Type of `expression` as seen from `scope_position` in `root`, with other
/// modules read from their parse trees.
///
/// `root` does not need to convert cleanly: declarations that fail to read
/// are ignored, and locals are looked up in the tree itself.
#[tracing::instrument(level = "debug", skip_all)]
pub fn get_expression_type_2(
    root: &Node,
    scope_position: Option<&[usize]>,
    expression: &Expression,
    resolver: &dyn ParseTreeResolver,
) -> Option<ExpressionType> {
    let module = read_module(root)?;
    let modules = ParseTreeModules::new(resolver);
    get_expression_type(
        &module,
        Some(root),
        scope_position.unwrap_or(&[]),
        expression,
        &modules,
    )
}
