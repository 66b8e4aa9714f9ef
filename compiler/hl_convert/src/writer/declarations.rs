//! Declarations, function contracts and statement blocks.

use hl_ir::{
    AliasTypeDeclaration, ConstructorParameter, Declaration, DeclarationKind, EnumDeclaration,
    EnumValueInitializer, Function, FunctionCondition, FunctionDeclaration,
    GlobalVariableDeclaration, SourcePosition, Statement, StructDeclaration, UnionDeclaration,
};
use hl_parse_tree::Node;

use super::{leaf, TreeWriter};
use crate::error::ConvertResult;

impl TreeWriter<'_> {
    pub(super) fn write_declaration(&self, declaration: &Declaration) -> ConvertResult<Node> {
        let export = if declaration.is_export {
            vec![leaf("export")]
        } else {
            Vec::new()
        };

        let kind = match &declaration.kind {
            DeclarationKind::Alias(value) => self.write_alias(value)?,
            DeclarationKind::Enum(value) => self.write_enum(value)?,
            DeclarationKind::Function(value) => self.write_function(value)?,
            DeclarationKind::FunctionConstructor(value) => self.write_constructor(
                ConstructorLabels::FUNCTION,
                &value.name,
                &value.parameters,
                &value.statements,
                value.source_location,
            )?,
            DeclarationKind::GlobalVariable(value) => self.write_global_variable(value)?,
            DeclarationKind::Struct(value) => self.write_struct(value)?,
            DeclarationKind::TypeConstructor(value) => self.write_constructor(
                ConstructorLabels::TYPE,
                &value.name,
                &value.parameters,
                &value.statements,
                value.source_location,
            )?,
            DeclarationKind::Union(value) => self.write_union(value)?,
        };

        self.node(
            "Declaration",
            vec![
                self.comment_or_empty(declaration.kind.comment())?,
                self.node("Export", export)?,
                kind,
            ],
        )
    }

    fn write_alias(&self, alias: &AliasTypeDeclaration) -> ConvertResult<Node> {
        let alias_type = self.node("Alias_type", vec![self.write_types(&alias.type_reference)?])?;
        self.positioned_node(
            "Alias",
            vec![
                leaf("using"),
                self.name("Alias_name", &alias.name)?,
                leaf("="),
                alias_type,
                leaf(";"),
            ],
            alias.source_location,
        )
    }

    fn write_enum(&self, declaration: &EnumDeclaration) -> ConvertResult<Node> {
        let values = declaration
            .values
            .iter()
            .map(|value| {
                let mut children = vec![
                    self.comment_or_empty(value.comment.as_deref())?,
                    self.name("Enum_value_name", &value.name)?,
                ];
                if let EnumValueInitializer::Explicit(statement) = &value.value {
                    children.push(leaf("="));
                    children.push(self.write_generic_expression(&statement.expression)?);
                }
                children.push(leaf(","));
                self.positioned_node("Enum_value", children, value.source_location)
            })
            .collect::<ConvertResult<Vec<_>>>()?;

        self.positioned_node(
            "Enum",
            vec![
                leaf("enum"),
                self.name("Enum_name", &declaration.name)?,
                leaf("{"),
                self.node("Enum_values", values)?,
                leaf("}"),
            ],
            declaration.source_location,
        )
    }

    fn write_global_variable(&self, global: &GlobalVariableDeclaration) -> ConvertResult<Node> {
        let type_children = match &global.type_reference {
            Some(type_reference) => vec![leaf(":"), self.write_type(type_reference)?],
            None => Vec::new(),
        };
        self.positioned_node(
            "Global_variable",
            vec![
                self.node("Global_variable_mutability", vec![mutability(global.is_mutable)])?,
                self.name("Global_variable_name", &global.name)?,
                self.node("Global_variable_type", type_children)?,
                leaf("="),
                self.write_generic_expression_or_instantiate(&global.initial_value.expression)?,
                leaf(";"),
            ],
            global.source_location,
        )
    }

    fn write_struct(&self, declaration: &StructDeclaration) -> ConvertResult<Node> {
        self.positioned_node(
            "Struct",
            vec![
                leaf("struct"),
                self.name("Struct_name", &declaration.name)?,
                self.write_struct_options(declaration)?,
                leaf("{"),
                self.write_struct_members(declaration)?,
                leaf("}"),
            ],
            declaration.source_location,
        )
    }

    pub(super) fn write_struct_options(
        &self,
        declaration: &StructDeclaration,
    ) -> ConvertResult<Node> {
        let options = [("packed", declaration.is_packed), ("literal", declaration.is_literal)]
            .into_iter()
            .filter(|(_, is_set)| *is_set)
            .map(|(option, _)| self.node("Struct_option", vec![leaf(option)]))
            .collect::<ConvertResult<Vec<_>>>()?;
        self.node("Struct_options", options)
    }

    pub(super) fn write_struct_members(
        &self,
        declaration: &StructDeclaration,
    ) -> ConvertResult<Node> {
        let members = declaration
            .member_names
            .iter()
            .zip(&declaration.member_types)
            .zip(&declaration.member_default_values)
            .enumerate()
            .map(|(index, ((name, type_reference), default_value))| {
                let member_type =
                    self.node("Struct_member_type", vec![self.write_type(type_reference)?])?;
                self.positioned_node(
                    "Struct_member",
                    vec![
                        self.comment_or_empty(declaration.member_comment(index))?,
                        self.name("Struct_member_name", name)?,
                        leaf(":"),
                        member_type,
                        leaf("="),
                        self.write_generic_expression_or_instantiate(&default_value.expression)?,
                        leaf(";"),
                    ],
                    member_position(declaration.member_source_positions.as_deref(), index),
                )
            })
            .collect::<ConvertResult<Vec<_>>>()?;
        self.node("Struct_members", members)
    }

    fn write_union(&self, declaration: &UnionDeclaration) -> ConvertResult<Node> {
        self.positioned_node(
            "Union",
            vec![
                leaf("union"),
                self.name("Union_name", &declaration.name)?,
                leaf("{"),
                self.write_union_members(declaration)?,
                leaf("}"),
            ],
            declaration.source_location,
        )
    }

    pub(super) fn write_union_members(
        &self,
        declaration: &UnionDeclaration,
    ) -> ConvertResult<Node> {
        let members = declaration
            .member_names
            .iter()
            .zip(&declaration.member_types)
            .enumerate()
            .map(|(index, (name, type_reference))| {
                let member_type =
                    self.node("Union_member_type", vec![self.write_type(type_reference)?])?;
                self.positioned_node(
                    "Union_member",
                    vec![
                        self.comment_or_empty(declaration.member_comment(index))?,
                        self.name("Union_member_name", name)?,
                        leaf(":"),
                        member_type,
                        leaf(";"),
                    ],
                    member_position(declaration.member_source_positions.as_deref(), index),
                )
            })
            .collect::<ConvertResult<Vec<_>>>()?;
        self.node("Union_members", members)
    }

    fn write_function(&self, function: &Function) -> ConvertResult<Node> {
        let declaration = self.write_function_declaration(&function.declaration)?;
        let children = match &function.definition {
            Some(definition) => vec![
                declaration,
                self.positioned_node(
                    "Function_definition",
                    vec![self.write_block(&definition.statements)?],
                    definition.source_location,
                )?,
            ],
            None => vec![declaration, leaf(";")],
        };
        self.node("Function", children)
    }

    fn write_function_declaration(&self, declaration: &FunctionDeclaration) -> ConvertResult<Node> {
        let mut children = vec![leaf("function"), self.name("Function_name", &declaration.name)?];
        children.extend(self.write_function_signature(
            &declaration.function_type,
            &declaration.input_parameter_names,
            &declaration.output_parameter_names,
        )?);

        let options = self.node(
            "Function_options",
            vec![
                self.write_conditions(
                    ConditionLabels::PRECONDITION,
                    &declaration.preconditions,
                )?,
                self.write_conditions(
                    ConditionLabels::POSTCONDITION,
                    &declaration.postconditions,
                )?,
            ],
        )?;
        children.push(options);

        self.positioned_node("Function_declaration", children, declaration.source_location)
    }

    fn write_conditions(
        &self,
        labels: ConditionLabels,
        conditions: &[FunctionCondition],
    ) -> ConvertResult<Node> {
        let conditions = conditions
            .iter()
            .map(|condition| {
                self.node(
                    labels.element,
                    vec![
                        leaf(labels.keyword),
                        self.name(labels.name, &format!("\"{}\"", condition.description))?,
                        leaf("{"),
                        self.write_generic_expression(&condition.condition.expression)?,
                        leaf("}"),
                    ],
                )
            })
            .collect::<ConvertResult<Vec<_>>>()?;
        self.node(labels.array, conditions)
    }

    fn write_constructor(
        &self,
        labels: ConstructorLabels,
        name: &str,
        parameters: &[ConstructorParameter],
        statements: &[Statement],
        source_location: Option<SourcePosition>,
    ) -> ConvertResult<Node> {
        let (names, types): (Vec<String>, Vec<_>) = parameters
            .iter()
            .map(|parameter| (parameter.name.clone(), parameter.type_reference.clone()))
            .unzip();

        self.positioned_node(
            labels.declaration,
            vec![
                leaf(labels.keyword),
                self.name(labels.name, name)?,
                leaf("("),
                self.write_parameters(labels.parameters, &names, &types, false)?,
                leaf(")"),
                self.write_block(statements)?,
            ],
            source_location,
        )
    }

    /// `{ Statements }`.
    pub(super) fn write_block(&self, statements: &[Statement]) -> ConvertResult<Node> {
        self.node(
            "Block",
            vec![
                leaf("{"),
                self.write_statements("Statements", statements)?,
                leaf("}"),
            ],
        )
    }
}

fn mutability(is_mutable: bool) -> Node {
    leaf(if is_mutable { "mutable" } else { "var" })
}

fn member_position(positions: Option<&[SourcePosition]>, index: usize) -> Option<SourcePosition> {
    positions.and_then(|positions| positions.get(index).copied())
}

#[derive(Copy, Clone)]
struct ConditionLabels {
    array: &'static str,
    element: &'static str,
    keyword: &'static str,
    name: &'static str,
}

impl ConditionLabels {
    const PRECONDITION: Self = ConditionLabels {
        array: "Function_preconditions",
        element: "Function_precondition",
        keyword: "precondition",
        name: "Function_precondition_name",
    };
    const POSTCONDITION: Self = ConditionLabels {
        array: "Function_postconditions",
        element: "Function_postcondition",
        keyword: "postcondition",
        name: "Function_postcondition_name",
    };
}

#[derive(Copy, Clone)]
struct ConstructorLabels {
    declaration: &'static str,
    keyword: &'static str,
    name: &'static str,
    parameters: &'static str,
}

impl ConstructorLabels {
    const TYPE: Self = ConstructorLabels {
        declaration: "Type_constructor",
        keyword: "type_constructor",
        name: "Type_constructor_name",
        parameters: "Type_constructor_parameters",
    };
    const FUNCTION: Self = ConstructorLabels {
        declaration: "Function_constructor",
        keyword: "function_constructor",
        name: "Function_constructor_name",
        parameters: "Function_constructor_parameters",
    };
}
