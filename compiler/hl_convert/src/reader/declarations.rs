//! Declarations.

use hl_ir::{
    AliasTypeDeclaration, ConstructorParameter, Declaration, DeclarationKind, EnumDeclaration,
    EnumValue, EnumValueInitializer, Function, FunctionCondition, FunctionConstructor,
    FunctionDeclaration, FunctionDefinition, FunctionType, GlobalVariableDeclaration,
    IndexedComment, Linkage, SourcePosition, Statement, StructDeclaration, TypeConstructor,
    TypeReference, UnionDeclaration,
};
use hl_parse_tree::Node;

use super::{child, read_comment, terminal, unquote, TreeReader};
use crate::error::{ConvertError, ConvertResult};

const DECLARATION_KINDS: [&str; 8] = [
    "Alias",
    "Enum",
    "Function",
    "Function_constructor",
    "Global_variable",
    "Struct",
    "Type_constructor",
    "Union",
];

/// Members of a struct or union body, before they are split into the
/// parallel arrays of the declaration.
#[derive(Default)]
struct Members {
    names: Vec<String>,
    types: Vec<TypeReference>,
    default_values: Vec<Statement>,
    comments: Vec<IndexedComment>,
    positions: Vec<Option<SourcePosition>>,
}

impl Members {
    /// Positions are kept only when every member has one.
    fn source_positions(&self) -> Option<Vec<SourcePosition>> {
        if self.positions.is_empty() {
            return None;
        }
        self.positions.iter().copied().collect()
    }
}

impl TreeReader<'_> {
    pub(super) fn read_declaration(&self, node: &Node) -> ConvertResult<Declaration> {
        let comment = read_comment(node);
        let is_export = node
            .find_child("Export")
            .is_some_and(|export| export.has_token("export"));
        let value = node
            .children
            .iter()
            .find(|child| DECLARATION_KINDS.iter().any(|kind| child.is(kind)))
            .ok_or_else(|| ConvertError::missing_child(node.label(), "declaration kind"))?;

        let kind = match value.label() {
            "Alias" => DeclarationKind::Alias(AliasTypeDeclaration {
                name: terminal(value, "Alias_name")?.to_owned(),
                type_reference: self.read_types(child(child(value, "Alias_type")?, "Type")?)?,
                comment,
                source_location: value.word.source_location,
            }),
            "Enum" => DeclarationKind::Enum(self.read_enum(value, comment)?),
            "Function" => {
                DeclarationKind::Function(self.read_function(value, is_export, comment)?)
            }
            "Function_constructor" => {
                let (name, parameters, statements) = self.read_constructor(
                    value,
                    "Function_constructor_name",
                    "Function_constructor_parameters",
                )?;
                DeclarationKind::FunctionConstructor(FunctionConstructor {
                    name,
                    parameters,
                    statements,
                    comment,
                    source_location: value.word.source_location,
                })
            }
            "Global_variable" => {
                DeclarationKind::GlobalVariable(self.read_global_variable(value, comment)?)
            }
            "Struct" => {
                let mut declaration =
                    self.read_struct_body(terminal(value, "Struct_name")?, value)?;
                declaration.comment = comment;
                declaration.source_location = value.word.source_location;
                DeclarationKind::Struct(declaration)
            }
            "Type_constructor" => {
                let (name, parameters, statements) = self.read_constructor(
                    value,
                    "Type_constructor_name",
                    "Type_constructor_parameters",
                )?;
                DeclarationKind::TypeConstructor(TypeConstructor {
                    name,
                    parameters,
                    statements,
                    comment,
                    source_location: value.word.source_location,
                })
            }
            "Union" => {
                let mut declaration =
                    self.read_union_body(terminal(value, "Union_name")?, value)?;
                declaration.comment = comment;
                declaration.source_location = value.word.source_location;
                DeclarationKind::Union(declaration)
            }
            other => return Err(ConvertError::unexpected_label("declaration kind", other)),
        };

        Ok(Declaration::new(is_export, kind))
    }

    fn read_enum(&self, node: &Node, comment: Option<String>) -> ConvertResult<EnumDeclaration> {
        let values = child(node, "Enum_values")?
            .children_with_label("Enum_value")
            .map(|value| {
                let initializer = match value.find_child("Generic_expression") {
                    Some(expression) => {
                        EnumValueInitializer::Explicit(Statement::new(
                            self.read_generic_expression(expression)?,
                        ))
                    }
                    None => EnumValueInitializer::AutoIncrement,
                };
                Ok(EnumValue {
                    name: terminal(value, "Enum_value_name")?.to_owned(),
                    value: initializer,
                    comment: read_comment(value),
                    source_location: value.word.source_location,
                })
            })
            .collect::<ConvertResult<Vec<_>>>()?;

        Ok(EnumDeclaration {
            name: terminal(node, "Enum_name")?.to_owned(),
            values,
            comment,
            source_location: node.word.source_location,
        })
    }

    fn read_global_variable(
        &self,
        node: &Node,
        comment: Option<String>,
    ) -> ConvertResult<GlobalVariableDeclaration> {
        let type_reference = match node
            .find_child("Global_variable_type")
            .and_then(|type_node| type_node.find_child("Type"))
        {
            Some(type_node) => Some(self.read_type(type_node)?),
            None => None,
        };
        let initial_value = self.read_generic_expression_or_instantiate(child(
            node,
            "Generic_expression_or_instantiate",
        )?)?;

        Ok(GlobalVariableDeclaration {
            name: terminal(node, "Global_variable_name")?.to_owned(),
            type_reference,
            initial_value: Statement::new(initial_value),
            is_mutable: child(node, "Global_variable_mutability")?.has_token("mutable"),
            comment,
            source_location: node.word.source_location,
        })
    }

    /// Options and members of a struct declaration or struct expression.
    pub(super) fn read_struct_body(
        &self,
        name: &str,
        node: &Node,
    ) -> ConvertResult<StructDeclaration> {
        let options = node.find_child("Struct_options");
        let has_option = |option: &str| {
            options.is_some_and(|options| {
                options
                    .children_with_label("Struct_option")
                    .any(|value| value.has_token(option))
            })
        };

        let mut members = Members::default();
        for (index, member) in child(node, "Struct_members")?
            .children_with_label("Struct_member")
            .enumerate()
        {
            self.read_member(
                &mut members,
                index,
                member,
                ("Struct_member_name", "Struct_member_type"),
            )?;
            let default_value = self.read_generic_expression_or_instantiate(child(
                member,
                "Generic_expression_or_instantiate",
            )?)?;
            members.default_values.push(Statement::new(default_value));
        }

        Ok(StructDeclaration {
            name: name.to_owned(),
            member_source_positions: members.source_positions(),
            member_types: members.types,
            member_names: members.names,
            member_default_values: members.default_values,
            is_packed: has_option("packed"),
            is_literal: has_option("literal"),
            comment: None,
            member_comments: members.comments,
            source_location: None,
        })
    }

    /// Members of a union declaration or union expression.
    pub(super) fn read_union_body(
        &self,
        name: &str,
        node: &Node,
    ) -> ConvertResult<UnionDeclaration> {
        let mut members = Members::default();
        for (index, member) in child(node, "Union_members")?
            .children_with_label("Union_member")
            .enumerate()
        {
            self.read_member(
                &mut members,
                index,
                member,
                ("Union_member_name", "Union_member_type"),
            )?;
        }

        Ok(UnionDeclaration {
            name: name.to_owned(),
            member_source_positions: members.source_positions(),
            member_types: members.types,
            member_names: members.names,
            comment: None,
            member_comments: members.comments,
            source_location: None,
        })
    }

    fn read_member(
        &self,
        members: &mut Members,
        index: usize,
        member: &Node,
        (name_label, type_label): (&'static str, &'static str),
    ) -> ConvertResult<()> {
        members.names.push(terminal(member, name_label)?.to_owned());
        members.types.push(self.read_type(child(child(member, type_label)?, "Type")?)?);
        if let Some(comment) = read_comment(member) {
            members.comments.push(IndexedComment { index, comment });
        }
        members.positions.push(member.word.source_location);
        Ok(())
    }

    fn read_function(
        &self,
        node: &Node,
        is_export: bool,
        comment: Option<String>,
    ) -> ConvertResult<Function> {
        let declaration_node = child(node, "Function_declaration")?;
        let name = terminal(declaration_node, "Function_name")?.to_owned();
        let (function_type, input_parameter_names, output_parameter_names) =
            self.read_function_signature(declaration_node)?;

        let options = declaration_node.find_child("Function_options");
        let preconditions = self.read_conditions(
            options.and_then(|options| options.find_child("Function_preconditions")),
            "Function_precondition",
            "Function_precondition_name",
        )?;
        let postconditions = self.read_conditions(
            options.and_then(|options| options.find_child("Function_postconditions")),
            "Function_postcondition",
            "Function_postcondition_name",
        )?;

        let definition = match node.find_child("Function_definition") {
            Some(definition) => Some(FunctionDefinition {
                name: name.clone(),
                statements: self.read_block(child(definition, "Block")?)?,
                source_location: definition.word.source_location,
            }),
            None => None,
        };

        Ok(Function {
            declaration: FunctionDeclaration {
                name,
                function_type,
                input_parameter_names,
                output_parameter_names,
                linkage: Linkage::from_export(is_export),
                preconditions,
                postconditions,
                comment,
                source_location: declaration_node.word.source_location,
            },
            definition,
        })
    }

    /// Input and output parameter lists of a function or function expression.
    pub(super) fn read_function_signature(
        &self,
        node: &Node,
    ) -> ConvertResult<(FunctionType, Vec<String>, Vec<String>)> {
        let inputs = self.read_parameters(child(node, "Function_input_parameters")?)?;
        let outputs = self.read_parameters(child(node, "Function_output_parameters")?)?;
        let function_type = FunctionType {
            input_parameter_types: inputs.types,
            output_parameter_types: outputs.types,
            is_variadic: inputs.is_variadic,
        };
        Ok((function_type, inputs.names, outputs.names))
    }

    fn read_conditions(
        &self,
        node: Option<&Node>,
        element_label: &'static str,
        name_label: &'static str,
    ) -> ConvertResult<Vec<FunctionCondition>> {
        node.into_iter()
            .flat_map(|node| node.children_with_label(element_label))
            .map(|condition| {
                Ok(FunctionCondition {
                    description: unquote(terminal(condition, name_label)?).to_owned(),
                    condition: Statement::new(
                        self.read_generic_expression(child(condition, "Generic_expression")?)?,
                    ),
                })
            })
            .collect()
    }

    /// Name, parameters and body of a type or function constructor. Type
    /// names in the body that match a parameter are parameter references.
    fn read_constructor(
        &self,
        node: &Node,
        name_label: &'static str,
        parameters_label: &'static str,
    ) -> ConvertResult<(String, Vec<ConstructorParameter>, Vec<Statement>)> {
        let read = self.read_parameters(child(node, parameters_label)?)?;
        let parameters = read
            .names
            .iter()
            .zip(read.types)
            .map(|(name, type_reference)| ConstructorParameter {
                name: name.clone(),
                type_reference,
            })
            .collect();

        let body_reader = self.with_type_parameters(&read.names);
        let statements = body_reader.read_block(child(node, "Block")?)?;

        Ok((terminal(node, name_label)?.to_owned(), parameters, statements))
    }

    /// `{ Statements }`.
    pub(super) fn read_block(&self, node: &Node) -> ConvertResult<Vec<Statement>> {
        self.read_statements(child(node, "Statements")?)
    }
}
