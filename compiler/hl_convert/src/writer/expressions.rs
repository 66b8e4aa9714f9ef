//! Statements and expressions.
//!
//! Operator precedence is not re-derived: each IR expression becomes one
//! `Expression_*` node and the nesting of the tree is the nesting of the IR.

use hl_ir::{
    BinaryOperation, CastType, ConditionStatementPair, Expression, ForLoopExpression, IfCondition,
    InstantiateExpressionType, Statement, SwitchCaseValue, SwitchExpression,
};
use hl_parse_tree::Node;
use hl_stack::ensure_sufficient_stack;

use super::{leaf, TreeWriter};
use crate::error::{ConvertError, ConvertResult};
use crate::literal::{comment_to_words, constant_to_word};

impl TreeWriter<'_> {
    /// Array node of `Statement` children.
    pub(super) fn write_statements(
        &self,
        label: &str,
        statements: &[Statement],
    ) -> ConvertResult<Node> {
        let statements = statements
            .iter()
            .map(|statement| self.write_statement(statement))
            .collect::<ConvertResult<Vec<_>>>()?;
        self.node(label, statements)
    }

    fn write_statement(&self, statement: &Statement) -> ConvertResult<Node> {
        let mut children = vec![self.write_generic_expression(&statement.expression)?];
        if !is_block_like(&statement.expression) {
            children.push(leaf(";"));
        }
        self.positioned_node("Statement", children, statement.source_position)
    }

    pub(super) fn write_generic_expression(&self, expression: &Expression) -> ConvertResult<Node> {
        if matches!(expression, Expression::Instantiate(_)) {
            return Err(ConvertError::Unrenderable(
                "instantiate expression outside an initializer",
            ));
        }
        let inner = ensure_sufficient_stack(|| self.write_expression(expression))?;
        self.node("Generic_expression", vec![inner])
    }

    pub(super) fn write_generic_expression_or_instantiate(
        &self,
        expression: &Expression,
    ) -> ConvertResult<Node> {
        let inner = match expression {
            Expression::Instantiate(_) => self.write_expression(expression)?,
            _ => self.write_generic_expression(expression)?,
        };
        self.node("Generic_expression_or_instantiate", vec![inner])
    }

    fn write_expression(&self, expression: &Expression) -> ConvertResult<Node> {
        match expression {
            Expression::Access(value) => self.node(
                "Expression_access",
                vec![
                    self.write_generic_expression(&value.expression)?,
                    leaf("."),
                    self.name("Expression_access_member_name", &value.member_name)?,
                ],
            ),
            Expression::AccessArray(value) => self.node(
                "Expression_access_array",
                vec![
                    self.write_generic_expression(&value.expression)?,
                    leaf("["),
                    self.write_generic_expression(&value.index)?,
                    leaf("]"),
                ],
            ),
            Expression::Assert(value) => {
                let mut children = vec![leaf("assert")];
                if let Some(message) = &value.message {
                    let message = format!("\"{message}\"");
                    children.push(self.name("Expression_assert_message", &message)?);
                }
                children.push(leaf("{"));
                children.push(self.write_generic_expression(&value.statement.expression)?);
                children.push(leaf("}"));
                self.node("Expression_assert", children)
            }
            Expression::Assignment(value) => {
                let symbol = match value.additional_operation {
                    None => "=",
                    Some(operation) => operation.assignment_symbol().ok_or(
                        ConvertError::Unrenderable("compound assignment with this operation"),
                    )?,
                };
                self.node(
                    "Expression_assignment",
                    vec![
                        self.write_generic_expression(&value.left_hand_side)?,
                        self.name("Expression_assignment_symbol", symbol)?,
                        self.write_generic_expression_or_instantiate(&value.right_hand_side)?,
                    ],
                )
            }
            Expression::Binary(value) => self.node(
                "Expression_binary",
                vec![
                    self.write_generic_expression(&value.left_hand_side)?,
                    self.name("Expression_binary_symbol", value.operation.as_symbol())?,
                    self.write_generic_expression(&value.right_hand_side)?,
                ],
            ),
            Expression::Block(value) => self.node(
                "Expression_block",
                vec![
                    leaf("{"),
                    self.write_statements("Expression_block_statements", &value.statements)?,
                    leaf("}"),
                ],
            ),
            Expression::Break(value) => {
                let mut children = vec![leaf("break")];
                if value.loop_count > 0 {
                    children.push(
                        self.name("Expression_break_loop_count", &value.loop_count.to_string())?,
                    );
                }
                self.node("Expression_break", children)
            }
            Expression::Call(value) => {
                let arguments = value
                    .arguments
                    .iter()
                    .map(|argument| self.write_generic_expression_or_instantiate(argument))
                    .collect::<ConvertResult<Vec<_>>>()?;
                self.node(
                    "Expression_call",
                    vec![
                        self.write_generic_expression(&value.expression)?,
                        leaf("("),
                        self.separated("Expression_call_arguments", arguments, ",")?,
                        leaf(")"),
                    ],
                )
            }
            Expression::Cast(value) => {
                let keyword = match value.cast_type {
                    CastType::Numeric => "as",
                    CastType::BitCast => "bit_cast",
                };
                self.node(
                    "Expression_cast",
                    vec![
                        self.write_generic_expression(&value.source)?,
                        leaf(keyword),
                        self.node(
                            "Expression_cast_destination_type",
                            vec![self.write_type(&value.destination_type)?],
                        )?,
                    ],
                )
            }
            Expression::Comment(value) => {
                let text = comment_to_words(&value.comment).join("\n");
                self.node("Expression_comment", vec![leaf(&text)])
            }
            Expression::CompileTime(value) => self.node(
                "Expression_compile_time",
                vec![leaf("comptime"), self.write_generic_expression(&value.expression)?],
            ),
            Expression::Constant(value) => {
                self.node("Expression_constant", vec![Node::leaf(constant_to_word(value)?)])
            }
            Expression::ConstantArray(value) => {
                let elements = value
                    .array_data
                    .iter()
                    .map(|element| {
                        self.write_generic_expression_or_instantiate(&element.expression)
                    })
                    .collect::<ConvertResult<Vec<_>>>()?;
                self.node(
                    "Expression_create_array",
                    vec![
                        leaf("["),
                        self.separated("Expression_create_array_elements", elements, ",")?,
                        leaf("]"),
                    ],
                )
            }
            Expression::Continue => self.node("Expression_continue", vec![leaf("continue")]),
            Expression::Defer(value) => self.node(
                "Expression_defer",
                vec![leaf("defer"), self.write_generic_expression(&value.expression_to_defer)?],
            ),
            Expression::DereferenceAndAccess(value) => self.node(
                "Expression_dereference_and_access",
                vec![
                    self.write_generic_expression(&value.expression)?,
                    leaf("->"),
                    self.name("Expression_access_member_name", &value.member_name)?,
                ],
            ),
            Expression::ForLoop(value) => self.write_for_loop(value),
            Expression::Function(value) => {
                let mut declaration = vec![leaf("function")];
                declaration.extend(self.write_function_signature(
                    &value.declaration.function_type,
                    &value.declaration.input_parameter_names,
                    &value.declaration.output_parameter_names,
                )?);
                self.node(
                    "Expression_function",
                    vec![
                        self.node("Expression_function_declaration", declaration)?,
                        self.node(
                            "Expression_function_definition",
                            vec![self.write_block(&value.definition.statements)?],
                        )?,
                    ],
                )
            }
            Expression::If(value) => self.write_if(&value.series),
            Expression::InstanceCall(value) => {
                let parameters = value
                    .arguments
                    .iter()
                    .map(|argument| self.write_generic_expression(&argument.expression))
                    .collect::<ConvertResult<Vec<_>>>()?;
                self.node(
                    "Expression_instance_call",
                    vec![
                        self.write_generic_expression(&value.left_hand_side)?,
                        leaf("<"),
                        self.separated("Expression_instance_call_parameters", parameters, ",")?,
                        leaf(">"),
                    ],
                )
            }
            Expression::Instantiate(value) => {
                let expression_type = match value.instantiate_type {
                    InstantiateExpressionType::Default => Vec::new(),
                    InstantiateExpressionType::Explicit => vec![leaf("explicit")],
                };
                let members = value
                    .members
                    .iter()
                    .map(|member| {
                        let name =
                            self.name("Expression_instantiate_member_name", &member.member_name)?;
                        let value =
                            self.write_generic_expression_or_instantiate(&member.value.expression)?;
                        self.node("Expression_instantiate_member", vec![name, leaf(":"), value])
                    })
                    .collect::<ConvertResult<Vec<_>>>()?;
                self.node(
                    "Expression_instantiate",
                    vec![
                        self.node("Expression_instantiate_expression_type", expression_type)?,
                        leaf("{"),
                        self.separated("Expression_instantiate_members", members, ",")?,
                        leaf("}"),
                    ],
                )
            }
            Expression::Invalid(_) => Err(ConvertError::Unrenderable("invalid expression")),
            Expression::NullPointer => self.node("Expression_null_pointer", vec![leaf("null")]),
            Expression::Parenthesis(value) => self.node(
                "Expression_parenthesis",
                vec![leaf("("), self.write_generic_expression(&value.expression)?, leaf(")")],
            ),
            Expression::Reflection(value) => {
                let arguments = value
                    .arguments
                    .iter()
                    .map(|argument| self.write_generic_expression(argument))
                    .collect::<ConvertResult<Vec<_>>>()?;
                self.node(
                    "Expression_reflection",
                    vec![
                        leaf("@"),
                        self.name("Expression_reflection_name", &value.name)?,
                        leaf("("),
                        self.separated("Expression_reflection_arguments", arguments, ",")?,
                        leaf(")"),
                    ],
                )
            }
            Expression::Return(value) => {
                let mut children = vec![leaf("return")];
                if let Some(expression) = &value.expression {
                    children.push(self.write_generic_expression_or_instantiate(expression)?);
                }
                self.node("Expression_return", children)
            }
            Expression::Struct(value) => self.node(
                "Expression_struct",
                vec![
                    leaf("struct"),
                    self.write_struct_options(&value.declaration)?,
                    leaf("{"),
                    self.write_struct_members(&value.declaration)?,
                    leaf("}"),
                ],
            ),
            Expression::Switch(value) => self.write_switch(value),
            Expression::TernaryCondition(value) => self.node(
                "Expression_ternary_condition",
                vec![
                    self.write_generic_expression(&value.condition)?,
                    leaf("?"),
                    self.write_generic_expression(&value.then_statement.expression)?,
                    leaf(":"),
                    self.write_generic_expression(&value.else_statement.expression)?,
                ],
            ),
            Expression::Type(value) => {
                self.node("Expression_type", vec![self.write_type(&value.type_reference)?])
            }
            Expression::Unary(value) => {
                let operand = self.write_generic_expression(&value.expression)?;
                let symbol = value.operation.as_symbol();
                let children = if value.operation.is_postfix() {
                    vec![operand, self.name("Expression_unary_postfix_symbol", symbol)?]
                } else {
                    vec![self.name("Expression_unary_symbol", symbol)?, operand]
                };
                self.node("Expression_unary", children)
            }
            Expression::Union(value) => self.node(
                "Expression_union",
                vec![
                    leaf("union"),
                    leaf("{"),
                    self.write_union_members(&value.declaration)?,
                    leaf("}"),
                ],
            ),
            Expression::Variable(value) => self.node(
                "Expression_variable",
                vec![self.name("Variable_name", &value.name)?],
            ),
            Expression::VariableDeclaration(value) => self.node(
                "Expression_variable_declaration",
                vec![
                    self.write_mutability(value.is_mutable)?,
                    self.name("Variable_name", &value.name)?,
                    leaf("="),
                    self.write_generic_expression(&value.right_hand_side)?,
                ],
            ),
            Expression::VariableDeclarationWithType(value) => self.node(
                "Expression_variable_declaration_with_type",
                vec![
                    self.write_mutability(value.is_mutable)?,
                    self.name("Variable_name", &value.name)?,
                    leaf(":"),
                    self.node(
                        "Expression_variable_declaration_type",
                        vec![self.write_type(&value.type_reference)?],
                    )?,
                    leaf("="),
                    self.write_generic_expression_or_instantiate(
                        &value.right_hand_side.expression,
                    )?,
                ],
            ),
            Expression::WhileLoop(value) => self.node(
                "Expression_while_loop",
                vec![
                    leaf("while"),
                    self.write_generic_expression(&value.condition.expression)?,
                    leaf("{"),
                    self.write_statements(
                        "Expression_while_loop_statements",
                        &value.then_statements,
                    )?,
                    leaf("}"),
                ],
            ),
        }
    }

    fn write_mutability(&self, is_mutable: bool) -> ConvertResult<Node> {
        let keyword = if is_mutable { "mutable" } else { "var" };
        self.node("Expression_variable_mutability", vec![leaf(keyword)])
    }

    fn write_for_loop(&self, value: &ForLoopExpression) -> ConvertResult<Node> {
        let reverse = match value.range_comparison_operation {
            BinaryOperation::LessThan => Vec::new(),
            BinaryOperation::GreaterThan => vec![leaf("reverse")],
            _ => {
                return Err(ConvertError::Unrenderable(
                    "for loop comparing with an operation other than < or >",
                ))
            }
        };
        let step = match &value.step_by {
            Some(step_by) => vec![leaf("step_by"), self.write_generic_expression(step_by)?],
            None => Vec::new(),
        };

        let head = self.node(
            "Expression_for_loop_head",
            vec![
                leaf("for"),
                self.name("Expression_for_loop_variable", &value.variable_name)?,
                leaf("in"),
                self.node(
                    "Expression_for_loop_range_begin",
                    vec![self.write_generic_expression(&value.range_begin)?],
                )?,
                leaf("to"),
                self.node(
                    "Expression_for_loop_range_end",
                    vec![self.write_generic_expression(&value.range_end)?],
                )?,
                self.node("Expression_for_loop_step", step)?,
                self.node("Expression_for_loop_reverse", reverse)?,
            ],
        )?;

        self.node(
            "Expression_for_loop",
            vec![
                head,
                leaf("{"),
                self.write_statements("Expression_for_loop_statements", &value.then_statements)?,
                leaf("}"),
            ],
        )
    }

    /// `if a {} else if b {} else {}`: the tail of the series nests in the
    /// `else` branch of its head.
    fn write_if(&self, series: &[ConditionStatementPair]) -> ConvertResult<Node> {
        let Some((first, rest)) = series.split_first() else {
            return Err(ConvertError::Unrenderable("if expression without branches"));
        };
        let IfCondition::Condition(condition) = &first.condition else {
            return Err(ConvertError::Unrenderable("if series starting with else"));
        };

        if rest.len() > 1 && rest[0].condition == IfCondition::Else {
            return Err(ConvertError::Unrenderable("if series with branches after else"));
        }

        let else_children = match rest.first() {
            None => Vec::new(),
            Some(pair) if pair.condition == IfCondition::Else => vec![
                leaf("else"),
                leaf("{"),
                self.write_if_statements(pair)?,
                leaf("}"),
            ],
            Some(_) => vec![leaf("else"), self.write_if(rest)?],
        };
        self.node(
            "Expression_if",
            vec![
                leaf("if"),
                self.write_generic_expression(&condition.expression)?,
                leaf("{"),
                self.write_if_statements(first)?,
                leaf("}"),
                self.node("Expression_if_else", else_children)?,
            ],
        )
    }

    fn write_if_statements(&self, pair: &ConditionStatementPair) -> ConvertResult<Node> {
        Ok(self
            .write_statements("Expression_if_statements", &pair.then_statements)?
            .with_source_location(pair.block_source_position))
    }

    fn write_switch(&self, value: &SwitchExpression) -> ConvertResult<Node> {
        let cases = value
            .cases
            .iter()
            .map(|case| {
                let statements =
                    self.write_statements("Expression_switch_case_statements", &case.statements)?;
                let children = match &case.case_value {
                    SwitchCaseValue::Case(case_value) => vec![
                        leaf("case"),
                        self.node(
                            "Expression_switch_case_value",
                            vec![self.write_generic_expression(case_value)?],
                        )?,
                        leaf(":"),
                        statements,
                    ],
                    SwitchCaseValue::Default => vec![leaf("default"), leaf(":"), statements],
                };
                self.node("Expression_switch_case", children)
            })
            .collect::<ConvertResult<Vec<_>>>()?;

        self.node(
            "Expression_switch",
            vec![
                leaf("switch"),
                self.write_generic_expression(&value.value)?,
                leaf("{"),
                self.node("Expression_switch_cases", cases)?,
                leaf("}"),
            ],
        )
    }
}

/// Statements written without a trailing `;`.
fn is_block_like(expression: &Expression) -> bool {
    matches!(
        expression,
        Expression::Block(_)
            | Expression::Comment(_)
            | Expression::ForLoop(_)
            | Expression::If(_)
            | Expression::Switch(_)
            | Expression::WhileLoop(_)
    )
}
