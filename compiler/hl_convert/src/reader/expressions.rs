//! Statements and expressions.

use hl_ir::{
    AccessArrayExpression, AccessExpression, AccessType, AssertExpression, AssignmentExpression,
    BinaryExpression, BinaryOperation, BlockExpression, BreakExpression, CallExpression,
    CastExpression, CastType, CommentExpression, CompileTimeExpression, ConditionStatementPair,
    ConstantArrayExpression, DeferExpression, DereferenceAndAccessExpression, Expression,
    ForLoopExpression, FunctionDeclaration, FunctionDefinition, FunctionExpression, IfCondition,
    IfExpression, InstanceCallExpression, InstantiateExpression, InstantiateExpressionType,
    InstantiateMemberValuePair, InvalidExpression, Linkage, ParenthesisExpression,
    ReflectionExpression, ReturnExpression, Statement, StructExpression, SwitchCaseExpressionPair,
    SwitchCaseValue, SwitchExpression, TernaryConditionExpression, TypeExpression,
    UnaryExpression, UnaryOperation, UnionExpression, VariableDeclarationExpression,
    VariableDeclarationWithTypeExpression, VariableExpression, WhileLoopExpression,
};
use hl_parse_tree::{iter_leaves, Node};
use hl_stack::ensure_sufficient_stack;

use super::{child, nth_child, terminal, unquote, TreeReader};
use crate::error::{ConvertError, ConvertResult};
use crate::literal::{word_to_constant, words_to_comment};

impl TreeReader<'_> {
    /// `Statement` children of a statement container.
    pub(super) fn read_statements(&self, node: &Node) -> ConvertResult<Vec<Statement>> {
        node.children_with_label("Statement")
            .map(|statement| {
                Ok(Statement {
                    expression: self
                        .read_generic_expression(child(statement, "Generic_expression")?)?,
                    source_position: statement.word.source_location,
                })
            })
            .collect()
    }

    pub(super) fn read_generic_expression(&self, node: &Node) -> ConvertResult<Expression> {
        let inner = node
            .children
            .first()
            .ok_or_else(|| ConvertError::missing_child(node.label(), "Expression"))?;
        ensure_sufficient_stack(|| self.read_expression(inner))
    }

    pub(super) fn read_generic_expression_or_instantiate(
        &self,
        node: &Node,
    ) -> ConvertResult<Expression> {
        match node.find_child("Expression_instantiate") {
            Some(instantiate) => self.read_instantiate(instantiate),
            None => self.read_generic_expression(child(node, "Generic_expression")?),
        }
    }

    /// Any expression-bearing node: a statement, one of the generic wrappers
    /// or an `Expression_*` node.
    pub(super) fn read_subtree_expression(&self, node: &Node) -> ConvertResult<Expression> {
        match node.label() {
            "Statement" => self.read_generic_expression(child(node, "Generic_expression")?),
            "Generic_expression" => self.read_generic_expression(node),
            "Generic_expression_or_instantiate" => {
                self.read_generic_expression_or_instantiate(node)
            }
            "Expression_instantiate" => self.read_instantiate(node),
            _ => ensure_sufficient_stack(|| self.read_expression(node)),
        }
    }

    fn read_expression(&self, node: &Node) -> ConvertResult<Expression> {
        let expression = match node.label() {
            "Expression_access" => Expression::Access(AccessExpression {
                expression: Box::new(self.read_first_expression(node)?),
                member_name: terminal(node, "Expression_access_member_name")?.to_owned(),
                access_type: AccessType::Read,
            }),
            "Expression_access_array" => {
                let [expression, index] = generic_expressions(node)?;
                Expression::AccessArray(AccessArrayExpression {
                    expression: Box::new(self.read_generic_expression(expression)?),
                    index: Box::new(self.read_generic_expression(index)?),
                })
            }
            "Expression_assert" => Expression::Assert(AssertExpression {
                message: match node.find_child("Expression_assert_message") {
                    Some(message) => Some(unquote(terminal_of(message)?).to_owned()),
                    None => None,
                },
                statement: Box::new(Statement::new(self.read_first_expression(node)?)),
            }),
            "Expression_assignment" => self.read_assignment(node)?,
            "Expression_binary" => {
                let [left_hand_side, right_hand_side] = generic_expressions(node)?;
                let symbol = terminal(node, "Expression_binary_symbol")?;
                Expression::Binary(BinaryExpression {
                    left_hand_side: Box::new(self.read_generic_expression(left_hand_side)?),
                    right_hand_side: Box::new(self.read_generic_expression(right_hand_side)?),
                    operation: BinaryOperation::from_symbol(symbol)
                        .ok_or_else(|| ConvertError::unexpected_label("binary operator", symbol))?,
                })
            }
            "Expression_block" => Expression::Block(BlockExpression {
                statements: self.read_statements(child(node, "Expression_block_statements")?)?,
            }),
            "Expression_break" => {
                let loop_count = match node.find_child("Expression_break_loop_count") {
                    Some(count) => {
                        let count = terminal_of(count)?;
                        count
                            .parse()
                            .map_err(|_| ConvertError::InvalidConstant(count.to_owned()))?
                    }
                    None => 0,
                };
                Expression::Break(BreakExpression { loop_count })
            }
            "Expression_call" => Expression::Call(CallExpression {
                expression: Box::new(self.read_first_expression(node)?),
                arguments: child(node, "Expression_call_arguments")?
                    .children_with_label("Generic_expression_or_instantiate")
                    .map(|argument| self.read_generic_expression_or_instantiate(argument))
                    .collect::<ConvertResult<Vec<_>>>()?,
            }),
            "Expression_cast" => Expression::Cast(CastExpression {
                source: Box::new(self.read_first_expression(node)?),
                destination_type: self.read_type(child(
                    child(node, "Expression_cast_destination_type")?,
                    "Type",
                )?)?,
                cast_type: if node.has_token("bit_cast") {
                    CastType::BitCast
                } else {
                    CastType::Numeric
                },
            }),
            "Expression_comment" => Expression::Comment(CommentExpression {
                comment: words_to_comment(iter_leaves(node).map(Node::label)),
            }),
            "Expression_compile_time" => Expression::CompileTime(CompileTimeExpression {
                expression: Box::new(self.read_first_expression(node)?),
            }),
            "Expression_constant" => Expression::Constant(word_to_constant(terminal_of(node)?)?),
            "Expression_continue" => Expression::Continue,
            "Expression_create_array" => Expression::ConstantArray(ConstantArrayExpression {
                array_data: child(node, "Expression_create_array_elements")?
                    .children_with_label("Generic_expression_or_instantiate")
                    .map(|element| {
                        Ok(Statement::new(self.read_generic_expression_or_instantiate(element)?))
                    })
                    .collect::<ConvertResult<Vec<_>>>()?,
            }),
            "Expression_defer" => Expression::Defer(DeferExpression {
                expression_to_defer: Box::new(self.read_first_expression(node)?),
            }),
            "Expression_dereference_and_access" => {
                Expression::DereferenceAndAccess(DereferenceAndAccessExpression {
                    expression: Box::new(self.read_first_expression(node)?),
                    member_name: terminal(node, "Expression_access_member_name")?.to_owned(),
                })
            }
            "Expression_for_loop" => self.read_for_loop(node)?,
            "Expression_function" => self.read_function_expression(node)?,
            "Expression_if" => Expression::If(IfExpression {
                series: self.read_if_series(node)?,
            }),
            "Expression_instance_call" => Expression::InstanceCall(InstanceCallExpression {
                left_hand_side: Box::new(self.read_first_expression(node)?),
                arguments: child(node, "Expression_instance_call_parameters")?
                    .children_with_label("Generic_expression")
                    .map(|argument| Ok(Statement::new(self.read_generic_expression(argument)?)))
                    .collect::<ConvertResult<Vec<_>>>()?,
            }),
            "Expression_instantiate" => self.read_instantiate(node)?,
            "Expression_null_pointer" => Expression::NullPointer,
            "Expression_parenthesis" => Expression::Parenthesis(ParenthesisExpression {
                expression: Box::new(self.read_first_expression(node)?),
            }),
            "Expression_reflection" => Expression::Reflection(ReflectionExpression {
                name: terminal(node, "Expression_reflection_name")?.to_owned(),
                arguments: child(node, "Expression_reflection_arguments")?
                    .children_with_label("Generic_expression")
                    .map(|argument| self.read_generic_expression(argument))
                    .collect::<ConvertResult<Vec<_>>>()?,
            }),
            "Expression_return" => Expression::Return(ReturnExpression {
                expression: match node.find_child("Generic_expression_or_instantiate") {
                    Some(value) => {
                        Some(Box::new(self.read_generic_expression_or_instantiate(value)?))
                    }
                    None => None,
                },
            }),
            "Expression_struct" => Expression::Struct(StructExpression {
                declaration: self.read_struct_body("", node)?,
            }),
            "Expression_switch" => self.read_switch(node)?,
            "Expression_ternary_condition" => {
                let [condition, then_statement, else_statement] = generic_expressions(node)?;
                Expression::TernaryCondition(TernaryConditionExpression {
                    condition: Box::new(self.read_generic_expression(condition)?),
                    then_statement: Box::new(Statement::new(
                        self.read_generic_expression(then_statement)?,
                    )),
                    else_statement: Box::new(Statement::new(
                        self.read_generic_expression(else_statement)?,
                    )),
                })
            }
            "Expression_type" => Expression::Type(TypeExpression {
                type_reference: self.read_type(child(node, "Type")?)?,
            }),
            "Expression_unary" => self.read_unary(node)?,
            "Expression_union" => Expression::Union(UnionExpression {
                declaration: self.read_union_body("", node)?,
            }),
            "Expression_variable" => Expression::Variable(VariableExpression {
                name: terminal(node, "Variable_name")?.to_owned(),
                access_type: AccessType::Read,
            }),
            "Expression_variable_declaration" => {
                Expression::VariableDeclaration(VariableDeclarationExpression {
                    name: terminal(node, "Variable_name")?.to_owned(),
                    is_mutable: is_mutable(node)?,
                    right_hand_side: Box::new(self.read_first_expression(node)?),
                })
            }
            "Expression_variable_declaration_with_type" => {
                let right_hand_side = self.read_generic_expression_or_instantiate(child(
                    node,
                    "Generic_expression_or_instantiate",
                )?)?;
                Expression::VariableDeclarationWithType(VariableDeclarationWithTypeExpression {
                    name: terminal(node, "Variable_name")?.to_owned(),
                    is_mutable: is_mutable(node)?,
                    type_reference: self.read_type(child(
                        child(node, "Expression_variable_declaration_type")?,
                        "Type",
                    )?)?,
                    right_hand_side: Box::new(Statement::new(right_hand_side)),
                })
            }
            "Expression_while_loop" => Expression::WhileLoop(WhileLoopExpression {
                condition: Box::new(Statement::new(self.read_first_expression(node)?)),
                then_statements: self
                    .read_statements(child(node, "Expression_while_loop_statements")?)?,
            }),
            _ => Expression::Invalid(InvalidExpression {
                value: iter_leaves(node)
                    .map(Node::label)
                    .collect::<Vec<_>>()
                    .join(" "),
            }),
        };
        Ok(expression)
    }

    fn read_first_expression(&self, node: &Node) -> ConvertResult<Expression> {
        self.read_generic_expression(child(node, "Generic_expression")?)
    }

    /// The assigned variable or member is written; compound assignments
    /// also read it.
    fn read_assignment(&self, node: &Node) -> ConvertResult<Expression> {
        let symbol = terminal(node, "Expression_assignment_symbol")?;
        let additional_operation = if symbol == "=" {
            None
        } else {
            Some(
                BinaryOperation::from_assignment_symbol(symbol)
                    .ok_or_else(|| ConvertError::unexpected_label("assignment operator", symbol))?,
            )
        };

        let mut left_hand_side = self.read_first_expression(node)?;
        let access_type = if additional_operation.is_some() {
            AccessType::ReadWrite
        } else {
            AccessType::Write
        };
        set_access_type(&mut left_hand_side, access_type);

        Ok(Expression::Assignment(AssignmentExpression {
            left_hand_side: Box::new(left_hand_side),
            right_hand_side: Box::new(self.read_generic_expression_or_instantiate(child(
                node,
                "Generic_expression_or_instantiate",
            )?)?),
            additional_operation,
        }))
    }

    fn read_unary(&self, node: &Node) -> ConvertResult<Expression> {
        let operation = match node.find_child("Expression_unary_symbol") {
            Some(symbol) => {
                let symbol = terminal_of(symbol)?;
                UnaryOperation::from_prefix_symbol(symbol)
                    .ok_or_else(|| ConvertError::unexpected_label("unary operator", symbol))?
            }
            None => {
                let symbol = terminal(node, "Expression_unary_postfix_symbol")?;
                UnaryOperation::from_postfix_symbol(symbol)
                    .ok_or_else(|| ConvertError::unexpected_label("unary operator", symbol))?
            }
        };

        let mut expression = self.read_first_expression(node)?;
        if matches!(
            operation,
            UnaryOperation::PreIncrement | UnaryOperation::PreDecrement
        ) {
            set_access_type(&mut expression, AccessType::ReadWrite);
        }

        Ok(Expression::Unary(UnaryExpression {
            expression: Box::new(expression),
            operation,
        }))
    }

    fn read_for_loop(&self, node: &Node) -> ConvertResult<Expression> {
        let head = child(node, "Expression_for_loop_head")?;
        let range = |label: &'static str| self.read_first_expression(child(head, label)?);
        let step_by = match head
            .find_child("Expression_for_loop_step")
            .and_then(|step| step.find_child("Generic_expression"))
        {
            Some(step) => Some(Box::new(self.read_generic_expression(step)?)),
            None => None,
        };
        let is_reverse = head
            .find_child("Expression_for_loop_reverse")
            .is_some_and(|reverse| reverse.has_token("reverse"));

        Ok(Expression::ForLoop(ForLoopExpression {
            variable_name: terminal(head, "Expression_for_loop_variable")?.to_owned(),
            range_begin: Box::new(range("Expression_for_loop_range_begin")?),
            range_end: Box::new(range("Expression_for_loop_range_end")?),
            range_comparison_operation: if is_reverse {
                BinaryOperation::GreaterThan
            } else {
                BinaryOperation::LessThan
            },
            step_by,
            then_statements: self.read_statements(child(node, "Expression_for_loop_statements")?)?,
        }))
    }

    /// Function expressions have no name and are never exported.
    fn read_function_expression(&self, node: &Node) -> ConvertResult<Expression> {
        let (function_type, input_parameter_names, output_parameter_names) =
            self.read_function_signature(child(node, "Expression_function_declaration")?)?;
        let statements =
            self.read_block(child(child(node, "Expression_function_definition")?, "Block")?)?;

        Ok(Expression::Function(FunctionExpression {
            declaration: FunctionDeclaration {
                name: String::new(),
                function_type,
                input_parameter_names,
                output_parameter_names,
                linkage: Linkage::External,
                preconditions: Vec::new(),
                postconditions: Vec::new(),
                comment: None,
                source_location: None,
            },
            definition: FunctionDefinition::new("", statements),
        }))
    }

    /// Flattens `if a {} else if b {} else {}` into one series.
    fn read_if_series(&self, node: &Node) -> ConvertResult<Vec<ConditionStatementPair>> {
        let mut series = Vec::new();
        let mut current = node;
        loop {
            let then_statements = child(current, "Expression_if_statements")?;
            series.push(ConditionStatementPair {
                condition: IfCondition::Condition(Statement::new(
                    self.read_first_expression(current)?,
                )),
                then_statements: self.read_statements(then_statements)?,
                block_source_position: then_statements.word.source_location,
            });

            let Some(else_node) = current.find_child("Expression_if_else") else {
                break;
            };
            if let Some(next) = else_node.find_child("Expression_if") {
                current = next;
                continue;
            }
            if let Some(else_statements) = else_node.find_child("Expression_if_statements") {
                series.push(ConditionStatementPair {
                    condition: IfCondition::Else,
                    then_statements: self.read_statements(else_statements)?,
                    block_source_position: else_statements.word.source_location,
                });
            }
            break;
        }
        Ok(series)
    }

    fn read_instantiate(&self, node: &Node) -> ConvertResult<Expression> {
        let instantiate_type = if node
            .find_child("Expression_instantiate_expression_type")
            .is_some_and(|value| value.has_token("explicit"))
        {
            InstantiateExpressionType::Explicit
        } else {
            InstantiateExpressionType::Default
        };

        let members = child(node, "Expression_instantiate_members")?
            .children_with_label("Expression_instantiate_member")
            .map(|member| {
                Ok(InstantiateMemberValuePair {
                    member_name: terminal(member, "Expression_instantiate_member_name")?
                        .to_owned(),
                    value: Statement::new(self.read_generic_expression_or_instantiate(child(
                        member,
                        "Generic_expression_or_instantiate",
                    )?)?),
                })
            })
            .collect::<ConvertResult<Vec<_>>>()?;

        Ok(Expression::Instantiate(InstantiateExpression {
            instantiate_type,
            members,
        }))
    }

    fn read_switch(&self, node: &Node) -> ConvertResult<Expression> {
        let cases = child(node, "Expression_switch_cases")?
            .children_with_label("Expression_switch_case")
            .map(|case| {
                let case_value = match case.find_child("Expression_switch_case_value") {
                    Some(value) => SwitchCaseValue::Case(self.read_first_expression(value)?),
                    None => SwitchCaseValue::Default,
                };
                Ok(SwitchCaseExpressionPair {
                    case_value,
                    statements: self
                        .read_statements(child(case, "Expression_switch_case_statements")?)?,
                })
            })
            .collect::<ConvertResult<Vec<_>>>()?;

        Ok(Expression::Switch(SwitchExpression {
            value: Box::new(self.read_first_expression(node)?),
            cases,
        }))
    }
}

/// The first `N` `Generic_expression` children of a node.
fn generic_expressions<const N: usize>(node: &Node) -> ConvertResult<[&Node; N]> {
    let mut found = [node; N];
    for (index, slot) in found.iter_mut().enumerate() {
        *slot = nth_child(node, "Generic_expression", index)?;
    }
    Ok(found)
}

/// Token of a single-token node.
fn terminal_of(node: &Node) -> ConvertResult<&str> {
    node.children
        .first()
        .filter(|token| token.is_leaf())
        .map(Node::label)
        .ok_or_else(|| ConvertError::missing_child(node.label(), "token"))
}

fn is_mutable(node: &Node) -> ConvertResult<bool> {
    Ok(child(node, "Expression_variable_mutability")?.has_token("mutable"))
}

fn set_access_type(expression: &mut Expression, access_type: AccessType) {
    match expression {
        Expression::Variable(variable) => variable.access_type = access_type,
        Expression::Access(access) => access.access_type = access_type,
        _ => {}
    }
}
