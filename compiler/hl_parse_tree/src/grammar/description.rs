//! Default H grammar.
//!
//! One rule per line: `Lhs -> label label ...`. `|` separates alternatives,
//! a trailing `$0_or_more`/`$1_or_more` turns the rule into an array of its
//! first label (separated by the second one, if any) and `$single_or` stands
//! for the `|` token.
//!
//! Operator precedence is not encoded: the emitted tree already has the
//! nesting of the expressions it was built from.

pub fn default_description() -> &'static [&'static str] {
    DEFAULT_DESCRIPTION
}

const DEFAULT_DESCRIPTION: &[&str] = &[
    // Module
    "Module -> Module_head Module_body",
    "Module_head -> Module_declaration Imports",
    "Module_declaration -> Comment_or_empty module Module_name ;",
    "Module_name -> identifier",
    "Comment_or_empty -> | Comment",
    "Comment -> comment $1_or_more",
    "Imports -> Import $0_or_more",
    "Import -> import Import_name as Import_alias ;",
    "Import_name -> identifier",
    "Import_alias -> identifier",
    "Module_body -> Declaration $0_or_more",
    "Declaration -> Comment_or_empty Export Alias",
    "Declaration -> Comment_or_empty Export Enum",
    "Declaration -> Comment_or_empty Export Function",
    "Declaration -> Comment_or_empty Export Function_constructor",
    "Declaration -> Comment_or_empty Export Global_variable",
    "Declaration -> Comment_or_empty Export Struct",
    "Declaration -> Comment_or_empty Export Type_constructor",
    "Declaration -> Comment_or_empty Export Union",
    "Export -> | export",
    // Types
    "Type -> Type_name | Module_type | Pointer_type | Constant_array_type",
    "Type -> Function_pointer_type | Type_instance_type",
    "Type_name -> identifier",
    "Module_type -> Module_type_module_name . Module_type_type_name",
    "Module_type_module_name -> identifier",
    "Module_type_type_name -> identifier",
    "Pointer_type -> * Type | * mutable Type",
    "Constant_array_type -> Constant_array < Type , Constant_array_length >",
    "Constant_array_length -> number",
    "Function_pointer_type -> function < Function_pointer_type_signature >",
    "Function_pointer_type_signature -> ( Function_pointer_type_input_parameters ) -> ( Function_pointer_type_output_parameters )",
    "Function_pointer_type_input_parameters -> Function_parameter , $0_or_more",
    "Function_pointer_type_output_parameters -> Function_parameter , $0_or_more",
    "Type_instance_type -> Type_instance_type_name < Type_instance_type_parameters >",
    "Type_instance_type_name -> Type_name | Module_type",
    "Type_instance_type_parameters -> Generic_expression , $0_or_more",
    // Declarations
    "Alias -> using Alias_name = Alias_type ;",
    "Alias_name -> identifier",
    "Alias_type -> Type",
    "Enum -> enum Enum_name { Enum_values }",
    "Enum_name -> identifier",
    "Enum_values -> Enum_value $0_or_more",
    "Enum_value -> Comment_or_empty Enum_value_name ,",
    "Enum_value -> Comment_or_empty Enum_value_name = Generic_expression ,",
    "Enum_value_name -> identifier",
    "Global_variable -> Global_variable_mutability Global_variable_name Global_variable_type = Generic_expression_or_instantiate ;",
    "Global_variable_name -> identifier",
    "Global_variable_type -> | : Type",
    "Global_variable_mutability -> var | mutable",
    "Struct -> struct Struct_name Struct_options { Struct_members }",
    "Struct_name -> identifier",
    "Struct_options -> Struct_option $0_or_more",
    "Struct_option -> packed | literal",
    "Struct_members -> Struct_member $0_or_more",
    "Struct_member -> Comment_or_empty Struct_member_name : Struct_member_type = Generic_expression_or_instantiate ;",
    "Struct_member_name -> identifier",
    "Struct_member_type -> Type",
    "Union -> union Union_name { Union_members }",
    "Union_name -> identifier",
    "Union_members -> Union_member $0_or_more",
    "Union_member -> Comment_or_empty Union_member_name : Union_member_type ;",
    "Union_member_name -> identifier",
    "Union_member_type -> Type",
    "Function -> Function_declaration Function_definition | Function_declaration ;",
    "Function_declaration -> function Function_name ( Function_input_parameters ) -> ( Function_output_parameters ) Function_options",
    "Function_name -> identifier",
    "Function_input_parameters -> Function_parameter , $0_or_more",
    "Function_output_parameters -> Function_parameter , $0_or_more",
    "Function_parameter -> Function_parameter_name : Function_parameter_type | ...",
    "Function_parameter_name -> identifier",
    "Function_parameter_type -> Type",
    "Function_options -> Function_preconditions Function_postconditions",
    "Function_preconditions -> Function_precondition $0_or_more",
    "Function_precondition -> precondition Function_precondition_name { Generic_expression }",
    "Function_precondition_name -> string",
    "Function_postconditions -> Function_postcondition $0_or_more",
    "Function_postcondition -> postcondition Function_postcondition_name { Generic_expression }",
    "Function_postcondition_name -> string",
    "Function_definition -> Block",
    "Type_constructor -> type_constructor Type_constructor_name ( Type_constructor_parameters ) Block",
    "Type_constructor_name -> identifier",
    "Type_constructor_parameters -> Function_parameter , $0_or_more",
    "Function_constructor -> function_constructor Function_constructor_name ( Function_constructor_parameters ) Block",
    "Function_constructor_name -> identifier",
    "Function_constructor_parameters -> Function_parameter , $0_or_more",
    // Statements
    "Block -> { Statements }",
    "Statements -> Statement $0_or_more",
    "Statement -> Generic_expression ; | Generic_expression",
    // Expressions
    "Generic_expression -> Expression_access",
    "Generic_expression -> Expression_access_array",
    "Generic_expression -> Expression_assert",
    "Generic_expression -> Expression_assignment",
    "Generic_expression -> Expression_binary",
    "Generic_expression -> Expression_block",
    "Generic_expression -> Expression_break",
    "Generic_expression -> Expression_call",
    "Generic_expression -> Expression_cast",
    "Generic_expression -> Expression_comment",
    "Generic_expression -> Expression_compile_time",
    "Generic_expression -> Expression_constant",
    "Generic_expression -> Expression_continue",
    "Generic_expression -> Expression_create_array",
    "Generic_expression -> Expression_defer",
    "Generic_expression -> Expression_dereference_and_access",
    "Generic_expression -> Expression_for_loop",
    "Generic_expression -> Expression_function",
    "Generic_expression -> Expression_if",
    "Generic_expression -> Expression_instance_call",
    "Generic_expression -> Expression_null_pointer",
    "Generic_expression -> Expression_parenthesis",
    "Generic_expression -> Expression_reflection",
    "Generic_expression -> Expression_return",
    "Generic_expression -> Expression_struct",
    "Generic_expression -> Expression_switch",
    "Generic_expression -> Expression_ternary_condition",
    "Generic_expression -> Expression_type",
    "Generic_expression -> Expression_unary",
    "Generic_expression -> Expression_union",
    "Generic_expression -> Expression_variable",
    "Generic_expression -> Expression_variable_declaration",
    "Generic_expression -> Expression_variable_declaration_with_type",
    "Generic_expression -> Expression_while_loop",
    "Generic_expression_or_instantiate -> Expression_instantiate | Generic_expression",
    "Expression_access -> Generic_expression . Expression_access_member_name",
    "Expression_access_member_name -> identifier",
    "Expression_access_array -> Generic_expression [ Generic_expression ]",
    "Expression_assert -> assert { Generic_expression }",
    "Expression_assert -> assert Expression_assert_message { Generic_expression }",
    "Expression_assert_message -> string",
    "Expression_assignment -> Generic_expression Expression_assignment_symbol Generic_expression_or_instantiate",
    "Expression_assignment_symbol -> = | += | -= | *= | /= | %= | &= | |= | ^= | <<= | >>=",
    "Expression_binary -> Generic_expression Expression_binary_symbol Generic_expression",
    "Expression_binary_symbol -> + | - | * | / | % | == | != | < | <= | > | >=",
    "Expression_binary_symbol -> && | || | & | $single_or | ^ | << | >> | has",
    "Expression_block -> { Expression_block_statements }",
    "Expression_block_statements -> Statement $0_or_more",
    "Expression_break -> break | break Expression_break_loop_count",
    "Expression_break_loop_count -> number",
    "Expression_call -> Generic_expression ( Expression_call_arguments )",
    "Expression_call_arguments -> Generic_expression_or_instantiate , $0_or_more",
    "Expression_cast -> Generic_expression as Expression_cast_destination_type",
    "Expression_cast -> Generic_expression bit_cast Expression_cast_destination_type",
    "Expression_cast_destination_type -> Type",
    "Expression_comment -> comment",
    "Expression_compile_time -> comptime Generic_expression",
    "Expression_constant -> boolean | number | string",
    "Expression_continue -> continue",
    "Expression_create_array -> [ Expression_create_array_elements ]",
    "Expression_create_array_elements -> Generic_expression_or_instantiate , $0_or_more",
    "Expression_defer -> defer Generic_expression",
    "Expression_dereference_and_access -> Generic_expression -> Expression_access_member_name",
    "Expression_for_loop -> Expression_for_loop_head { Expression_for_loop_statements }",
    "Expression_for_loop_head -> for Expression_for_loop_variable in Expression_for_loop_range_begin to Expression_for_loop_range_end Expression_for_loop_step Expression_for_loop_reverse",
    "Expression_for_loop_variable -> identifier",
    "Expression_for_loop_range_begin -> Generic_expression",
    "Expression_for_loop_range_end -> Generic_expression",
    "Expression_for_loop_step -> | step_by Generic_expression",
    "Expression_for_loop_reverse -> | reverse",
    "Expression_for_loop_statements -> Statement $0_or_more",
    "Expression_function -> Expression_function_declaration Expression_function_definition",
    "Expression_function_declaration -> function ( Function_input_parameters ) -> ( Function_output_parameters )",
    "Expression_function_definition -> Block",
    "Expression_if -> if Generic_expression { Expression_if_statements } Expression_if_else",
    "Expression_if_else -> | else Expression_if | else { Expression_if_statements }",
    "Expression_if_statements -> Statement $0_or_more",
    "Expression_instance_call -> Generic_expression < Expression_instance_call_parameters >",
    "Expression_instance_call_parameters -> Generic_expression , $0_or_more",
    "Expression_instantiate -> Expression_instantiate_expression_type { Expression_instantiate_members }",
    "Expression_instantiate_expression_type -> | explicit",
    "Expression_instantiate_members -> Expression_instantiate_member , $0_or_more",
    "Expression_instantiate_member -> Expression_instantiate_member_name : Generic_expression_or_instantiate",
    "Expression_instantiate_member_name -> identifier",
    "Expression_null_pointer -> null",
    "Expression_parenthesis -> ( Generic_expression )",
    "Expression_reflection -> @ Expression_reflection_name ( Expression_reflection_arguments )",
    "Expression_reflection_name -> identifier",
    "Expression_reflection_arguments -> Generic_expression , $0_or_more",
    "Expression_return -> return | return Generic_expression_or_instantiate",
    "Expression_struct -> struct Struct_options { Struct_members }",
    "Expression_switch -> switch Generic_expression { Expression_switch_cases }",
    "Expression_switch_cases -> Expression_switch_case $0_or_more",
    "Expression_switch_case -> case Expression_switch_case_value : Expression_switch_case_statements",
    "Expression_switch_case -> default : Expression_switch_case_statements",
    "Expression_switch_case_value -> Generic_expression",
    "Expression_switch_case_statements -> Statement $0_or_more",
    "Expression_ternary_condition -> Generic_expression ? Generic_expression : Generic_expression",
    "Expression_type -> Type",
    "Expression_unary -> Expression_unary_symbol Generic_expression",
    "Expression_unary -> Generic_expression Expression_unary_postfix_symbol",
    "Expression_unary_symbol -> ! | ~ | - | ++ | -- | & | *",
    "Expression_unary_postfix_symbol -> ++ | --",
    "Expression_union -> union { Union_members }",
    "Expression_variable -> Variable_name",
    "Variable_name -> identifier",
    "Expression_variable_declaration -> Expression_variable_mutability Variable_name = Generic_expression",
    "Expression_variable_declaration_with_type -> Expression_variable_mutability Variable_name : Expression_variable_declaration_type = Generic_expression_or_instantiate",
    "Expression_variable_declaration_type -> Type",
    "Expression_variable_mutability -> var | mutable",
    "Expression_while_loop -> while Generic_expression { Expression_while_loop_statements }",
    "Expression_while_loop_statements -> Statement $0_or_more",
];
