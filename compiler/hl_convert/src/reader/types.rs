//! `Type` nodes.

use hl_ir::types::parse_type_name;
use hl_ir::{
    ConstantArrayType, CustomTypeReference, FunctionPointerType, FunctionType, ParameterType,
    PointerType, Statement, TypeInstance, TypeReference,
};
use hl_parse_tree::{get_terminal_value, Node};

use super::{child, terminal, TreeReader};
use crate::error::{ConvertError, ConvertResult};
use crate::NULL_POINTER_TYPE_NAME;

/// Names and types of a parameter list.
pub(super) struct Parameters {
    pub(super) names: Vec<String>,
    pub(super) types: Vec<TypeReference>,
    pub(super) is_variadic: bool,
}

impl TreeReader<'_> {
    /// A `Type` node as a type list; `void` is the empty list.
    pub(super) fn read_types(&self, node: &Node) -> ConvertResult<Vec<TypeReference>> {
        match node.find_child("Type_name") {
            Some(name) => Ok(self.read_type_name(name_token(name)?)),
            None => Ok(vec![self.read_type(node)?]),
        }
    }

    /// A `Type` node naming exactly one type.
    pub(super) fn read_type(&self, node: &Node) -> ConvertResult<TypeReference> {
        let inner = node
            .children
            .first()
            .ok_or_else(|| ConvertError::missing_child(node.label(), "Type_name"))?;

        match inner.label() {
            "Type_name" => {
                let name = name_token(inner)?;
                let mut types = self.read_type_name(name);
                match (types.pop(), types.is_empty()) {
                    (Some(type_reference), true) => Ok(type_reference),
                    _ => Err(ConvertError::unexpected_label("type", name)),
                }
            }
            "Module_type" => Ok(TypeReference::Custom(self.read_module_type(inner)?)),
            "Pointer_type" => Ok(TypeReference::Pointer(PointerType {
                element_type: self.read_types(child(inner, "Type")?)?,
                is_mutable: inner.has_token("mutable"),
            })),
            "Constant_array_type" => {
                let length = terminal(inner, "Constant_array_length")?;
                let size = length
                    .parse()
                    .map_err(|_| ConvertError::InvalidConstant(length.to_owned()))?;
                Ok(TypeReference::ConstantArray(ConstantArrayType {
                    value_type: self.read_types(child(inner, "Type")?)?,
                    size,
                }))
            }
            "Function_pointer_type" => {
                let signature = child(inner, "Function_pointer_type_signature")?;
                let inputs = self.read_parameters(child(
                    signature,
                    "Function_pointer_type_input_parameters",
                )?)?;
                let outputs = self.read_parameters(child(
                    signature,
                    "Function_pointer_type_output_parameters",
                )?)?;
                Ok(TypeReference::FunctionPointer(FunctionPointerType {
                    function_type: FunctionType {
                        input_parameter_types: inputs.types,
                        output_parameter_types: outputs.types,
                        is_variadic: inputs.is_variadic,
                    },
                    input_parameter_names: inputs.names,
                    output_parameter_names: outputs.names,
                }))
            }
            "Type_instance_type" => {
                let name = child(inner, "Type_instance_type_name")?;
                let type_constructor = match name.find_child("Module_type") {
                    Some(module_type) => self.read_module_type(module_type)?,
                    None => {
                        CustomTypeReference::new(self.module_name, terminal(name, "Type_name")?)
                    }
                };
                let arguments = child(inner, "Type_instance_type_parameters")?
                    .children_with_label("Generic_expression")
                    .map(|argument| Ok(Statement::new(self.read_generic_expression(argument)?)))
                    .collect::<ConvertResult<Vec<_>>>()?;
                Ok(TypeReference::TypeInstance(TypeInstance {
                    type_constructor,
                    arguments,
                }))
            }
            other => Err(ConvertError::unexpected_label("type", other)),
        }
    }

    fn read_type_name(&self, name: &str) -> Vec<TypeReference> {
        if name == NULL_POINTER_TYPE_NAME {
            return vec![TypeReference::NullPointer];
        }
        if self.type_parameters.iter().any(|parameter| parameter == name) {
            return vec![TypeReference::Parameter(ParameterType {
                name: name.to_owned(),
            })];
        }
        parse_type_name(name, self.module_name)
    }

    /// `alias.Name`; a qualifier that is no import alias is taken as the
    /// module name itself.
    fn read_module_type(&self, node: &Node) -> ConvertResult<CustomTypeReference> {
        let qualifier = terminal(node, "Module_type_module_name")?;
        let module_name = self
            .imports
            .iter()
            .find(|import| import.alias == qualifier)
            .map_or(qualifier, |import| import.module_name.as_str());
        Ok(CustomTypeReference::new(
            module_name,
            terminal(node, "Module_type_type_name")?,
        ))
    }

    /// `Function_parameter` children of a parameter list.
    pub(super) fn read_parameters(&self, node: &Node) -> ConvertResult<Parameters> {
        let mut parameters = Parameters {
            names: Vec::new(),
            types: Vec::new(),
            is_variadic: false,
        };
        for parameter in node.children_with_label("Function_parameter") {
            if parameter.has_token("...") {
                parameters.is_variadic = true;
                continue;
            }
            parameters
                .names
                .push(terminal(parameter, "Function_parameter_name")?.to_owned());
            let type_node = child(child(parameter, "Function_parameter_type")?, "Type")?;
            parameters.types.push(self.read_type(type_node)?);
        }
        Ok(parameters)
    }
}

fn name_token(node: &Node) -> ConvertResult<&str> {
    get_terminal_value(node).ok_or_else(|| ConvertError::missing_child(node.label(), "token"))
}
