//! Type references as `Type` nodes.
//!
//! Custom types of the module being written, and references without a
//! module, are bare names. Custom types of other modules are qualified with
//! the import alias, or with the module name when no import matches.

use hl_ir::types::get_integer_name;
use hl_ir::{CustomTypeReference, FunctionType, TypeReference};
use hl_parse_tree::Node;

use super::{leaf, TreeWriter};
use crate::error::{ConvertError, ConvertResult};
use crate::NULL_POINTER_TYPE_NAME;

impl TreeWriter<'_> {
    /// `Type` node of a type list; an empty list is `void`.
    pub(super) fn write_types(&self, types: &[TypeReference]) -> ConvertResult<Node> {
        match types {
            [] => self.node("Type", vec![self.name("Type_name", "void")?]),
            [type_reference] => self.write_type(type_reference),
            _ => Err(ConvertError::Unrenderable("type with several alternatives")),
        }
    }

    pub(super) fn write_type(&self, type_reference: &TypeReference) -> ConvertResult<Node> {
        let inner = match type_reference {
            TypeReference::Builtin(value) => self.name("Type_name", &value.value)?,
            TypeReference::ConstantArray(value) => self.node(
                "Constant_array_type",
                vec![
                    leaf("Constant_array"),
                    leaf("<"),
                    self.write_types(&value.value_type)?,
                    leaf(","),
                    self.name("Constant_array_length", &value.size.to_string())?,
                    leaf(">"),
                ],
            )?,
            TypeReference::Custom(value) => self.write_custom_type_name(value)?,
            TypeReference::Fundamental(value) => self.name("Type_name", value.name())?,
            TypeReference::FunctionPointer(value) => {
                let signature = self.node(
                    "Function_pointer_type_signature",
                    vec![
                        leaf("("),
                        self.write_parameters(
                            "Function_pointer_type_input_parameters",
                            &value.input_parameter_names,
                            &value.function_type.input_parameter_types,
                            value.function_type.is_variadic,
                        )?,
                        leaf(")"),
                        leaf("->"),
                        leaf("("),
                        self.write_parameters(
                            "Function_pointer_type_output_parameters",
                            &value.output_parameter_names,
                            &value.function_type.output_parameter_types,
                            false,
                        )?,
                        leaf(")"),
                    ],
                )?;
                self.node(
                    "Function_pointer_type",
                    vec![leaf("function"), leaf("<"), signature, leaf(">")],
                )?
            }
            TypeReference::Integer(value) => self.name("Type_name", &get_integer_name(*value))?,
            TypeReference::NullPointer => self.name("Type_name", NULL_POINTER_TYPE_NAME)?,
            TypeReference::Parameter(value) => self.name("Type_name", &value.name)?,
            TypeReference::Pointer(value) => {
                let mut children = vec![leaf("*")];
                if value.is_mutable {
                    children.push(leaf("mutable"));
                }
                children.push(self.write_types(&value.element_type)?);
                self.node("Pointer_type", children)?
            }
            TypeReference::TypeInstance(value) => {
                let name = self.node(
                    "Type_instance_type_name",
                    vec![self.write_custom_type_name(&value.type_constructor)?],
                )?;
                let arguments = value
                    .arguments
                    .iter()
                    .map(|argument| self.write_generic_expression(&argument.expression))
                    .collect::<ConvertResult<Vec<_>>>()?;
                self.node(
                    "Type_instance_type",
                    vec![
                        name,
                        leaf("<"),
                        self.separated("Type_instance_type_parameters", arguments, ",")?,
                        leaf(">"),
                    ],
                )?
            }
        };
        self.node("Type", vec![inner])
    }

    fn write_custom_type_name(&self, value: &CustomTypeReference) -> ConvertResult<Node> {
        let module_name = value.module_name();
        if module_name.is_empty() || module_name == self.module.name {
            return self.name("Type_name", &value.name);
        }

        let qualifier = self
            .module
            .find_import_by_module_name(module_name)
            .map_or(module_name, |import| import.alias.as_str());
        self.node(
            "Module_type",
            vec![
                self.name("Module_type_module_name", qualifier)?,
                leaf("."),
                self.name("Module_type_type_name", &value.name)?,
            ],
        )
    }

    /// `name: Type` parameters separated by commas, plus `...` when
    /// variadic.
    pub(super) fn write_parameters(
        &self,
        label: &str,
        names: &[String],
        types: &[TypeReference],
        is_variadic: bool,
    ) -> ConvertResult<Node> {
        if names.len() != types.len() {
            return Err(ConvertError::Unrenderable("parameters without a name for every type"));
        }

        let mut parameters = names
            .iter()
            .zip(types)
            .map(|(name, type_reference)| {
                let type_node =
                    self.node("Function_parameter_type", vec![self.write_type(type_reference)?])?;
                self.node(
                    "Function_parameter",
                    vec![self.name("Function_parameter_name", name)?, leaf(":"), type_node],
                )
            })
            .collect::<ConvertResult<Vec<_>>>()?;
        if is_variadic {
            parameters.push(self.node("Function_parameter", vec![leaf("...")])?);
        }
        self.separated(label, parameters, ",")
    }

    pub(super) fn write_function_signature(
        &self,
        function_type: &FunctionType,
        input_parameter_names: &[String],
        output_parameter_names: &[String],
    ) -> ConvertResult<[Node; 7]> {
        Ok([
            leaf("("),
            self.write_parameters(
                "Function_input_parameters",
                input_parameter_names,
                &function_type.input_parameter_types,
                function_type.is_variadic,
            )?,
            leaf(")"),
            leaf("->"),
            leaf("("),
            self.write_parameters(
                "Function_output_parameters",
                output_parameter_names,
                &function_type.output_parameter_types,
                false,
            )?,
            leaf(")"),
        ])
    }
}
