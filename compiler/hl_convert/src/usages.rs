//! Import usages and module-name maintenance.
//!
//! An import's usages are the names the module reaches through it: custom
//! types of the imported module (`stdio.File`) and `alias.member` accesses
//! (`stdio.puts`). The renames keep custom type references pointing at the
//! right module after a module or one of its imports changes name.

use std::collections::BTreeSet;

use hl_ir::visitor::{visit_types_of_module, walk_expression, walk_type_reference, Visitor};
use hl_ir::{CustomTypeReference, Expression, Import, Module, TypeReference};


struct UsageCollector<'a> {
    imports: &'a [Import],
    usages: Vec<BTreeSet<String>>,
}

impl UsageCollector<'_> {
    fn add(&mut self, index: usize, usage: &str) {
        self.usages[index].insert(usage.to_owned());
    }

    fn add_module_usage(&mut self, module_name: &str, usage: &str) {
        if module_name.is_empty() {
            return;
        }
        if let Some(index) = self
            .imports
            .iter()
            .position(|import| import.module_name == module_name)
        {
            self.add(index, usage);
        }
    }
}

impl<'ir> Visitor<'ir> for UsageCollector<'_> {
    fn visit_expression(&mut self, expression: &'ir Expression) {
        if let Expression::Access(access) = expression {
            if let Expression::Variable(variable) = access.expression.as_ref() {
                if let Some(index) = self
                    .imports
                    .iter()
                    .position(|import| import.alias == variable.name)
                {
                    self.add(index, &access.member_name);
                }
            }
        }
        walk_expression(self, expression);
    }

    fn visit_type_reference(&mut self, type_reference: &'ir TypeReference) {
        match type_reference {
            TypeReference::Custom(custom) => {
                self.add_module_usage(custom.module_name(), &custom.name);
            }
            TypeReference::TypeInstance(instance) => {
                let constructor = &instance.type_constructor;
                self.add_module_usage(constructor.module_name(), &constructor.name);
            }
            _ => {}
        }
        walk_type_reference(self, type_reference);
    }
}

/// Recomputes the usages of every import of `module`.
pub fn update_import_module_usages(module: &mut Module) {
    let usages = {
        let mut collector = UsageCollector {
            imports: &module.imports,
            usages: vec![BTreeSet::new(); module.imports.len()],
        };
        for declaration in &module.declarations {
            collector.visit_declaration(declaration);
        }
        collector.usages
    };

    for (import, usages) in module.imports.iter_mut().zip(usages) {
        import.usages = usages.into_iter().collect();
    }
}

/// Calls `rename` on the custom reference of every type, type instances
/// included.
fn for_each_custom_type_reference(
    module: &mut Module,
    mut rename: impl FnMut(&mut CustomTypeReference),
) {
    visit_types_of_module(module, &mut |type_reference: &mut TypeReference| {
        match type_reference {
            TypeReference::Custom(custom) => rename(custom),
            TypeReference::TypeInstance(instance) => rename(&mut instance.type_constructor),
            _ => {}
        }
    });
}

/// Points references to `old_module_name`, and references without a module,
/// at `new_module_name`.
pub fn update_custom_type_references_module_name(
    module: &mut Module,
    old_module_name: &str,
    new_module_name: &str,
) {
    for_each_custom_type_reference(module, |custom| {
        let name = &mut custom.module_reference.name;
        if name.is_empty() || name == old_module_name {
            new_module_name.clone_into(name);
        }
    });
}

/// Follows import edits: when the module behind an alias changed between
/// `previous_imports` and `module.imports`, references to the previous
/// module move to the new one. References naming an alias are resolved to
/// the aliased module.
pub fn update_custom_type_references_import_module_name(
    module: &mut Module,
    previous_imports: &[Import],
) {
    let changes: Vec<(String, String)> = previous_imports
        .iter()
        .filter_map(|previous| {
            let current = module.find_import_by_alias(&previous.alias)?;
            (current.module_name != previous.module_name)
                .then(|| (previous.module_name.clone(), current.module_name.clone()))
        })
        .collect();
    let aliases: Vec<(String, String)> = module
        .imports
        .iter()
        .map(|import| (import.alias.clone(), import.module_name.clone()))
        .collect();

    for_each_custom_type_reference(module, |custom| {
        let name = &mut custom.module_reference.name;
        let renamed = changes
            .iter()
            .chain(&aliases)
            .find(|(from, _)| from == name)
            .map(|(_, to)| to);
        if let Some(to) = renamed {
            to.clone_into(name);
        }
    });
}
