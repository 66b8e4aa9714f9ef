//! Access to modules other than the one being analyzed.
//!
//! Modules are referenced by name and loaded on demand through a resolver
//! injected by the host. A resolver answering `None` is the normal outcome
//! for a module that is not loaded or does not exist.

use std::ops::Deref;
use std::sync::Arc;

use hl_ir::Module;
use hl_parse_tree::Node;
use parking_lot::{Mutex, RwLock};
use rustc_hash::FxHashMap;

use crate::tree::get_module_name_from_tree;

/// Finds modules by name.
pub trait ModuleResolver {
    fn resolve_module(&self, module_name: &str) -> Option<Arc<Module>>;
}

impl<F> ModuleResolver for F
where
    F: Fn(&str) -> Option<Arc<Module>>,
{
    fn resolve_module(&self, module_name: &str) -> Option<Arc<Module>> {
        self(module_name)
    }
}

/// Finds the parse tree of a module by name.
pub trait ParseTreeResolver {
    fn resolve_parse_tree(&self, module_name: &str) -> Option<Arc<Node>>;
}

impl<F> ParseTreeResolver for F
where
    F: Fn(&str) -> Option<Arc<Node>>,
{
    fn resolve_parse_tree(&self, module_name: &str) -> Option<Arc<Node>> {
        self(module_name)
    }
}

/// A module owned by the caller of a query or loaded through a resolver.
#[derive(Clone, Debug)]
pub enum ModuleRef<'a> {
    Borrowed(&'a Module),
    Shared(Arc<Module>),
}

impl Deref for ModuleRef<'_> {
    type Target = Module;

    fn deref(&self) -> &Module {
        match self {
            ModuleRef::Borrowed(module) => module,
            ModuleRef::Shared(module) => module,
        }
    }
}

/// Parse trees of the open documents, keyed by module name.
///
/// Thread-safe: concurrent queries read through the lock while the host
/// replaces a tree after an edit.
#[derive(Default)]
pub struct ParseTreeStore {
    trees: RwLock<FxHashMap<String, Arc<Node>>>,
}

impl ParseTreeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `root` under the name its module head declares and returns
    /// that name. A tree without a module head is not stored.
    pub fn insert(&self, root: Node) -> Option<String> {
        let name = get_module_name_from_tree(&root)?.to_owned();
        self.insert_with_name(name.clone(), Arc::new(root));
        Some(name)
    }

    pub fn insert_with_name(&self, module_name: impl Into<String>, root: Arc<Node>) {
        self.trees.write().insert(module_name.into(), root);
    }

    pub fn remove(&self, module_name: &str) -> Option<Arc<Node>> {
        self.trees.write().remove(module_name)
    }

    pub fn get(&self, module_name: &str) -> Option<Arc<Node>> {
        self.trees.read().get(module_name).cloned()
    }

    pub fn len(&self) -> usize {
        self.trees.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.trees.read().is_empty()
    }
}

impl ParseTreeResolver for ParseTreeStore {
    fn resolve_parse_tree(&self, module_name: &str) -> Option<Arc<Node>> {
        self.get(module_name)
    }
}

/// Module resolver converting the trees of a `ParseTreeResolver`.
///
/// Each tree is converted at most once; declarations that fail to convert
/// are left out of the module, so a half-edited file still answers lookups
/// for the rest of its declarations.
pub struct ParseTreeModules<'r> {
    trees: &'r dyn ParseTreeResolver,
    converted: Mutex<FxHashMap<String, Option<Arc<Module>>>>,
}

impl<'r> ParseTreeModules<'r> {
    pub fn new(trees: &'r dyn ParseTreeResolver) -> Self {
        ParseTreeModules {
            trees,
            converted: Mutex::new(FxHashMap::default()),
        }
    }

    fn convert(&self, module_name: &str) -> Option<Arc<Module>> {
        let root = self.trees.resolve_parse_tree(module_name)?;
        read_module(&root).map(Arc::new)
    }
}

/// The module of `root`, without the declarations that fail to read.
pub(crate) fn read_module(root: &Node) -> Option<Module> {
    match hl_convert::parse_tree_to_module(root) {
        Ok(output) => {
            if output.has_errors() {
                tracing::debug!(
                    module = %output.module.name,
                    errors = output.errors.len(),
                    "converted module partially"
                );
            }
            Some(output.module)
        }
        Err(error) => {
            tracing::debug!(%error, "cannot convert parse tree");
            None
        }
    }
}

impl ModuleResolver for ParseTreeModules<'_> {
    fn resolve_module(&self, module_name: &str) -> Option<Arc<Module>> {
        if let Some(module) = self.converted.lock().get(module_name) {
            return module.clone();
        }
        let module = self.convert(module_name);
        self.converted
            .lock()
            .insert(module_name.to_owned(), module.clone());
        module
    }
}
