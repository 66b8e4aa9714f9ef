//! Per-query state shared by the lookups of one analysis request.

use std::cell::RefCell;

use hl_ir::Module;
use hl_parse_tree::Node;
use rustc_hash::FxHashSet;

use crate::resolver::{ModuleRef, ModuleResolver};

/// Where a query is asked from: a module, and optionally a position in the
/// parse tree of that module.
///
/// Without a tree only module-level names are visible.
#[derive(Clone, Copy)]
pub(crate) struct Scope<'a> {
    pub(crate) module: &'a Module,
    pub(crate) root: Option<&'a Node>,
    pub(crate) position: &'a [usize],
}

impl<'a> Scope<'a> {
    pub(crate) fn module_level(module: &'a Module) -> Self {
        Scope {
            module,
            root: None,
            position: &[],
        }
    }

    /// The same tree, queried at another position.
    pub(crate) fn at<'b>(self, position: &'b [usize]) -> Scope<'b>
    where
        'a: 'b,
    {
        Scope {
            module: self.module,
            root: self.root,
            position,
        }
    }
}

/// Module access and recursion guard of a single query.
///
/// The guard tracks the `(module, declaration)` pairs whose type is being
/// inferred, so that `var a = b; var b = a;` at module level ends instead of
/// recursing forever.
pub(crate) struct Context<'m> {
    current: Option<&'m Module>,
    resolver: &'m dyn ModuleResolver,
    in_progress: RefCell<FxHashSet<(String, String)>>,
}

impl<'m> Context<'m> {
    pub(crate) fn new(current: Option<&'m Module>, resolver: &'m dyn ModuleResolver) -> Self {
        Context {
            current,
            resolver,
            in_progress: RefCell::new(FxHashSet::default()),
        }
    }

    /// The module called `module_name`. The empty name stands for the module
    /// the query is made from.
    pub(crate) fn module(&self, module_name: &str) -> Option<ModuleRef<'m>> {
        if let Some(current) = self.current {
            if module_name.is_empty() || module_name == current.name {
                return Some(ModuleRef::Borrowed(current));
            }
        }
        let module = self.resolver.resolve_module(module_name);
        if module.is_none() {
            tracing::debug!(module = module_name, "module not found");
        }
        module.map(ModuleRef::Shared)
    }

    /// Runs `f` unless the declaration is already being evaluated further up
    /// the stack, in which case the answer is unknown.
    pub(crate) fn guarded<R>(
        &self,
        module_name: &str,
        name: &str,
        f: impl FnOnce() -> Option<R>,
    ) -> Option<R> {
        let key = (module_name.to_owned(), name.to_owned());
        if !self.in_progress.borrow_mut().insert(key.clone()) {
            tracing::debug!(module = module_name, name, "recursive definition");
            return None;
        }
        let result = f();
        self.in_progress.borrow_mut().remove(&key);
        result
    }
}
