// ABOUTME: Two-tier environment: a pinned mutable GlobalEnv and value-copied closure Scopes

use crate::error::EvalError;
use crate::heap::{Handle, Heap};
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// The pinned, mutable global symbol table. Owns the heap and serves as the
/// sole root set for garbage collection. Captured closures hold an `Rc` back
/// to this environment rather than copying it.
pub struct GlobalEnv {
    heap: RefCell<Heap>,
    bindings: RefCell<HashMap<String, Handle>>,
}

impl GlobalEnv {
    pub fn new() -> Rc<Self> {
        Rc::new(GlobalEnv {
            heap: RefCell::new(Heap::new()),
            bindings: RefCell::new(HashMap::new()),
        })
    }

    pub fn manage(&self, value: Value) -> Handle {
        self.heap.borrow_mut().manage(value)
    }

    pub fn get(&self, handle: Handle) -> Result<Value, EvalError> {
        self.heap.borrow().get(handle)
    }

    pub fn lookup(&self, id: &str) -> Option<Handle> {
        self.bindings.borrow().get(id).copied()
    }

    pub fn define(&self, id: impl Into<String>, handle: Handle) {
        self.bindings.borrow_mut().insert(id.into(), handle);
    }

    /// Runs mark-and-sweep rooted at every currently bound global name.
    pub fn collect(&self) -> Result<(), EvalError> {
        let roots: Vec<Handle> = self.bindings.borrow().values().copied().collect();
        self.heap.borrow_mut().collect(&roots)
    }

    pub fn heap_len(&self) -> usize {
        self.heap.borrow().len()
    }
}

/// A lexically captured closure environment: a value-copy of the bindings
/// visible at the point of capture, plus an upward link to the global scope.
#[derive(Clone)]
pub struct Scope {
    pub bindings: HashMap<String, Handle>,
    pub global: Rc<GlobalEnv>,
}

/// The environment an expression is evaluated against: either the global
/// scope directly (top-level forms) or a captured/local scope (inside a
/// lambda call).
#[derive(Clone)]
pub enum Env {
    Global(Rc<GlobalEnv>),
    Local(Rc<Scope>),
}

impl Env {
    pub fn global(&self) -> &Rc<GlobalEnv> {
        match self {
            Env::Global(g) => g,
            Env::Local(s) => &s.global,
        }
    }

    pub fn lookup(&self, id: &str) -> Option<Handle> {
        match self {
            Env::Global(g) => g.lookup(id),
            Env::Local(s) => s.bindings.get(id).copied().or_else(|| s.global.lookup(id)),
        }
    }

    /// Binds `id` in the global scope. Fails outside the global scope: only
    /// the global environment may be extended by `define`.
    pub fn define(&self, id: &str, handle: Handle) -> Result<(), EvalError> {
        match self {
            Env::Global(g) => {
                g.define(id, handle);
                Ok(())
            }
            Env::Local(_) => Err(EvalError::IllegalContext(format!(
                "define: {id} is not allowed outside the global scope"
            ))),
        }
    }

    /// Produces a value-copy of the bindings currently visible, for closure capture.
    pub fn capture(&self) -> Scope {
        match self {
            Env::Global(g) => Scope {
                bindings: HashMap::new(),
                global: g.clone(),
            },
            Env::Local(s) => Scope {
                bindings: s.bindings.clone(),
                global: s.global.clone(),
            },
        }
    }

    pub fn manage(&self, value: Value) -> Handle {
        self.global().manage(value)
    }

    pub fn get(&self, handle: Handle) -> Result<Value, EvalError> {
        self.global().get(handle)
    }
}
