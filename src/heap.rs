// ABOUTME: Mark-and-sweep heap owning every value created by the interpreter

use crate::error::EvalError;
use crate::value::Value;
use std::collections::HashMap;

/// A non-owning reference to a heap-resident value.
pub type Handle = u64;

struct Slot {
    value: Value,
    live: bool,
}

/// Owns every [`Value`] ever allocated by the lexer, parser, or evaluator.
///
/// Handles are never reused while a value is tracked; sweeping removes a
/// slot entirely rather than marking it free for reuse, since the interpreter
/// has no need to bound memory growth between collections.
pub struct Heap {
    slots: HashMap<Handle, Slot>,
    next_id: Handle,
}

impl Heap {
    pub fn new() -> Self {
        Heap {
            slots: HashMap::new(),
            next_id: 0,
        }
    }

    /// Takes ownership of `value`, returning a handle to it.
    pub fn manage(&mut self, value: Value) -> Handle {
        let handle = self.next_id;
        self.next_id += 1;
        self.slots.insert(handle, Slot { value, live: false });
        handle
    }

    /// Clones the value behind `handle` out of the heap.
    ///
    /// Encountering an untracked handle here is a fatal invariant violation:
    /// every handle reachable from a live value must itself be managed.
    pub fn get(&self, handle: Handle) -> Result<Value, EvalError> {
        self.slots
            .get(&handle)
            .map(|slot| slot.value.clone())
            .ok_or_else(|| {
                EvalError::ImplementationError(format!("unmanaged handle {handle}"))
            })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    fn reset_marks(&mut self) {
        for slot in self.slots.values_mut() {
            slot.live = false;
        }
    }

    fn mark(&mut self, handle: Handle) -> Result<(), EvalError> {
        let already_marked = self
            .slots
            .get(&handle)
            .map(|slot| slot.live)
            .ok_or_else(|| EvalError::ImplementationError(format!("unmanaged handle {handle}")))?;
        if already_marked {
            return Ok(());
        }
        self.slots.get_mut(&handle).unwrap().live = true;

        let children = match &self.slots[&handle].value {
            Value::List(items) => items.clone(),
            Value::LambdaFunction(lambda) => {
                let mut children: Vec<Handle> = lambda.closure.bindings.values().copied().collect();
                children.extend(lambda.body.iter().copied());
                children
            }
            _ => Vec::new(),
        };
        for child in children {
            self.mark(child)?;
        }
        Ok(())
    }

    fn sweep(&mut self) {
        self.slots.retain(|_, slot| slot.live);
    }

    /// Runs a full mark-and-sweep pass, rooted at every binding currently
    /// present in the global symbol table.
    pub fn collect(&mut self, roots: &[Handle]) -> Result<(), EvalError> {
        self.reset_marks();
        for &root in roots {
            self.mark(root)?;
        }
        self.sweep();
        Ok(())
    }
}

impl Default for Heap {
    fn default() -> Self {
        Heap::new()
    }
}
