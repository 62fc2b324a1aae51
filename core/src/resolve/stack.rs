use crate::errors::ContainerError;
use std::cell::RefCell;

/// Ordered chain of abstracts currently under construction.
///
/// One stack exists per thread and is empty between top-level resolutions, so
/// independent calls never falsely collide while a factory that re-enters the
/// container still shares the stack of its outer call.
pub struct BuildStack {
    entries: Vec<String>,
}

impl BuildStack {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push an abstract, failing with the full chain from its first
    /// occurrence to the point of detection if it is already in flight.
    pub fn push(&mut self, abstract_key: &str) -> Result<(), ContainerError> {
        if let Some(first) = self.entries.iter().position(|e| e == abstract_key) {
            let mut chain = self.entries[first..].to_vec();
            chain.push(abstract_key.to_string());
            return Err(ContainerError::CircularDependency { chain });
        }
        self.entries.push(abstract_key.to_string());
        Ok(())
    }

    pub fn pop(&mut self) {
        self.entries.pop();
    }

    /// The abstract whose constructor is currently being satisfied, i.e. the
    /// immediately enclosing consumer for contextual lookups.
    pub fn consumer(&self) -> Option<String> {
        self.entries.last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for BuildStack {
    fn default() -> Self {
        Self::new()
    }
}

thread_local! {
    static BUILD_STACK: RefCell<BuildStack> = RefCell::new(BuildStack::new());
}

pub(crate) fn push(abstract_key: &str) -> Result<(), ContainerError> {
    BUILD_STACK.with(|stack| stack.borrow_mut().push(abstract_key))
}

pub(crate) fn pop() {
    BUILD_STACK.with(|stack| stack.borrow_mut().pop());
}

pub(crate) fn consumer() -> Option<String> {
    BUILD_STACK.with(|stack| stack.borrow().consumer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_detects_repeat_with_full_chain() {
        let mut stack = BuildStack::new();
        stack.push("A").unwrap();
        stack.push("B").unwrap();
        stack.push("C").unwrap();

        match stack.push("B").unwrap_err() {
            ContainerError::CircularDependency { chain } => {
                assert_eq!(chain, vec!["B", "C", "B"]);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_pop_unwinds_in_order() {
        let mut stack = BuildStack::new();
        stack.push("A").unwrap();
        stack.push("B").unwrap();
        assert_eq!(stack.consumer().unwrap(), "B");

        stack.pop();
        assert_eq!(stack.consumer().unwrap(), "A");

        stack.pop();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_sequential_resolutions_do_not_collide() {
        let mut stack = BuildStack::new();
        stack.push("A").unwrap();
        stack.pop();
        // A fresh top-level resolution of the same abstract is fine.
        assert!(stack.push("A").is_ok());
    }
}
