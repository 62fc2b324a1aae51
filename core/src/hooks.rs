use crate::binding::types::Value;
use crate::container::Container;
use std::collections::HashMap;
use std::sync::Arc;

/// Lifecycle callback. Receives the instance and the container; may mutate
/// the instance through its own interior mutability but cannot replace it.
pub type HookFn = Arc<dyn Fn(&Value, &Container) + Send + Sync>;

/// Post-construction decorator; returns the (possibly different) instance
/// handed to the next extender.
pub type ExtenderFn = Arc<dyn Fn(Value, &Container) -> Value + Send + Sync>;

/// Resolving/afterResolving callbacks and per-abstract extender chains.
///
/// Accessors return cloned snapshots so the resolver can run callbacks
/// without holding the registry lock; a callback is free to re-enter the
/// container.
pub struct LifecycleHooks {
    resolving_global: Vec<HookFn>,
    resolving_specific: HashMap<String, Vec<HookFn>>,
    after_global: Vec<HookFn>,
    after_specific: HashMap<String, Vec<HookFn>>,
    extenders: HashMap<String, Vec<ExtenderFn>>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self {
            resolving_global: Vec::new(),
            resolving_specific: HashMap::new(),
            after_global: Vec::new(),
            after_specific: HashMap::new(),
            extenders: HashMap::new(),
        }
    }

    /// Register a resolving callback; `None` means every resolution.
    pub fn resolving(&mut self, abstract_key: Option<&str>, callback: HookFn) {
        match abstract_key {
            None => self.resolving_global.push(callback),
            Some(key) => self
                .resolving_specific
                .entry(key.to_string())
                .or_default()
                .push(callback),
        }
    }

    pub fn after_resolving(&mut self, abstract_key: Option<&str>, callback: HookFn) {
        match abstract_key {
            None => self.after_global.push(callback),
            Some(key) => self
                .after_specific
                .entry(key.to_string())
                .or_default()
                .push(callback),
        }
    }

    pub fn extend(&mut self, abstract_key: &str, extender: ExtenderFn) {
        self.extenders
            .entry(abstract_key.to_string())
            .or_default()
            .push(extender);
    }

    /// Global callbacks first, then abstract-specific, in registration order.
    pub fn resolving_for(&self, abstract_key: &str) -> Vec<HookFn> {
        let mut callbacks = self.resolving_global.clone();
        if let Some(specific) = self.resolving_specific.get(abstract_key) {
            callbacks.extend(specific.iter().cloned());
        }
        callbacks
    }

    pub fn after_for(&self, abstract_key: &str) -> Vec<HookFn> {
        let mut callbacks = self.after_global.clone();
        if let Some(specific) = self.after_specific.get(abstract_key) {
            callbacks.extend(specific.iter().cloned());
        }
        callbacks
    }

    pub fn extenders_for(&self, abstract_key: &str) -> Vec<ExtenderFn> {
        self.extenders
            .get(abstract_key)
            .cloned()
            .unwrap_or_default()
    }

    pub fn flush(&mut self) {
        self.resolving_global.clear();
        self.resolving_specific.clear();
        self.after_global.clear();
        self.after_specific.clear();
        self.extenders.clear();
    }
}

impl Default for LifecycleHooks {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_callbacks_precede_specific() {
        let mut hooks = LifecycleHooks::new();
        hooks.resolving(Some("svc"), Arc::new(|_, _| {}));
        hooks.resolving(None, Arc::new(|_, _| {}));

        assert_eq!(hooks.resolving_for("svc").len(), 2);
        assert_eq!(hooks.resolving_for("other").len(), 1);
    }

    #[test]
    fn test_extenders_keep_registration_order() {
        let mut hooks = LifecycleHooks::new();
        hooks.extend("n", Arc::new(|v, _| v));
        hooks.extend("n", Arc::new(|v, _| v));

        assert_eq!(hooks.extenders_for("n").len(), 2);
        assert!(hooks.extenders_for("m").is_empty());
    }

    #[test]
    fn test_flush_clears_all_callbacks() {
        let mut hooks = LifecycleHooks::new();
        hooks.resolving(None, Arc::new(|_, _| {}));
        hooks.after_resolving(Some("svc"), Arc::new(|_, _| {}));
        hooks.extend("svc", Arc::new(|v, _| v));

        hooks.flush();

        assert!(hooks.resolving_for("svc").is_empty());
        assert!(hooks.after_for("svc").is_empty());
        assert!(hooks.extenders_for("svc").is_empty());
    }
}
