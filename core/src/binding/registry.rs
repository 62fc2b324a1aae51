use crate::binding::types::{Binding, Recipe, Value};
use crate::errors::ContainerError;
use std::collections::HashMap;

/// Maximum alias hops before a chain is treated as a configuration error.
pub const MAX_ALIAS_HOPS: usize = 32;

/// Stores binding recipes, the instance cache, and alias redirects.
///
/// Re-registering an abstract replaces its recipe but never disturbs an
/// already-cached instance; callers must `forget` first for a fresh build.
pub struct BindingRegistry {
    bindings: HashMap<String, Binding>,
    instances: HashMap<String, Value>,
    aliases: HashMap<String, String>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
            instances: HashMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn bind(&mut self, abstract_key: &str, recipe: Recipe, shared: bool) {
        self.bindings
            .insert(abstract_key.to_string(), Binding { recipe, shared });
    }

    /// Register a ready object as a permanently cached singleton. No recipe
    /// is consulted and no construction ever occurs for this abstract.
    pub fn instance(&mut self, abstract_key: &str, value: Value) {
        self.aliases.remove(abstract_key);
        self.instances.insert(abstract_key.to_string(), value);
    }

    pub fn alias(&mut self, abstract_key: &str, alias_name: &str) {
        self.aliases
            .insert(alias_name.to_string(), abstract_key.to_string());
    }

    /// Follow the alias chain to the canonical abstract, capped at
    /// [`MAX_ALIAS_HOPS`] so accidental alias cycles fail loudly.
    pub fn canonical(&self, name: &str) -> Result<String, ContainerError> {
        let mut current = name;
        for _ in 0..MAX_ALIAS_HOPS {
            match self.aliases.get(current) {
                Some(target) => current = target,
                None => return Ok(current.to_string()),
            }
        }
        Err(ContainerError::AliasLoop {
            alias: name.to_string(),
            limit: MAX_ALIAS_HOPS,
        })
    }

    pub fn binding(&self, abstract_key: &str) -> Option<Binding> {
        self.bindings.get(abstract_key).cloned()
    }

    pub fn cached(&self, abstract_key: &str) -> Option<Value> {
        self.instances.get(abstract_key).cloned()
    }

    /// Cache a constructed instance for a shared binding.
    pub fn store(&mut self, abstract_key: &str, value: Value) {
        self.instances.insert(abstract_key.to_string(), value);
    }

    /// Whether a recipe, alias, or cached instance exists under this name.
    pub fn bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
            || self.aliases.contains_key(name)
            || self.instances.contains_key(name)
    }

    /// Remove the binding, the cached instance, and every alias pointing at
    /// this abstract.
    pub fn forget(&mut self, abstract_key: &str) {
        self.bindings.remove(abstract_key);
        self.instances.remove(abstract_key);
        self.aliases.retain(|_, target| target != abstract_key);
    }

    pub fn flush(&mut self) {
        self.bindings.clear();
        self.instances.clear();
        self.aliases.clear();
    }
}

impl Default for BindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}
