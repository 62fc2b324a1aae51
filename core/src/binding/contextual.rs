use crate::binding::types::Recipe;
use crate::container::Container;
use std::collections::HashMap;

/// Per-consumer dependency overrides, keyed by `(consumer, dependency)`
/// exactly. No inheritance-based matching: a contextual binding registered
/// for one consumer never applies to any other abstract.
pub struct ContextualBindingTable {
    entries: HashMap<(String, String), Recipe>,
}

impl ContextualBindingTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    pub fn give(&mut self, consumer: &str, dependency: &str, recipe: Recipe) {
        self.entries
            .insert((consumer.to_string(), dependency.to_string()), recipe);
    }

    pub fn lookup(&self, consumer: &str, dependency: &str) -> Option<Recipe> {
        self.entries
            .get(&(consumer.to_string(), dependency.to_string()))
            .cloned()
    }

    pub fn flush(&mut self) {
        self.entries.clear();
    }
}

impl Default for ContextualBindingTable {
    fn default() -> Self {
        Self::new()
    }
}

/// First half of the `when(consumer).needs(dependency).give(recipe)` chain.
pub struct ContextualBindingBuilder<'a> {
    container: &'a Container,
    consumer: String,
}

impl<'a> ContextualBindingBuilder<'a> {
    pub(crate) fn new(container: &'a Container, consumer: &str) -> Self {
        Self {
            container,
            consumer: consumer.to_string(),
        }
    }

    pub fn needs(self, dependency: &str) -> ContextualNeedsBuilder<'a> {
        ContextualNeedsBuilder {
            container: self.container,
            consumer: self.consumer,
            dependency: dependency.to_string(),
        }
    }
}

/// Second half of the chain; `give` stores the triple.
pub struct ContextualNeedsBuilder<'a> {
    container: &'a Container,
    consumer: String,
    dependency: String,
}

impl ContextualNeedsBuilder<'_> {
    pub fn give(self, recipe: Recipe) {
        self.container
            .give_contextual(&self.consumer, &self.dependency, recipe);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_exact_keyed() {
        let mut table = ContextualBindingTable::new();
        table.give("ReportController", "Logger", Recipe::literal(1u32));

        assert!(table.lookup("ReportController", "Logger").is_some());
        assert!(table.lookup("OtherController", "Logger").is_none());
        assert!(table.lookup("ReportController", "Mailer").is_none());
    }

    #[test]
    fn test_give_replaces_prior_entry() {
        let mut table = ContextualBindingTable::new();
        table.give("C", "D", Recipe::class("First"));
        table.give("C", "D", Recipe::class("Second"));

        match table.lookup("C", "D").unwrap() {
            Recipe::Class(name) => assert_eq!(name, "Second"),
            other => panic!("unexpected recipe: {:?}", other),
        }
    }
}
