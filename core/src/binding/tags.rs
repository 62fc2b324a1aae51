use std::collections::HashMap;

/// Named groups of abstracts for bulk lookup. Members keep the order in
/// which they were first tagged; re-tagging is idempotent.
pub struct TagRegistry {
    tags: HashMap<String, Vec<String>>,
}

impl TagRegistry {
    pub fn new() -> Self {
        Self {
            tags: HashMap::new(),
        }
    }

    pub fn tag(&mut self, abstracts: &[&str], tag: &str) {
        let members = self.tags.entry(tag.to_string()).or_default();
        for abstract_key in abstracts {
            if !members.iter().any(|m| m == abstract_key) {
                members.push((*abstract_key).to_string());
            }
        }
    }

    pub fn members(&self, tag: &str) -> Vec<String> {
        self.tags.get(tag).cloned().unwrap_or_default()
    }

    pub fn flush(&mut self) {
        self.tags.clear();
    }
}

impl Default for TagRegistry {
    fn default() -> Self {
        Self::new()
    }
}
