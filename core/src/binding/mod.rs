pub mod contextual;
pub mod registry;
pub mod tags;
pub mod types;

pub use contextual::{ContextualBindingBuilder, ContextualBindingTable, ContextualNeedsBuilder};
pub use registry::{BindingRegistry, MAX_ALIAS_HOPS};
pub use tags::TagRegistry;
pub use types::{downcast_value, Binding, FactoryFn, Overrides, Recipe, Value};
