use crate::container::Container;
use crate::errors::ContainerError;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// A resolved object, type-erased. Singleton identity is `Arc` identity.
pub type Value = Arc<dyn Any + Send + Sync>;

/// Named parameter overrides supplied to `make`/`call`; used verbatim,
/// never resolved recursively.
pub type Overrides = HashMap<String, Value>;

pub type FactoryFn =
    Arc<dyn Fn(&Container, &Overrides) -> Result<Value, ContainerError> + Send + Sync>;

/// The concrete half of a binding: how to produce a value for an abstract.
#[derive(Clone)]
pub enum Recipe {
    /// A ready value, returned as-is.
    Literal(Value),
    /// A factory invoked with the container and the caller's overrides.
    Factory(FactoryFn),
    /// A class identifier to autowire through the type introspector.
    Class(String),
}

impl Recipe {
    pub fn literal<T: Send + Sync + 'static>(value: T) -> Self {
        Recipe::Literal(Arc::new(value) as Value)
    }

    pub fn factory<F>(factory: F) -> Self
    where
        F: Fn(&Container, &Overrides) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        Recipe::Factory(Arc::new(factory))
    }

    pub fn class(name: impl Into<String>) -> Self {
        Recipe::Class(name.into())
    }
}

impl fmt::Debug for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Recipe::Literal(_) => f.write_str("Recipe::Literal"),
            Recipe::Factory(_) => f.write_str("Recipe::Factory"),
            Recipe::Class(name) => write!(f, "Recipe::Class({})", name),
        }
    }
}

/// A registered recipe plus its lifecycle flag.
#[derive(Clone)]
pub struct Binding {
    pub recipe: Recipe,
    pub shared: bool,
}

/// Downcast a resolved value to a concrete type.
pub fn downcast_value<T: Send + Sync + 'static>(value: &Value) -> Result<Arc<T>, ContainerError> {
    value
        .clone()
        .downcast::<T>()
        .map_err(|_| ContainerError::Resolution {
            message: format!("type mismatch: expected {}", std::any::type_name::<T>()),
        })
}
