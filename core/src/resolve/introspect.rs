//! The one seam the resolver needs from the host: given a class identifier,
//! an ordered list of constructor parameters and a way to invoke the
//! constructor with resolved arguments. A reflection-capable host can plug in
//! its own [`TypeIntrospector`]; by default classes are registered explicitly.

use crate::binding::types::Value;
use crate::errors::ContainerError;
use std::collections::HashMap;
use std::sync::Arc;

/// One constructor parameter: its name, its declared dependency type (if
/// any), and its default value (if any).
#[derive(Clone)]
pub struct ParamSpec {
    pub name: String,
    pub declared_type: Option<String>,
    pub default: Option<Value>,
}

pub type ConstructFn = Arc<dyn Fn(Vec<Value>) -> Result<Value, ContainerError> + Send + Sync>;

/// Constructor metadata for an autowirable class: the ordered parameter list
/// and the constructor itself, invoked with arguments in declaration order.
#[derive(Clone)]
pub struct ClassSpec {
    pub params: Vec<ParamSpec>,
    pub construct: ConstructFn,
}

impl ClassSpec {
    pub fn builder() -> ClassSpecBuilder {
        ClassSpecBuilder { params: Vec::new() }
    }

    /// A class with a parameterless constructor.
    pub fn leaf<F>(construct: F) -> Self
    where
        F: Fn(Vec<Value>) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        Self {
            params: Vec::new(),
            construct: Arc::new(construct),
        }
    }
}

pub struct ClassSpecBuilder {
    params: Vec<ParamSpec>,
}

impl ClassSpecBuilder {
    /// A parameter whose declared type is resolved through the container.
    pub fn param(mut self, name: &str, declared_type: &str) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            declared_type: Some(declared_type.to_string()),
            default: None,
        });
        self
    }

    /// A typed parameter that falls back to a default when its type cannot
    /// be resolved.
    pub fn param_with_default<T: Send + Sync + 'static>(
        mut self,
        name: &str,
        declared_type: &str,
        default: T,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            declared_type: Some(declared_type.to_string()),
            default: Some(Arc::new(default) as Value),
        });
        self
    }

    /// An untyped parameter; satisfiable only by a named override.
    pub fn untyped_param(mut self, name: &str) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            declared_type: None,
            default: None,
        });
        self
    }

    /// An untyped parameter with a default value.
    pub fn untyped_param_with_default<T: Send + Sync + 'static>(
        mut self,
        name: &str,
        default: T,
    ) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            declared_type: None,
            default: Some(Arc::new(default) as Value),
        });
        self
    }

    pub fn construct<F>(self, construct: F) -> ClassSpec
    where
        F: Fn(Vec<Value>) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        ClassSpec {
            params: self.params,
            construct: Arc::new(construct),
        }
    }
}

/// Source of constructor metadata, consulted when an abstract has no bound
/// recipe or when a recipe names a class to autowire.
pub trait TypeIntrospector: Send + Sync {
    fn class_spec(&self, class: &str) -> Option<Arc<ClassSpec>>;
}

/// Default introspector: classes registered explicitly by name.
pub struct ClassRegistry {
    classes: HashMap<String, Arc<ClassSpec>>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self {
            classes: HashMap::new(),
        }
    }

    pub fn register(&mut self, class: &str, spec: ClassSpec) {
        self.classes.insert(class.to_string(), Arc::new(spec));
    }
}

impl Default for ClassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeIntrospector for ClassRegistry {
    fn class_spec(&self, class: &str) -> Option<Arc<ClassSpec>> {
        self.classes.get(class).cloned()
    }
}
