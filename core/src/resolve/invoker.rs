use crate::binding::types::{Overrides, Value};
use crate::container::Container;
use crate::errors::ContainerError;
use crate::resolve::introspect::ParamSpec;
use std::sync::Arc;

pub type InvokeFn = Arc<dyn Fn(Vec<Value>) -> Result<Value, ContainerError> + Send + Sync>;

/// A callable target for [`Container::call`]: a free function, or a method
/// whose receiver is captured by the invoke closure. Parameters are
/// described exactly like constructor parameters and satisfied the same way,
/// except that no enclosing consumer exists, so contextual bindings never
/// apply.
#[derive(Clone)]
pub struct FunctionSpec {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub invoke: InvokeFn,
}

impl FunctionSpec {
    pub fn builder(name: &str) -> FunctionSpecBuilder {
        FunctionSpecBuilder {
            name: name.to_string(),
            params: Vec::new(),
        }
    }
}

pub struct FunctionSpecBuilder {
    name: String,
    params: Vec<ParamSpec>,
}

impl FunctionSpecBuilder {
    pub fn param(mut self, name: &str, declared_type: &str) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            declared_type: Some(declared_type.to_string()),
            default: None,
        });
        self
    }

    /// An untyped parameter; must be satisfied by an override or a default.
    pub fn untyped_param(mut self, name: &str) -> Self {
        self.params.push(ParamSpec {
            name: name.to_string(),
            declared_type: None,
            default: None,
        });
        self
    }

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

    pub fn invoke<F>(self, invoke: F) -> FunctionSpec
    where
        F: Fn(Vec<Value>) -> Result<Value, ContainerError> + Send + Sync + 'static,
    {
        FunctionSpec {
            name: self.name,
            params: self.params,
            invoke: Arc::new(invoke),
        }
    }
}

pub(crate) fn call(
    container: &Container,
    target: &FunctionSpec,
    overrides: &Overrides,
) -> Result<Value, ContainerError> {
    let args = container.resolve_parameters(&target.params, overrides, None, &target.name)?;
    (target.invoke)(args)
}
