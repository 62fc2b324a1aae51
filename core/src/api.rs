pub use crate::binding::{downcast_value, Binding, FactoryFn, Overrides, Recipe, Value};
pub use crate::container::{current, set_current, Container};
pub use crate::errors::ContainerError;
pub use crate::hooks::{ExtenderFn, HookFn};
pub use crate::resolve::{
    ClassRegistry, ClassSpec, ClassSpecBuilder, FunctionSpec, FunctionSpecBuilder, ParamSpec,
    TypeIntrospector,
};
