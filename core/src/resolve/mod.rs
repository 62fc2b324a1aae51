pub mod introspect;
pub mod invoker;
pub mod resolver;
pub mod stack;

pub use introspect::{
    ClassRegistry, ClassSpec, ClassSpecBuilder, ConstructFn, ParamSpec, TypeIntrospector,
};
pub use invoker::{FunctionSpec, FunctionSpecBuilder, InvokeFn};
pub use stack::BuildStack;
