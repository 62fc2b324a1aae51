//! The recursive resolution algorithm. Lives in its own `impl Container`
//! block so the façade stays registration-focused.
//!
//! Resolution order for one abstract: alias walk, instance/singleton cache
//! short-circuit, cycle check, recipe selection (falling back to autowiring),
//! construction, resolving callbacks, extender chain, afterResolving
//! callbacks, singleton caching.

use crate::binding::types::{Overrides, Recipe, Value};
use crate::container::Container;
use crate::errors::ContainerError;
use crate::resolve::introspect::ParamSpec;
use crate::resolve::stack;
use tracing::{debug, trace};

impl Container {
    pub(crate) fn resolve(
        &self,
        abstract_key: &str,
        overrides: &Overrides,
    ) -> Result<Value, ContainerError> {
        let canonical = self.canonical(abstract_key)?;

        // Cached instances and singletons return as-is: no construction
        // occurs, so no build-stack entry or cycle check is needed.
        if let Some(value) = self.cached(&canonical) {
            trace!(abstract_key = canonical.as_str(), "cache hit");
            return Ok(value);
        }

        stack::push(&canonical)?;
        let result = self.build(&canonical, overrides);
        stack::pop();
        result
    }

    fn build(&self, canonical: &str, overrides: &Overrides) -> Result<Value, ContainerError> {
        let (recipe, shared) = match self.binding(canonical) {
            Some(binding) => (binding.recipe, binding.shared),
            // No bound recipe: treat the abstract itself as an autowirable
            // class identifier.
            None => (Recipe::Class(canonical.to_string()), false),
        };

        if shared {
            // First-resolution-wins: the per-abstract lock serializes the
            // check-build-store sequence so the factory runs at most once;
            // late callers block here and then observe the cached instance.
            let lock = self.build_lock(canonical);
            let _guard = lock.lock();
            if let Some(value) = self.cached(canonical) {
                return Ok(value);
            }
            let built = self.construct(canonical, &recipe, overrides)?;
            let value = self.run_lifecycle(canonical, built);
            self.store_instance(canonical, value.clone());
            debug!(abstract_key = canonical, "singleton cached");
            Ok(value)
        } else {
            let built = self.construct(canonical, &recipe, overrides)?;
            Ok(self.run_lifecycle(canonical, built))
        }
    }

    fn construct(
        &self,
        canonical: &str,
        recipe: &Recipe,
        overrides: &Overrides,
    ) -> Result<Value, ContainerError> {
        match recipe {
            Recipe::Literal(value) => Ok(value.clone()),
            Recipe::Factory(factory) => factory(self, overrides),
            Recipe::Class(class) => {
                let spec =
                    self.class_spec(class)
                        .ok_or_else(|| ContainerError::Resolution {
                            message: format!(
                                "'{}' is neither bound nor a known class",
                                canonical
                            ),
                        })?;
                let consumer = stack::consumer();
                let args =
                    self.resolve_parameters(&spec.params, overrides, consumer.as_deref(), class)?;
                (spec.construct)(args)
            }
        }
    }

    /// Satisfy a constructor or call-target parameter list in declaration
    /// order: named override, contextual binding of the enclosing consumer,
    /// resolvable declared type, default value, in that order.
    pub(crate) fn resolve_parameters(
        &self,
        params: &[ParamSpec],
        overrides: &Overrides,
        consumer: Option<&str>,
        owner: &str,
    ) -> Result<Vec<Value>, ContainerError> {
        let mut args = Vec::with_capacity(params.len());
        for param in params {
            if let Some(value) = overrides.get(&param.name) {
                args.push(value.clone());
                continue;
            }
            if let Some(declared) = &param.declared_type {
                if let Some(consumer) = consumer {
                    let contextual = self.contextual.read().lookup(consumer, declared);
                    if let Some(recipe) = contextual {
                        trace!(consumer, dependency = declared.as_str(), "contextual override");
                        args.push(self.resolve_contextual(&recipe)?);
                        continue;
                    }
                }
                if self.is_resolvable(declared)? {
                    args.push(self.resolve(declared, &Overrides::new())?);
                    continue;
                }
            }
            if let Some(default) = &param.default {
                args.push(default.clone());
                continue;
            }
            return Err(ContainerError::UnresolvableDependency {
                parameter: param.name.clone(),
                class: owner.to_string(),
                consumer: consumer.unwrap_or(owner).to_string(),
            });
        }
        Ok(args)
    }

    fn resolve_contextual(&self, recipe: &Recipe) -> Result<Value, ContainerError> {
        match recipe {
            Recipe::Literal(value) => Ok(value.clone()),
            Recipe::Factory(factory) => factory(self, &Overrides::new()),
            Recipe::Class(class) => self.resolve(class, &Overrides::new()),
        }
    }

    fn is_resolvable(&self, declared: &str) -> Result<bool, ContainerError> {
        let canonical = self.canonical(declared)?;
        Ok(self.bound(&canonical) || self.class_spec(&canonical).is_some())
    }

    fn run_lifecycle(&self, canonical: &str, built: Value) -> Value {
        let resolving = self.hooks.read().resolving_for(canonical);
        for callback in &resolving {
            callback(&built, self);
        }

        let mut value = built;
        let extenders = self.hooks.read().extenders_for(canonical);
        for extender in &extenders {
            value = extender(value, self);
        }

        let after = self.hooks.read().after_for(canonical);
        for callback in &after {
            callback(&value, self);
        }
        value
    }
}
