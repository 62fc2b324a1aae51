use crate::binding::contextual::{ContextualBindingBuilder, ContextualBindingTable};
use crate::binding::registry::BindingRegistry;
use crate::binding::tags::TagRegistry;
use crate::binding::types::{Binding, Overrides, Recipe, Value};
use crate::errors::ContainerError;
use crate::hooks::{ExtenderFn, HookFn, LifecycleHooks};
use crate::resolve::introspect::{ClassRegistry, ClassSpec, TypeIntrospector};
use crate::resolve::invoker::{self, FunctionSpec};
use once_cell::sync::Lazy;
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// The object-graph builder used by the rest of the framework.
///
/// Registration (`bind`/`singleton`/`instance`/`alias`/`tag`/`extend`/`when`)
/// happens during single-threaded bootstrap; once registration is frozen,
/// `make`/`get`/`call` are safe for concurrent use. The only mutable state
/// written during serving is the singleton cache, guarded per abstract so at
/// most one construction occurs even when callers race.
pub struct Container {
    pub(crate) bindings: RwLock<BindingRegistry>,
    pub(crate) contextual: RwLock<ContextualBindingTable>,
    pub(crate) tags: RwLock<TagRegistry>,
    pub(crate) hooks: RwLock<LifecycleHooks>,
    classes: RwLock<ClassRegistry>,
    introspector: RwLock<Option<Arc<dyn TypeIntrospector>>>,
    build_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Container {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(BindingRegistry::new()),
            contextual: RwLock::new(ContextualBindingTable::new()),
            tags: RwLock::new(TagRegistry::new()),
            hooks: RwLock::new(LifecycleHooks::new()),
            classes: RwLock::new(ClassRegistry::new()),
            introspector: RwLock::new(None),
            build_locks: Mutex::new(HashMap::new()),
        }
    }

    // -- registration ------------------------------------------------------

    /// Register a recipe for an abstract, replacing any prior binding. An
    /// already-cached instance is not disturbed; `forget` first for that.
    pub fn bind(&self, abstract_key: &str, recipe: Recipe, shared: bool) {
        debug!(abstract_key, shared, "binding registered");
        self.bindings.write().bind(abstract_key, recipe, shared);
    }

    pub fn singleton(&self, abstract_key: &str, recipe: Recipe) {
        self.bind(abstract_key, recipe, true);
    }

    /// Register a ready object as a permanently cached singleton.
    pub fn instance(&self, abstract_key: &str, value: Value) {
        debug!(abstract_key, "instance registered");
        self.bindings.write().instance(abstract_key, value);
    }

    pub fn alias(&self, abstract_key: &str, alias_name: &str) {
        self.bindings.write().alias(abstract_key, alias_name);
    }

    /// Register constructor metadata so the abstract can be autowired.
    pub fn register_class(&self, class: &str, spec: ClassSpec) {
        self.classes.write().register(class, spec);
    }

    /// Install an external source of constructor metadata, consulted after
    /// the built-in class registry.
    pub fn set_introspector(&self, introspector: Arc<dyn TypeIntrospector>) {
        *self.introspector.write() = Some(introspector);
    }

    pub fn when(&self, consumer: &str) -> ContextualBindingBuilder<'_> {
        ContextualBindingBuilder::new(self, consumer)
    }

    pub(crate) fn give_contextual(&self, consumer: &str, dependency: &str, recipe: Recipe) {
        self.contextual.write().give(consumer, dependency, recipe);
    }

    pub fn tag(&self, abstracts: &[&str], tag: &str) {
        self.tags.write().tag(abstracts, tag);
    }

    pub fn extend<F>(&self, abstract_key: &str, extender: F)
    where
        F: Fn(Value, &Container) -> Value + Send + Sync + 'static,
    {
        self.hooks
            .write()
            .extend(abstract_key, Arc::new(extender) as ExtenderFn);
    }

    /// Register a resolving callback; `None` runs on every resolution.
    pub fn resolving<F>(&self, abstract_key: Option<&str>, callback: F)
    where
        F: Fn(&Value, &Container) + Send + Sync + 'static,
    {
        self.hooks
            .write()
            .resolving(abstract_key, Arc::new(callback) as HookFn);
    }

    pub fn after_resolving<F>(&self, abstract_key: Option<&str>, callback: F)
    where
        F: Fn(&Value, &Container) + Send + Sync + 'static,
    {
        self.hooks
            .write()
            .after_resolving(abstract_key, Arc::new(callback) as HookFn);
    }

    // -- teardown ----------------------------------------------------------

    /// Remove the binding, cached instance, and aliases for one abstract.
    pub fn forget(&self, abstract_key: &str) {
        debug!(abstract_key, "binding forgotten");
        self.bindings.write().forget(abstract_key);
        self.build_locks.lock().remove(abstract_key);
    }

    /// Clear all bindings, aliases, tags, contextual entries, hooks,
    /// extenders, and cached instances. Registered class metadata survives;
    /// it is introspection data, not binding state.
    pub fn flush(&self) {
        debug!("container flushed");
        self.bindings.write().flush();
        self.contextual.write().flush();
        self.tags.write().flush();
        self.hooks.write().flush();
        self.build_locks.lock().clear();
    }

    // -- resolution --------------------------------------------------------

    pub fn make(&self, abstract_key: &str) -> Result<Value, ContainerError> {
        self.make_with(abstract_key, &Overrides::new())
    }

    pub fn make_with(
        &self,
        abstract_key: &str,
        overrides: &Overrides,
    ) -> Result<Value, ContainerError> {
        self.resolve(abstract_key, overrides)
    }

    /// Strict variant of `make`: fails with `NotFound` when the abstract is
    /// neither bound, aliased, instance-cached, nor autowirable.
    pub fn get(&self, abstract_key: &str) -> Result<Value, ContainerError> {
        let canonical = self.canonical(abstract_key)?;
        let resolvable =
            self.bindings.read().bound(&canonical) || self.class_spec(&canonical).is_some();
        if !resolvable {
            return Err(ContainerError::NotFound {
                abstract_key: abstract_key.to_string(),
            });
        }
        self.make(&canonical)
    }

    /// Resolve every member of a tag group, in first-tagged order, through
    /// the normal resolution path.
    pub fn tagged(&self, tag: &str) -> Result<Vec<Value>, ContainerError> {
        let members = self.tags.read().members(tag);
        let mut resolved = Vec::with_capacity(members.len());
        for member in members {
            resolved.push(self.make(&member)?);
        }
        Ok(resolved)
    }

    /// Invoke a function or method target with auto-injected arguments.
    pub fn call(
        &self,
        target: &FunctionSpec,
        overrides: &Overrides,
    ) -> Result<Value, ContainerError> {
        invoker::call(self, target, overrides)
    }

    pub fn bound(&self, name: &str) -> bool {
        self.bindings.read().bound(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.bound(name)
    }

    // -- crate-internal plumbing for the resolver --------------------------

    pub(crate) fn canonical(&self, name: &str) -> Result<String, ContainerError> {
        self.bindings.read().canonical(name)
    }

    pub(crate) fn binding(&self, abstract_key: &str) -> Option<Binding> {
        self.bindings.read().binding(abstract_key)
    }

    pub(crate) fn cached(&self, abstract_key: &str) -> Option<Value> {
        self.bindings.read().cached(abstract_key)
    }

    pub(crate) fn store_instance(&self, abstract_key: &str, value: Value) {
        self.bindings.write().store(abstract_key, value);
    }

    pub(crate) fn class_spec(&self, class: &str) -> Option<Arc<ClassSpec>> {
        if let Some(spec) = self.classes.read().class_spec(class) {
            return Some(spec);
        }
        self.introspector
            .read()
            .as_ref()
            .and_then(|external| external.class_spec(class))
    }

    /// The per-abstract mutex serializing first construction of a shared
    /// binding.
    pub(crate) fn build_lock(&self, abstract_key: &str) -> Arc<Mutex<()>> {
        self.build_locks
            .lock()
            .entry(abstract_key.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

// -- process-wide default container ---------------------------------------

static CURRENT: Lazy<RwLock<Option<Arc<Container>>>> = Lazy::new(|| RwLock::new(None));

/// Install the process-wide default container.
///
/// Transitional seam for call sites that cannot yet take an explicit
/// container reference; new code should thread the container through
/// constructors and factories instead.
pub fn set_current(container: Arc<Container>) {
    *CURRENT.write() = Some(container);
}

/// The process-wide default container, if one has been installed.
pub fn current() -> Option<Arc<Container>> {
    CURRENT.read().clone()
}
