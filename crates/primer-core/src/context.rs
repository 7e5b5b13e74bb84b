use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// Typed bag of shared values handed explicitly to whoever needs them.
///
/// A context is immutable; [`Context::provide`] returns a new context that
/// shadows any value of the same type in the receiver.
///
/// ```rust
/// use primer_core::Context;
///
/// #[derive(Debug, PartialEq)]
/// struct Locale(&'static str);
///
/// let root = Context::new().provide(Locale("en"));
/// let nested = root.provide(Locale("fr"));
/// assert_eq!(*root.get::<Locale>().unwrap(), Locale("en"));
/// assert_eq!(*nested.get::<Locale>().unwrap(), Locale("fr"));
/// ```
#[derive(Clone, Default)]
pub struct Context {
    values: Rc<HashMap<TypeId, Rc<dyn Any>>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn provide<T: 'static>(&self, value: T) -> Self {
        self.provide_rc(Rc::new(value))
    }

    /// Provides an already shared value, e.g. a signal-backed handle.
    pub fn provide_rc<T: 'static>(&self, value: Rc<T>) -> Self {
        let mut values = (*self.values).clone();
        values.insert(TypeId::of::<T>(), value);
        Self {
            values: Rc::new(values),
        }
    }

    pub fn get<T: 'static>(&self) -> Option<Rc<T>> {
        self.values
            .get(&TypeId::of::<T>())
            .cloned()
            .and_then(|v| v.downcast::<T>().ok())
    }

    pub fn get_or_default<T: Default + Clone + 'static>(&self) -> T {
        self.get::<T>().map(|v| (*v).clone()).unwrap_or_default()
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.values.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values.len())
            .finish()
    }
}
