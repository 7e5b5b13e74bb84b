use std::cell::{OnceCell, RefCell};
use std::rc::Rc;

use crate::reactive::{self, ObserverId};
use crate::{Signal, signal};

/// A value recomputed whenever any signal it read last time changes.
///
/// ```rust
/// use primer_core::*;
///
/// let first = signal("Jane".to_string());
/// let last = signal("Doe".to_string());
///
/// let full = derived({
///     let first = first.clone();
///     let last = last.clone();
///     move || format!("{} {}", first.get(), last.get())
/// });
/// assert_eq!(full.get(), "Jane Doe");
///
/// last.set("Smith".into());
/// assert_eq!(full.get(), "Jane Smith");
/// ```
pub struct Derived<T: 'static> {
    out: Signal<T>,
    _observer: Rc<ObserverGuard>,
}

struct ObserverGuard(ObserverId);

impl Drop for ObserverGuard {
    fn drop(&mut self) {
        reactive::remove_observer(self.0);
    }
}

impl<T> Clone for Derived<T> {
    fn clone(&self) -> Self {
        Self {
            out: self.out.clone(),
            _observer: self._observer.clone(),
        }
    }
}

impl<T: Clone + 'static> Derived<T> {
    pub fn get(&self) -> T {
        self.out.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.out.with(f)
    }

    /// Output signal, e.g. to subscribe to recomputations.
    pub fn signal(&self) -> Signal<T> {
        self.out.clone()
    }
}

pub fn derived<T: Clone + 'static>(compute: impl Fn() -> T + 'static) -> Derived<T> {
    let compute: Rc<dyn Fn() -> T> = Rc::new(compute);
    let cell: Rc<OnceCell<Signal<T>>> = Rc::new(OnceCell::new());

    let obs = reactive::new_observer({
        let compute = compute.clone();
        let cell = cell.clone();
        move || {
            if let Some(out) = cell.get() {
                out.set(compute());
            }
        }
    });

    // Initial compute under tracking to establish dependencies
    let initial = reactive::track(obs, || compute());
    let out = signal(initial);
    let _ = cell.set(out.clone());

    Derived {
        out,
        _observer: Rc::new(ObserverGuard(obs)),
    }
}

/// Mutable box that survives re-renders and never notifies anyone when written.
pub struct MutRef<T>(Rc<RefCell<T>>);

impl<T> Clone for MutRef<T> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<T> MutRef<T> {
    pub fn new(value: T) -> Self {
        Self(Rc::new(RefCell::new(value)))
    }

    pub fn get(&self) -> T
    where
        T: Clone,
    {
        self.0.borrow().clone()
    }

    pub fn set(&self, value: T) {
        *self.0.borrow_mut() = value;
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.0.borrow())
    }

    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl<T: Default> Default for MutRef<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Pure state transition function.
pub trait Reducer: 'static {
    type State: Clone;
    type Action;

    fn reduce(state: &Self::State, action: Self::Action) -> Self::State;
}

/// Holds a reducer's state in a signal and applies dispatched actions to it.
pub struct Store<R: Reducer> {
    state: Signal<R::State>,
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<R: Reducer> Store<R> {
    pub fn new(initial: R::State) -> Self {
        Self {
            state: signal(initial),
        }
    }

    pub fn dispatch(&self, action: R::Action) {
        let next = reactive::untracked(|| self.state.with(|s| R::reduce(s, action)));
        self.state.set(next);
    }

    pub fn state(&self) -> R::State {
        self.state.get()
    }

    pub fn with<T>(&self, f: impl FnOnce(&R::State) -> T) -> T {
        self.state.with(f)
    }

    pub fn signal(&self) -> Signal<R::State> {
        self.state.clone()
    }
}
