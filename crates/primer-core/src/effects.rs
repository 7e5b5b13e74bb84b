use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::scope::{Scope, current_scope};

#[derive(Clone)]
pub struct Dispose(Rc<RefCell<Option<Box<dyn FnOnce()>>>>);

impl Dispose {
    pub fn new(f: impl FnOnce() + 'static) -> Self {
        Self(Rc::new(RefCell::new(Some(Box::new(f)))))
    }

    /// Runs at most once (safe to call multiple times).
    pub fn run(&self) {
        let f = self.0.borrow_mut().take();
        if let Some(f) = f {
            f()
        }
    }

    pub fn is_spent(&self) -> bool {
        self.0.borrow().is_none()
    }
}

/// Runs `f()` immediately and returns its `Dispose`.
///
/// The cleanup is also registered in the current scope, if any, so it runs on
/// teardown even when the caller drops the returned guard.
pub fn effect<F>(f: F) -> Dispose
where
    F: FnOnce() -> Dispose + 'static,
{
    let d = f();

    if let Some(scope) = current_scope() {
        let d2 = d.clone();
        scope.add_disposer(move || d2.run());
    }

    d
}

/// Helper to register cleanup inside effect.
pub fn on_unmount(f: impl FnOnce() + 'static) -> Dispose {
    Dispose::new(f)
}

/// One effect call-site with a dependency list.
///
/// [`EffectSlot::run`] re-runs the effect only when `deps` changed, running
/// the previous cleanup first. The last cleanup runs when the owning scope is
/// torn down.
pub struct EffectSlot<D: 'static> {
    inner: Rc<SlotInner<D>>,
}

struct SlotInner<D> {
    label: &'static str,
    last: RefCell<Option<D>>,
    cleanup: RefCell<Option<Dispose>>,
    runs: Cell<usize>,
}

impl<D> SlotInner<D> {
    fn clean(&self) {
        let d = self.cleanup.borrow_mut().take();
        if let Some(d) = d {
            log::debug!("effect `{}`: cleanup", self.label);
            d.run();
        }
    }

    fn fire(&self, effect: impl FnOnce() -> Option<Dispose>) {
        self.clean();
        log::debug!("effect `{}`: run", self.label);
        self.runs.set(self.runs.get() + 1);
        let d = effect();
        *self.cleanup.borrow_mut() = d;
    }
}

impl<D: PartialEq + 'static> EffectSlot<D> {
    /// Creates a slot bound to the current scope (if one is active).
    pub fn new(label: &'static str) -> Self {
        let slot = Self::detached(label);
        if let Some(scope) = current_scope() {
            slot.bind(&scope);
        }
        slot
    }

    pub fn in_scope(scope: &Scope, label: &'static str) -> Self {
        let slot = Self::detached(label);
        slot.bind(scope);
        slot
    }

    fn detached(label: &'static str) -> Self {
        Self {
            inner: Rc::new(SlotInner {
                label,
                last: RefCell::new(None),
                cleanup: RefCell::new(None),
                runs: Cell::new(0),
            }),
        }
    }

    fn bind(&self, scope: &Scope) {
        let inner = self.inner.clone();
        scope.add_disposer(move || inner.clean());
    }

    /// Runs `effect` if `deps` differs from the last run. Returns whether it ran.
    pub fn run(&self, deps: D, effect: impl FnOnce() -> Option<Dispose>) -> bool {
        if self.inner.last.borrow().as_ref() == Some(&deps) {
            return false;
        }
        *self.inner.last.borrow_mut() = Some(deps);
        self.inner.fire(effect);
        true
    }

    /// Runs `effect` unconditionally (an effect without a dependency list).
    pub fn run_always(&self, effect: impl FnOnce() -> Option<Dispose>) {
        self.inner.fire(effect);
    }

    pub fn run_count(&self) -> usize {
        self.inner.runs.get()
    }

    /// Runs the pending cleanup now; the next `run` fires regardless of deps.
    pub fn dispose(&self) {
        self.inner.clean();
        *self.inner.last.borrow_mut() = None;
    }
}
