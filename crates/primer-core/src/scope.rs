use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use smallvec::SmallVec;

thread_local! {
    static CURRENT_SCOPE: RefCell<Option<Weak<ScopeInner>>> = const { RefCell::new(None) };
}

/// Lifetime of one mounted panel (or any other owner of effects).
///
/// Everything registered through [`Scope::add_disposer`] runs exactly once,
/// either on [`Scope::dispose`] or when the last handle is dropped.
pub struct Scope {
    inner: Rc<ScopeInner>,
}

struct ScopeInner {
    label: String,
    alive: Rc<Cell<bool>>,
    disposers: RefCell<SmallVec<[Box<dyn FnOnce()>; 4]>>,
    children: RefCell<Vec<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Self::named("scope")
    }

    pub fn named(label: impl Into<String>) -> Self {
        Self {
            inner: Rc::new(ScopeInner {
                label: label.into(),
                alive: Rc::new(Cell::new(true)),
                disposers: RefCell::new(SmallVec::new()),
                children: RefCell::new(Vec::new()),
            }),
        }
    }

    pub fn label(&self) -> &str {
        &self.inner.label
    }

    pub fn run<R>(&self, f: impl FnOnce() -> R) -> R {
        let prev = CURRENT_SCOPE.with(|current| {
            current
                .borrow_mut()
                .replace(Rc::downgrade(&self.inner))
        });
        let result = f();
        CURRENT_SCOPE.with(|current| *current.borrow_mut() = prev);
        result
    }

    /// A flag that outlives the scope and reads false once it is released.
    pub fn liveness(&self) -> Liveness {
        Liveness(self.inner.alive.clone())
    }

    pub fn add_disposer(&self, disposer: impl FnOnce() + 'static) {
        self.inner.disposers.borrow_mut().push(Box::new(disposer));
    }

    pub fn disposer_count(&self) -> usize {
        self.inner.disposers.borrow().len()
    }

    pub fn child(&self, label: impl Into<String>) -> Scope {
        let child = Scope::named(label);
        self.inner.children.borrow_mut().push(child.clone());
        child
    }

    pub fn dispose(self) {
        log::debug!("disposing scope `{}`", self.inner.label);
        self.inner.release();
    }
}

impl ScopeInner {
    fn release(&self) {
        self.alive.set(false);

        // Dispose children first
        let children = std::mem::take(&mut *self.children.borrow_mut());
        for child in children {
            child.dispose();
        }

        // Run disposers, most recent first
        let disposers = std::mem::take(&mut *self.disposers.borrow_mut());
        for disposer in disposers.into_iter().rev() {
            disposer();
        }
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Scope {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

/// See [`Scope::liveness`].
#[derive(Clone, Debug)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn is_alive(&self) -> bool {
        self.0.get()
    }
}

pub fn current_scope() -> Option<Scope> {
    CURRENT_SCOPE.with(|current| {
        current
            .borrow()
            .as_ref()
            .and_then(|weak| weak.upgrade().map(|inner| Scope { inner }))
    })
}

impl Drop for ScopeInner {
    fn drop(&mut self) {
        self.release();
    }
}
