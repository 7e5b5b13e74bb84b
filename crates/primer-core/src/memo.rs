use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Caches a computed value against an explicit dependency list.
///
/// `get` only calls `compute` when `deps` differs from the previous call.
pub struct Memo<D, T> {
    label: &'static str,
    slot: RefCell<Option<(D, T)>>,
    recomputes: Cell<usize>,
}

impl<D: PartialEq, T: Clone> Memo<D, T> {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            slot: RefCell::new(None),
            recomputes: Cell::new(0),
        }
    }

    pub fn get(&self, deps: D, compute: impl FnOnce(&D) -> T) -> T {
        if let Some((last, value)) = self.slot.borrow().as_ref()
            && *last == deps
        {
            return value.clone();
        }

        log::debug!("memo `{}`: recomputing", self.label);
        let value = compute(&deps);
        self.recomputes.set(self.recomputes.get() + 1);
        *self.slot.borrow_mut() = Some((deps, value.clone()));
        value
    }

    /// How many times `compute` has actually run.
    pub fn recompute_count(&self) -> usize {
        self.recomputes.get()
    }

    pub fn invalidate(&self) {
        *self.slot.borrow_mut() = None;
    }
}

/// A shared callback; identity is the `Rc` pointer.
pub type Callback = Rc<dyn Fn()>;

/// Memoizes a callback so its identity only changes when `deps` does.
pub fn memo_callback<D: PartialEq>(
    memo: &Memo<D, Callback>,
    deps: D,
    make: impl FnOnce(&D) -> Callback,
) -> Callback {
    memo.get(deps, make)
}

pub fn same_callback(a: &Callback, b: &Callback) -> bool {
    Rc::ptr_eq(a, b)
}
