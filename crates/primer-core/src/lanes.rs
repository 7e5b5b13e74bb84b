use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use crate::scope::{Liveness, current_scope};
use crate::{Signal, SubId, signal};

struct Job {
    owner: Option<Liveness>,
    run: Box<dyn FnOnce()>,
}

impl Job {
    fn is_live(&self) -> bool {
        self.owner.as_ref().is_none_or(Liveness::is_alive)
    }
}

/// Queue of non-urgent updates.
///
/// Urgent writes go straight to their signals; work handed to
/// [`Lanes::defer`] waits until the host calls [`Lanes::flush`], typically
/// once per frame after input has been handled. Work deferred inside a
/// scope is dropped unrun if that scope is disposed first.
#[derive(Clone, Default)]
pub struct Lanes {
    queue: Rc<RefCell<VecDeque<Job>>>,
}

impl Lanes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn defer(&self, job: impl FnOnce() + 'static) {
        self.queue.borrow_mut().push_back(Job {
            owner: current_scope().map(|s| s.liveness()),
            run: Box::new(job),
        });
    }

    pub fn has_pending(&self) -> bool {
        self.queue.borrow().iter().any(Job::is_live)
    }

    /// Runs queued work, including work queued while flushing. Returns the
    /// number of jobs run.
    pub fn flush(&self) -> usize {
        let mut ran = 0;
        loop {
            let job = self.queue.borrow_mut().pop_front();
            let Some(job) = job else {
                break;
            };
            if !job.is_live() {
                log::debug!("lanes: dropping work from a disposed scope");
                continue;
            }
            (job.run)();
            ran += 1;
        }
        ran
    }
}

/// Marks state updates as non-urgent.
///
/// `is_pending` stays true from the first `start` until the last started
/// update has been applied by a flush.
#[derive(Clone)]
pub struct Transition {
    lanes: Lanes,
    pending: Signal<bool>,
    generation: Rc<Cell<u64>>,
}

impl Transition {
    pub fn new(lanes: &Lanes) -> Self {
        Self {
            lanes: lanes.clone(),
            pending: signal(false),
            generation: Rc::new(Cell::new(0)),
        }
    }

    pub fn start(&self, update: impl FnOnce() + 'static) {
        let g = self.generation.get() + 1;
        self.generation.set(g);
        self.pending.set(true);

        let pending = self.pending.clone();
        let generation = self.generation.clone();
        self.lanes.defer(move || {
            update();
            if generation.get() == g {
                pending.set(false);
            }
        });
    }

    pub fn is_pending(&self) -> bool {
        self.pending.get()
    }
}

/// A copy of `source` that only catches up when the lanes are flushed.
pub struct Deferred<T: Clone + PartialEq + 'static> {
    source: Signal<T>,
    value: Signal<T>,
    sub: SubId,
}

impl<T: Clone + PartialEq + 'static> Deferred<T> {
    pub fn new(lanes: &Lanes, source: &Signal<T>) -> Self {
        let value = signal(source.get());
        let latest: Rc<RefCell<Option<T>>> = Rc::new(RefCell::new(None));

        let sub = source.subscribe({
            let lanes = lanes.clone();
            let value = value.clone();
            move |v: &T| {
                // Coalesce: only one catch-up job in flight at a time.
                let first = latest.borrow_mut().replace(v.clone()).is_none();
                if first {
                    let latest = latest.clone();
                    let value = value.clone();
                    lanes.defer(move || {
                        let next = latest.borrow_mut().take();
                        if let Some(next) = next {
                            value.set(next);
                        }
                    });
                }
            }
        });

        Self {
            source: source.clone(),
            value,
            sub,
        }
    }

    /// The lagging value.
    pub fn get(&self) -> T {
        self.value.get()
    }

    pub fn signal(&self) -> Signal<T> {
        self.value.clone()
    }

    pub fn is_stale(&self) -> bool {
        self.source.with(|s| self.value.with(|d| s != d))
    }
}

impl<T: Clone + PartialEq + 'static> Drop for Deferred<T> {
    fn drop(&mut self) {
        self.source.unsubscribe(self.sub);
    }
}
