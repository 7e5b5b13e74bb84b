use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{self, Poll};
use std::time::Duration;

use futures::FutureExt;
use futures::channel::oneshot;
use slotmap::{SlotMap, new_key_type};
use web_time::Instant;

use crate::Dispose;

pub trait Clock: 'static {
    /// Time elapsed since the clock's origin.
    fn now(&self) -> Duration;
}

pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}

/// A clock you drive by hand. Clones share the same time.
#[derive(Clone, Default)]
pub struct ManualClock {
    t: Rc<Cell<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, by: Duration) {
        self.t.set(self.t.get() + by);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.t.get()
    }
}

new_key_type! {
    pub struct TimerKey;
}

enum Job {
    Once(Box<dyn FnOnce()>),
    Every(Duration, Rc<dyn Fn()>),
}

struct Timer {
    label: &'static str,
    due: Duration,
    seq: u64,
    job: Job,
}

struct TimersInner {
    clock: Rc<dyn Clock>,
    timers: RefCell<SlotMap<TimerKey, Timer>>,
    seq: Cell<u64>,
}

/// Timeout and interval registry driven by [`Timers::poll`].
///
/// Callbacks run on the polling thread, in due order. A cancelled timer never
/// fires again.
#[derive(Clone)]
pub struct Timers {
    inner: Rc<TimersInner>,
}

/// Cancels its timer on [`TimerHandle::cancel`]; dropping the handle does not.
#[derive(Clone)]
pub struct TimerHandle {
    key: TimerKey,
    timers: Weak<TimersInner>,
}

/// Future returned by [`Timers::sleep`].
pub struct Sleep {
    rx: oneshot::Receiver<()>,
    handle: TimerHandle,
}

impl Future for Sleep {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut task::Context<'_>) -> Poll<()> {
        self.rx.poll_unpin(cx).map(|_| ())
    }
}

impl Drop for Sleep {
    fn drop(&mut self) {
        self.handle.cancel();
    }
}

const MIN_PERIOD: Duration = Duration::from_millis(1);

impl Timers {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            inner: Rc::new(TimersInner {
                clock,
                timers: RefCell::new(SlotMap::with_key()),
                seq: Cell::new(0),
            }),
        }
    }

    pub fn now(&self) -> Duration {
        self.inner.clock.now()
    }

    pub fn set_timeout(
        &self,
        label: &'static str,
        delay: Duration,
        f: impl FnOnce() + 'static,
    ) -> TimerHandle {
        self.insert(label, delay, Job::Once(Box::new(f)))
    }

    pub fn set_interval(
        &self,
        label: &'static str,
        period: Duration,
        f: impl Fn() + 'static,
    ) -> TimerHandle {
        let period = period.max(MIN_PERIOD);
        self.insert(label, period, Job::Every(period, Rc::new(f)))
    }

    /// Resolves once `delay` has elapsed on this registry's clock. Dropping
    /// the future before then cancels the timeout.
    pub fn sleep(&self, delay: Duration) -> Sleep {
        let (tx, rx) = oneshot::channel::<()>();
        let handle = self.set_timeout("sleep", delay, move || {
            let _ = tx.send(());
        });
        Sleep { rx, handle }
    }

    pub fn active(&self) -> usize {
        self.inner.timers.borrow().len()
    }

    /// Fires every timer that is due. Returns how many callbacks ran.
    pub fn poll(&self) -> usize {
        let now = self.now();
        let mut fired = 0;
        while let Some(job) = self.take_due(now) {
            match job {
                Job::Once(f) => f(),
                Job::Every(_, f) => f(),
            }
            fired += 1;
        }
        fired
    }

    fn insert(&self, label: &'static str, delay: Duration, job: Job) -> TimerHandle {
        let seq = self.inner.seq.get();
        self.inner.seq.set(seq + 1);
        let due = self.now() + delay;
        let key = self.inner.timers.borrow_mut().insert(Timer {
            label,
            due,
            seq,
            job,
        });
        log::debug!("timer `{label}` scheduled in {delay:?}");
        TimerHandle {
            key,
            timers: Rc::downgrade(&self.inner),
        }
    }

    fn take_due(&self, now: Duration) -> Option<Job> {
        let mut timers = self.inner.timers.borrow_mut();
        let key = timers
            .iter()
            .filter(|(_, t)| t.due <= now)
            .min_by_key(|(_, t)| (t.due, t.seq))
            .map(|(k, _)| k)?;

        let repeat = match &timers[key].job {
            Job::Every(period, f) => Some((*period, f.clone())),
            Job::Once(_) => None,
        };
        match repeat {
            Some((period, f)) => {
                let timer = &mut timers[key];
                timer.due += period;
                Some(Job::Every(period, f))
            }
            None => timers.remove(key).map(|t| {
                log::debug!("timer `{}` fired", t.label);
                t.job
            }),
        }
    }
}

impl TimerHandle {
    /// Returns false if the timer already fired (timeouts) or was cancelled.
    pub fn cancel(&self) -> bool {
        let Some(timers) = self.timers.upgrade() else {
            return false;
        };
        let removed = timers.timers.borrow_mut().remove(self.key);
        if let Some(t) = &removed {
            log::debug!("timer `{}` cancelled", t.label);
        }
        removed.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.timers
            .upgrade()
            .is_some_and(|t| t.timers.borrow().contains_key(self.key))
    }

    pub fn into_dispose(self) -> Dispose {
        Dispose::new(move || {
            self.cancel();
        })
    }
}

