use std::cell::{Cell, RefCell};
use std::future::Future;
use std::rc::Rc;

use futures::executor::{LocalPool, LocalSpawner};
use futures::future::{AbortHandle, Abortable};
use futures::task::LocalSpawnExt;

use crate::scope::current_scope;

/// Single-threaded cooperative executor.
///
/// Tasks only make progress inside [`Executor::run_until_stalled`], which the
/// host loop (or a test) calls after feeding in external events.
#[derive(Clone)]
pub struct Executor {
    pool: Rc<RefCell<LocalPool>>,
    spawner: LocalSpawner,
    in_flight: Rc<Cell<usize>>,
}

impl Executor {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            pool: Rc::new(RefCell::new(pool)),
            spawner,
            in_flight: Rc::new(Cell::new(0)),
        }
    }

    /// Spawns `fut`. Aborting the returned handle drops the future the next
    /// time the pool runs.
    pub fn spawn(&self, fut: impl Future<Output = ()> + 'static) -> AbortHandle {
        let (handle, registration) = AbortHandle::new_pair();
        let in_flight = self.in_flight.clone();
        in_flight.set(in_flight.get() + 1);
        let task = async move {
            if Abortable::new(fut, registration).await.is_err() {
                log::debug!("executor: task aborted");
            }
            in_flight.set(in_flight.get() - 1);
        };
        if let Err(e) = self.spawner.spawn_local(task) {
            self.in_flight.set(self.in_flight.get().saturating_sub(1));
            log::error!("executor: failed to spawn task: {e}");
        }
        handle
    }

    /// Like [`Executor::spawn`], but the task is also aborted when the
    /// current scope (if any) is disposed.
    pub fn spawn_scoped(&self, fut: impl Future<Output = ()> + 'static) -> AbortHandle {
        let handle = self.spawn(fut);
        if let Some(scope) = current_scope() {
            let abort = handle.clone();
            scope.add_disposer(move || abort.abort());
        }
        handle
    }

    /// Polls every task until none can make progress.
    pub fn run_until_stalled(&self) {
        match self.pool.try_borrow_mut() {
            Ok(mut pool) => pool.run_until_stalled(),
            Err(_) => log::warn!("executor: run_until_stalled called from inside a task; ignored"),
        }
    }

    /// Tasks spawned but not yet finished.
    pub fn in_flight(&self) -> usize {
        self.in_flight.get()
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}
