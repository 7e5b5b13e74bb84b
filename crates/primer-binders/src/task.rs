use std::cell::Cell;
use std::fmt::Display;
use std::future::Future;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use primer_core::{Executor, Signal, signal};

#[derive(Clone, Debug, PartialEq)]
pub enum TaskStatus<T> {
    Idle,
    Pending,
    Success(T),
    Error(String),
}

impl<T> TaskStatus<T> {
    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Idle => "idle",
            TaskStatus::Pending => "pending",
            TaskStatus::Success(_) => "success",
            TaskStatus::Error(_) => "error",
        }
    }
}

type Operation<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<T, String>>>;

/// Runs a zero-argument async operation and tracks its outcome.
///
/// `execute` may be called from any state and always moves to `Pending`.
/// Overlapping executions are not serialized or cancelled: every execution
/// applies its own result when it completes, so the last one to finish wins.
/// Callers that need "latest request wins" must avoid overlapping calls.
/// Executions started inside a scope are aborted when it is disposed.
pub struct AsyncTask<T: 'static> {
    status: Signal<TaskStatus<T>>,
    op: Operation<T>,
    executor: Executor,
    executions: Rc<Cell<u64>>,
}

impl<T: 'static> Clone for AsyncTask<T> {
    fn clone(&self) -> Self {
        Self {
            status: self.status.clone(),
            op: self.op.clone(),
            executor: self.executor.clone(),
            executions: self.executions.clone(),
        }
    }
}

impl<T: Clone + 'static> AsyncTask<T> {
    pub fn new<F, Fut, E>(executor: &Executor, op: F, immediate: bool) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = Result<T, E>> + 'static,
        E: Display,
    {
        let op: Operation<T> = Rc::new(move || {
            let fut = op();
            async move { fut.await.map_err(|e| e.to_string()) }.boxed_local()
        });
        let task = Self {
            status: signal(TaskStatus::Idle),
            op,
            executor: executor.clone(),
            executions: Rc::new(Cell::new(0)),
        };
        if immediate {
            task.execute();
        }
        task
    }

    pub fn execute(&self) {
        self.executions.set(self.executions.get() + 1);
        self.status.set(TaskStatus::Pending);

        let fut = (self.op)();
        let status = self.status.clone();
        self.executor.spawn_scoped(async move {
            let next = match fut.await {
                Ok(v) => TaskStatus::Success(v),
                Err(reason) => {
                    log::info!("async task failed: {reason}");
                    TaskStatus::Error(reason)
                }
            };
            status.set(next);
        });
    }

    pub fn status(&self) -> TaskStatus<T> {
        self.status.get()
    }

    pub fn is_pending(&self) -> bool {
        self.status.with(|s| matches!(s, TaskStatus::Pending))
    }

    pub fn executions(&self) -> u64 {
        self.executions.get()
    }

    pub fn signal(&self) -> Signal<TaskStatus<T>> {
        self.status.clone()
    }
}
