use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use futures::FutureExt;
use futures::future::{AbortHandle, LocalBoxFuture};
use primer_core::{Executor, Signal, Timers, signal};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum FetchError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("no resource at `{0}`")]
    NotFound(String),
}

/// Remote retrieval collaborator: resolves a locator to a decoded JSON body.
pub trait Fetcher {
    fn request(&self, locator: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>>;
}

/// Serves canned responses, optionally after a simulated latency.
#[derive(Clone, Default)]
pub struct FixtureFetcher {
    responses: Rc<RefCell<HashMap<String, Result<Value, FetchError>>>>,
    latency: Option<(Timers, Duration)>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, timers: &Timers, latency: Duration) -> Self {
        self.latency = Some((timers.clone(), latency));
        self
    }

    pub fn insert(&self, locator: impl Into<String>, body: Value) {
        self.responses.borrow_mut().insert(locator.into(), Ok(body));
    }

    pub fn fail(&self, locator: impl Into<String>, error: FetchError) {
        self.responses.borrow_mut().insert(locator.into(), Err(error));
    }
}

impl Fetcher for FixtureFetcher {
    fn request(&self, locator: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
        let response = self
            .responses
            .borrow()
            .get(locator)
            .cloned()
            .unwrap_or_else(|| Err(FetchError::NotFound(locator.to_string())));

        match &self.latency {
            Some((timers, latency)) => {
                let sleep = timers.sleep(*latency);
                async move {
                    sleep.await;
                    response
                }
                .boxed_local()
            }
            None => futures::future::ready(response).boxed_local(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }
}

/// Retrieves `locator` through a [`Fetcher`] and exposes `{ data, loading, error }`.
///
/// A retrieval starts on construction and again on every locator change.
/// Each retrieval carries its own liveness flag: changing the locator or
/// dropping the binder clears it, and a result that arrives with the flag
/// cleared is discarded. The superseded request itself is aborted, as is any
/// request still running when the scope the binder was used in is disposed.
pub struct FetchBinder<T: 'static> {
    state: Signal<FetchState<T>>,
    locator: RefCell<String>,
    live: RefCell<Rc<Cell<bool>>>,
    in_flight: RefCell<Option<AbortHandle>>,
    fetcher: Rc<dyn Fetcher>,
    executor: Executor,
    requests: Cell<u64>,
}

impl<T: DeserializeOwned + Clone + 'static> FetchBinder<T> {
    pub fn new(locator: impl Into<String>, fetcher: Rc<dyn Fetcher>, executor: &Executor) -> Self {
        let binder = Self {
            state: signal(FetchState::loading()),
            locator: RefCell::new(locator.into()),
            live: RefCell::new(Rc::new(Cell::new(false))),
            in_flight: RefCell::new(None),
            fetcher,
            executor: executor.clone(),
            requests: Cell::new(0),
        };
        binder.start();
        binder
    }

    /// Starts a new retrieval if `locator` differs from the current one.
    pub fn set_locator(&self, locator: impl Into<String>) {
        let locator = locator.into();
        if *self.locator.borrow() == locator {
            return;
        }
        *self.locator.borrow_mut() = locator;
        self.start();
    }

    /// Retrieves the current locator again.
    pub fn refetch(&self) {
        self.start();
    }

    pub fn locator(&self) -> String {
        self.locator.borrow().clone()
    }

    pub fn state(&self) -> FetchState<T> {
        self.state.get()
    }

    pub fn data(&self) -> Option<T> {
        self.state.with(|s| s.data.clone())
    }

    pub fn loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    pub fn signal(&self) -> Signal<FetchState<T>> {
        self.state.clone()
    }

    /// Number of retrievals started so far.
    pub fn requests(&self) -> u64 {
        self.requests.get()
    }

    fn start(&self) {
        let live = Rc::new(Cell::new(true));
        self.live.replace(live.clone()).set(false);
        if let Some(old) = self.in_flight.take() {
            old.abort();
        }
        self.requests.set(self.requests.get() + 1);
        self.state.set(FetchState::loading());

        let locator = self.locator();
        log::debug!("fetch: requesting `{locator}`");
        let request = self.fetcher.request(&locator);
        let state = self.state.clone();

        let handle = self.executor.spawn_scoped(async move {
            let result = request.await.and_then(|body| {
                serde_json::from_value::<T>(body).map_err(|e| FetchError::Decode(e.to_string()))
            });
            if !live.get() {
                log::debug!("fetch: discarding stale response for `{locator}`");
                return;
            }
            state.set(match result {
                Ok(data) => FetchState {
                    data: Some(data),
                    loading: false,
                    error: None,
                },
                Err(e) => {
                    log::info!("fetch: `{locator}` failed: {e}");
                    FetchState {
                        data: None,
                        loading: false,
                        error: Some(e.to_string()),
                    }
                }
            });
        });
        *self.in_flight.borrow_mut() = Some(handle);
    }
}

impl<T: 'static> Drop for FetchBinder<T> {
    fn drop(&mut self) {
        self.live.borrow().set(false);
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::channel::oneshot;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Clone, Debug, PartialEq, Deserialize)]
    struct User {
        name: String,
        email: String,
    }

    /// Fetcher whose responses are released by hand, in any order.
    #[derive(Default)]
    struct Gated {
        senders: RefCell<HashMap<String, oneshot::Sender<Result<Value, FetchError>>>>,
    }

    impl Gated {
        /// Returns false if the request was already dropped.
        fn resolve(&self, locator: &str, body: Result<Value, FetchError>) -> bool {
            let tx = self.senders.borrow_mut().remove(locator).unwrap();
            tx.send(body).is_ok()
        }
    }

    impl Fetcher for Gated {
        fn request(&self, locator: &str) -> LocalBoxFuture<'static, Result<Value, FetchError>> {
            let (tx, rx) = oneshot::channel();
            self.senders.borrow_mut().insert(locator.to_string(), tx);
            rx.map(|r| r.unwrap_or_else(|_| Err(FetchError::Transport("dropped".into()))))
                .boxed_local()
        }
    }

    fn user_json(name: &str) -> Value {
        json!({ "name": name, "email": format!("{name}@example.com") })
    }

    #[test]
    fn loads_fixture_data() {
        let exec = Executor::new();
        let fetcher = FixtureFetcher::new();
        fetcher.insert("/users/1", user_json("leanne"));

        let binder: FetchBinder<User> = FetchBinder::new("/users/1", Rc::new(fetcher), &exec);
        assert!(binder.loading());
        assert_eq!(binder.data(), None);

        exec.run_until_stalled();
        let state = binder.state();
        assert!(!state.loading);
        assert_eq!(state.data.unwrap().name, "leanne");
        assert_eq!(state.error, None);
    }

    #[test]
    fn transport_failure_surfaces_as_error() {
        let exec = Executor::new();
        let fetcher = FixtureFetcher::new();
        fetcher.fail("/down", FetchError::Transport("connection refused".into()));

        let binder: FetchBinder<User> = FetchBinder::new("/down", Rc::new(fetcher), &exec);
        exec.run_until_stalled();

        assert!(!binder.loading());
        assert_eq!(binder.data(), None);
        assert_eq!(
            binder.error().as_deref(),
            Some("transport error: connection refused")
        );
        assert_eq!(binder.requests(), 1);
    }

    #[test]
    fn decode_failure_surfaces_as_error() {
        let exec = Executor::new();
        let fetcher = FixtureFetcher::new();
        fetcher.insert("/users/1", json!({ "unexpected": true }));

        let binder: FetchBinder<User> = FetchBinder::new("/users/1", Rc::new(fetcher), &exec);
        exec.run_until_stalled();
        let error = binder.error().unwrap();
        assert!(error.starts_with("failed to decode response"), "{error}");
    }

    #[test]
    fn unknown_locator_is_not_found() {
        let exec = Executor::new();
        let binder: FetchBinder<User> =
            FetchBinder::new("/nowhere", Rc::new(FixtureFetcher::new()), &exec);
        exec.run_until_stalled();
        assert_eq!(binder.error().as_deref(), Some("no resource at `/nowhere`"));
    }

    #[test]
    fn stale_result_after_locator_change_is_discarded() {
        let exec = Executor::new();
        let gated = Rc::new(Gated::default());

        let binder: FetchBinder<User> = FetchBinder::new("/a", gated.clone(), &exec);
        exec.run_until_stalled();
        assert!(binder.loading());

        binder.set_locator("/b");
        exec.run_until_stalled();
        assert!(binder.loading());

        // the superseded request was aborted and dropped
        assert!(!gated.resolve("/a", Ok(user_json("alpha"))));
        exec.run_until_stalled();
        assert!(binder.loading());
        assert_eq!(binder.data(), None);
        assert_eq!(exec.in_flight(), 1);

        assert!(gated.resolve("/b", Ok(user_json("bravo"))));
        exec.run_until_stalled();
        assert!(!binder.loading());
        assert_eq!(binder.data().unwrap().name, "bravo");
    }

    #[test]
    fn result_after_drop_is_discarded() {
        let exec = Executor::new();
        let gated = Rc::new(Gated::default());
        let binder: FetchBinder<User> = FetchBinder::new("/a", gated.clone(), &exec);
        let state = binder.signal();
        exec.run_until_stalled();

        drop(binder);
        gated.resolve("/a", Ok(user_json("alpha")));
        exec.run_until_stalled();
        assert!(state.get().loading);
        assert_eq!(exec.in_flight(), 0);
    }

    #[test]
    fn same_locator_does_not_refetch() {
        let exec = Executor::new();
        let fetcher = FixtureFetcher::new();
        fetcher.insert("/a", user_json("a"));
        let binder: FetchBinder<User> = FetchBinder::new("/a", Rc::new(fetcher), &exec);
        binder.set_locator("/a");
        assert_eq!(binder.requests(), 1);
        binder.refetch();
        assert_eq!(binder.requests(), 2);
    }

    #[test]
    fn fixture_latency_waits_for_timers() {
        let clock = primer_core::ManualClock::new();
        let timers = Timers::new(Rc::new(clock.clone()));
        let exec = Executor::new();
        let fetcher = FixtureFetcher::new().with_latency(&timers, Duration::from_millis(300));
        fetcher.insert("/a", user_json("a"));

        let binder: FetchBinder<User> = FetchBinder::new("/a", Rc::new(fetcher), &exec);
        exec.run_until_stalled();
        assert!(binder.loading());

        clock.advance(Duration::from_millis(300));
        timers.poll();
        exec.run_until_stalled();
        assert!(!binder.loading());
    }
}
