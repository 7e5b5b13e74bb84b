use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use primer_binders::{FileStore, Fetcher, FixtureFetcher, KeyValueStore, MemoryStore};
use primer_core::{Clock, Context, Executor, IdGenerator, Lanes, Timers};

use crate::config::Config;
use crate::theme::{ThemeMode, UserSession};

/// Everything a panel may reach for, passed in explicitly at mount time.
#[derive(Clone)]
pub struct PanelEnv {
    pub store: Arc<dyn KeyValueStore>,
    pub fetcher: Rc<dyn Fetcher>,
    pub executor: Executor,
    pub timers: Timers,
    pub lanes: Lanes,
    pub ids: IdGenerator,
    /// Carries the configured [`ThemeMode`] and [`UserSession`].
    pub context: Context,
}

impl PanelEnv {
    pub fn from_config(config: &Config, clock: Rc<dyn Clock>) -> PanelEnv {
        let timers = Timers::new(clock);

        let store: Arc<dyn KeyValueStore> = match &config.storage_dir {
            Some(dir) => Arc::new(FileStore::new(dir)),
            None => Arc::new(MemoryStore::new()),
        };

        let mut fetcher = FixtureFetcher::new();
        if config.fetch_latency_ms > 0 {
            fetcher = fetcher.with_latency(&timers, Duration::from_millis(config.fetch_latency_ms));
        }
        for (locator, body) in config.all_fixtures() {
            fetcher.insert(locator, body);
        }

        let context = Context::new()
            .provide(config.theme)
            .provide(config.user.clone());

        PanelEnv {
            store,
            fetcher: Rc::new(fetcher),
            executor: Executor::new(),
            timers,
            lanes: Lanes::new(),
            ids: IdGenerator::new("p"),
            context,
        }
    }

    pub fn theme(&self) -> ThemeMode {
        self.context.get_or_default::<ThemeMode>()
    }

    pub fn user(&self) -> UserSession {
        self.context.get_or_default::<UserSession>()
    }

    /// Fires due timers, drives spawned tasks and flushes deferred work until
    /// nothing is left to do. Returns how many timer and lane jobs ran.
    pub fn pump(&self) -> usize {
        let mut total = 0;
        loop {
            let fired = self.timers.poll();
            self.executor.run_until_stalled();
            let flushed = self.lanes.flush();
            self.executor.run_until_stalled();
            if fired + flushed == 0 {
                break;
            }
            total += fired + flushed;
        }
        total
    }
}
