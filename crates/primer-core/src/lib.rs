//! # State, Signals, and Effects
//!
//! Primer's reactive core is a handful of explicit pieces rather than an
//! implicit re-render mechanism:
//!
//! - `Signal<T>`: observable, cloneable state cell (`get`, `set`,
//!   `subscribe`).
//! - `derived` / `Memo`: values recomputed from other state, either by
//!   automatic tracking or against an explicit dependency list.
//! - `Scope` / `EffectSlot`: side-effects with cleanup, tied to the lifetime
//!   of whoever owns the scope.
//! - `Context`: shared values passed explicitly instead of read from globals.
//! - `Timers`, `Executor`, `Lanes`: the host loop's timers, async tasks and
//!   non-urgent update queue.
//!
//! ## Signals
//!
//! ```rust
//! use primer_core::*;
//!
//! let count = signal(0);
//! count.set(1);
//! count.update(|v| *v += 1);
//! assert_eq!(count.get(), 2);
//! ```
//!
//! Reads participate in a dependency graph: when you call `get()` inside a
//! `derived` computation, later writes recompute it automatically.
//!
//! ## Effects and cleanup
//!
//! An `EffectSlot` is one effect call-site. It re-runs only when its
//! dependency list changes, runs the previous cleanup first, and runs the
//! last cleanup when its scope is disposed:
//!
//! ```rust
//! use primer_core::*;
//! use std::time::Duration;
//!
//! let clock = ManualClock::new();
//! let timers = Timers::new(std::rc::Rc::new(clock.clone()));
//! let scope = Scope::named("panel");
//!
//! let ticker = scope.run(|| EffectSlot::<()>::new("ticker"));
//! ticker.run((), || {
//!     let handle = timers.set_interval("tick", Duration::from_secs(1), || {});
//!     Some(handle.into_dispose())
//! });
//! assert_eq!(timers.active(), 1);
//!
//! scope.dispose();
//! assert_eq!(timers.active(), 0);
//! ```

pub mod clock;
pub mod context;
pub mod effects;
pub mod executor;
pub mod ids;
pub mod lanes;
pub mod memo;
pub mod prelude;
pub mod reactive;
pub mod scope;
pub mod signal;
pub mod state;
mod tests;

pub use clock::*;
pub use context::*;
pub use effects::*;
pub use executor::*;
pub use ids::*;
pub use lanes::*;
pub use memo::*;
pub use scope::*;
pub use signal::*;
pub use state::*;
