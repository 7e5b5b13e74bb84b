//! Binders: small reusable abstractions that package a [`primer_core::Signal`]
//! with a fixed set of operations for one recurring UI concern.
//!
//! | Binder | Concern |
//! |---|---|
//! | [`FormBinder`] | field-by-field form state with reset |
//! | [`FetchBinder`] | remote retrieval with loading/error and stale-result discard |
//! | [`Persisted`] | a value mirrored into a [`KeyValueStore`] |
//! | [`Toggle`] | a boolean flip |
//! | [`AsyncTask`] | idle / pending / success / error runner |
//!
//! The to-do reducer in [`todo`] is the pure state machine behind the reducer
//! demo.

pub mod fetch;
pub mod form;
pub mod persisted;
pub mod storage;
pub mod task;
pub mod todo;
pub mod toggle;

pub use fetch::{FetchBinder, FetchError, FetchState, Fetcher, FixtureFetcher};
pub use form::{FieldKind, FieldSet, FieldValue, FormBinder};
pub use persisted::Persisted;
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError, decode, encode};
pub use task::{AsyncTask, TaskStatus};
pub use todo::{TodoAction, TodoId, TodoItem, TodoList, TodoReducer};
pub use toggle::Toggle;
