//! To-do list reducer.
//!
//! The collection itself is the state. Every transition returns a new
//! [`TodoList`]; items are never modified in place.

use std::collections::HashSet;
use std::fmt;

use primer_core::Reducer;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TodoId(pub u64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoItem {
    pub id: TodoId,
    pub title: String,
    pub likes: u32,
    pub completed: bool,
}

impl TodoItem {
    pub fn new(id: u64, title: impl Into<String>, likes: u32) -> Self {
        Self {
            id: TodoId(id),
            title: title.into(),
            likes,
            completed: false,
        }
    }
}

/// Items plus the id the next `Add` will use.
///
/// Ids come from a counter that only moves forward, so an id is never handed
/// out twice for the same list, not even after `Clear`. Once `u64::MAX` has
/// been handed out the counter is exhausted and `Add` is ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TodoList {
    items: Vec<TodoItem>,
    /// `None` once the id space is used up.
    next_id: Option<u64>,
}

impl Default for TodoList {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            next_id: Some(1),
        }
    }
}

impl TodoList {
    /// Builds a list from caller-supplied items. Later duplicates of an id
    /// are dropped.
    pub fn seeded(items: impl IntoIterator<Item = TodoItem>) -> Self {
        let mut seen = HashSet::new();
        let items: Vec<TodoItem> = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id);
                if !fresh {
                    log::warn!("todo: dropping duplicate seed id {}", item.id);
                }
                fresh
            })
            .collect();
        let next_id = items
            .iter()
            .map(|i| i.id.0)
            .max()
            .map_or(Some(1), |max| max.checked_add(1));
        Self { items, next_id }
    }

    pub fn items(&self) -> &[TodoItem] {
        &self.items
    }

    pub fn get(&self, id: TodoId) -> Option<&TodoItem> {
        self.items.iter().find(|i| i.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TodoAction {
    Add(String),
    Remove(TodoId),
    Clear,
    IncrementLikes(TodoId),
    /// An action tag the reducer does not know; leaves state unchanged.
    Unknown(String),
}

impl TodoAction {
    /// Maps a textual action (`ADD`, `REMOVE`, `CLEAR`, `INCREMENT_LIKES`,
    /// case-insensitive) and its payload onto an action.
    pub fn parse(tag: &str, payload: Option<&str>) -> TodoAction {
        let id = || payload.and_then(|p| p.trim().parse::<u64>().ok()).map(TodoId);
        match (tag.to_ascii_uppercase().as_str(), payload) {
            ("ADD", Some(title)) => TodoAction::Add(title.to_string()),
            ("CLEAR", _) => TodoAction::Clear,
            ("REMOVE", _) => id().map_or_else(|| TodoAction::Unknown(tag.into()), TodoAction::Remove),
            ("INCREMENT_LIKES", _) => id()
                .map_or_else(|| TodoAction::Unknown(tag.into()), TodoAction::IncrementLikes),
            _ => TodoAction::Unknown(tag.to_string()),
        }
    }
}

pub struct TodoReducer;

impl Reducer for TodoReducer {
    type State = TodoList;
    type Action = TodoAction;

    fn reduce(state: &TodoList, action: TodoAction) -> TodoList {
        match action {
            TodoAction::Add(title) => {
                let Some(id) = state.next_id else {
                    log::warn!("todo: id space exhausted, ignoring add of {title:?}");
                    return state.clone();
                };
                let mut items = state.items.clone();
                items.push(TodoItem::new(id, title, 0));
                TodoList {
                    items,
                    next_id: id.checked_add(1),
                }
            }
            TodoAction::Remove(id) => TodoList {
                items: state.items.iter().filter(|i| i.id != id).cloned().collect(),
                next_id: state.next_id,
            },
            TodoAction::Clear => TodoList {
                items: Vec::new(),
                next_id: state.next_id,
            },
            TodoAction::IncrementLikes(id) => TodoList {
                items: state
                    .items
                    .iter()
                    .map(|i| {
                        if i.id == id {
                            TodoItem {
                                likes: i.likes.saturating_add(1),
                                ..i.clone()
                            }
                        } else {
                            i.clone()
                        }
                    })
                    .collect(),
                next_id: state.next_id,
            },
            TodoAction::Unknown(tag) => {
                log::debug!("todo: ignoring unknown action `{tag}`");
                state.clone()
            }
        }
    }
}
