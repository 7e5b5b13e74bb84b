use primer_binders::{TodoAction, TodoId, TodoItem, TodoList, TodoReducer};
use primer_core::{Signal, Store, signal};

use crate::command::{Command, CommandError};
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::view::{Button, Column, Input, Section, Text, View};

/// A to-do list driven entirely by dispatched actions.
pub struct ReducerPanel {
    todos: Store<TodoReducer>,
    input: Signal<String>,
    confirm_clear: Signal<bool>,
}

impl ReducerPanel {
    pub fn new() -> Self {
        Self {
            todos: Store::new(TodoList::seeded([TodoItem::new(1, "Learn React Hooks", 5)])),
            input: signal(String::new()),
            confirm_clear: signal(false),
        }
    }

    /// Dispatches the typed title, if it is not blank, and clears the input.
    fn add_from_input(&self) {
        let title = self.input.get();
        if title.trim().is_empty() {
            return;
        }
        self.todos.dispatch(TodoAction::Add(title));
        self.input.set(String::new());
    }
}

impl Default for ReducerPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for ReducerPanel {
    fn id(&self) -> DemoId {
        DemoId::Reducer
    }

    fn view(&self) -> View {
        let mut add = Section("Add New Todo")
            .child(Input("Todo", self.input.get()))
            .child(Button("Add Todo", "add [text]"))
            .child(Button("Clear All", "clear"));
        if self.confirm_clear.get() {
            add = add
                .child(Text("Clear all todos?"))
                .child(Button("Yes", "yes"))
                .child(Button("No", "no"));
        }

        let list = self.todos.with(|todos| {
            let section = Section(format!("Todo List ({})", todos.len()));
            if todos.is_empty() {
                return section.child(Text("No todos yet. Add one!"));
            }
            section.with_children(todos.items().iter().map(|todo| {
                Text(format!("#{} {}  ❤️ {}", todo.id, todo.title, todo.likes))
                    .child(Button("Like", format!("like {}", todo.id)))
                    .child(Button("Delete", format!("remove {}", todo.id)))
            }))
        });

        Column().child(add).child(list)
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "type" => self.input.set(cmd.rest()),
            "add" => {
                if !cmd.args.is_empty() {
                    self.input.set(cmd.rest());
                }
                self.add_from_input();
            }
            "like" => self
                .todos
                .dispatch(TodoAction::IncrementLikes(TodoId(cmd.number(0, "todo id")?))),
            "remove" => self
                .todos
                .dispatch(TodoAction::Remove(TodoId(cmd.number(0, "todo id")?))),
            "clear" => self.confirm_clear.set(true),
            "yes" if self.confirm_clear.get() => {
                self.todos.dispatch(TodoAction::Clear);
                self.confirm_clear.set(false);
            }
            "no" => self.confirm_clear.set(false),
            "action" => {
                let tag = cmd.arg(0, "an action tag")?;
                let payload = cmd.args[1..].join(" ");
                let payload = (!payload.is_empty()).then_some(payload.as_str());
                self.todos.dispatch(TodoAction::parse(tag, payload));
            }
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("type <text>", "type into the input"),
            ("add [text]", "add the typed (or given) todo"),
            ("like <id> | remove <id>", "act on one todo"),
            ("clear", "clear all todos, after confirmation"),
            ("action <TAG> [payload]", "dispatch a raw action"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::testing::Harness;

    #[test]
    fn starts_with_seed() {
        let h = Harness::new(|_| ReducerPanel::new());
        let text = h.text();
        assert!(text.contains("Todo List (1)"));
        assert!(text.contains("#1 Learn React Hooks  ❤️ 5"));
    }

    #[test]
    fn add_like_remove() {
        let h = Harness::new(|_| ReducerPanel::new());
        h.send("type Write docs");
        h.send("add");
        assert!(h.panel.input.get().is_empty());
        h.send("like 1");
        h.send("add Ship it");
        let text = h.text();
        assert!(text.contains("Todo List (3)"));
        assert!(text.contains("Learn React Hooks  ❤️ 6"));
        assert!(text.contains("#2 Write docs  ❤️ 0"));
        assert!(text.contains("#3 Ship it"));

        h.send("remove 2");
        assert!(!h.text().contains("Write docs"));
    }

    #[test]
    fn blank_input_adds_nothing() {
        let h = Harness::new(|_| ReducerPanel::new());
        h.send("type    ");
        h.send("add");
        assert_eq!(h.panel.todos.with(|t| t.len()), 1);
    }

    #[test]
    fn clear_needs_confirmation() {
        let h = Harness::new(|_| ReducerPanel::new());
        h.send("clear");
        assert!(h.text().contains("Clear all todos?"));
        h.send("no");
        assert!(h.text().contains("Todo List (1)"));

        h.send("clear");
        h.send("yes");
        assert!(h.text().contains("No todos yet. Add one!"));
    }

    #[test]
    fn unknown_raw_action_changes_nothing() {
        let h = Harness::new(|_| ReducerPanel::new());
        let before = h.panel.todos.state();
        h.send("action ARCHIVE 1");
        assert_eq!(h.panel.todos.state(), before);
        h.send("action increment_likes 1");
        assert_eq!(h.panel.todos.with(|t| t.items()[0].likes), 6);
    }
}
