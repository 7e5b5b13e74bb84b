use primer_core::{Signal, signal};

use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::view::{Column, Divider, LabeledInput, Section, Text, View};

/// Element ids drawn once at mount and reused by every render.
pub struct IdPanel {
    main_id: String,
    email_id: String,
    password_id: String,
    email: Signal<String>,
    password: Signal<String>,
    focused: Signal<Option<String>>,
}

impl IdPanel {
    pub fn new(env: &PanelEnv) -> Self {
        Self {
            main_id: env.ids.next_id(),
            email_id: env.ids.next_id(),
            password_id: env.ids.next_id(),
            email: signal(String::new()),
            password: signal(String::new()),
            focused: signal(None),
        }
    }

    fn field_id(&self, name: &str) -> Result<&str, CommandError> {
        match name {
            "email" => Ok(self.email_id.as_str()),
            "password" => Ok(self.password_id.as_str()),
            other => Err(CommandError::BadArg {
                value: other.to_string(),
                what: "field (email or password)",
            }),
        }
    }
}

impl Panel for IdPanel {
    fn id(&self) -> DemoId {
        DemoId::Id
    }

    fn view(&self) -> View {
        let focused = self.focused.get();
        let is_focused = |id: &str| focused.as_deref() == Some(id);
        let masked = "•".repeat(self.password.with(|p| p.chars().count()));

        let mut form = Section("1. Form with Labels Connected").child(LabeledInput(
            "Email",
            self.email.get(),
            &self.email_id,
            is_focused(&self.email_id),
        ));
        if is_focused(&self.email_id) {
            form = form.child(Text(format!("Focused: {}", self.email_id)));
        }
        form = form.child(LabeledInput(
            "Password",
            masked,
            &self.password_id,
            is_focused(&self.password_id),
        ));
        if is_focused(&self.password_id) {
            form = form.child(Text(format!("Focused: {}", self.password_id)));
        }

        Column()
            .child(Text(
                "Generates an id that is unique within the tour and stable across renders.",
            ))
            .child(Divider())
            .child(form)
            .child(Divider())
            .child(
                Section("2. Generated IDs")
                    .child(Text(format!("Main ID: {}", self.main_id)))
                    .child(Text(format!("Email Input ID: {}", self.email_id)))
                    .child(Text(format!("Password Input ID: {}", self.password_id))),
            )
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "focus" => {
                let id = self.field_id(cmd.arg(0, "a field (email or password)")?)?;
                self.focused.set(Some(id.to_string()));
            }
            "blur" => self.focused.set(None),
            "type" => {
                let field = cmd.arg(0, "a field (email or password)")?;
                let id = self.field_id(field)?.to_string();
                let text = cmd.args[1..].join(" ");
                if field == "email" {
                    self.email.set(text);
                } else {
                    self.password.set(text);
                }
                self.focused.set(Some(id));
            }
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("focus email|password", "focus a field"),
            ("type email|password <text>", "type into a field"),
            ("blur", "drop focus"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::testing::Harness;
    use std::collections::HashSet;

    #[test]
    fn ids_are_distinct_and_stable() {
        let h = Harness::new(IdPanel::new);
        let first = h.text();
        let second = h.text();
        assert_eq!(first, second);

        let ids: HashSet<_> = [&h.panel.main_id, &h.panel.email_id, &h.panel.password_id]
            .into_iter()
            .collect();
        assert_eq!(ids.len(), 3);
        assert!(first.contains(&format!("Email (#{}): []", h.panel.email_id)));
    }

    #[test]
    fn two_instances_never_share_ids() {
        let h = Harness::new(IdPanel::new);
        let other = IdPanel::new(&h.env);
        assert_ne!(h.panel.email_id, other.email_id);
        assert_ne!(h.panel.main_id, other.password_id);
    }

    #[test]
    fn focus_marks_the_right_field() {
        let h = Harness::new(IdPanel::new);
        h.send("type password hunter2");
        let text = h.text();
        assert!(text.contains(&format!("Password (#{}): [•••••••|]", h.panel.password_id)));
        assert!(text.contains(&format!("Focused: {}", h.panel.password_id)));

        h.send("focus email");
        assert!(h.text().contains(&format!("Focused: {}", h.panel.email_id)));
        h.send("blur");
        assert!(!h.text().contains("Focused:"));
    }
}
