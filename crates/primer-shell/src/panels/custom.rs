use std::time::Duration;

use primer_binders::{
    AsyncTask, FetchBinder, FieldKind, FieldValue, FormBinder, Persisted, TaskStatus, Toggle,
};
use serde::Deserialize;

use crate::command::{Command, CommandError};
use crate::config::PROFILE_LOCATOR;
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::view::{Button, Column, Divider, Input, Section, Text, View};

const NOTES_KEY: &str = "my-notes";
const TASK_DELAY: Duration = Duration::from_secs(2);

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Company {
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub company: Company,
}

/// The reusable binders from `primer-binders`, one section each.
pub struct CustomHooksPanel {
    form: FormBinder,
    profile: FetchBinder<Profile>,
    notes: Persisted<String>,
    details: Toggle,
    task: AsyncTask<String>,
}

impl CustomHooksPanel {
    pub fn new(env: &PanelEnv) -> Self {
        let timers = env.timers.clone();
        let task = AsyncTask::new(
            &env.executor,
            move || {
                let sleep = timers.sleep(TASK_DELAY);
                async move {
                    sleep.await;
                    Ok::<_, String>("Async operation completed!".to_string())
                }
            },
            true,
        );

        Self {
            form: FormBinder::new([
                ("name", FieldValue::from("")),
                ("email", FieldValue::from("")),
                ("subscribe", FieldValue::from(false)),
            ]),
            profile: FetchBinder::new(PROFILE_LOCATOR, env.fetcher.clone(), &env.executor),
            notes: Persisted::new(env.store.clone(), NOTES_KEY, String::new()),
            details: Toggle::new(false),
            task,
        }
    }

    fn form_view(&self) -> View {
        let text = |name: &str| {
            self.form
                .get(name)
                .map(|v| v.to_string())
                .unwrap_or_default()
        };
        let subscribed = self
            .form
            .get("subscribe")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Section("Form binder")
            .child(Input("Name", text("name")))
            .child(Input("Email", text("email")))
            .child(Text(format!(
                "[{}] Subscribe to newsletter",
                if subscribed { "x" } else { " " }
            )))
            .child(Button("Reset Form", "reset-form"))
            .child(Text(format!("Form values: {}", self.form.to_json())))
    }

    fn fetch_view(&self) -> View {
        let state = self.profile.state();
        let mut v = Section("Fetch binder").child(Text(format!("From: {}", self.profile.locator())));
        if state.loading {
            v = v.child(Text("Loading..."));
        }
        if let Some(err) = state.error {
            v = v.child(Text(format!("Error: {err}")));
        }
        if let Some(p) = state.data {
            v = v
                .child(Text(format!("Name: {}", p.name)))
                .child(Text(format!("Email: {}", p.email)))
                .child(Text(format!("Company: {}", p.company.name)));
        }
        v
    }

    fn notes_view(&self) -> View {
        Section("Persisted value")
            .child(Input("Notes", self.notes.get()))
            .child(Button("Clear Notes", "clear-notes"))
            .child(Text(format!("✓ Auto-saved under `{}`", self.notes.key())))
    }

    fn toggle_view(&self) -> View {
        let open = self.details.get();
        let mut v = Section("Toggle").child(Button(
            if open { "Hide Details" } else { "Show Details" },
            "toggle",
        ));
        if open {
            v = v.child(Text("This content is toggled using the toggle binder!"));
        }
        v
    }

    fn task_view(&self) -> View {
        let status = self.task.status();
        let mut v = Section("Async task")
            .child(Button("Execute Async Operation", "run"))
            .child(Text(format!("Status: {}", status.label())));
        match status {
            TaskStatus::Success(msg) => v = v.child(Text(format!("Result: {msg}"))),
            TaskStatus::Error(reason) => v = v.child(Text(format!("Error: {reason}"))),
            TaskStatus::Idle | TaskStatus::Pending => {}
        }
        v
    }
}

impl Panel for CustomHooksPanel {
    fn id(&self) -> DemoId {
        DemoId::CustomHooks
    }

    fn view(&self) -> View {
        Column()
            .child(self.form_view())
            .child(Divider())
            .child(self.fetch_view())
            .child(Divider())
            .child(self.notes_view())
            .child(Divider())
            .child(self.toggle_view())
            .child(Divider())
            .child(self.task_view())
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "name" | "email" => self.form.update(&cmd.verb, &cmd.rest(), FieldKind::Text),
            "subscribe" => {
                let checked = match cmd.arg(0, "on or off")? {
                    "on" | "yes" | "true" => true,
                    "off" | "no" | "false" => false,
                    other => {
                        return Err(CommandError::BadArg {
                            value: other.to_string(),
                            what: "checkbox state (on/off)",
                        });
                    }
                };
                self.form.update("subscribe", "on", FieldKind::Checkbox { checked });
            }
            "reset-form" => self.form.reset(),
            "fetch" => self.profile.set_locator(cmd.arg(0, "a locator")?),
            "refetch" => self.profile.refetch(),
            "notes" => self.notes.set(cmd.rest()),
            "append" => {
                let line = cmd.rest();
                self.notes.update(|prev| {
                    if prev.is_empty() {
                        line.clone()
                    } else {
                        format!("{prev}\n{line}")
                    }
                });
            }
            "clear-notes" => self.notes.set(String::new()),
            "toggle" => self.details.toggle(),
            "run" => self.task.execute(),
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("name <text> | email <text>", "fill the form"),
            ("subscribe on|off", "tick the checkbox"),
            ("reset-form", "restore the initial form values"),
            ("fetch <locator> | refetch", "load another resource"),
            ("notes <text> | append <text> | clear-notes", "edit the persisted notes"),
            ("toggle", "show or hide details"),
            ("run", "execute the async task"),
        ]
    }
}
