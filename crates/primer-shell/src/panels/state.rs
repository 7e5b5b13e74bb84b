use primer_core::{Signal, signal};

use crate::command::{Command, CommandError};
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::view::{Button, Column, Input, Section, Text, View};

#[derive(Clone, Debug, PartialEq)]
struct Profile {
    email: String,
    active: bool,
}

/// Plain state cells: a counter, a text field, two independent values and a
/// record replaced as a whole.
pub struct StatePanel {
    count: Signal<i64>,
    name: Signal<String>,
    age: Signal<u32>,
    profile: Signal<Profile>,
}

impl StatePanel {
    pub fn new() -> Self {
        Self {
            count: signal(0),
            name: signal(String::new()),
            age: signal(25),
            profile: signal(Profile {
                email: "john@example.com".into(),
                active: true,
            }),
        }
    }
}

impl Default for StatePanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for StatePanel {
    fn id(&self) -> DemoId {
        DemoId::State
    }

    fn view(&self) -> View {
        let name = self.name.get();
        let shown = if name.is_empty() { "Guest".to_string() } else { name.clone() };
        let profile = self.profile.get();

        Column()
            .child(
                Section("1. Simple Counter")
                    .child(Text(format!("Count: {}", self.count.get())))
                    .child(Button("+ Increment", "inc"))
                    .child(Button("- Decrement", "dec"))
                    .child(Button("Reset", "reset")),
            )
            .child(
                Section("2. Text Input")
                    .child(Input("Name", name))
                    .child(Text(format!("Hello, {shown}!"))),
            )
            .child(
                Section("3. Multiple State Variables")
                    .child(Text(format!("{shown} is {} years old", self.age.get())))
                    .child(Button("Set age", "age <n>")),
            )
            .child(
                Section("4. State with Object")
                    .child(Text(format!("Email: {}", profile.email)))
                    .child(Text(format!(
                        "Status: {}",
                        if profile.active { "Active" } else { "Inactive" }
                    )))
                    .child(Button("Toggle Status", "toggle-active")),
            )
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "inc" => self.count.update(|c| *c += 1),
            "dec" => self.count.update(|c| *c -= 1),
            "reset" => self.count.set(0),
            "name" => self.name.set(cmd.rest()),
            "age" => self.age.set(cmd.number(0, "age")?),
            "toggle-active" => {
                // Replace the whole record, carrying the untouched field over.
                let prev = self.profile.get();
                self.profile.set(Profile {
                    active: !prev.active,
                    ..prev
                });
            }
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("inc | dec | reset", "change the counter"),
            ("name <text>", "type into the name field"),
            ("age <n>", "set the age"),
            ("toggle-active", "flip the profile status"),
        ]
    }
}
