use primer_core::{MutRef, Signal, signal};

use crate::command::{Command, CommandError};
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::view::{Button, Column, Divider, Section, Text, View};

/// Stand-in for a text input element the panel holds a handle to.
#[derive(Clone, Debug, Default, PartialEq)]
struct TextBox {
    value: String,
    focused: bool,
    selected: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Player {
    paused: bool,
}

/// Mutable handles: writing them never schedules a render, but whatever
/// they hold is visible at the next one.
pub struct RefPanel {
    input: MutRef<TextBox>,
    player: MutRef<Player>,
    renders: MutRef<u32>,
    count: Signal<u32>,
    notes: MutRef<TextBox>,
    char_count: MutRef<usize>,
    alert: Signal<Option<String>>,
}

impl RefPanel {
    pub fn new() -> Self {
        Self {
            input: MutRef::default(),
            player: MutRef::new(Player { paused: true }),
            renders: MutRef::new(0),
            count: signal(0),
            notes: MutRef::default(),
            char_count: MutRef::new(0),
            alert: signal(None),
        }
    }

    fn focus(target: &MutRef<TextBox>) {
        target.with_mut(|b| b.focused = true);
    }
}

impl Default for RefPanel {
    fn default() -> Self {
        Self::new()
    }
}

fn text_box(label: &str, b: &TextBox) -> View {
    let cursor = if b.focused { "|" } else { "" };
    let sel = if b.selected && !b.value.is_empty() { " (selected)" } else { "" };
    Text(format!("{label}: [{}{cursor}]{sel}", b.value))
}

impl Panel for RefPanel {
    fn id(&self) -> DemoId {
        DemoId::Ref
    }

    fn view(&self) -> View {
        let renders = self.renders.with_mut(|r| {
            *r += 1;
            *r
        });
        let input = self.input.get();
        let player = self.player.get();
        let notes = self.notes.get();

        let mut practical = Section("4. Practical Example: TextArea with Clear")
            .child(text_box("Notes", &notes))
            .child(Button("Clear", "clear-notes"))
            .child(Button("Get Char Count", "chars"));
        if let Some(alert) = self.alert.get() {
            practical = practical.child(Text(format!("Alert: {alert}")));
        }

        Column()
            .child(
                Section("1. Focus Input Example")
                    .child(text_box("Input", &input))
                    .child(Button("Focus Input", "focus"))
                    .child(Button("Clear", "clear")),
            )
            .child(Divider())
            .child(
                Section("2. Video Player Example")
                    .child(Text(if player.paused { "Video: paused" } else { "Video: playing" }))
                    .child(Button("Play/Pause Video", "play")),
            )
            .child(Divider())
            .child(
                Section("3. Persist Value Without Re-render")
                    .child(Text(format!("Component rendered: {renders} times")))
                    .child(Text(format!("State count: {}", self.count.get())))
                    .child(Button("Increment State", "inc")),
            )
            .child(Divider())
            .child(practical)
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "type" => {
                let text = cmd.rest();
                self.input.with_mut(|b| {
                    b.value = text;
                    b.selected = false;
                });
            }
            "focus" => self.input.with_mut(|b| {
                b.focused = true;
                b.selected = true;
            }),
            "clear" => {
                self.input.with_mut(|b| b.value.clear());
                Self::focus(&self.input);
            }
            "play" => self.player.with_mut(|p| p.paused = !p.paused),
            "inc" => self.count.update(|c| *c += 1),
            "write" => {
                let text = cmd.rest();
                let len = text.chars().count();
                self.notes.with_mut(|b| b.value = text);
                self.char_count.set(len);
            }
            "clear-notes" => {
                self.notes.with_mut(|b| b.value.clear());
                self.char_count.set(0);
                Self::focus(&self.notes);
            }
            "chars" => self
                .alert
                .set(Some(format!("{} characters", self.char_count.get()))),
            "dismiss" => self.alert.set(None),
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("type <text> | focus | clear", "drive the input element"),
            ("play", "toggle the video"),
            ("inc", "bump the state counter"),
            ("write <text> | clear-notes | chars", "drive the notes area"),
            ("dismiss", "close the alert"),
        ]
    }
}
