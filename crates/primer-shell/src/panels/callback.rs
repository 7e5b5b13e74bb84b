use std::cell::{Cell, RefCell};
use std::rc::Rc;

use primer_core::{Callback, Memo, Signal, memo_callback, same_callback, signal};

use crate::command::{Command, CommandError};
use crate::menu::DemoId;
use crate::panels::{Console, Panel};
use crate::view::{Button, Column, Divider, Section, Text, View};

/// A child that only re-renders when its callback's identity changes.
struct MemoChild {
    label: &'static str,
    command: &'static str,
    last: RefCell<Option<Callback>>,
    renders: Cell<u32>,
}

impl MemoChild {
    fn new(label: &'static str, command: &'static str) -> Self {
        Self {
            label,
            command,
            last: RefCell::new(None),
            renders: Cell::new(0),
        }
    }

    fn render(&self, on_click: &Callback, console: &Console) -> View {
        let changed = match self.last.borrow().as_ref() {
            Some(prev) => !same_callback(prev, on_click),
            None => true,
        };
        if changed {
            self.renders.set(self.renders.get() + 1);
            console.log(format!("child rendered with label: {}", self.label));
            *self.last.borrow_mut() = Some(on_click.clone());
        }
        Text(format!(
            "Child Component: {} (rendered {} times)",
            self.label,
            self.renders.get()
        ))
        .child(Button("Click me", self.command))
    }

    fn click(&self) -> bool {
        let cb = self.last.borrow().clone();
        match cb {
            Some(cb) => {
                cb();
                true
            }
            None => false,
        }
    }
}

/// Three callbacks handed to memoized children: a fresh one every render,
/// one created once, and one recreated when the counter changes.
pub struct CallbackPanel {
    console: Console,
    count: Signal<u32>,
    rerenders: Signal<u32>,
    alert: Signal<Option<String>>,
    stable: Memo<(), Callback>,
    by_count: Memo<u32, Callback>,
    children: [MemoChild; 3],
}

impl CallbackPanel {
    pub fn new() -> Self {
        Self {
            console: Console::new(),
            count: signal(0),
            rerenders: signal(0),
            alert: signal(None),
            stable: Memo::new("stable callback"),
            by_count: Memo::new("count callback"),
            children: [
                MemoChild::new("Without Callback", "click without"),
                MemoChild::new("With Callback", "click with"),
                MemoChild::new("With Dependencies", "click deps"),
            ],
        }
    }

    fn callbacks(&self) -> [Callback; 3] {
        let console = self.console.clone();
        let without: Callback = Rc::new(move || console.log("clicked - without memoized callback"));

        let console = self.console.clone();
        let with = memo_callback(&self.stable, (), move |_| -> Callback {
            Rc::new(move || console.log("clicked - with memoized callback"))
        });

        let console = self.console.clone();
        let alert = self.alert.clone();
        let deps = memo_callback(&self.by_count, self.count.get(), move |count| -> Callback {
            // Captures the count current when the callback was made.
            let count = *count;
            Rc::new(move || {
                console.log(format!("current count: {count}"));
                alert.set(Some(format!("Current count is: {count}")));
            })
        });

        [without, with, deps]
    }
}

impl Default for CallbackPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for CallbackPanel {
    fn id(&self) -> DemoId {
        DemoId::Callback
    }

    fn view(&self) -> View {
        let [without, with, deps] = self.callbacks();
        let mut top = Section("Counters")
            .child(Text(format!("Counter: {}", self.count.get())))
            .child(Text(format!("Re-renders: {}", self.rerenders.get())))
            .child(Button("Increment Count", "inc"))
            .child(Button("Force Re-render", "rerender"));
        if let Some(alert) = self.alert.get() {
            top = top.child(Text(format!("Alert: {alert}")));
        }

        Column()
            .child(top)
            .child(Divider())
            .child(
                Section("WITHOUT memoized callback")
                    .child(Text("Function recreated on every render. Child re-renders unnecessarily."))
                    .child(self.children[0].render(&without, &self.console)),
            )
            .child(
                Section("WITH memoized callback")
                    .child(Text("Function stays the same. Child doesn't re-render unless needed."))
                    .child(self.children[1].render(&with, &self.console)),
            )
            .child(
                Section("WITH memoized callback & dependencies")
                    .child(Text("Function recreated when the count changes."))
                    .child(self.children[2].render(&deps, &self.console)),
            )
            .child(self.console.view())
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "inc" => self.count.update(|c| *c += 1),
            "rerender" => self.rerenders.update(|r| *r += 1),
            "dismiss" => self.alert.set(None),
            "click" => {
                let which = cmd.arg(0, "one of without, with, deps")?;
                let child = match which {
                    "without" => &self.children[0],
                    "with" => &self.children[1],
                    "deps" => &self.children[2],
                    other => {
                        return Err(CommandError::BadArg {
                            value: other.to_string(),
                            what: "child (without, with, deps)",
                        });
                    }
                };
                if !child.click() {
                    log::debug!("callback panel: `{which}` clicked before first render");
                }
            }
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("inc", "bump the counter"),
            ("rerender", "force a re-render"),
            ("click without|with|deps", "click a child's button"),
            ("dismiss", "close the alert"),
        ]
    }
}
