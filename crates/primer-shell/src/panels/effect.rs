use std::time::Duration;

use primer_core::{Dispose, EffectSlot, Signal, Timers, effect, on_unmount, signal};

use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::panels::{Console, Panel};
use crate::view::{Button, Column, Divider, Section, Text, View};

const API_DELAY: Duration = Duration::from_secs(2);
const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Debug, PartialEq)]
struct Lesson {
    name: &'static str,
    description: &'static str,
}

/// Effects keyed four ways: every render, mount only, on a value, and a
/// timer whose cleanup cancels it.
pub struct EffectPanel {
    console: Console,
    timers: Timers,
    count: Signal<u32>,
    data: Signal<Option<Lesson>>,
    loading: Signal<bool>,
    countdown: Signal<u32>,
    every_render: EffectSlot<()>,
    on_count: EffectSlot<u32>,
    on_countdown: EffectSlot<u32>,
}

impl EffectPanel {
    pub fn new(env: &PanelEnv) -> Self {
        let console = Console::new();
        let panel = Self {
            console: console.clone(),
            timers: env.timers.clone(),
            count: signal(0),
            data: signal(None),
            loading: signal(false),
            countdown: signal(0),
            every_render: EffectSlot::new("every render"),
            on_count: EffectSlot::new("count changed"),
            on_countdown: EffectSlot::new("countdown"),
        };

        effect({
            let console = console.clone();
            move || {
                console.log("mounted; this runs once");
                on_unmount(move || console.log("cleanup: will unmount"))
            }
        });

        let loading = panel.loading.clone();
        let data = panel.data.clone();
        effect({
            let timers = env.timers.clone();
            move || {
                loading.set(true);
                let handle = timers.set_timeout("simulated api call", API_DELAY, move || {
                    data.set(Some(Lesson {
                        name: "Reactive Primitives",
                        description: "Learn state and effects the explicit way",
                    }));
                    loading.set(false);
                });
                on_unmount(move || {
                    if handle.cancel() {
                        console.log("cleanup: cleared api call timeout");
                    }
                })
            }
        });

        panel
    }

    fn run_effects(&self) {
        let count = self.count.get();
        self.every_render.run_always(|| {
            self.console
                .log(format!("effect after every render; count is {count}"));
            None
        });

        self.on_count.run(count, || {
            self.console.log(format!("count changed to {count}"));
            None
        });

        let remaining = self.countdown.get();
        self.on_countdown.run(remaining, || {
            if remaining == 0 {
                return None;
            }
            let countdown = self.countdown.clone();
            let handle = self.timers.set_interval("countdown", TICK, move || {
                countdown.update(|t| *t = t.saturating_sub(1));
            });
            let console = self.console.clone();
            Some(Dispose::new(move || {
                handle.cancel();
                console.log("cleanup: cleared interval");
            }))
        });
    }
}

impl Panel for EffectPanel {
    fn id(&self) -> DemoId {
        DemoId::Effect
    }

    fn view(&self) -> View {
        let api = if self.loading.get() {
            Text("Loading data...")
        } else {
            match self.data.get() {
                Some(lesson) => Column()
                    .child(Text(lesson.name))
                    .child(Text(lesson.description)),
                None => Column(),
            }
        };

        let v = Column()
            .child(
                Section("Counter (watch the console)")
                    .child(Text(format!("Count: {}", self.count.get())))
                    .child(Button("Increment", "inc")),
            )
            .child(Divider())
            .child(Section("API Call Simulation").child(api))
            .child(Divider())
            .child(
                Section("Timer (with cleanup)")
                    .child(Text(format!("Timer: {}s", self.countdown.get())))
                    .child(Button("Start 10s Timer", "start"))
                    .child(Button("Stop Timer", "stop")),
            );

        self.run_effects();
        v.child(self.console.view())
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "inc" => self.count.update(|c| *c += 1),
            "start" => self.countdown.set(10),
            "stop" => self.countdown.set(0),
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("inc", "bump the counter"),
            ("start", "start a 10 second countdown"),
            ("stop", "stop the countdown"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::testing::Harness;

    #[test]
    fn api_call_resolves_after_two_seconds() {
        let h = Harness::new(EffectPanel::new);
        assert!(h.text().contains("Loading data..."));
        h.advance(1999);
        assert!(h.text().contains("Loading data..."));
        h.advance(1);
        let text = h.text();
        assert!(text.contains("Reactive Primitives"));
        assert!(!text.contains("Loading"));
    }

    #[test]
    fn count_effect_only_runs_on_change() {
        let h = Harness::new(EffectPanel::new);
        h.text();
        h.text();
        assert_eq!(h.panel.on_count.run_count(), 1);
        assert_eq!(h.panel.every_render.run_count(), 2);

        h.send("inc");
        h.text();
        assert_eq!(h.panel.on_count.run_count(), 2);
        assert!(h.panel.console.contains("count changed to 1"));
    }

    #[test]
    fn countdown_ticks_and_stops() {
        let h = Harness::new(EffectPanel::new);
        h.send("start");
        h.text();
        h.advance(3000);
        assert!(h.text().contains("Timer: 7s"));
        assert_eq!(h.env.timers.active(), 1);

        h.send("stop");
        h.text();
        assert!(h.panel.console.contains("cleanup: cleared interval"));
        h.advance(5000);
        assert!(h.text().contains("Timer: 0s"));
    }

    #[test]
    fn countdown_never_goes_negative() {
        let h = Harness::new(EffectPanel::new);
        h.send("start");
        h.text();
        h.advance(15_000);
        assert!(h.text().contains("Timer: 0s"));
        // the re-render above saw zero and dropped the interval
        h.advance(3000);
        assert_eq!(h.env.timers.active(), 0);
    }

    #[test]
    fn teardown_cancels_pending_work() {
        let h = Harness::new(EffectPanel::new);
        h.send("start");
        h.text();
        let Harness { env, scope, panel, clock } = h;
        scope.dispose();
        assert_eq!(env.timers.active(), 0);
        assert!(panel.console.contains("cleanup: will unmount"));
        assert!(panel.console.contains("cleanup: cleared api call timeout"));
        clock.advance(Duration::from_secs(5));
        assert_eq!(env.pump(), 0);
    }
}
