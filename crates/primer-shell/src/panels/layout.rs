use primer_core::{EffectSlot, Lanes, Signal, Timers, signal};

use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::panels::{Console, Panel};
use crate::view::{Column, Divider, Section, Text, View};

const CONTAINER_WIDTH: u32 = 400;
const CHAR_WIDTH: u32 = 8;
const LINE_HEIGHT: u32 = 24;
const PADDING: u32 = 40;

/// Size of a block of monospace text inside the fixed-width container.
pub fn measure(content: &str) -> (u32, u32) {
    let lines = content.lines().count().max(1) as u32;
    let widest = content.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u32;
    let width = (widest * CHAR_WIDTH + PADDING).min(CONTAINER_WIDTH);
    (width, lines * LINE_HEIGHT + PADDING)
}

/// A measurement applied before the frame is produced, next to an effect
/// that only lands after it.
pub struct LayoutEffectPanel {
    console: Console,
    lanes: Lanes,
    timers: Timers,
    content: Signal<String>,
    width: Signal<u32>,
    height: Signal<u32>,
    effect_time: Signal<String>,
    layout: EffectSlot<String>,
    after_paint: EffectSlot<()>,
}

impl LayoutEffectPanel {
    pub fn new(env: &PanelEnv) -> Self {
        Self {
            console: Console::new(),
            lanes: env.lanes.clone(),
            timers: env.timers.clone(),
            content: signal("This element's size:".to_string()),
            width: signal(0),
            height: signal(0),
            effect_time: signal(String::new()),
            layout: EffectSlot::new("layout measure"),
            after_paint: EffectSlot::new("after paint"),
        }
    }

    /// Runs before the tree is built, so the same render sees its results.
    fn layout_effects(&self) {
        let content = self.content.get();
        self.layout.run(content.clone(), || {
            self.console.log("layout effect: measuring...");
            let (w, h) = measure(&content);
            self.width.set(w);
            self.height.set(h);
            None
        });
    }

    /// Queued behind the current frame; visible once the lanes flush.
    fn passive_effects(&self) {
        self.after_paint.run((), || {
            let console = self.console.clone();
            let timers = self.timers.clone();
            let effect_time = self.effect_time.clone();
            self.lanes.defer(move || {
                console.log("effect: runs after paint");
                effect_time.set(format!("Measured at t+{:.1}s", timers.now().as_secs_f64()));
            });
            None
        });
    }
}

impl Panel for LayoutEffectPanel {
    fn id(&self) -> DemoId {
        DemoId::LayoutEffect
    }

    fn view(&self) -> View {
        self.layout_effects();

        let effect_time = self.effect_time.get();
        let v = Column()
            .child(Text(
                "A layout effect runs after the tree changes but before the frame is shown.",
            ))
            .child(Divider())
            .child(
                Section("1. Measurement Example")
                    .child(Text(self.content.get()))
                    .child(Text(format!("Width: {}px", self.width.get())))
                    .child(Text(format!("Height: {}px", self.height.get()))),
            )
            .child(
                Section("Passive effect").child(Text(if effect_time.is_empty() {
                    "(not run yet)".to_string()
                } else {
                    effect_time
                })),
            )
            .child(self.console.view());

        self.passive_effects();
        v
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "text" => self.content.set(cmd.rest()),
            "line" => {
                let line = cmd.rest();
                self.content.update(|c| {
                    c.push('\n');
                    c.push_str(&line);
                });
            }
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("text <content>", "replace the measured content"),
            ("line <content>", "append a line to it"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::testing::Harness;

    #[test]
    fn measure_clamps_to_container() {
        assert_eq!(measure("abcd"), (72, 64));
        assert_eq!(measure(&"x".repeat(100)), (400, 64));
        assert_eq!(measure("a\nbb\nccc"), (64, 112));
        assert_eq!(measure(""), (40, 64));
    }

    #[test]
    fn first_render_is_already_measured() {
        let h = Harness::new(LayoutEffectPanel::new);
        let text = h.text();
        assert!(text.contains("Width: 200px"));
        assert!(text.contains("Height: 64px"));
        assert!(text.contains("(not run yet)"));

        h.advance(1500);
        let text = h.text();
        assert!(text.contains("Measured at t+1.5s"));
    }

    #[test]
    fn layout_runs_before_passive_effect() {
        let h = Harness::new(LayoutEffectPanel::new);
        h.text();
        h.env.pump();
        let lines = h.panel.console.lines();
        assert_eq!(lines, vec!["layout effect: measuring...", "effect: runs after paint"]);
    }

    #[test]
    fn content_change_remeasures_in_same_render() {
        let h = Harness::new(LayoutEffectPanel::new);
        h.text();
        h.send("line second line here");
        let text = h.text();
        assert!(text.contains("Height: 88px"));
        assert_eq!(h.panel.layout.run_count(), 2);
        assert_eq!(h.panel.after_paint.run_count(), 1);
    }
}
