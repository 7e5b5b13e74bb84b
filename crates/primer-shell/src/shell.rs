use std::cell::RefCell;

use primer_core::{Scope, Signal, signal};

use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::{DemoId, MENU, MenuItem};
use crate::panels::{self, Panel};
use crate::view::{Column, Divider, Section, Text, View};

pub const TITLE: &str = "⚛️ Primer: a guided tour of reactive primitives";

/// The mounted panel together with the scope that owns its effects.
struct Mounted {
    id: DemoId,
    /// Disposed on unmount, so timers and cleanups registered by the panel
    /// stop with it.
    scope: Scope,
    panel: Box<dyn Panel>,
}

/// Holds the current selection and exactly one mounted panel.
pub struct Shell {
    env: PanelEnv,
    selection: Signal<u8>,
    mounted: RefCell<Option<Mounted>>,
}

impl Shell {
    pub fn new(env: PanelEnv, initial: u8) -> Shell {
        let shell = Shell {
            env,
            selection: signal(initial),
            mounted: RefCell::new(None),
        };
        shell.mount(DemoId::from_id(initial));
        shell
    }

    /// Records `id` as the selection. Switching to a different demo tears the
    /// old panel down before the new one is built; re-selecting the current
    /// one keeps its state.
    pub fn select(&self, id: u8) {
        self.selection.set(id);
        let target = DemoId::from_id(id);
        if self.mounted.borrow().as_ref().map(|m| m.id) == Some(target) {
            return;
        }
        self.unmount();
        self.mount(target);
    }

    pub fn current_panel(&self) -> DemoId {
        DemoId::from_id(self.selection.get())
    }

    /// The raw selection, as last passed to [`Shell::select`].
    pub fn selection(&self) -> u8 {
        self.selection.get()
    }

    /// Fires on every selection change, for hosts that re-render on demand.
    pub fn selection_signal(&self) -> Signal<u8> {
        self.selection.clone()
    }

    pub fn menu(&self) -> Vec<MenuItem> {
        let current = self.current_panel();
        MENU.iter()
            .map(|entry| MenuItem {
                entry,
                active: entry.id == current,
            })
            .collect()
    }

    pub fn env(&self) -> &PanelEnv {
        &self.env
    }

    /// Forwards a command to the mounted panel.
    pub fn dispatch(&self, cmd: &Command) -> Result<(), CommandError> {
        let mounted = self.mounted.borrow();
        match mounted.as_ref() {
            Some(m) => m.scope.run(|| m.panel.handle(cmd)),
            None => Err(cmd.unknown()),
        }
    }

    /// Commands the mounted panel understands, as `(usage, description)`.
    pub fn panel_commands(&self) -> &'static [(&'static str, &'static str)] {
        self.mounted
            .borrow()
            .as_ref()
            .map(|m| m.panel.commands())
            .unwrap_or_default()
    }

    /// Renders the mounted panel. Effects that run during rendering register
    /// in the panel's scope.
    pub fn render_panel(&self) -> View {
        let mounted = self.mounted.borrow();
        match mounted.as_ref() {
            Some(m) => m.scope.run(|| m.panel.view()),
            None => Text("Nothing mounted"),
        }
    }

    /// Header, menu and the mounted panel.
    pub fn render(&self) -> View {
        let menu = self.menu().into_iter().map(|item| {
            let marker = if item.active { ">" } else { " " };
            Text(format!(
                "{marker} {:>2}. {} {}",
                item.entry.id.id(),
                item.entry.icon,
                item.entry.name
            ))
        });
        Column()
            .child(Text(TITLE))
            .child(Section("Menu").with_children(menu))
            .child(Divider())
            .child(self.render_panel())
            .child(Divider())
            .child(Text("Tip: run with RUST_LOG=debug to watch effects and cleanups."))
    }

    fn mount(&self, id: DemoId) {
        let scope = Scope::named(id.entry().name);
        let panel = scope.run(|| panels::mount(id, &self.env));
        log::info!("shell: mounted {id}");
        *self.mounted.borrow_mut() = Some(Mounted { id, scope, panel });
    }

    fn unmount(&self) {
        let old = self.mounted.borrow_mut().take();
        if let Some(Mounted { id, scope, panel }) = old {
            scope.dispose();
            drop(panel);
            // Let aborted tasks drop their futures now rather than on the next pump.
            self.env.executor.run_until_stalled();
            log::info!("shell: unmounted {id}");
        }
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        self.unmount();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use primer_core::ManualClock;
    use std::rc::Rc;
    use std::time::Duration;

    fn shell_at(initial: u8) -> (Shell, ManualClock) {
        let clock = ManualClock::new();
        let env = PanelEnv::from_config(&Config::default(), Rc::new(clock.clone()));
        (Shell::new(env, initial), clock)
    }

    #[test]
    fn selection_resolves_panels() {
        let (shell, _) = shell_at(1);
        assert_eq!(shell.current_panel(), DemoId::State);
        shell.select(7);
        assert_eq!(shell.current_panel(), DemoId::Ref);
        shell.select(99);
        assert_eq!(shell.selection(), 99);
        assert_eq!(shell.current_panel(), DemoId::State);
    }

    #[test]
    fn menu_is_fixed_and_marks_current() {
        let (shell, _) = shell_at(4);
        let menu = shell.menu();
        assert_eq!(menu.len(), 12);
        assert_eq!(menu[0].entry.name, "useState");
        assert_eq!(menu[11].entry.name, "useDeferredValue");
        let active: Vec<_> = menu.iter().filter(|m| m.active).map(|m| m.entry.id).collect();
        assert_eq!(active, vec![DemoId::Context]);
    }

    #[test]
    fn every_selection_triggers_a_change() {
        let (shell, _) = shell_at(1);
        let hits = Rc::new(std::cell::Cell::new(0));
        let h = hits.clone();
        shell.selection_signal().subscribe(move |_| h.set(h.get() + 1));
        shell.select(2);
        shell.select(2);
        shell.select(3);
        assert_eq!(hits.get(), 3);
    }

    #[test]
    fn switching_away_stops_panel_timers() {
        let (shell, clock) = shell_at(2);
        shell.render_panel();
        assert!(shell.env().timers.active() > 0);

        shell.select(1);
        assert_eq!(shell.env().timers.active(), 0);
        clock.advance(Duration::from_secs(30));
        assert_eq!(shell.env().pump(), 0);
    }

    #[test]
    fn switching_away_releases_tasks_and_sleeps() {
        let (shell, _) = shell_at(8);
        shell.render_panel();
        shell.dispatch(&Command::new("run", &[])).unwrap();
        let env = shell.env().clone();
        env.executor.run_until_stalled();
        assert!(env.timers.active() > 0);
        assert!(env.executor.in_flight() > 0);

        shell.select(1);
        assert_eq!(env.timers.active(), 0);
        assert_eq!(env.executor.in_flight(), 0);
    }

    #[test]
    fn switching_away_drops_deferred_work() {
        for id in [11, 12] {
            let (shell, _) = shell_at(id);
            shell.render_panel();
            shell.dispatch(&Command::new("search", &["books"])).unwrap();
            shell.render_panel();
            let env = shell.env().clone();
            assert!(env.lanes.has_pending());

            shell.select(1);
            assert!(!env.lanes.has_pending());
            assert_eq!(env.lanes.flush(), 0);
        }
    }

    #[test]
    fn reselecting_keeps_panel_state() {
        let (shell, _) = shell_at(1);
        shell.dispatch(&Command::new("inc", &[])).unwrap();
        shell.select(1);
        assert!(shell.render_panel().contains_text("Count: 1"));

        shell.select(2);
        shell.select(1);
        assert!(shell.render_panel().contains_text("Count: 0"));
    }

    #[test]
    fn render_lists_menu_and_panel() {
        let (shell, _) = shell_at(3);
        let text = shell.render().render_text();
        assert!(text.contains(">  3. 🔄 useReducer"));
        assert!(text.contains("   1. 🎣 useState"));
        assert!(text.contains("Todo List"));
    }

    #[test]
    fn unknown_commands_are_reported() {
        let (shell, _) = shell_at(1);
        let err = shell.dispatch(&Command::new("fly", &[])).unwrap_err();
        assert_eq!(err, CommandError::Unknown("fly".into()));
    }
}
