//! One panel per menu entry.
//!
//! A panel is built inside its own scope by [`mount`]; anything it registers
//! there (effect cleanups, timers) is torn down when the shell moves on.
//! [`Panel::view`] is the render pass: panels run their post-render effects
//! at the end of it.

use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::view::View;

mod callback;
mod console;
mod context;
mod custom;
mod deferred;
mod effect;
mod id;
mod layout;
mod memo;
mod reducer;
mod refs;
mod state;
mod transition;

pub use callback::CallbackPanel;
pub use console::Console;
pub use context::ContextPanel;
pub use custom::CustomHooksPanel;
pub use deferred::DeferredPanel;
pub use effect::EffectPanel;
pub use id::IdPanel;
pub use layout::LayoutEffectPanel;
pub use memo::MemoPanel;
pub use reducer::ReducerPanel;
pub use refs::RefPanel;
pub use state::StatePanel;
pub use transition::TransitionPanel;

pub trait Panel {
    fn id(&self) -> DemoId;

    fn view(&self) -> View;

    fn handle(&self, cmd: &Command) -> Result<(), CommandError>;

    /// `(usage, description)` pairs for the commands `handle` accepts.
    fn commands(&self) -> &'static [(&'static str, &'static str)];
}

/// Builds the panel for `id`. Call inside the panel's scope.
pub fn mount(id: DemoId, env: &PanelEnv) -> Box<dyn Panel> {
    match id {
        DemoId::State => Box::new(StatePanel::new()),
        DemoId::Effect => Box::new(EffectPanel::new(env)),
        DemoId::Reducer => Box::new(ReducerPanel::new()),
        DemoId::Context => Box::new(ContextPanel::new(env)),
        DemoId::Callback => Box::new(CallbackPanel::new()),
        DemoId::Memo => Box::new(MemoPanel::new()),
        DemoId::Ref => Box::new(RefPanel::new()),
        DemoId::CustomHooks => Box::new(CustomHooksPanel::new(env)),
        DemoId::Id => Box::new(IdPanel::new(env)),
        DemoId::LayoutEffect => Box::new(LayoutEffectPanel::new(env)),
        DemoId::Transition => Box::new(TransitionPanel::new(env)),
        DemoId::Deferred => Box::new(DeferredPanel::new(env)),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::rc::Rc;
    use std::time::Duration;

    use primer_core::{ManualClock, Scope};

    use crate::command::Command;
    use crate::config::Config;
    use crate::env::PanelEnv;

    /// A panel mounted in its own scope over a manual clock.
    pub struct Harness<P> {
        pub env: PanelEnv,
        pub clock: ManualClock,
        pub scope: Scope,
        pub panel: P,
    }

    impl<P: super::Panel> Harness<P> {
        pub fn new(build: impl FnOnce(&PanelEnv) -> P) -> Self {
            Self::with_config(&Config::default(), build)
        }

        pub fn with_config(config: &Config, build: impl FnOnce(&PanelEnv) -> P) -> Self {
            let clock = ManualClock::new();
            let env = PanelEnv::from_config(config, Rc::new(clock.clone()));
            let scope = Scope::named("test");
            let panel = scope.run(|| build(&env));
            Harness {
                env,
                clock,
                scope,
                panel,
            }
        }

        pub fn send(&self, line: &str) {
            let cmd = Command::parse(line).unwrap();
            self.scope.run(|| self.panel.handle(&cmd)).unwrap();
        }

        pub fn text(&self) -> String {
            self.scope.run(|| self.panel.view()).render_text()
        }

        pub fn advance(&self, ms: u64) {
            self.clock.advance(Duration::from_millis(ms));
            self.env.pump();
        }
    }
}
