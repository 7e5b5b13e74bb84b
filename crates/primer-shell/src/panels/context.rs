use primer_core::{Context, Signal, signal};

use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::theme::{ThemeMode, UserSession};
use crate::view::{Button, Column, Section, Text, View};

/// Theme state plus the action consumers may trigger.
#[derive(Clone)]
pub struct ThemeHandle {
    mode: Signal<ThemeMode>,
}

impl ThemeHandle {
    pub fn mode(&self) -> ThemeMode {
        self.mode.get()
    }

    pub fn toggle(&self) {
        self.mode.update(|m| *m = m.toggled());
    }
}

#[derive(Clone)]
pub struct SessionHandle {
    user: Signal<UserSession>,
}

impl SessionHandle {
    pub fn user(&self) -> UserSession {
        self.user.get()
    }

    pub fn logout(&self) {
        let next = self.user.with(UserSession::logged_out);
        self.user.set(next);
    }

    pub fn login(&self) {
        self.user.update(|u| u.logged_in = true);
    }
}

/// A provider with three consumers that never receive the values as
/// arguments, only the context they were handed.
pub struct ContextPanel {
    context: Context,
}

impl ContextPanel {
    pub fn new(env: &PanelEnv) -> Self {
        let theme = ThemeHandle {
            mode: signal(env.theme()),
        };
        let session = SessionHandle {
            user: signal(env.user()),
        };
        Self {
            context: env.context.provide(theme).provide(session),
        }
    }
}

fn header(ctx: &Context) -> View {
    let (Some(theme), Some(session)) = (ctx.get::<ThemeHandle>(), ctx.get::<SessionHandle>()) else {
        return Text("Header: no theme or session provided");
    };
    let mode = theme.mode();
    let user = session.user();
    Section("🏠 Header")
        .child(Text(format!("Surface: {}", mode.palette().surface)))
        .child(Text(format!("Theme: {}", mode.name())))
        .child(Text(format!(
            "Logged in as: {}",
            if user.logged_in { user.name.as_str() } else { "Guest" }
        )))
        .child(Button("Toggle Theme", "toggle-theme"))
}

fn main_content(ctx: &Context) -> View {
    let Some(session) = ctx.get::<SessionHandle>() else {
        return Text("Main content: no session provided");
    };
    let user = session.user();
    let body = if user.logged_in {
        Column()
            .child(Text(format!("Welcome, {}!", user.name)))
            .child(Text(format!("Email: {}", user.email)))
    } else {
        Text("Please log in to see content")
    };
    Section("📝 Main Content").child(body)
}

fn footer(ctx: &Context) -> View {
    let Some(session) = ctx.get::<SessionHandle>() else {
        return Text("Footer: no session provided");
    };
    let user = session.user();
    let mut v = Section("🔗 Footer").child(Text(format!(
        "Status: {}",
        if user.logged_in { "✅ Logged In" } else { "❌ Logged Out" }
    )));
    v = if user.logged_in {
        v.child(Button("Logout", "logout"))
    } else {
        v.child(Button("Login", "login"))
    };
    v
}

impl Panel for ContextPanel {
    fn id(&self) -> DemoId {
        DemoId::Context
    }

    fn view(&self) -> View {
        let background = self
            .context
            .get::<ThemeHandle>()
            .map_or("", |t| t.mode().palette().background);
        Column()
            .child(Text(format!("Passing data without prop drilling (background {background})")))
            .child(header(&self.context))
            .child(main_content(&self.context))
            .child(footer(&self.context))
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "toggle-theme" => {
                if let Some(theme) = self.context.get::<ThemeHandle>() {
                    theme.toggle();
                }
            }
            "logout" => {
                if let Some(session) = self.context.get::<SessionHandle>() {
                    session.logout();
                }
            }
            "login" => {
                if let Some(session) = self.context.get::<SessionHandle>() {
                    session.login();
                }
            }
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("toggle-theme", "switch between light and dark"),
            ("logout | login", "change the session"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::panels::testing::Harness;

    #[test]
    fn consumers_see_provided_values() {
        let h = Harness::new(ContextPanel::new);
        let text = h.text();
        assert!(text.contains("Theme: light"));
        assert!(text.contains("Logged in as: John Doe"));
        assert!(text.contains("Email: john@example.com"));
        assert!(text.contains("Status: ✅ Logged In"));
    }

    #[test]
    fn toggling_reaches_every_consumer() {
        let h = Harness::new(ContextPanel::new);
        h.send("toggle-theme");
        let text = h.text();
        assert!(text.contains("Theme: dark"));
        assert!(text.contains("Surface: #555555"));
        assert!(text.contains("background #333333"));
    }

    #[test]
    fn logout_keeps_name_but_hides_content() {
        let h = Harness::new(ContextPanel::new);
        h.send("logout");
        let text = h.text();
        assert!(text.contains("Logged in as: Guest"));
        assert!(text.contains("Please log in to see content"));
        assert!(text.contains("Status: ❌ Logged Out"));

        let session = h.panel.context.get::<SessionHandle>().unwrap();
        assert_eq!(session.user().name, "John Doe");
    }

    #[test]
    fn initial_values_come_from_config() {
        let config = Config {
            theme: ThemeMode::Dark,
            user: UserSession {
                name: "Ada".into(),
                email: "ada@example.com".into(),
                logged_in: false,
            },
            ..Config::default()
        };
        let h = Harness::with_config(&config, ContextPanel::new);
        let text = h.text();
        assert!(text.contains("Theme: dark"));
        assert!(text.contains("Logged in as: Guest"));
    }

    #[test]
    fn consumer_without_provider_renders_fallback() {
        let v = main_content(&Context::new());
        assert!(v.contains_text("no session provided"));
    }
}
