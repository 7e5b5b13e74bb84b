//! Values the shell provides to panels through a [`primer_core::Context`].

use serde::Deserialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> ThemeMode {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            ThemeMode::Light => Palette {
                background: "#FFFFFF",
                on_background: "#333333",
                surface: "#F0F0F0",
            },
            ThemeMode::Dark => Palette {
                background: "#333333",
                on_background: "#FFFFFF",
                surface: "#555555",
            },
        }
    }
}

/// Colors as hex strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub background: &'static str,
    pub on_background: &'static str,
    pub surface: &'static str,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserSession {
    pub name: String,
    pub email: String,
    pub logged_in: bool,
}

impl Default for UserSession {
    fn default() -> Self {
        Self {
            name: "John Doe".into(),
            email: "john@example.com".into(),
            logged_in: true,
        }
    }
}

impl UserSession {
    /// The same user, logged out.
    pub fn logged_out(&self) -> UserSession {
        UserSession {
            logged_in: false,
            ..self.clone()
        }
    }
}
