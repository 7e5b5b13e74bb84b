//! The Primer tour: a fixed menu of demo panels, one per reactive primitive,
//! behind a shell that owns nothing but the current selection.
//!
//! ```rust
//! use primer_shell::{Config, DemoId, PanelEnv, Shell};
//!
//! let env = PanelEnv::from_config(&Config::default(), std::rc::Rc::new(primer_core::ManualClock::new()));
//! let shell = Shell::new(env, 1);
//! shell.select(3);
//! assert_eq!(shell.current_panel(), DemoId::Reducer);
//!
//! // Unknown ids fall back to the first entry.
//! shell.select(42);
//! assert_eq!(shell.current_panel(), DemoId::State);
//! ```

pub mod catalog;
pub mod command;
pub mod config;
pub mod env;
pub mod menu;
pub mod panels;
pub mod shell;
pub mod theme;
pub mod view;

pub use command::{Command, CommandError};
pub use config::{Config, ConfigError};
pub use env::PanelEnv;
pub use menu::{DemoId, MENU, MenuEntry, MenuItem};
pub use panels::Panel;
pub use shell::Shell;
pub use theme::{Palette, ThemeMode, UserSession};
pub use view::View;
