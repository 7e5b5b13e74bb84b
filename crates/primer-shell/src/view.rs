#![allow(non_snake_case)]
//! A plain view tree that panels produce and hosts present.
//!
//! Buttons carry the command line that activates them instead of a click
//! handler, so a text host can print them as hints.

use std::fmt::Write;

#[derive(Clone, Debug, PartialEq)]
pub enum ViewKind {
    Column,
    Section { title: String },
    Text { text: String },
    Button { text: String, command: String },
    Input {
        label: String,
        value: String,
        id: Option<String>,
        focused: bool,
    },
    Divider,
}

#[derive(Clone, Debug, PartialEq)]
pub struct View {
    pub kind: ViewKind,
    pub children: Vec<View>,
}

impl View {
    pub fn new(kind: ViewKind) -> Self {
        View {
            kind,
            children: vec![],
        }
    }

    pub fn child(mut self, child: View) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, kids: impl IntoIterator<Item = View>) -> Self {
        self.children.extend(kids);
        self
    }

    /// Depth-first walk over every text-bearing node.
    pub fn texts(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_texts(&mut out);
        out
    }

    fn collect_texts(&self, out: &mut Vec<String>) {
        match &self.kind {
            ViewKind::Section { title } => out.push(title.clone()),
            ViewKind::Text { text } => out.push(text.clone()),
            ViewKind::Button { text, .. } => out.push(text.clone()),
            ViewKind::Input { label, value, .. } => out.push(format!("{label}: {value}")),
            ViewKind::Column | ViewKind::Divider => {}
        }
        for c in &self.children {
            c.collect_texts(out);
        }
    }

    /// True if any text node contains `needle`.
    pub fn contains_text(&self, needle: &str) -> bool {
        self.texts().iter().any(|t| t.contains(needle))
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        self.write_text(&mut out, 0);
        out
    }

    fn write_text(&self, out: &mut String, depth: usize) {
        let pad = "  ".repeat(depth);
        let child_depth = match &self.kind {
            ViewKind::Column => depth,
            ViewKind::Section { title } => {
                let _ = writeln!(out, "{pad}== {title} ==");
                depth + 1
            }
            ViewKind::Text { text } => {
                for line in text.lines() {
                    let _ = writeln!(out, "{pad}{line}");
                }
                depth + 1
            }
            ViewKind::Button { text, command } => {
                let _ = writeln!(out, "{pad}[ {text} ]  > {command}");
                depth + 1
            }
            ViewKind::Input {
                label,
                value,
                id,
                focused,
            } => {
                let cursor = if *focused { "|" } else { "" };
                match id {
                    Some(id) => {
                        let _ = writeln!(out, "{pad}{label} (#{id}): [{value}{cursor}]");
                    }
                    None => {
                        let _ = writeln!(out, "{pad}{label}: [{value}{cursor}]");
                    }
                }
                depth + 1
            }
            ViewKind::Divider => {
                let _ = writeln!(out, "{pad}--");
                depth
            }
        };
        for c in &self.children {
            c.write_text(out, child_depth);
        }
    }
}

pub fn Column() -> View {
    View::new(ViewKind::Column)
}

pub fn Section(title: impl Into<String>) -> View {
    View::new(ViewKind::Section {
        title: title.into(),
    })
}

pub fn Text(text: impl Into<String>) -> View {
    View::new(ViewKind::Text { text: text.into() })
}

pub fn Button(text: impl Into<String>, command: impl Into<String>) -> View {
    View::new(ViewKind::Button {
        text: text.into(),
        command: command.into(),
    })
}

pub fn Input(label: impl Into<String>, value: impl Into<String>) -> View {
    View::new(ViewKind::Input {
        label: label.into(),
        value: value.into(),
        id: None,
        focused: false,
    })
}

/// An input bound to a generated element id.
pub fn LabeledInput(label: impl Into<String>, value: impl Into<String>, id: &str, focused: bool) -> View {
    View::new(ViewKind::Input {
        label: label.into(),
        value: value.into(),
        id: Some(id.to_string()),
        focused,
    })
}

pub fn Divider() -> View {
    View::new(ViewKind::Divider)
}
