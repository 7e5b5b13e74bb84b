use std::collections::VecDeque;

use primer_core::MutRef;

use crate::view::{Section, Text, View};

const KEEP: usize = 8;

/// The last few lines a panel logged, shown below it. Every line also goes
/// to the `log` facade.
#[derive(Clone, Default)]
pub struct Console {
    lines: MutRef<VecDeque<String>>,
}

impl Console {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&self, line: impl Into<String>) {
        let line = line.into();
        log::info!("{line}");
        self.lines.with_mut(|lines| {
            if lines.len() == KEEP {
                lines.pop_front();
            }
            lines.push_back(line);
        });
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.with(|l| l.iter().cloned().collect())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.with(|l| l.iter().any(|line| line.contains(needle)))
    }

    pub fn view(&self) -> View {
        let lines = self.lines();
        if lines.is_empty() {
            return Section("Console").child(Text("(empty)"));
        }
        Section("Console").with_children(lines.into_iter().map(Text))
    }
}
