use std::rc::Rc;

use primer_core::{Memo, Signal, Transition, signal};

use crate::catalog::{self, Product};
use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::view::{Column, Divider, Input, Section, Text, View};

const ITEM_COUNT: usize = 10_000;
const PREVIEW: usize = 20;

/// Typing lands at once; the filter it drives is applied as a transition.
pub struct TransitionPanel {
    items: Rc<Vec<Product>>,
    transition: Transition,
    input: Signal<String>,
    search: Signal<String>,
    filtered: Memo<String, Rc<Vec<usize>>>,
}

impl TransitionPanel {
    pub fn new(env: &PanelEnv) -> Self {
        Self {
            items: catalog::products(ITEM_COUNT),
            transition: Transition::new(&env.lanes),
            input: signal(String::new()),
            search: signal(String::new()),
            filtered: Memo::new("product filter"),
        }
    }

    fn results(&self) -> Rc<Vec<usize>> {
        let items = &self.items;
        self.filtered
            .get(self.search.get(), |q| catalog::filter_products(items, q))
    }
}

impl Panel for TransitionPanel {
    fn id(&self) -> DemoId {
        DemoId::Transition
    }

    fn view(&self) -> View {
        let found = self.results();

        let mut search = Section("1. With Transition")
            .child(Input("Search items", self.input.get()));
        if self.transition.is_pending() {
            search = search.child(Text(format!("Rendering {} items...", found.len())));
        }
        search = search.child(Text(format!("Results: {} items found", found.len())));

        let mut preview = Section("2. Results Preview");
        if found.is_empty() {
            preview = preview.child(Text("No items found"));
        } else {
            preview = preview.with_children(found.iter().take(PREVIEW).map(|&i| {
                let p = &self.items[i];
                Text(format!("{} - {} - ${}", p.name, p.category, p.price))
            }));
        }

        Column()
            .child(Text(
                "Urgent updates such as typing interrupt the non-urgent filter over 10,000 items.",
            ))
            .child(Divider())
            .child(search)
            .child(Divider())
            .child(preview)
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "search" => {
                let text = cmd.rest();
                self.input.set(text.clone());
                let search = self.search.clone();
                self.transition.start(move || search.set(text));
            }
            "search-now" => {
                let text = cmd.rest();
                self.input.set(text.clone());
                self.search.set(text);
            }
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("search <text>", "type into the box; filter as a transition"),
            ("search-now <text>", "type and filter in the same update"),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::testing::Harness;

    #[test]
    fn input_is_immediate_and_filter_waits() {
        let h = Harness::new(TransitionPanel::new);
        h.send("search books");
        let text = h.text();
        assert!(text.contains("Search items: [books]"));
        assert!(text.contains("Rendering 10000 items..."));
        assert!(text.contains("Results: 10000 items found"));

        h.env.pump();
        let text = h.text();
        assert!(!text.contains("Rendering"));
        assert!(text.contains("Results: 2500 items found"));
        assert!(text.contains("Item 1 - Books - $"));
        assert!(!text.contains("Item 0 - "));
    }

    #[test]
    fn only_the_last_transition_clears_pending() {
        let h = Harness::new(TransitionPanel::new);
        h.send("search b");
        h.send("search bo");
        assert!(h.panel.transition.is_pending());
        h.env.pump();
        assert!(!h.panel.transition.is_pending());
        assert_eq!(h.panel.search.get(), "bo");
    }

    #[test]
    fn search_now_skips_the_transition() {
        let h = Harness::new(TransitionPanel::new);
        h.send("search-now food");
        let text = h.text();
        assert!(!text.contains("Rendering"));
        assert!(text.contains("Results: 2500 items found"));
    }

    #[test]
    fn preview_is_capped() {
        let h = Harness::new(TransitionPanel::new);
        let text = h.text();
        assert!(text.contains("Item 19 - "));
        assert!(!text.contains("Item 20 - "));

        h.send("search-now nothing matches this");
        assert!(h.text().contains("No items found"));
    }
}
