use std::rc::Rc;

use primer_core::{Deferred, Memo, Signal, signal};

use crate::catalog::{self, Article};
use crate::command::{Command, CommandError};
use crate::env::PanelEnv;
use crate::menu::DemoId;
use crate::panels::Panel;
use crate::view::{Column, Divider, Input, Section, Text, View};

const ARTICLE_COUNT: usize = 5_000;
const PREVIEW: usize = 15;

/// The search box follows every keystroke; the result list follows a
/// lagging copy of the query.
pub struct DeferredPanel {
    articles: Rc<Vec<Article>>,
    search: Signal<String>,
    deferred: Deferred<String>,
    filtered: Memo<String, Rc<Vec<usize>>>,
}

impl DeferredPanel {
    pub fn new(env: &PanelEnv) -> Self {
        let search = signal(String::new());
        Self {
            articles: catalog::articles(ARTICLE_COUNT),
            deferred: Deferred::new(&env.lanes, &search),
            search,
            filtered: Memo::new("article filter"),
        }
    }
}

impl Panel for DeferredPanel {
    fn id(&self) -> DemoId {
        DemoId::Deferred
    }

    fn view(&self) -> View {
        let articles = &self.articles;
        let found = self
            .filtered
            .get(self.deferred.get(), |q| catalog::filter_articles(articles, q));
        let stale = self.deferred.is_stale();

        let mut input = Section("1. Search Input").child(Input("Search articles", self.search.get()));
        if stale {
            input = input.child(Text(format!("Filtering {} items...", found.len())));
        }

        let title = if stale {
            format!("2. Results ({} items found, stale)", found.len())
        } else {
            format!("2. Results ({} items found)", found.len())
        };
        let mut results = Section(title);
        if found.is_empty() {
            results = results.child(Text("No articles found"));
        } else {
            results = results.with_children(found.iter().take(PREVIEW).map(|&i| {
                let a = &articles[i];
                Text(format!("{}: {}", a.title, a.content))
            }));
            if found.len() > PREVIEW {
                results = results.child(Text(format!("... and {} more articles", found.len() - PREVIEW)));
            }
        }

        Column()
            .child(Text(
                "The deferred copy of the query lags behind typing; the list filters on it.",
            ))
            .child(Divider())
            .child(input)
            .child(Divider())
            .child(results)
            .child(Divider())
            .child(
                Section("3. How It Works")
                    .child(Text(format!("Fast: `{}`", self.search.get())))
                    .child(Text(format!("Slow: `{}`", self.deferred.get()))),
            )
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "search" => self.search.set(cmd.rest()),
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[("search <text>", "type into the search box")]
    }
}
