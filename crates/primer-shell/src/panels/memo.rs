use std::cell::Cell;
use std::rc::Rc;

use primer_core::{Memo, Signal, signal};

use crate::catalog::matches;
use crate::command::{Command, CommandError};
use crate::menu::DemoId;
use crate::panels::{Console, Panel};
use crate::view::{Button, Column, Divider, Input, Section, Text, View};

const FIXED_N: u32 = 35;
const MAX_N: u32 = 40;

const PRODUCE: [&str; 10] = [
    "Apple",
    "Apricot",
    "Banana",
    "Blueberry",
    "Cherry",
    "Carrot",
    "Date",
    "Dragon Fruit",
    "Elderberry",
    "Eggplant",
];

pub fn fibonacci(n: u32) -> u64 {
    let (mut a, mut b) = (0u64, 1u64);
    for _ in 0..n {
        (a, b) = (b, a + b);
    }
    a
}

/// The same computation done on every render, cached once, and cached
/// against an input; plus a filtered list cached against its query.
pub struct MemoPanel {
    console: Console,
    rerenders: Signal<u32>,
    uncached_runs: Cell<u32>,
    fixed: Memo<(), u64>,
    fib_input: Signal<u32>,
    keyed: Memo<u32, u64>,
    search: Signal<String>,
    filtered: Memo<String, Rc<Vec<&'static str>>>,
}

impl MemoPanel {
    pub fn new() -> Self {
        Self {
            console: Console::new(),
            rerenders: signal(0),
            uncached_runs: Cell::new(0),
            fixed: Memo::new("fibonacci(35)"),
            fib_input: signal(30),
            keyed: Memo::new("fibonacci(input)"),
            search: signal(String::new()),
            filtered: Memo::new("produce filter"),
        }
    }
}

impl Default for MemoPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Panel for MemoPanel {
    fn id(&self) -> DemoId {
        DemoId::Memo
    }

    fn view(&self) -> View {
        self.uncached_runs.set(self.uncached_runs.get() + 1);
        let uncached = fibonacci(FIXED_N);

        let cached = self.fixed.get((), |_| {
            self.console.log("calculating fibonacci...");
            fibonacci(FIXED_N)
        });

        let n = self.fib_input.get();
        let keyed = self.keyed.get(n, |n| {
            self.console.log(format!("calculating fibonacci with input: {n}"));
            fibonacci(*n)
        });

        let query = self.search.get();
        let items = self.filtered.get(query.clone(), |q| {
            self.console.log("filtering items...");
            Rc::new(PRODUCE.iter().copied().filter(|item| matches(q, &[*item])).collect())
        });

        Column()
            .child(
                Section("Re-renders")
                    .child(Text(format!("Re-renders: {}", self.rerenders.get())))
                    .child(Button("Force Re-render", "rerender")),
            )
            .child(Divider())
            .child(
                Section("1. Fibonacci Calculation")
                    .child(Text(format!(
                        "WITHOUT memo: Fibonacci({FIXED_N}) = {uncached} (computed {} times)",
                        self.uncached_runs.get()
                    )))
                    .child(Text(format!(
                        "WITH memo: Fibonacci({FIXED_N}) = {cached} (computed {} times)",
                        self.fixed.recompute_count()
                    ))),
            )
            .child(
                Section("2. With Dependencies")
                    .child(Input("Fibonacci input", n.to_string()))
                    .child(Text(format!("Fibonacci({n}) = {keyed}"))),
            )
            .child(
                Section("3. Expensive Filtering")
                    .child(Input("Search fruits/vegetables", query))
                    .child(Text(format!(
                        "Found {} item{}:",
                        items.len(),
                        if items.len() == 1 { "" } else { "s" }
                    )))
                    .with_children(items.iter().map(|item| Text(format!("- {item}")))),
            )
            .child(self.console.view())
    }

    fn handle(&self, cmd: &Command) -> Result<(), CommandError> {
        match cmd.verb.as_str() {
            "rerender" => self.rerenders.update(|r| *r += 1),
            "fib" => {
                let n: u32 = cmd.number(0, "number 0-40")?;
                self.fib_input.set(n.min(MAX_N));
            }
            "search" => self.search.set(cmd.rest()),
            _ => return Err(cmd.unknown()),
        }
        Ok(())
    }

    fn commands(&self) -> &'static [(&'static str, &'static str)] {
        &[
            ("rerender", "force a re-render"),
            ("fib <n>", "set the fibonacci input (0-40)"),
            ("search <text>", "filter the produce list"),
        ]
    }
}
