use std::cell::Cell;
use std::rc::Rc;

/// Hands out element ids that are unique for the generator's lifetime.
///
/// Clones share the same counter.
#[derive(Clone, Debug)]
pub struct IdGenerator {
    prefix: &'static str,
    next: Rc<Cell<u64>>,
}

impl IdGenerator {
    pub fn new(prefix: &'static str) -> Self {
        Self {
            prefix,
            next: Rc::new(Cell::new(0)),
        }
    }

    pub fn next_id(&self) -> String {
        let n = self.next.get();
        self.next.set(n + 1);
        format!(":{}{}:", self.prefix, n)
    }

    pub fn issued(&self) -> u64 {
        self.next.get()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("p")
    }
}
