use primer_core::{Signal, signal};

/// A boolean that flips.
#[derive(Clone)]
pub struct Toggle {
    value: Signal<bool>,
}

impl Toggle {
    pub fn new(initial: bool) -> Self {
        Self {
            value: signal(initial),
        }
    }

    pub fn toggle(&self) {
        self.value.update(|v| *v = !*v);
    }

    pub fn get(&self) -> bool {
        self.value.get()
    }

    pub fn set(&self, value: bool) {
        self.value.set(value);
    }

    pub fn signal(&self) -> Signal<bool> {
        self.value.clone()
    }
}

impl Default for Toggle {
    fn default() -> Self {
        Self::new(false)
    }
}
