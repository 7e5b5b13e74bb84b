use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet, VecDeque};
use std::rc::Rc;

pub type SignalId = usize;
pub type ObserverId = usize;

thread_local! {
    static CURRENT_OBSERVER: RefCell<Option<ObserverId>> = const { RefCell::new(None) };
    static GRAPH: RefCell<DepGraph> = RefCell::new(DepGraph::default());
    static NEXT_SIGNAL: Cell<SignalId> = const { Cell::new(0) };
}

#[derive(Default)]
struct DepGraph {
    next_observer: ObserverId,
    // signal_id -> observers that depend on it
    edges: HashMap<SignalId, HashSet<ObserverId>>,
    // observer_id -> signals it depends on
    back: HashMap<ObserverId, HashSet<SignalId>>,
    // recompute closures
    observers: HashMap<ObserverId, Rc<dyn Fn()>>,
    running: HashSet<ObserverId>,
}

impl DepGraph {
    fn remove_all_edges_for(&mut self, obs: ObserverId) {
        if let Some(signals) = self.back.remove(&obs) {
            for s in signals {
                if let Some(set) = self.edges.get_mut(&s) {
                    set.remove(&obs);
                    if set.is_empty() {
                        self.edges.remove(&s);
                    }
                }
            }
        }
    }

    fn remove_observer(&mut self, obs: ObserverId) {
        self.observers.remove(&obs);
        self.remove_all_edges_for(obs);
        self.running.remove(&obs);
    }
}

/// Allocates a fresh id for a new signal.
pub fn next_signal_id() -> SignalId {
    NEXT_SIGNAL.with(|n| {
        let id = n.get();
        n.set(id + 1);
        id
    })
}

pub fn register_signal_read(sig: SignalId) {
    CURRENT_OBSERVER.with(|co| {
        if let Some(obs) = *co.borrow() {
            GRAPH.with(|g| {
                let mut g = g.borrow_mut();
                g.edges.entry(sig).or_default().insert(obs);
                g.back.entry(obs).or_default().insert(sig);
            });
        }
    });
}

pub fn signal_changed(sig: SignalId) {
    let mut queue: VecDeque<ObserverId> = GRAPH.with(|g| {
        g.borrow()
            .edges
            .get(&sig)
            .map(|set| set.iter().copied().collect())
            .unwrap_or_default()
    });

    while let Some(obs) = queue.pop_front() {
        let started = GRAPH.with(|g| {
            let mut g = g.borrow_mut();
            if g.running.contains(&obs) || !g.observers.contains_key(&obs) {
                return false;
            }
            g.running.insert(obs);
            // clear previous deps before recompute
            g.remove_all_edges_for(obs);
            true
        });
        if !started {
            continue;
        }
        run_tracked(obs);
        GRAPH.with(|g| {
            g.borrow_mut().running.remove(&obs);
        });
    }
}

pub fn new_observer(f: impl Fn() + 'static) -> ObserverId {
    GRAPH.with(|g| {
        let mut g = g.borrow_mut();
        let id = g.next_observer;
        g.next_observer += 1;
        g.observers.insert(id, Rc::new(f));
        id
    })
}

/// Remove an observer and all of its dependency edges.
pub fn remove_observer(id: ObserverId) {
    GRAPH.with(|g| {
        g.borrow_mut().remove_observer(id);
    });
}

pub fn run_observer_now(id: ObserverId) {
    GRAPH.with(|g| {
        g.borrow_mut().remove_all_edges_for(id);
    });
    run_tracked(id);
}

/// Runs `f` with dependency tracking suspended.
pub fn untracked<R>(f: impl FnOnce() -> R) -> R {
    CURRENT_OBSERVER.with(|co| {
        let prev = co.borrow_mut().take();
        let out = f();
        *co.borrow_mut() = prev;
        out
    })
}

/// Runs `f` with `id` as the current observer, so every signal read inside
/// becomes a dependency of `id`.
pub fn track<R>(id: ObserverId, f: impl FnOnce() -> R) -> R {
    let prev = CURRENT_OBSERVER.with(|co| co.borrow_mut().replace(id));
    let out = f();
    CURRENT_OBSERVER.with(|co| *co.borrow_mut() = prev);
    out
}

fn run_tracked(id: ObserverId) {
    let f = GRAPH.with(|g| g.borrow().observers.get(&id).cloned());
    if let Some(f) = f {
        track(id, || f());
    }
}

#[cfg(test)]
pub(crate) fn dependency_count(id: ObserverId) -> usize {
    GRAPH.with(|g| g.borrow().back.get(&id).map(|s| s.len()).unwrap_or(0))
}
