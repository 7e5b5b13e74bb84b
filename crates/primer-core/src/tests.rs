#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::time::Duration;

    use crate::prelude::*;
    use crate::reactive;

    fn manual_timers() -> (ManualClock, Timers) {
        let clock = ManualClock::new();
        let timers = Timers::new(Rc::new(clock.clone()));
        (clock, timers)
    }

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let seen = Rc::new(RefCell::new(Vec::new()));

        let id = sig.subscribe({
            let seen = seen.clone();
            move |v| seen.borrow_mut().push(*v)
        });

        sig.set(42);
        sig.update(|v| *v += 1);
        assert_eq!(*seen.borrow(), vec![42, 43]);

        assert!(sig.unsubscribe(id));
        assert!(!sig.unsubscribe(id));
        sig.set(7);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_subscriber_may_read_signal() {
        let sig = signal(1);
        let doubled = Rc::new(Cell::new(0));
        sig.subscribe({
            let sig = sig.clone();
            let doubled = doubled.clone();
            move |_| doubled.set(sig.get() * 2)
        });
        sig.set(5);
        assert_eq!(doubled.get(), 10);
    }

    #[test]
    fn test_derived_tracks_dependencies() {
        let first = signal("Jane".to_string());
        let last = signal("Doe".to_string());
        let runs = Rc::new(Cell::new(0));

        let full = derived({
            let first = first.clone();
            let last = last.clone();
            let runs = runs.clone();
            move || {
                runs.set(runs.get() + 1);
                format!("{} {}", first.get(), last.get())
            }
        });
        assert_eq!(full.get(), "Jane Doe");
        assert_eq!(runs.get(), 1);

        last.set("Smith".into());
        assert_eq!(full.get(), "Jane Smith");
        assert_eq!(runs.get(), 2);

        drop(full);
        first.set("John".into());
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_derived_drops_stale_dependencies() {
        let use_a = signal(true);
        let a = signal(1);
        let b = signal(10);
        let runs = Rc::new(Cell::new(0));

        let picked = derived({
            let (use_a, a, b, runs) = (use_a.clone(), a.clone(), b.clone(), runs.clone());
            move || {
                runs.set(runs.get() + 1);
                if use_a.get() { a.get() } else { b.get() }
            }
        });
        assert_eq!(picked.get(), 1);

        b.set(11);
        assert_eq!(runs.get(), 1);

        use_a.set(false);
        assert_eq!(picked.get(), 11);
        a.set(2);
        assert_eq!(runs.get(), 2);
    }

    #[test]
    fn test_untracked_reads_do_not_subscribe() {
        let a = signal(1);
        let obs = reactive::new_observer({
            let a = a.clone();
            move || {
                reactive::untracked(|| a.get());
            }
        });
        reactive::run_observer_now(obs);
        assert_eq!(reactive::dependency_count(obs), 0);
        reactive::remove_observer(obs);
    }

    #[test]
    fn test_memo_recomputes_only_on_dep_change() {
        let memo: Memo<u32, u64> = Memo::new("square");
        assert_eq!(memo.get(3, |n| u64::from(*n * *n)), 9);
        assert_eq!(memo.get(3, |_| unreachable!()), 9);
        assert_eq!(memo.recompute_count(), 1);

        assert_eq!(memo.get(4, |n| u64::from(*n * *n)), 16);
        assert_eq!(memo.recompute_count(), 2);

        memo.invalidate();
        memo.get(4, |n| u64::from(*n));
        assert_eq!(memo.recompute_count(), 3);
    }

    #[test]
    fn test_memo_callback_identity() {
        let memo: Memo<i32, Callback> = Memo::new("cb");
        let a = memo_callback(&memo, 1, |_| Rc::new(|| {}));
        let b = memo_callback(&memo, 1, |_| Rc::new(|| {}));
        let c = memo_callback(&memo, 2, |_| Rc::new(|| {}));
        assert!(same_callback(&a, &b));
        assert!(!same_callback(&b, &c));
    }

    #[test]
    fn test_scope_explicit_dispose() {
        let order = Rc::new(RefCell::new(Vec::new()));

        let scope = Scope::named("parent");
        let child = scope.child("child");
        scope.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("parent")
        });
        child.add_disposer({
            let order = order.clone();
            move || order.borrow_mut().push("child")
        });

        assert!(order.borrow().is_empty());
        scope.dispose();
        assert_eq!(*order.borrow(), vec!["child", "parent"]);
    }

    #[test]
    fn test_scope_drop_runs_disposers_once() {
        let count = Rc::new(Cell::new(0));
        {
            let scope = Scope::new();
            let count = count.clone();
            scope.add_disposer(move || count.set(count.get() + 1));
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_effect_registers_in_current_scope() {
        let cleaned = Rc::new(Cell::new(false));
        let scope = Scope::new();
        let guard = scope.run(|| {
            let cleaned = cleaned.clone();
            effect(move || on_unmount(move || cleaned.set(true)))
        });
        assert!(current_scope().is_none());
        assert!(!guard.is_spent());

        scope.dispose();
        assert!(cleaned.get());
        assert!(guard.is_spent());
    }

    #[test]
    fn test_effect_slot_cleans_before_rerun() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let scope = Scope::new();
        let slot = EffectSlot::in_scope(&scope, "count");

        let run = |n: i32| {
            let log = log.clone();
            slot.run(n, move || {
                log.borrow_mut().push(format!("run {n}"));
                let log = log.clone();
                Some(on_unmount(move || log.borrow_mut().push(format!("clean {n}"))))
            })
        };

        assert!(run(1));
        assert!(!run(1));
        assert!(run(2));
        assert_eq!(slot.run_count(), 2);
        assert_eq!(*log.borrow(), vec!["run 1", "clean 1", "run 2"]);

        scope.dispose();
        assert_eq!(log.borrow().last().map(String::as_str), Some("clean 2"));
    }

    #[test]
    fn test_effect_slot_run_always() {
        let slot: EffectSlot<()> = EffectSlot::new("every-render");
        let runs = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let runs = runs.clone();
            slot.run_always(move || {
                runs.set(runs.get() + 1);
                None
            });
        }
        assert_eq!(runs.get(), 3);
    }

    #[test]
    fn test_timeout_fires_once() {
        let (clock, timers) = manual_timers();
        let fired = Rc::new(Cell::new(0));
        timers.set_timeout("once", Duration::from_millis(100), {
            let fired = fired.clone();
            move || fired.set(fired.get() + 1)
        });

        clock.advance(Duration::from_millis(99));
        assert_eq!(timers.poll(), 0);
        clock.advance(Duration::from_millis(1));
        assert_eq!(timers.poll(), 1);
        clock.advance(Duration::from_secs(1));
        assert_eq!(timers.poll(), 0);
        assert_eq!(fired.get(), 1);
        assert_eq!(timers.active(), 0);
    }

    #[test]
    fn test_interval_catches_up_and_cancels() {
        let (clock, timers) = manual_timers();
        let ticks = Rc::new(Cell::new(0));
        let handle = timers.set_interval("tick", Duration::from_secs(1), {
            let ticks = ticks.clone();
            move || ticks.set(ticks.get() + 1)
        });

        clock.advance(Duration::from_millis(3500));
        timers.poll();
        assert_eq!(ticks.get(), 3);

        assert!(handle.cancel());
        assert!(!handle.is_active());
        clock.advance(Duration::from_secs(5));
        timers.poll();
        assert_eq!(ticks.get(), 3);
    }

    #[test]
    fn test_timers_fire_in_due_order() {
        let (clock, timers) = manual_timers();
        let order = Rc::new(RefCell::new(Vec::new()));
        for (label, ms) in [("late", 300u64), ("early", 100), ("mid", 200)] {
            let order = order.clone();
            timers.set_timeout(label, Duration::from_millis(ms), move || {
                order.borrow_mut().push(label)
            });
        }
        clock.advance(Duration::from_secs(1));
        timers.poll();
        assert_eq!(*order.borrow(), vec!["early", "mid", "late"]);
    }

    #[test]
    fn test_sleep_resolves_on_executor() {
        let (clock, timers) = manual_timers();
        let exec = Executor::new();
        let done = Rc::new(Cell::new(false));

        exec.spawn({
            let sleep = timers.sleep(Duration::from_secs(2));
            let done = done.clone();
            async move {
                sleep.await;
                done.set(true);
            }
        });
        exec.run_until_stalled();
        assert!(!done.get());
        assert_eq!(exec.in_flight(), 1);

        clock.advance(Duration::from_secs(2));
        timers.poll();
        exec.run_until_stalled();
        assert!(done.get());
        assert_eq!(exec.in_flight(), 0);
    }

    #[test]
    fn test_transition_pending_until_flush() {
        let lanes = Lanes::new();
        let transition = Transition::new(&lanes);
        let query = signal(String::new());

        transition.start({
            let query = query.clone();
            move || query.set("ab".into())
        });
        assert!(transition.is_pending());
        assert_eq!(query.get(), "");

        assert_eq!(lanes.flush(), 1);
        assert!(!transition.is_pending());
        assert_eq!(query.get(), "ab");
    }

    #[test]
    fn test_deferred_lags_until_flush() {
        let lanes = Lanes::new();
        let source = signal(String::new());
        let deferred = Deferred::new(&lanes, &source);

        source.set("a".into());
        source.set("ab".into());
        assert!(deferred.is_stale());
        assert_eq!(deferred.get(), "");

        assert_eq!(lanes.flush(), 1);
        assert!(!deferred.is_stale());
        assert_eq!(deferred.get(), "ab");

        drop(deferred);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_context_shadowing() {
        #[derive(Clone, Debug, Default, PartialEq)]
        struct Mode(&'static str);

        let root = Context::new();
        assert_eq!(root.get_or_default::<Mode>(), Mode(""));

        let light = root.provide(Mode("light"));
        let dark = light.provide(Mode("dark"));
        assert_eq!(light.get_or_default::<Mode>(), Mode("light"));
        assert_eq!(dark.get_or_default::<Mode>(), Mode("dark"));
        assert_eq!(dark.len(), 1);
        assert!(!root.contains::<Mode>());
    }

    #[test]
    fn test_id_generator_unique() {
        let ids = IdGenerator::new("r");
        let shared = ids.clone();
        let a = ids.next_id();
        let b = shared.next_id();
        assert_eq!(a, ":r0:");
        assert_eq!(b, ":r1:");
        assert_eq!(ids.issued(), 2);
    }

    #[test]
    fn test_store_dispatch() {
        struct Counter;
        impl Reducer for Counter {
            type State = i32;
            type Action = i32;
            fn reduce(state: &i32, action: i32) -> i32 {
                state + action
            }
        }

        let store: Store<Counter> = Store::new(1);
        store.dispatch(2);
        store.dispatch(3);
        assert_eq!(store.state(), 6);
    }

    #[test]
    fn test_dropping_sleep_cancels_its_timer() {
        let (clock, timers) = manual_timers();
        let sleep = timers.sleep(Duration::from_secs(2));
        assert_eq!(timers.active(), 1);
        drop(sleep);
        assert_eq!(timers.active(), 0);

        clock.advance(Duration::from_secs(5));
        assert_eq!(timers.poll(), 0);
    }

    #[test]
    fn test_scoped_task_is_aborted_with_its_scope() {
        let (_clock, timers) = manual_timers();
        let exec = Executor::new();
        let done = Rc::new(Cell::new(false));
        let scope = Scope::named("panel");

        scope.run(|| {
            let sleep = timers.sleep(Duration::from_secs(2));
            let done = done.clone();
            exec.spawn_scoped(async move {
                sleep.await;
                done.set(true);
            })
        });
        exec.run_until_stalled();
        assert_eq!(exec.in_flight(), 1);
        assert_eq!(timers.active(), 1);

        scope.dispose();
        exec.run_until_stalled();
        assert_eq!(exec.in_flight(), 0);
        assert_eq!(timers.active(), 0);
        assert!(!done.get());
    }

    #[test]
    fn test_unscoped_abort_handle() {
        let exec = Executor::new();
        let ran = Rc::new(Cell::new(false));
        let handle = exec.spawn({
            let ran = ran.clone();
            async move { ran.set(true) }
        });
        handle.abort();
        exec.run_until_stalled();
        assert!(!ran.get());
        assert_eq!(exec.in_flight(), 0);
    }

    #[test]
    fn test_lanes_drop_work_from_disposed_scope() {
        let lanes = Lanes::new();
        let ran = Rc::new(Cell::new(0));
        let scope = Scope::named("panel");
        scope.run(|| {
            let ran = ran.clone();
            lanes.defer(move || ran.set(ran.get() + 1));
        });
        lanes.defer({
            let ran = ran.clone();
            move || ran.set(ran.get() + 10)
        });
        assert!(lanes.has_pending());

        let liveness = scope.liveness();
        scope.dispose();
        assert!(!liveness.is_alive());
        assert!(lanes.has_pending());
        assert_eq!(lanes.flush(), 1);
        assert_eq!(ran.get(), 10);
        assert!(!lanes.has_pending());
    }
}
