//! Tests for subscriber registration, ordering and removal

#[cfg(test)]
mod tests {

    use std::cell::RefCell;
    use std::rc::Rc;
    use worldgrid::spatial::notifier::{CellChange, ChangeNotifier};

    type Log = Rc<RefCell<Vec<(&'static str, i32, i32, Option<u32>)>>>;

    fn recorder(log: &Log, name: &'static str) -> impl FnMut(&CellChange<'_, u32>) + 'static {
        let log = Rc::clone(log);
        move |change: &CellChange<'_, u32>| {
            log.borrow_mut()
                .push((name, change.x, change.y, change.value.copied()));
        }
    }

    // Tests callbacks run in subscription order with the change arguments
    // Verified by iterating subscribers in reverse
    #[test]
    fn test_notify_in_subscription_order() {
        let log: Log = Rc::default();
        let mut notifier = ChangeNotifier::new();
        notifier.subscribe(recorder(&log, "first"));
        notifier.subscribe(recorder(&log, "second"));
        notifier.subscribe(recorder(&log, "third"));

        let value = 7;
        notifier.notify(&CellChange {
            x: 1,
            y: 2,
            value: Some(&value),
        });

        assert_eq!(
            *log.borrow(),
            vec![
                ("first", 1, 2, Some(7)),
                ("second", 1, 2, Some(7)),
                ("third", 1, 2, Some(7)),
            ]
        );
    }

    // Tests unsubscribing one callback leaves the others attached
    // Verified by clearing all subscribers on unsubscribe
    #[test]
    fn test_unsubscribe_isolates_callback() {
        let log: Log = Rc::default();
        let mut notifier = ChangeNotifier::new();
        let first = notifier.subscribe(recorder(&log, "first"));
        notifier.subscribe(recorder(&log, "second"));

        assert!(notifier.unsubscribe(first));
        assert_eq!(notifier.len(), 1);

        notifier.notify(&CellChange {
            x: 0,
            y: 0,
            value: None,
        });

        assert_eq!(*log.borrow(), vec![("second", 0, 0, None)]);
    }

    // Tests unknown or repeated unsubscribes are no-ops
    // Verified by returning true unconditionally
    #[test]
    fn test_unsubscribe_unknown_handle() {
        let log: Log = Rc::default();
        let mut notifier = ChangeNotifier::new();
        let id = notifier.subscribe(recorder(&log, "only"));

        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        assert!(notifier.is_empty());
    }

    // Tests handles stay unique after removals
    // Verified by reusing the subscriber count as the next id
    #[test]
    fn test_handles_are_not_reused() {
        let log: Log = Rc::default();
        let mut notifier = ChangeNotifier::new();
        let first = notifier.subscribe(recorder(&log, "a"));
        notifier.unsubscribe(first);
        let second = notifier.subscribe(recorder(&log, "b"));

        assert_ne!(first, second);
        assert!(!notifier.unsubscribe(first));
        assert_eq!(notifier.len(), 1);
    }
}
