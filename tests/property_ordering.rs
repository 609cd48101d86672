//! Ordering and marshaling guarantees of `Property`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use parking_lot::Mutex;

use nimbus::reactive::{Property, Transition, UiScheduler};

#[test]
fn n_writes_deliver_n_notifications_in_write_order() {
    let scheduler = UiScheduler::new();
    let property = Property::new(&scheduler, 0u32);

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let _subscription = property.subscribe(move |value, _| sink.lock().push(*value));

    for i in 1..=200 {
        property.set(i);
    }
    scheduler.flush();

    let seen = seen.lock();
    assert_eq!(seen.len(), 200, "no coalescing, no duplication");
    assert_eq!(*seen, (1..=200).collect::<Vec<_>>());
}

#[test]
fn foreign_thread_writes_mutate_only_after_the_hop() {
    let scheduler = UiScheduler::new();
    let property = Property::new(&scheduler, 0u32);

    // Track that the notification ran on the scheduler thread, never on
    // the writer's thread.
    let on_scheduler = Arc::new(AtomicBool::new(false));
    let sink = Arc::clone(&on_scheduler);
    let probe = scheduler.clone();
    let _subscription = property.subscribe(move |_, _| {
        sink.store(probe.is_current(), Ordering::SeqCst);
    });

    let writer_property = property.clone();
    let handle = thread::spawn(move || {
        writer_property.set(42);
    });
    handle.join().unwrap();

    scheduler.flush();
    assert_eq!(property.get(), 42);
    assert!(
        on_scheduler.load(Ordering::SeqCst),
        "notification must happen on the scheduler thread"
    );
}

#[test]
fn writes_from_many_threads_all_arrive() {
    let scheduler = UiScheduler::new();
    let property = Property::new(&scheduler, 0u32);

    let count = Arc::new(Mutex::new(0usize));
    let sink = Arc::clone(&count);
    let _subscription = property.subscribe(move |_, _| *sink.lock() += 1);

    let mut handles = Vec::new();
    for t in 0..8 {
        let writer = property.clone();
        handles.push(thread::spawn(move || {
            for i in 0..25 {
                writer.set(t * 100 + i);
            }
        }));
    }
    for handle in handles {
        handle.join().unwrap();
    }
    scheduler.flush();

    assert_eq!(*count.lock(), 8 * 25);
}

#[test]
fn animation_hint_is_suppressed_per_write() {
    let scheduler = UiScheduler::new();
    let property = Property::new(&scheduler, String::new());

    let hints = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&hints);
    let _subscription = property.subscribe(move |_, transition| sink.lock().push(transition));

    property.set("a".to_string());
    property.set_without_animation("b".to_string());
    property.set("c".to_string());
    scheduler.flush();

    assert_eq!(
        *hints.lock(),
        vec![
            Transition::Animated,
            Transition::Immediate,
            Transition::Animated
        ]
    );
}

#[test]
fn get_is_available_from_any_thread() {
    let scheduler = UiScheduler::new();
    let property = Property::new(&scheduler, 7u32);
    property.set(9);
    scheduler.flush();

    let reader = property.clone();
    let value = thread::spawn(move || reader.get()).join().unwrap();
    assert_eq!(value, 9);
}
