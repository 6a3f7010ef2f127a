//! Booking reducer running inside the Store under concurrent load.

#![allow(clippy::unwrap_used)]

use classbook_core::booking::{BookingAction, BookingError, BookingReducer, BookingState};
use classbook_runtime::Store;
use classbook_testing::fixtures::{book, booking_env, mobile, register, schedule};
use std::sync::Arc;

type BookingStore =
    Store<BookingState, BookingAction, classbook_core::booking::BookingEnvironment, BookingReducer>;

fn store() -> Arc<BookingStore> {
    Arc::new(Store::new(
        BookingState::default(),
        BookingReducer::new(),
        booking_env(),
    ))
}

async fn send_many(store: &Arc<BookingStore>, actions: Vec<BookingAction>) -> Vec<BookingAction> {
    let handles: Vec<_> = actions
        .into_iter()
        .map(|action| {
            let store = Arc::clone(store);
            tokio::spawn(async move { store.send(action).await })
        })
        .collect();

    let mut outcomes = Vec::new();
    for handle in handles {
        outcomes.extend(handle.await.unwrap().unwrap());
    }
    outcomes
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_registrations_admit_exactly_one() {
    let store = store();

    let outcomes = send_many(
        &store,
        (0..64).map(|i| register(&format!("Member {i}"), "555-0100")).collect(),
    )
    .await;

    let registered = outcomes
        .iter()
        .filter(|a| matches!(a, BookingAction::MemberRegistered { .. }))
        .count();
    let conflicts = outcomes
        .iter()
        .filter(|a| {
            matches!(
                a,
                BookingAction::Rejected {
                    error: BookingError::MemberExists(_)
                }
            )
        })
        .count();

    assert_eq!(registered, 1);
    assert_eq!(conflicts, 63);
    assert_eq!(store.state(|s| s.members.len()).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn concurrent_bookings_admit_exactly_one() {
    let store = store();
    store.send(register("Ann", "555-0100")).await.unwrap();
    store
        .send(schedule("Pilates", "2024-03-01", "2024-03-03", 10))
        .await
        .unwrap();

    let outcomes = send_many(
        &store,
        (0..32).map(|_| book("555-0100", "Pilates", "2024-03-02")).collect(),
    )
    .await;

    let booked = outcomes
        .iter()
        .filter(|a| matches!(a, BookingAction::ClassBooked { .. }))
        .count();

    assert_eq!(booked, 1);
    assert_eq!(outcomes.len(), 32);
    assert_eq!(store.state(|s| s.ledger.len()).await, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn overlapping_schedules_never_duplicate_a_day() {
    let store = store();

    let outcomes = send_many(
        &store,
        vec![
            schedule("Yoga", "2024-01-01", "2024-01-20", 10),
            schedule("Yoga", "2024-01-10", "2024-01-31", 10),
            schedule("Yoga", "2024-01-05", "2024-01-15", 10),
        ],
    )
    .await;

    let created: usize = outcomes
        .iter()
        .map(|a| match a {
            BookingAction::ClassesScheduled { outcome, .. } => outcome.created.len(),
            _ => 0,
        })
        .sum();

    assert_eq!(created, 31);
    assert_eq!(store.state(|s| s.catalog.len()).await, 31);
}

#[tokio::test]
async fn distinct_members_register_independently() {
    let store = store();

    for i in 0..10 {
        store
            .send(register("Guest", &format!("555-01{i:02}")))
            .await
            .unwrap();
    }

    assert_eq!(store.state(|s| s.members.len()).await, 10);
    assert!(
        store
            .state(|s| s.members.exists(&mobile("555-0105")))
            .await
    );
}
