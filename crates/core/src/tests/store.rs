// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::StoreError;
use crate::tests::helpers::{at, attachment, record, request, store, store_with_records};
use roombook_domain::BookingRejection;
use roombook_remote::{RemoteError, SearchQuery};

#[tokio::test]
async fn test_create_commits_with_remote_id() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let committed = store
        .create(
            &request("2024-01-10", "09:00", "10:00", "5F Conference Room"),
            now,
        )
        .await
        .unwrap();

    assert_eq!(committed.id(), Some(1));
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.backend().records().len(), 1);
    assert_eq!(store.backend().records()[0].start_time, "09:00");
}

#[tokio::test]
async fn test_conflict_rejection_touches_nothing() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let first = store
        .create(
            &request("2024-01-10", "08:00", "09:00", "5F Conference Room"),
            now,
        )
        .await
        .unwrap();

    let result = store
        .create(
            &request("2024-01-10", "08:30", "09:30", "5F Conference Room"),
            now,
        )
        .await;

    match result {
        Err(StoreError::Rejected(BookingRejection::Conflict {
            conflicts,
            alternatives,
        })) => {
            assert_eq!(conflicts.len(), 1);
            assert_eq!(conflicts[0].id(), first.id());
            assert_eq!(alternatives, vec![String::from("2F Conference Room")]);
        }
        other => panic!("expected conflict rejection, got {other:?}"),
    }
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.backend().records().len(), 1);
}

#[tokio::test]
async fn test_offline_create_never_inserts_locally() {
    let mut store = store();
    store.backend().set_offline(true);
    let now = at("2024-01-09", 12, 0);

    let result = store
        .create(
            &request("2024-01-10", "09:00", "10:00", "5F Conference Room"),
            now,
        )
        .await;

    assert!(matches!(
        result,
        Err(StoreError::Remote(RemoteError::Transport { .. }))
    ));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_update_without_id_is_rejected() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let result = store
        .update(
            &request("2024-01-10", "09:00", "10:00", "5F Conference Room"),
            now,
        )
        .await;

    assert!(matches!(result, Err(StoreError::MissingId)));
}

#[tokio::test]
async fn test_update_excludes_own_prior_version() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let committed = store
        .create(
            &request("2024-01-10", "09:00", "10:00", "5F Conference Room"),
            now,
        )
        .await
        .unwrap();

    // Shift within the reservation's own old window; only the prior
    // version overlaps and it must not count against itself.
    let mut edit = request("2024-01-10", "09:30", "10:30", "5F Conference Room");
    edit.id = committed.id();
    let updated = store.update(&edit, now).await.unwrap();

    assert_eq!(updated.id(), committed.id());
    assert_eq!(store.snapshot().len(), 1);
    assert_eq!(store.snapshot()[0].time_label(), "09:30~10:30");
    assert_eq!(store.backend().records()[0].start_time, "09:30");
}

#[tokio::test]
async fn test_update_preserves_attachments_when_none_supplied() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let mut req = request("2024-01-10", "09:00", "10:00", "5F Conference Room");
    req.attachments = vec![attachment("agenda.pdf")];
    let committed = store.create(&req, now).await.unwrap();

    let mut edit = request("2024-01-10", "11:00", "12:00", "5F Conference Room");
    edit.id = committed.id();
    let updated = store.update(&edit, now).await.unwrap();

    assert_eq!(updated.attachments.len(), 1);
    assert_eq!(updated.attachments[0].file_name, "agenda.pdf");
}

#[tokio::test]
async fn test_update_replaces_attachments_when_supplied() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let mut req = request("2024-01-10", "09:00", "10:00", "5F Conference Room");
    req.attachments = vec![attachment("agenda.pdf")];
    let committed = store.create(&req, now).await.unwrap();

    let mut edit = request("2024-01-10", "11:00", "12:00", "5F Conference Room");
    edit.id = committed.id();
    edit.attachments = vec![attachment("minutes.pdf")];
    let updated = store.update(&edit, now).await.unwrap();

    assert_eq!(updated.attachments.len(), 1);
    assert_eq!(updated.attachments[0].file_name, "minutes.pdf");
}

#[tokio::test]
async fn test_update_vanished_remotely_leaves_local_untouched() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let mut edit = request("2024-01-10", "09:00", "10:00", "5F Conference Room");
    edit.id = Some(99);
    let result = store.update(&edit, now).await;

    assert!(matches!(
        result,
        Err(StoreError::Remote(RemoteError::NotFound { .. }))
    ));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_remove_only_on_remote_acknowledgment() {
    let mut store = store();
    let now = at("2024-01-09", 12, 0);

    let committed = store
        .create(
            &request("2024-01-10", "09:00", "10:00", "5F Conference Room"),
            now,
        )
        .await
        .unwrap();
    let id = committed.id().unwrap();

    store.backend().set_offline(true);
    assert!(store.remove(id).await.is_err());
    assert_eq!(store.snapshot().len(), 1);

    store.backend().set_offline(false);
    store.remove(id).await.unwrap();
    assert!(store.snapshot().is_empty());
    assert!(store.backend().records().is_empty());

    assert!(matches!(
        store.remove(id).await,
        Err(StoreError::Remote(RemoteError::NotFound { .. }))
    ));
}

#[tokio::test]
async fn test_search_converts_hits_without_adopting_them() {
    let store = store_with_records(vec![
        record(1, "2024-01-10", "09:00", "10:00", "5F Conference Room"),
        record(2, "2024-02-10", "09:00", "10:00", "5F Conference Room"),
    ]);

    let hits = store
        .search(&SearchQuery {
            from: String::from("2024-01-01"),
            to: String::from("2024-01-31"),
            place: None,
            keyword: None,
        })
        .await
        .unwrap();

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].id(), Some(1));
    assert!(store.snapshot().is_empty());
}

#[tokio::test]
async fn test_view_rows_respect_configured_windows() {
    let mut store = store_with_records(vec![
        record(1, "2024-01-10", "10:05", "11:00", "5F Conference Room"),
        record(2, "2024-01-10", "08:00", "09:00", "5F Conference Room"),
        record(3, "2024-01-20", "09:00", "10:00", "2F Conference Room"),
    ]);
    store.reconcile().await.unwrap();
    let now = at("2024-01-10", 10, 0);

    // Pre-announced within the early window; the ended one excluded.
    let active = store.active_rows(now);
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id(), Some(1));

    // The horizon is seven days; the Jan 20 booking falls outside it.
    let upcoming = store.upcoming_rows(now);
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0].id(), Some(1));

    let editable = store.editable_rows(now);
    assert_eq!(editable.len(), 2);

    assert_eq!(store.admin_rows().len(), 3);
}
