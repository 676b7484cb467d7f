//! End-to-end tests of the view processors against a seeded store.

mod support;

use std::sync::Arc;

use sleep_monitor::api::{DateKey, DateSelection, RowOccupancy};
use sleep_monitor::db::repositories::LocalRepository;
use sleep_monitor::services::{DashboardViews, ViewStatus};
use support::GatedRepository;

fn dashboard() -> DashboardViews {
    DashboardViews::new(Arc::new(support::sample_repository()), 7)
}

#[tokio::test]
async fn test_same_time_cameras_share_row_and_only_qualifying_row_counts() {
    let views = dashboard();

    let table = views.table.activate().await;
    assert_eq!(table.selected_date, Some(DateSelection::from("2024-01-01")));
    let data = table.status.data().expect("table is ready");
    assert_eq!(data.total, 1);
    let row = &data.rows[0];
    assert_eq!(row.time, "08:00:00");
    assert_eq!(
        row.camera1.as_ref().unwrap().image_url.as_deref(),
        Some("https://img/a.jpg")
    );
    assert_eq!(
        row.camera2.as_ref().unwrap().image_url.as_deref(),
        Some("https://img/b.jpg")
    );
    assert_eq!(row.camera1.as_ref().unwrap().row_status, [true, false, false, false]);
    assert_eq!(row.camera2.as_ref().unwrap().row_status, [false; 4]);

    let rows = views.rows.activate().await;
    assert_eq!(
        rows.status.data().unwrap().occupancy,
        RowOccupancy::new([1, 0, 0, 0])
    );
}

#[tokio::test]
async fn test_date_index_is_most_recent_first() {
    let views = dashboard();
    let snapshot = views.durations.activate().await;
    assert_eq!(
        snapshot.dates,
        vec![DateKey::new("2024-01-01"), DateKey::new("2023-12-31")]
    );
    assert_eq!(snapshot.selected_date, Some(DateSelection::from("2024-01-01")));
}

#[tokio::test]
async fn test_switching_dates_replaces_derived_data() {
    let views = dashboard();
    views.activate_all().await;

    let table = views
        .table
        .select_date(DateSelection::from("2023-12-31"))
        .await;
    let data = table.status.data().unwrap();
    assert_eq!(data.total, 1);
    assert_eq!(data.rows[0].time, "08:10:00");
    assert!(data.rows[0].camera2.is_none());

    let rows = views
        .rows
        .select_date(DateSelection::from("2023-12-31"))
        .await;
    assert_eq!(
        rows.status.data().unwrap().occupancy,
        RowOccupancy::new([0, 0, 0, 1])
    );

    let durations = views
        .durations
        .select_date(DateSelection::from("2023-12-31"))
        .await;
    let counts: Vec<usize> = durations
        .status
        .data()
        .unwrap()
        .bins
        .iter()
        .map(|bin| bin.count)
        .collect();
    assert_eq!(counts, vec![0, 0, 0, 0, 1, 0]);

    let analytics = views
        .analytics
        .select_date(DateSelection::from("2023-12-31"))
        .await;
    let chart = &analytics.status.data().unwrap().chart;
    assert_eq!(chart.labels, vec!["01:10"]);
    assert_eq!(chart.datasets[0].data, vec![3.0]);
}

#[tokio::test]
async fn test_unknown_date_yields_empty_states() {
    let views = dashboard();
    let day = DateSelection::from("2030-01-01");

    assert!(matches!(
        views.table.select_date(day.clone()).await.status,
        ViewStatus::Empty { .. }
    ));
    assert_eq!(
        views.analytics.select_date(day.clone()).await.status,
        ViewStatus::empty("No data available for this date")
    );
    assert_eq!(
        views.durations.select_date(day.clone()).await.status,
        ViewStatus::empty("No sleep duration data for 2030-01-01.")
    );
    assert!(matches!(
        views.rows.select_date(day).await.status,
        ViewStatus::Empty { .. }
    ));
}

#[tokio::test]
async fn test_empty_store() {
    let views = DashboardViews::new(Arc::new(LocalRepository::new()), 7);
    views.activate_all().await;

    assert_eq!(
        views.table.snapshot().status,
        ViewStatus::empty("No data available")
    );
    assert_eq!(
        views.analytics.snapshot().status,
        ViewStatus::prompt("Please select a date to view the graph")
    );
    assert_eq!(
        views.durations.snapshot().status,
        ViewStatus::empty("No sleep duration data available.")
    );
    assert!(views.rows.snapshot().dates.is_empty());
}

#[tokio::test]
async fn test_fetch_failure_is_local_to_each_view() {
    let repo = Arc::new(support::sample_repository());
    let views = DashboardViews::new(repo.clone(), 7);
    views.table.activate().await;

    repo.set_failure(Some("quota exceeded".to_string()));
    let rows = views.rows.activate().await;
    match rows.status {
        ViewStatus::Error { message } => {
            assert!(message.starts_with("Failed to fetch sleep data"));
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("expected error, got {:?}", other),
    }

    // The table rederives from its activation cache and is unaffected.
    let table = views
        .table
        .select_date(DateSelection::from("2023-12-31"))
        .await;
    assert!(table.status.is_ready());
}

#[tokio::test]
async fn test_refetching_view_fails_on_select_without_partial_data() {
    let repo = Arc::new(support::sample_repository());
    let views = DashboardViews::new(repo.clone(), 7);
    views.durations.activate().await;

    repo.set_failure(Some("offline".to_string()));
    let snapshot = views
        .durations
        .select_date(DateSelection::from("2023-12-31"))
        .await;
    assert!(matches!(snapshot.status, ViewStatus::Error { .. }));
    assert!(snapshot.status.data().is_none());
    assert_eq!(snapshot.dates.len(), 2);
}

#[tokio::test]
async fn test_superseded_selection_answers_its_caller_but_is_not_stored() {
    let repo = GatedRepository::new(support::sample_repository());
    let views = Arc::new(DashboardViews::new(repo.clone(), 7));
    views.rows.activate().await;
    assert_eq!(repo.calls(), 1);

    let older = repo.gate(1);
    let newer = repo.gate(2);

    let first = {
        let views = views.clone();
        tokio::spawn(async move {
            views
                .rows
                .select_date(DateSelection::from("2023-12-31"))
                .await
        })
    };
    repo.wait_for_calls(2).await;

    let second = {
        let views = views.clone();
        tokio::spawn(async move {
            views
                .rows
                .select_date(DateSelection::from("2024-01-01"))
                .await
        })
    };
    repo.wait_for_calls(3).await;

    // The newer request completes first, then the older one.
    newer.send(()).unwrap();
    let second = second.await.unwrap();
    assert_eq!(
        second.status.data().unwrap().occupancy,
        RowOccupancy::new([1, 0, 0, 0])
    );

    older.send(()).unwrap();
    let first = first.await.unwrap();
    assert_eq!(first.selected_date, Some(DateSelection::from("2023-12-31")));
    let data = first.status.data().unwrap();
    assert_eq!(data.occupancy, RowOccupancy::new([0, 0, 0, 1]));
    assert_eq!(data.title, "Most Frequently Sleeping Rows (2023-12-31)");

    let current = views.rows.snapshot();
    assert_eq!(current.selected_date, Some(DateSelection::from("2024-01-01")));
    assert_eq!(
        current.status.data().unwrap().occupancy,
        RowOccupancy::new([1, 0, 0, 0])
    );
}

#[tokio::test]
async fn test_reload_picks_up_new_documents() {
    let repo = Arc::new(support::sample_repository());
    let views = DashboardViews::new(repo.clone(), 7);
    views.table.activate().await;

    let mut body = serde_json::Map::new();
    body.insert(
        "d".to_string(),
        serde_json::json!({"unix_timestamp": support::T0 + 86400, "camera_id": 2}),
    );
    repo.insert_document("sleep", "2024-01-02", body);

    // The cached index is kept until reload.
    assert_eq!(views.table.snapshot().dates.len(), 2);

    let reloaded = views.table.reload().await;
    assert_eq!(reloaded.dates[0], DateKey::new("2024-01-02"));
    assert_eq!(
        reloaded.selected_date,
        Some(DateSelection::from("2024-01-02"))
    );
    let data = reloaded.status.data().unwrap();
    assert!(data.rows[0].camera1.is_none());
    assert!(data.rows[0].camera2.is_some());
}
