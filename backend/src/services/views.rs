//! The four dashboard pages as [`ViewKind`]s, plus the set that serves them.

use std::sync::Arc;

use crate::api::{
    DateSelection, DurationHistogramData, RowDistributionData, TableData, TimeSeriesData,
    ViewName, DURATION_COLLECTION, SLEEP_COLLECTION,
};
use crate::db::repository::DocumentRepository;
use crate::models::{
    extract_detections, extract_sessions, DetectionRecord, DurationSession, RawDocument,
};
use crate::services::duration_buckets::{bucket_durations, is_empty_histogram};
use crate::services::record_grouper::{group_by_time, sort_rows_by_time};
use crate::services::row_occupancy::aggregate_row_occupancy;
use crate::services::sleep_counts::sleep_count_series;
use crate::services::view_processor::{ViewKind, ViewProcessor, ViewStatus};

const SLEEP_FETCH_ERROR: &str = "Failed to fetch sleep data";
const DURATION_FETCH_ERROR: &str = "Failed to fetch sleep duration data";

// =========================================================
// Detection table
// =========================================================

/// Camera captures paired by display time.
#[derive(Debug, Clone, Copy)]
pub struct TableView {
    pub offset_hours: i32,
}

impl ViewKind for TableView {
    type Cache = Vec<DetectionRecord>;
    type Output = TableData;

    fn name(&self) -> ViewName {
        ViewName::Table
    }

    fn collection(&self) -> &'static str {
        SLEEP_COLLECTION
    }

    fn fetch_error(&self) -> &'static str {
        SLEEP_FETCH_ERROR
    }

    fn allows_all_dates(&self) -> bool {
        true
    }

    fn build_cache(&self, documents: &[RawDocument]) -> Self::Cache {
        extract_detections(documents)
    }

    fn render(&self, cache: &Self::Cache, selection: &DateSelection) -> ViewStatus<TableData> {
        let mut rows = group_by_time(cache, selection.date(), self.offset_hours);
        if rows.is_empty() {
            return ViewStatus::empty("No data available");
        }
        sort_rows_by_time(&mut rows);
        let total = rows.len();
        ViewStatus::Ready {
            data: TableData { rows, total },
        }
    }
}

// =========================================================
// Sleep count time series
// =========================================================

/// Sleep count over one day.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnalyticsView;

impl ViewKind for AnalyticsView {
    type Cache = Vec<DetectionRecord>;
    type Output = TimeSeriesData;

    fn name(&self) -> ViewName {
        ViewName::Analytics
    }

    fn collection(&self) -> &'static str {
        SLEEP_COLLECTION
    }

    fn fetch_error(&self) -> &'static str {
        SLEEP_FETCH_ERROR
    }

    fn build_cache(&self, documents: &[RawDocument]) -> Self::Cache {
        extract_detections(documents)
    }

    fn render(&self, cache: &Self::Cache, selection: &DateSelection) -> ViewStatus<TimeSeriesData> {
        let Some(date) = selection.date() else {
            return self.prompt();
        };
        let series = sleep_count_series(cache, date);
        if series.is_empty() {
            return ViewStatus::empty("No data available for this date");
        }
        ViewStatus::Ready {
            data: TimeSeriesData::new(date.as_str(), series.labels, series.values),
        }
    }

    fn no_dates(&self) -> ViewStatus<TimeSeriesData> {
        self.prompt()
    }

    fn prompt(&self) -> ViewStatus<TimeSeriesData> {
        ViewStatus::prompt("Please select a date to view the graph")
    }
}

// =========================================================
// Duration histogram
// =========================================================

/// Session durations of one day, bucketed.
#[derive(Debug, Clone, Copy, Default)]
pub struct DurationsView;

impl ViewKind for DurationsView {
    type Cache = Vec<DurationSession>;
    type Output = DurationHistogramData;

    fn name(&self) -> ViewName {
        ViewName::Durations
    }

    fn collection(&self) -> &'static str {
        DURATION_COLLECTION
    }

    fn fetch_error(&self) -> &'static str {
        DURATION_FETCH_ERROR
    }

    fn refetch_on_select(&self) -> bool {
        true
    }

    fn build_cache(&self, documents: &[RawDocument]) -> Self::Cache {
        extract_sessions(documents)
    }

    fn render(
        &self,
        cache: &Self::Cache,
        selection: &DateSelection,
    ) -> ViewStatus<DurationHistogramData> {
        let Some(date) = selection.date() else {
            return self.prompt();
        };
        let day: Vec<DurationSession> = cache
            .iter()
            .filter(|session| session.date == *date)
            .cloned()
            .collect();
        let bins = bucket_durations(&day);
        if is_empty_histogram(&bins) {
            return ViewStatus::empty(format!("No sleep duration data for {}.", date));
        }
        ViewStatus::Ready {
            data: DurationHistogramData::new(date.as_str(), bins),
        }
    }

    fn no_dates(&self) -> ViewStatus<DurationHistogramData> {
        ViewStatus::empty("No sleep duration data available.")
    }
}

// =========================================================
// Row distribution
// =========================================================

/// Qualifying detections per seat row for one day.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowsView;

impl ViewKind for RowsView {
    type Cache = Vec<DetectionRecord>;
    type Output = RowDistributionData;

    fn name(&self) -> ViewName {
        ViewName::Rows
    }

    fn collection(&self) -> &'static str {
        SLEEP_COLLECTION
    }

    fn fetch_error(&self) -> &'static str {
        SLEEP_FETCH_ERROR
    }

    fn allows_all_dates(&self) -> bool {
        true
    }

    fn refetch_on_select(&self) -> bool {
        true
    }

    fn build_cache(&self, documents: &[RawDocument]) -> Self::Cache {
        extract_detections(documents)
    }

    fn render(
        &self,
        cache: &Self::Cache,
        selection: &DateSelection,
    ) -> ViewStatus<RowDistributionData> {
        // "All Dates" filters on the empty key, which no document has.
        let filter = selection.as_filter_str();
        let occupancy = aggregate_row_occupancy(cache, filter);
        if occupancy.is_empty() {
            let scope = if selection.is_all() { "All Dates" } else { filter };
            return ViewStatus::empty(format!("No sleeping rows detected for {}.", scope));
        }
        ViewStatus::Ready {
            data: RowDistributionData::new(filter, occupancy),
        }
    }
}

// =========================================================
// The dashboard
// =========================================================

/// One processor per page, all sharing the same store handle.
pub struct DashboardViews {
    pub table: Arc<ViewProcessor<TableView>>,
    pub analytics: Arc<ViewProcessor<AnalyticsView>>,
    pub durations: Arc<ViewProcessor<DurationsView>>,
    pub rows: Arc<ViewProcessor<RowsView>>,
}

impl DashboardViews {
    pub fn new(repository: Arc<dyn DocumentRepository>, table_offset_hours: i32) -> Self {
        Self {
            table: Arc::new(ViewProcessor::new(
                TableView {
                    offset_hours: table_offset_hours,
                },
                repository.clone(),
            )),
            analytics: Arc::new(ViewProcessor::new(AnalyticsView, repository.clone())),
            durations: Arc::new(ViewProcessor::new(DurationsView, repository.clone())),
            rows: Arc::new(ViewProcessor::new(RowsView, repository)),
        }
    }

    /// Activate every page concurrently. Failures stay local to their page.
    pub async fn activate_all(&self) {
        futures::join!(
            self.table.activate(),
            self.analytics.activate(),
            self.durations.activate(),
            self.rows.activate(),
        );
    }
}
