//! Service layer for derivations and page orchestration.
//!
//! The derivation modules are pure functions over extracted records. The
//! [`view_processor`] module drives them against the store, one processor per
//! dashboard page, and [`views`] defines what each page reads and renders.

pub mod date_index;
pub mod duration_buckets;
pub mod record_grouper;
pub mod row_classifier;
pub mod row_occupancy;
pub mod sequencer;
pub mod sleep_counts;

pub mod view_processor;
pub mod views;

pub use date_index::{index_dates, DateIndex};
pub use duration_buckets::{bucket_durations, bucket_index, DURATION_BUCKET_LABELS};
pub use record_grouper::{group_by_time, sort_rows_by_time};
pub use row_classifier::{classify_row, RowBucket};
pub use row_occupancy::{aggregate_row_occupancy, qualifying_bucket, row_status};
pub use sleep_counts::{sleep_count_series, SleepCountSeries};
pub use view_processor::{ViewKind, ViewProcessor, ViewSnapshot, ViewStatus};
pub use views::{AnalyticsView, DashboardViews, DurationsView, RowsView, TableView};
