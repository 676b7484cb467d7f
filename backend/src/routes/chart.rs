use serde::{Deserialize, Serialize};

// =========================================================
// Labeled-series payload consumed by the chart renderer
// =========================================================

/// Visual styling of one dataset, flattened next to its values on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyle {
    pub background_color: String,
    pub border_color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
}

impl ChartStyle {
    /// Outlined bar style.
    pub fn bar(background_color: &str, border_color: &str) -> Self {
        Self {
            background_color: background_color.to_string(),
            border_color: border_color.to_string(),
            border_width: Some(1),
            ..Default::default()
        }
    }

    /// Filled, smoothed line style.
    pub fn filled_line(border_color: &str, background_color: &str, tension: f64) -> Self {
        Self {
            background_color: background_color.to_string(),
            border_color: border_color.to_string(),
            fill: Some(true),
            tension: Some(tension),
            ..Default::default()
        }
    }
}

/// One labeled series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataset {
    pub label: String,
    pub data: Vec<f64>,
    #[serde(flatten)]
    pub style: ChartStyle,
}

/// Labels plus the datasets plotted against them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<ChartDataset>,
}

impl ChartData {
    /// Chart with a single dataset.
    pub fn single(
        labels: Vec<String>,
        label: impl Into<String>,
        data: Vec<f64>,
        style: ChartStyle,
    ) -> Self {
        Self {
            labels,
            datasets: vec![ChartDataset {
                label: label.into(),
                data,
                style,
            }],
        }
    }

    /// True when there is nothing to plot: no labels, or every value is zero.
    pub fn is_blank(&self) -> bool {
        self.labels.is_empty()
            || self
                .datasets
                .iter()
                .all(|ds| ds.data.iter().all(|v| *v == 0.0))
    }
}
