// Row classification - derives structural signals from one sheet row
use super::template::Metric;

/// Chart type whose continuation metrics go on the right axis.
const RIGHT_AXIS_CHART_TYPE: &str = "Line";

/// Column layout of the outline sheet.
pub mod column {
    pub const TAB_TITLE: usize = 0;
    pub const GRID_TITLE: usize = 1;
    pub const CHART_TYPE: usize = 2;
    pub const CHART_TITLE: usize = 3;
    pub const DIMENSION_NAME: usize = 4;
    pub const DIMENSION_ID: usize = 5;
    pub const METRIC_NAME: usize = 6;
    pub const METRIC_ID: usize = 7;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassifiedRow {
    pub tab_title: Option<String>,
    pub grid_title: Option<String>,
    pub chart: Option<ChartHeader>,
    pub dimension: Option<Metric>,
    pub metric: Option<Metric>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartHeader {
    pub chart_type: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSide {
    Left,
    Right,
}

impl ClassifiedRow {
    /// Returns `None` for a row with no cells at all.
    pub fn classify<S: AsRef<str>>(cells: &[S]) -> Option<Self> {
        if cells.is_empty() {
            return None;
        }

        let cell = |idx: usize| cells.get(idx).map(|c| c.as_ref()).unwrap_or("");
        let marker = |idx: usize| Some(cell(idx)).filter(|c| !c.is_empty()).map(str::to_string);

        let chart = marker(column::CHART_TYPE).map(|chart_type| ChartHeader {
            chart_type,
            title: cell(column::CHART_TITLE).to_string(),
        });
        let dimension = marker(column::DIMENSION_NAME)
            .map(|name| Metric::new(name, cell(column::DIMENSION_ID)));
        let metric = marker(column::METRIC_NAME)
            .map(|name| Metric::new(name, cell(column::METRIC_ID)));

        Some(Self {
            tab_title: marker(column::TAB_TITLE),
            grid_title: marker(column::GRID_TITLE),
            chart,
            dimension,
            metric,
        })
    }

    pub fn has_new_tab(&self) -> bool {
        self.tab_title.is_some()
    }

    pub fn has_new_grid(&self) -> bool {
        self.grid_title.is_some()
    }

    pub fn has_new_chart(&self) -> bool {
        self.chart.is_some()
    }

    pub fn has_payload(&self) -> bool {
        self.dimension.is_some() || self.metric.is_some()
    }
}

impl MetricSide {
    /// Placement for a metric on a row that opens a new chart.
    pub fn for_new_chart() -> Self {
        MetricSide::Left
    }

    /// Placement for a metric on a continuation row of an open chart.
    pub fn for_continuation(chart_type: &str) -> Self {
        if chart_type == RIGHT_AXIS_CHART_TYPE {
            MetricSide::Right
        } else {
            MetricSide::Left
        }
    }
}
