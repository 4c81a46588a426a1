// Hierarchy builder - folds classified rows into Tab > Grid > Chart trees
use crate::application::board_context::BoardContext;
use crate::application::errors::{Level, StructuralError};
use crate::application::id_generator::IdGenerator;
use crate::domain::row::{ChartHeader, ClassifiedRow, MetricSide};
use crate::domain::template::{Chart, Grid, Metric, Tab, TemplateConfig};
use std::sync::Arc;

/// Grid still accepting charts, with its open chart (if any).
#[derive(Debug)]
struct OpenGrid {
    grid: Grid,
    chart: Option<Chart>,
}

impl OpenGrid {
    fn close_chart(&mut self) {
        if let Some(chart) = self.chart.take() {
            self.grid.charts.push(chart);
        }
    }

    fn finish(mut self) -> Grid {
        self.close_chart();
        self.grid
    }
}

/// Tab still accepting grids, with its open grid (if any).
#[derive(Debug)]
struct OpenTab {
    tab: Tab,
    grid: Option<OpenGrid>,
}

impl OpenTab {
    fn close_grid(&mut self) {
        if let Some(open) = self.grid.take() {
            self.tab.grids.push(open.finish());
        }
    }

    fn finish(mut self) -> Tab {
        self.close_grid();
        self.tab
    }
}

/// Row-driven state machine. Holds at most one open entity per level; the
/// nesting of the open slots guarantees a chart is never open without its grid
/// and a grid never without its tab.
pub struct HierarchyBuilder {
    ids: Arc<dyn IdGenerator>,
    board: BoardContext,
    tab: Option<OpenTab>,
}

impl HierarchyBuilder {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            ids,
            board: BoardContext::new(),
            tab: None,
        }
    }

    /// Advance the state by one row. A rejected row leaves the state untouched.
    pub fn apply(&mut self, row_index: usize, row: &ClassifiedRow) -> Result<(), StructuralError> {
        self.check(row)
            .map_err(|missing| StructuralError::new(row_index, missing))?;

        if let Some(title) = &row.tab_title {
            self.open_tab(title);
        }
        if let Some(title) = &row.grid_title {
            self.open_grid(title)
                .map_err(|missing| StructuralError::new(row_index, missing))?;
        }
        match &row.chart {
            Some(header) => self
                .open_chart(header, row)
                .map_err(|missing| StructuralError::new(row_index, missing))?,
            None if row.has_payload() => self
                .extend_chart(row)
                .map_err(|missing| StructuralError::new(row_index, missing))?,
            None => {}
        }

        Ok(())
    }

    /// Flush every open level, innermost first, and hand back the configs
    /// grouped Dashboards then Reports.
    pub fn finish(mut self) -> Vec<TemplateConfig> {
        self.close_tab();
        self.board.finish()
    }

    /// Verify that every ancestor this row needs will be open once its own
    /// markers have been applied.
    fn check(&self, row: &ClassifiedRow) -> Result<(), Level> {
        let tab_open = row.has_new_tab() || self.tab.is_some();
        if row.has_new_grid() && !tab_open {
            return Err(Level::Tab);
        }

        // A new tab closes the current grid; a new grid replaces it.
        let grid_open = row.has_new_grid() || (!row.has_new_tab() && self.current_grid().is_some());
        if row.has_new_chart() && !grid_open {
            return Err(Level::Grid);
        }

        let chart_open = !row.has_new_tab()
            && !row.has_new_grid()
            && self.current_grid().and_then(|g| g.chart.as_ref()).is_some();
        if !row.has_new_chart() && row.has_payload() && !chart_open {
            return Err(Level::Chart);
        }

        Ok(())
    }

    fn current_grid(&self) -> Option<&OpenGrid> {
        self.tab.as_ref().and_then(|t| t.grid.as_ref())
    }

    fn close_tab(&mut self) {
        if let Some(open) = self.tab.take() {
            let tab = open.finish();
            if let Err(tab) = self.board.commit_tab(tab) {
                tracing::error!("Tab {:?} finished without a board context", tab.title);
            }
        }
    }

    fn open_tab(&mut self, title: &str) {
        // Commit before switching: the closing tab belongs to the old board.
        self.close_tab();
        self.board.on_new_tab_row(title, self.ids.as_ref());

        tracing::debug!("Opening tab {:?} on {:?} board", title, self.board.current());
        self.tab = Some(OpenTab {
            tab: Tab::new(self.ids.next_id(), title.to_string()),
            grid: None,
        });
    }

    fn open_grid(&mut self, title: &str) -> Result<(), Level> {
        let open_tab = self.tab.as_mut().ok_or(Level::Tab)?;
        open_tab.close_grid();

        let position = open_tab.tab.grids.len();
        tracing::debug!("Opening grid {:?} at position {}", title, position);
        open_tab.grid = Some(OpenGrid {
            grid: Grid::new(self.ids.next_id(), title.to_string(), position),
            chart: None,
        });
        Ok(())
    }

    fn open_chart(&mut self, header: &ChartHeader, row: &ClassifiedRow) -> Result<(), Level> {
        let open_grid = self
            .tab
            .as_mut()
            .and_then(|t| t.grid.as_mut())
            .ok_or(Level::Grid)?;
        open_grid.close_chart();

        let mut chart = Chart::new(self.ids.next_id(), header.chart_type.clone(), header.title.clone());
        if let Some(dimension) = &row.dimension {
            chart.dimensions.push(dimension.clone());
        }
        if let Some(metric) = &row.metric {
            push_metric(&mut chart, metric.clone(), MetricSide::for_new_chart());
        }

        tracing::debug!("Opening {} chart {:?}", chart.chart_type, chart.title);
        open_grid.chart = Some(chart);
        Ok(())
    }

    fn extend_chart(&mut self, row: &ClassifiedRow) -> Result<(), Level> {
        let chart = self
            .tab
            .as_mut()
            .and_then(|t| t.grid.as_mut())
            .and_then(|g| g.chart.as_mut())
            .ok_or(Level::Chart)?;

        if let Some(dimension) = &row.dimension {
            chart.dimensions.push(dimension.clone());
        }
        if let Some(metric) = &row.metric {
            let side = MetricSide::for_continuation(&chart.chart_type);
            push_metric(chart, metric.clone(), side);
        }
        Ok(())
    }
}

fn push_metric(chart: &mut Chart, metric: Metric, side: MetricSide) {
    match side {
        MetricSide::Left => chart.left_metrics.push(metric),
        MetricSide::Right => chart.right_metrics.push(metric),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::id_generator::SequentialIds;
    use crate::domain::board::BoardType;

    fn builder() -> HierarchyBuilder {
        HierarchyBuilder::new(Arc::new(SequentialIds::default()))
    }

    fn classify(cells: &[&str]) -> ClassifiedRow {
        ClassifiedRow::classify(cells).unwrap()
    }

    fn build(rows: &[&[&str]]) -> Vec<TemplateConfig> {
        let mut builder = builder();
        for (idx, cells) in rows.iter().enumerate() {
            if let Some(row) = ClassifiedRow::classify(*cells) {
                builder.apply(idx, &row).unwrap();
            }
        }
        builder.finish()
    }

    fn count(configs: &[TemplateConfig]) -> (usize, usize, usize) {
        let tabs = configs.iter().flat_map(|c| &c.tabs);
        let grids = tabs.clone().flat_map(|t| &t.grids);
        let charts = grids.clone().flat_map(|g| &g.charts);
        (tabs.count(), grids.count(), charts.count())
    }

    #[test]
    fn test_round_trip_scenario() {
        let configs = build(&[
            &["Tab1", "Grid1", "Line", "Chart1", "DimA", "d1", "M1", "m1"],
            &["", "", "", "", "", "", "M2", "m2"],
        ]);

        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].board_type, BoardType::Dashboard);
        assert_eq!(configs[0].tabs.len(), 1);

        let tab = &configs[0].tabs[0];
        assert_eq!(tab.title, "Tab1");
        assert_eq!(tab.grids.len(), 1);

        let grid = &tab.grids[0];
        assert_eq!(grid.title, "Grid1");
        assert_eq!(grid.charts.len(), 1);

        let chart = &grid.charts[0];
        assert_eq!(chart.chart_type, "Line");
        assert_eq!(chart.title, "Chart1");
        assert_eq!(chart.dimensions, vec![Metric::new("DimA", "d1")]);
        assert_eq!(chart.left_metrics, vec![Metric::new("M1", "m1")]);
        assert_eq!(chart.right_metrics, vec![Metric::new("M2", "m2")]);
    }

    #[test]
    fn test_continuation_under_bar_goes_left() {
        let configs = build(&[
            &["Tab1", "Grid1", "Bar", "Chart1", "", "", "M1", "m1"],
            &["", "", "", "", "", "", "M2", "m2"],
            &["", "", "", "", "DimB", "d2"],
        ]);

        let chart = &configs[0].tabs[0].grids[0].charts[0];
        assert_eq!(
            chart.left_metrics,
            vec![Metric::new("M1", "m1"), Metric::new("M2", "m2")]
        );
        assert!(chart.right_metrics.is_empty());
        assert_eq!(chart.dimensions, vec![Metric::new("DimB", "d2")]);
    }

    #[test]
    fn test_counts_match_marker_cells() {
        let rows: &[&[&str]] = &[
            &["Overview", "KPIs", "Table", "Top", "Region", "r", "Sales", "s"],
            &["", "", "Line", "Trend", "Day", "d", "Sales", "s"],
            &["", "", "", "", "", "", "Orders", "o"],
            &["", "Breakdown", "Bar", "By region", "Region", "r", "Sales", "s"],
            &["Weekly Report", "Summary", "Table", "Weekly", "Week", "w", "Sales", "s"],
            &["", "", "Bar", "Weekly bars"],
            &["Detail", "Raw"],
            &["", "", "Table", "Raw rows"],
        ];
        let configs = build(rows);

        let marked = |col: usize| rows.iter().filter(|r| r.get(col).is_some_and(|c| !c.is_empty())).count();
        assert_eq!(count(&configs), (marked(0), marked(1), marked(2)));
        assert_eq!(count(&configs), (3, 4, 6));
    }

    #[test]
    fn test_end_of_stream_flushes_every_level() {
        let configs = build(&[
            &["Tab1", "Grid1", "Bar", "First"],
            &["", "Grid2", "Line", "Last", "", "", "M", "m"],
        ]);

        let tab = &configs[0].tabs[0];
        assert_eq!(tab.grids.len(), 2);
        assert_eq!(tab.grids[1].charts.len(), 1);
        assert_eq!(tab.grids[1].charts[0].title, "Last");
    }

    #[test]
    fn test_new_grid_closes_chart_into_previous_grid() {
        let configs = build(&[
            &["Tab1", "Grid1", "Bar", "A"],
            &["", "Grid2", "Bar", "B"],
        ]);

        let grids = &configs[0].tabs[0].grids;
        assert_eq!(grids[0].charts.len(), 1);
        assert_eq!(grids[0].charts[0].title, "A");
        assert_eq!(grids[1].charts[0].title, "B");
        assert_eq!(grids[0].position, 0);
        assert_eq!(grids[1].position, 1);
    }

    #[test]
    fn test_continuation_row_never_opens_entities() {
        let mut builder = builder();
        builder.apply(0, &classify(&["Tab1", "Grid1", "Bar", "A"])).unwrap();
        for idx in 1..5 {
            builder.apply(idx, &classify(&["", "", "", "", "D", "d", "M", "m"])).unwrap();
        }

        let configs = builder.finish();
        assert_eq!(count(&configs), (1, 1, 1));
        let chart = &configs[0].tabs[0].grids[0].charts[0];
        assert_eq!(chart.dimensions.len(), 4);
        assert_eq!(chart.left_metrics.len(), 4);
    }

    #[test]
    fn test_mid_stream_board_switch() {
        let configs = build(&[
            &["Overview", "G1", "Bar", "C1"],
            &["Weekly Report", "G2", "Table", "C2"],
            &["Dashboard", "G3", "Line", "C3"],
        ]);

        let summary: Vec<(BoardType, Vec<&str>)> = configs
            .iter()
            .map(|c| (c.board_type, c.tabs.iter().map(|t| t.title.as_str()).collect()))
            .collect();
        assert_eq!(
            summary,
            vec![
                (BoardType::Dashboard, vec!["Overview"]),
                (BoardType::Dashboard, vec!["Dashboard"]),
                (BoardType::Report, vec!["Weekly Report"]),
            ]
        );
        assert_eq!(configs[2].template_type, "TAB_CHART");
        assert_ne!(configs[0].template_config_id, configs[1].template_config_id);
    }

    #[test]
    fn test_zero_rows() {
        assert!(build(&[]).is_empty());
    }

    #[test]
    fn test_empty_rows_are_skipped() {
        let configs = build(&[&["Tab1", "Grid1", "Bar", "A"], &[], &["", "", "", "", "", "", "M", "m"]]);
        assert_eq!(configs[0].tabs[0].grids[0].charts[0].left_metrics.len(), 1);
    }

    #[test]
    fn test_metric_without_chart_is_structural_error() {
        let mut builder = builder();
        builder.apply(0, &classify(&["Tab1", "Grid1"])).unwrap();

        let err = builder
            .apply(1, &classify(&["", "", "", "", "", "", "M", "m"]))
            .unwrap_err();
        assert_eq!(err, StructuralError::new(1, Level::Chart));
    }

    #[test]
    fn test_grid_without_tab_is_structural_error() {
        let mut builder = builder();
        let err = builder.apply(0, &classify(&["", "Grid1", "Bar", "A"])).unwrap_err();
        assert_eq!(err, StructuralError::new(0, Level::Tab));
    }

    #[test]
    fn test_chart_without_grid_is_structural_error() {
        let mut builder = builder();
        let err = builder.apply(3, &classify(&["Tab1", "", "Bar", "A"])).unwrap_err();
        assert_eq!(err, StructuralError::new(3, Level::Grid));
    }

    #[test]
    fn test_new_tab_does_not_carry_payload_into_closed_chart() {
        let mut builder = builder();
        builder.apply(0, &classify(&["Tab1", "Grid1", "Bar", "A"])).unwrap();

        let err = builder
            .apply(1, &classify(&["Tab2", "", "", "", "Dim", "d"]))
            .unwrap_err();
        assert_eq!(err.missing, Level::Chart);
    }

    #[test]
    fn test_rejected_row_leaves_state_untouched() {
        let mut builder = builder();
        builder.apply(0, &classify(&["Tab1", "Grid1", "Bar", "A"])).unwrap();
        // opens a tab, but the chart needs a grid the new tab does not have
        assert!(builder.apply(1, &classify(&["Tab2", "", "Line", "B"])).is_err());
        builder.apply(2, &classify(&["", "", "", "", "", "", "M", "m"])).unwrap();

        let configs = builder.finish();
        assert_eq!(count(&configs), (1, 1, 1));
        assert_eq!(configs[0].tabs[0].grids[0].charts[0].left_metrics.len(), 1);
    }

    #[test]
    fn test_ids_are_generated_per_entity() {
        let configs = build(&[&["Tab1", "Grid1", "Bar", "A"]]);

        let config = &configs[0];
        let tab = &config.tabs[0];
        let grid = &tab.grids[0];
        assert_eq!(config.template_config_id, "id-1");
        assert_eq!(tab.template_tab_id, "id-2");
        assert_eq!(grid.template_grid_id, "id-3");
        assert_eq!(grid.charts[0].template_chart_id, "id-4");
    }
}
