// Board family domain model
use serde::Serialize;
use std::fmt;

const REPORT_MARKER: &str = "Report";

/// The two mutually exclusive template families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoardType {
    Dashboard,
    Report,
}

impl BoardType {
    /// Tab titles containing "Report" (case-sensitive) belong to a Report board.
    pub fn classify(tab_title: &str) -> Self {
        if tab_title.contains(REPORT_MARKER) {
            BoardType::Report
        } else {
            BoardType::Dashboard
        }
    }

    /// Structural tag emitted as `template_type`.
    pub fn template_type(self) -> &'static str {
        match self {
            BoardType::Dashboard => "TAB_GRID_CHART",
            BoardType::Report => "TAB_CHART",
        }
    }
}

impl fmt::Display for BoardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardType::Dashboard => f.write_str("DASHBOARD"),
            BoardType::Report => f.write_str("REPORT"),
        }
    }
}
