// Template document domain model
use serde::Serialize;

use super::board::BoardType;

/// Top-level envelope written out by the assembler.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateDocument {
    pub global: Global,
}

#[derive(Debug, Clone, Serialize)]
pub struct Global {
    pub template_id: String,
    pub template_name: String,
    pub template_configs: Vec<TemplateConfig>,
}

impl TemplateDocument {
    pub fn new(template_id: String, template_name: String, template_configs: Vec<TemplateConfig>) -> Self {
        Self {
            global: Global {
                template_id,
                template_name,
                template_configs,
            },
        }
    }
}

/// One board instance (a contiguous run of tabs of the same board type).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateConfig {
    pub template_config_id: String,
    pub template_config_name: String,
    pub template_type: String,
    pub board_type: BoardType,
    pub tabs: Vec<Tab>,
}

impl TemplateConfig {
    pub fn new(template_config_id: String, board_type: BoardType) -> Self {
        Self {
            template_config_id,
            template_config_name: String::new(),
            template_type: board_type.template_type().to_string(),
            board_type,
            tabs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tab {
    pub template_tab_id: String,
    pub title: String,
    pub sub_title: String,
    pub grids: Vec<Grid>,
}

impl Tab {
    pub fn new(template_tab_id: String, title: String) -> Self {
        Self {
            template_tab_id,
            title,
            sub_title: String::new(),
            grids: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Grid {
    pub template_grid_id: String,
    pub title: String,
    pub position: usize,
    pub sub_title: String,
    pub styling: GridStyling,
    pub charts: Vec<Chart>,
}

impl Grid {
    pub fn new(template_grid_id: String, title: String, position: usize) -> Self {
        Self {
            template_grid_id,
            title,
            position,
            sub_title: String::new(),
            styling: GridStyling::default(),
            charts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub template_chart_id: String,
    pub chart_type: String,
    pub title: String,
    pub source: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Metric>,
    pub left_metrics: Vec<Metric>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub right_metrics: Vec<Metric>,
    pub grid_position: GridPosition,
    pub styling: ChartStyling,
}

impl Chart {
    pub fn new(template_chart_id: String, chart_type: String, title: String) -> Self {
        Self {
            template_chart_id,
            chart_type,
            title,
            source: String::new(),
            dimensions: Vec::new(),
            left_metrics: Vec::new(),
            right_metrics: Vec::new(),
            grid_position: GridPosition::default(),
            styling: ChartStyling::default(),
        }
    }
}

/// Leaf reference into the external metric catalog. Only `id` and `name` come
/// from the sheet; the rest is filled by a later enrichment step.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub id: String,
    pub name: String,
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub group: String,
    pub category: String,
    pub data_type: String,
    pub metric_type: String,
    pub description: String,
    pub divide_by_million: bool,
    pub aggregation_method: String,
}

impl Metric {
    pub fn new(name: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridPosition {
    pub h: i32,
    pub w: i32,
    pub x: i32,
    pub y: i32,
    #[serde(rename = "maxH")]
    pub max_h: i32,
    #[serde(rename = "minH")]
    pub min_h: i32,
    #[serde(rename = "minW")]
    pub min_w: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GridStyling {
    pub title_style: GridFontStyle,
    pub sub_title_style: GridFontStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GridFontStyle {
    pub font: String,
    pub color: String,
    pub font_size: i32,
    pub font_format: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartStyling {
    pub palette: i32,
    pub title_style: ChartFontStyle,
    pub table_style: TableStyle,
    pub legend_style: CellStyle,
    pub legend_position: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartFontStyle {
    pub font: String,
    pub color: String,
    pub font_size: i32,
    pub font_format: Vec<String>,
    pub alignment: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TableStyle {
    pub table_header: CellStyle,
    pub table_content: CellStyle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CellStyle {
    pub font: String,
    pub font_size: i32,
}
