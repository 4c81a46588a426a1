use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/templates";
const ENV_PREFIX: &str = "BOARD_TEMPLATES";

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub template: TemplateSettings,
    pub source: SourceSettings,
    pub sheets: SheetsSettings,
    pub parser: ParserSettings,
    pub output: OutputSettings,
    pub server: ServerSettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TemplateSettings {
    pub name: String,
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self {
            name: "Generated Template".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Sheets,
    File,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SourceSettings {
    pub kind: SourceKind,
    pub path: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: SourceKind::Sheets,
            path: "rows.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SheetsSettings {
    pub spreadsheet_id: String,
    pub range: String,
    pub endpoint: String,
    pub api_key: Option<String>,
    pub access_token: Option<String>,
    pub max_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for SheetsSettings {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            range: "Sheet1!A4:J".to_string(),
            endpoint: "https://sheets.googleapis.com".to_string(),
            api_key: None,
            access_token: None,
            max_attempts: 3,
            retry_delay_ms: 500,
        }
    }
}

/// What to do with a row that has no open ancestor to attach to.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StructuralPolicy {
    #[default]
    Abort,
    Skip,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct ParserSettings {
    pub on_structural_error: StructuralPolicy,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct OutputSettings {
    pub path: String,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            path: "output_template.json".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Load the config file at `path` (extension optional), overlaid by
/// `BOARD_TEMPLATES__SECTION__KEY` environment variables.
pub fn load_config(path: &str) -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
