// Template service - Use case for turning an outline sheet into a template document
use crate::application::errors::StructuralError;
use crate::application::hierarchy_builder::HierarchyBuilder;
use crate::application::id_generator::IdGenerator;
use crate::application::table_source::{Row, TableSource};
use crate::domain::row::ClassifiedRow;
use crate::domain::template::{TemplateConfig, TemplateDocument};
use crate::infrastructure::config::{ParserSettings, StructuralPolicy};
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct TemplateService {
    source: Arc<dyn TableSource>,
    ids: Arc<dyn IdGenerator>,
    template_name: String,
    parser: ParserSettings,
}

impl TemplateService {
    pub fn new(
        source: Arc<dyn TableSource>,
        ids: Arc<dyn IdGenerator>,
        template_name: String,
        parser: ParserSettings,
    ) -> Self {
        Self {
            source,
            ids,
            template_name,
            parser,
        }
    }

    pub async fn generate(&self) -> anyhow::Result<TemplateDocument> {
        let rows = self
            .source
            .fetch_rows()
            .await
            .context("Failed to fetch outline rows")?;
        tracing::info!("Fetched {} outline rows", rows.len());

        let configs = self.build_configs(&rows)?;
        tracing::info!("Built {} template configs", configs.len());

        Ok(self.assemble(configs))
    }

    /// Fold the rows into template configs, applying the configured policy to
    /// rows that have no ancestor to attach to.
    pub fn build_configs(&self, rows: &[Row]) -> Result<Vec<TemplateConfig>, StructuralError> {
        let mut builder = HierarchyBuilder::new(self.ids.clone());
        let mut skipped = 0;

        for (idx, cells) in rows.iter().enumerate() {
            let Some(row) = ClassifiedRow::classify(cells.as_slice()) else {
                continue;
            };

            if let Err(e) = builder.apply(idx, &row) {
                match self.parser.on_structural_error {
                    StructuralPolicy::Abort => return Err(e),
                    StructuralPolicy::Skip => {
                        tracing::warn!("Skipping row: {}", e);
                        skipped += 1;
                    }
                }
            }
        }

        if skipped > 0 {
            tracing::warn!("Skipped {} malformed rows", skipped);
        }

        Ok(builder.finish())
    }

    fn assemble(&self, configs: Vec<TemplateConfig>) -> TemplateDocument {
        TemplateDocument::new(self.ids.next_id(), self.template_name.clone(), configs)
    }
}
