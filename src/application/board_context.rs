// Board context - tracks the active board family and its template configs
use crate::application::id_generator::IdGenerator;
use crate::domain::board::BoardType;
use crate::domain::template::{Tab, TemplateConfig};

#[derive(Debug, Default)]
pub struct BoardContext {
    current: Option<BoardType>,
    dashboards: Vec<TemplateConfig>,
    reports: Vec<TemplateConfig>,
}

impl BoardContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<BoardType> {
        self.current
    }

    /// Enter the board family named by `tab_title`, opening a fresh
    /// TemplateConfig when the context is unset or switches family.
    pub fn on_new_tab_row(&mut self, tab_title: &str, ids: &dyn IdGenerator) {
        let target = BoardType::classify(tab_title);

        match self.current {
            Some(current) if current == target => {
                tracing::debug!("Same {} template continuation", target);
                return;
            }
            Some(current) => {
                tracing::debug!("Changing from {} template to {} template", current, target);
            }
            None => {
                tracing::debug!("Starting with {} template", target);
            }
        }

        let config = TemplateConfig::new(ids.next_id(), target);
        self.configs_mut(target).push(config);
        self.current = Some(target);
    }

    /// Append a finished tab to the TemplateConfig active right now.
    /// Returns the tab back when no board context has been entered yet.
    pub fn commit_tab(&mut self, tab: Tab) -> Result<(), Tab> {
        let Some(board) = self.current else {
            return Err(tab);
        };

        match self.configs_mut(board).last_mut() {
            Some(config) => {
                tracing::debug!("Appending {} tab {:?}", board, tab.title);
                config.tabs.push(tab);
                Ok(())
            }
            None => Err(tab),
        }
    }

    /// Dashboards first, then reports, each in discovery order.
    pub fn finish(self) -> Vec<TemplateConfig> {
        let mut configs = self.dashboards;
        configs.extend(self.reports);
        configs
    }

    fn configs_mut(&mut self, board: BoardType) -> &mut Vec<TemplateConfig> {
        match board {
            BoardType::Dashboard => &mut self.dashboards,
            BoardType::Report => &mut self.reports,
        }
    }
}
