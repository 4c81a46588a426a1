// Application state for HTTP handlers
use crate::application::template_service::TemplateService;

#[derive(Clone)]
pub struct AppState {
    pub template_service: TemplateService,
}
