use handlebars::{handlebars_helper, Handlebars};
use metascan_core::{AppError, ReportRecord};
use serde_json::Value;

const REPORT_TEMPLATE: &str = "report";
const REPORT_SOURCE: &str = include_str!("../../templates/report.html.hbs");

handlebars_helper!(display: |value: Json| display_value(value));

/// Scalars print bare, null prints empty, arrays and objects print as compact JSON.
fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// HTML rendering of a [`ReportRecord`]. Values are HTML-escaped.
pub struct ReportTemplate {
    registry: Handlebars<'static>,
}

impl ReportTemplate {
    pub fn new() -> Result<Self, AppError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        registry.register_helper("display", Box::new(display));
        registry
            .register_template_string(REPORT_TEMPLATE, REPORT_SOURCE)
            .map_err(|e| AppError::RenderFailure(format!("invalid report template: {}", e)))?;

        Ok(Self { registry })
    }

    pub fn render(&self, report: &ReportRecord) -> Result<String, AppError> {
        self.registry
            .render(REPORT_TEMPLATE, report)
            .map_err(|e| AppError::RenderFailure(e.to_string()))
    }
}
