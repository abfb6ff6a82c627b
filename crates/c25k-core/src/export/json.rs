use super::ExportError;
use crate::plan::Session;

pub fn render(sessions: &[Session]) -> Result<String, ExportError> {
    let mut body = serde_json::to_string_pretty(sessions)?;
    body.push('\n');
    Ok(body)
}

/// Reload a previously exported session list.
pub fn parse(body: &str) -> Result<Vec<Session>, ExportError> {
    Ok(serde_json::from_str(body)?)
}
