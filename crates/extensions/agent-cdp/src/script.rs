//! Page script loader and the expressions evaluated against it.

use tabrelay_protocols::AgentRequest;

/// Global the page script installs itself under.
pub const AGENT_GLOBAL: &str = "window.__tabrelayAgent";

/// The page field agent. Safe to evaluate repeatedly.
pub fn install_script() -> &'static str {
    include_str!("field_agent.js")
}

/// Expression that is `true` once the page script is installed.
pub fn installed_probe() -> String {
    format!("typeof {} === 'object'", AGENT_GLOBAL)
}

/// Expression that hands `request` to the page script.
pub fn request_expression(request: &AgentRequest) -> Result<String, serde_json::Error> {
    let json = serde_json::to_string(request)?;
    Ok(format!("{}.handle({})", AGENT_GLOBAL, json))
}
