pub mod analytics;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod records;
pub mod routes;
pub mod state;

#[cfg(test)]
mod test_support;

pub fn build_state() -> anyhow::Result<state::AppState> {
    let schema_raw = include_str!("../contracts/analytics_request.schema.json");
    let schema: serde_json::Value = serde_json::from_str(schema_raw)?;
    let config = config::AnalyticsConfig::from_env()?;
    Ok(state::AppState::new(config, schema))
}
