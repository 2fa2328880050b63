//! Handler for `swapwidget connect`.

use std::path::Path;

use serde_json::json;

use super::output;
use crate::application::ConnectorPrioritizer;
use crate::domain::ActiveConnection;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_registry;
use crate::infrastructure::config::settings::Config;

/// Execute `connect`: build the registry, run the connect policy once and
/// report every slot and the resulting active connection.
pub async fn execute(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let registry = build_registry(&config)?;
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;
    let active = prioritizer.active(&registry);

    output::section("Connectors");
    for slot in registry.prioritized() {
        let state = slot.state();
        let status = match (&state.error, state.chain_id, state.account) {
            (Some(error), _, _) => output::muted(error),
            (None, Some(chain_id), Some(account)) => format!("{account} on chain {chain_id}"),
            (None, Some(chain_id), None) => format!("read-only on chain {chain_id}"),
            (None, None, _) => output::muted("idle"),
        };
        output::field(&slot.kind().to_string(), status);
    }

    let payload = json!({
        "kind": active.kind().map(|kind| kind.to_string()),
        "chain_id": active.chain_id().map(|id| id.value()),
        "account": active.account().map(|account| account.to_string()),
    });
    output::section("Active");
    output::outcome("connection", &active.to_string(), payload);

    if active == ActiveConnection::Disconnected {
        output::warning("No connector provides a chain");
    }
    Ok(())
}
