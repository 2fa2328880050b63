//! Handler for `swapwidget resolve`.

use std::path::Path;

use serde_json::json;

use super::output;
use super::scenario::Scenario;
use crate::domain::ResolvedAction;
use crate::error::Result;

/// Execute `resolve <scenario>`.
pub fn execute(path: &Path) -> Result<()> {
    let scenario = Scenario::load(path)?;
    let action = scenario.evaluate()?;

    output::section("Scenario");
    output::field("File", path.display());
    if let Some(chain_id) = scenario.connection_chain {
        output::field("Connected", format!("chain {chain_id}"));
    } else {
        output::field("Connected", output::muted("no"));
    }
    if let Some(amount) = &scenario.amount {
        output::field("Amount", amount);
    }
    if let Some(balance) = &scenario.balance {
        output::field("Balance", balance);
    }

    let mut payload = json!({
        "action": action.label(),
        "detail": action.to_string(),
        "submittable": action.is_submittable(),
    });
    match &action {
        ResolvedAction::SwitchChain(chain_id) => payload["chain_id"] = json!(chain_id.value()),
        ResolvedAction::Approve { state, .. } => payload["approval"] = json!(state.to_string()),
        ResolvedAction::Swap { signature, .. } => {
            payload["permit"] = json!(signature.is_some());
        }
        ResolvedAction::Disabled(_) | ResolvedAction::Wrap(_) => {}
    }

    output::section("Action");
    output::outcome("action", &action.to_string(), payload);
    Ok(())
}
