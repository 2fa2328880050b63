//! Handler for the `config` command group.

use std::path::Path;

use rust_decimal::Decimal;

use super::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::wallet::UserProviderKind;

/// Execute `config check`.
pub fn execute_check(path: &Path) -> Result<()> {
    let config = Config::load(path)?;
    let endpoints = config.json_rpc.endpoints()?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Chain", config.default_chain_id);
    output::field("Spender", config.swap.spender);
    output::field(
        "Slippage",
        format!(
            "{}% (max {}%)",
            config.swap.default_slippage * Decimal::ONE_HUNDRED,
            config.swap.max_slippage * Decimal::ONE_HUNDRED
        ),
    );
    output::field("Permits", if config.swap.permit_enabled { "enabled" } else { "disabled" });
    output::field("Router", format!("{} chains", config.router.supported_chains.len()));

    if endpoints.is_empty() {
        output::warning("No JSON-RPC endpoints configured (network connector will not probe)");
    } else {
        let mut chains: Vec<_> = endpoints.keys().copied().collect();
        chains.sort();
        for chain_id in chains {
            output::field(&format!("RPC {chain_id}"), endpoints[&chain_id].len());
        }
    }
    if !endpoints.contains_key(&config.default_chain_id) && !endpoints.is_empty() {
        output::warning("Default chain has no JSON-RPC endpoint");
    }

    match config.wallet.provider {
        UserProviderKind::JsonRpc => output::success("Local wallet key detected"),
        UserProviderKind::Eip1193 => output::note("EIP-1193 wallet is supplied by the host page"),
        UserProviderKind::None | UserProviderKind::Bridge => {
            output::field("Wallet", output::muted("none (read-only)"));
        }
    }

    output::success("Configuration check complete");
    Ok(())
}
