//! Supported chains and their native / wrapped-native assets.
//!
//! The table is the single source for wrap detection and for the default
//! set of chains the quote service accepts.

use std::fmt;

use alloy_primitives::{address, Address};

use super::ChainId;

/// Chains the widget knows how to render and wrap on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SupportedChain {
    Mainnet,
    Goerli,
    Sepolia,
    Optimism,
    Arbitrum,
    Polygon,
    PolygonMumbai,
    Bnb,
    Base,
    Celo,
}

/// Static description of a supported chain.
#[derive(Debug, Clone, Copy)]
pub struct ChainInfo {
    pub chain: SupportedChain,
    pub id: u64,
    pub name: &'static str,
    pub native_symbol: &'static str,
    pub native_decimals: u8,
    pub wrapped_native: Address,
    pub wrapped_symbol: &'static str,
}

const CHAINS: [ChainInfo; 10] = [
    ChainInfo {
        chain: SupportedChain::Mainnet,
        id: 1,
        name: "mainnet",
        native_symbol: "ETH",
        native_decimals: 18,
        wrapped_native: address!("0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
        wrapped_symbol: "WETH",
    },
    ChainInfo {
        chain: SupportedChain::Goerli,
        id: 5,
        name: "goerli",
        native_symbol: "ETH",
        native_decimals: 18,
        wrapped_native: address!("0xb4fbf271143f4fbf7b91a5ded31805e42b2208d6"),
        wrapped_symbol: "WETH",
    },
    ChainInfo {
        chain: SupportedChain::Sepolia,
        id: 11_155_111,
        name: "sepolia",
        native_symbol: "ETH",
        native_decimals: 18,
        wrapped_native: address!("0xfff9976782d46cc05630d1f6ebab18b2324d6b14"),
        wrapped_symbol: "WETH",
    },
    ChainInfo {
        chain: SupportedChain::Optimism,
        id: 10,
        name: "optimism",
        native_symbol: "ETH",
        native_decimals: 18,
        wrapped_native: address!("0x4200000000000000000000000000000000000006"),
        wrapped_symbol: "WETH",
    },
    ChainInfo {
        chain: SupportedChain::Arbitrum,
        id: 42_161,
        name: "arbitrum",
        native_symbol: "ETH",
        native_decimals: 18,
        wrapped_native: address!("0x82af49447d8a07e3bd95bd0d56f35241523fbab1"),
        wrapped_symbol: "WETH",
    },
    ChainInfo {
        chain: SupportedChain::Polygon,
        id: 137,
        name: "polygon",
        native_symbol: "MATIC",
        native_decimals: 18,
        wrapped_native: address!("0x0d500b1d8e8ef31e21c99d1db9a6444d3adf1270"),
        wrapped_symbol: "WMATIC",
    },
    ChainInfo {
        chain: SupportedChain::PolygonMumbai,
        id: 80_001,
        name: "polygon-mumbai",
        native_symbol: "MATIC",
        native_decimals: 18,
        wrapped_native: address!("0x9c3c9283d3e44854697cd22d3faa240cfb032889"),
        wrapped_symbol: "WMATIC",
    },
    ChainInfo {
        chain: SupportedChain::Bnb,
        id: 56,
        name: "bnb",
        native_symbol: "BNB",
        native_decimals: 18,
        wrapped_native: address!("0xbb4cdb9cbd36b01bd1cbaebf2de08d9173bc095c"),
        wrapped_symbol: "WBNB",
    },
    ChainInfo {
        chain: SupportedChain::Base,
        id: 8_453,
        name: "base",
        native_symbol: "ETH",
        native_decimals: 18,
        wrapped_native: address!("0x4200000000000000000000000000000000000006"),
        wrapped_symbol: "WETH",
    },
    ChainInfo {
        chain: SupportedChain::Celo,
        id: 42_220,
        name: "celo",
        native_symbol: "CELO",
        native_decimals: 18,
        // CELO is itself an ERC-20; the token contract stands in as the wrapper.
        wrapped_native: address!("0x471ece3750da237f93b8e339c536989b8978a438"),
        wrapped_symbol: "CELO",
    },
];

impl SupportedChain {
    /// All supported chains in table order.
    pub fn all() -> impl Iterator<Item = SupportedChain> {
        CHAINS.iter().map(|info| info.chain)
    }

    /// Look up a chain by id.
    #[must_use]
    pub fn from_id(id: ChainId) -> Option<Self> {
        CHAINS
            .iter()
            .find(|info| info.id == id.value())
            .map(|info| info.chain)
    }

    /// Static description of this chain.
    #[must_use]
    pub fn info(self) -> &'static ChainInfo {
        // The table has exactly one entry per variant.
        match CHAINS.iter().find(|info| info.chain == self) {
            Some(info) => info,
            None => &CHAINS[0],
        }
    }

    #[must_use]
    pub fn id(self) -> ChainId {
        ChainId::new(self.info().id)
    }
}

impl fmt::Display for SupportedChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().name)
    }
}

/// Return the chain description for an id, if supported.
#[must_use]
pub fn chain_info(id: ChainId) -> Option<&'static ChainInfo> {
    CHAINS.iter().find(|info| info.id == id.value())
}
