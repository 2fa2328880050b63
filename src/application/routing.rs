//! Quote service: supported-chain guard and per-chain router cache.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::{ChainId, Currency, CurrencyAmount, Trade, TradeState, TradeType};
use crate::error::RouteError;
use crate::port::{QuoteRequest, QuoteRouter};

/// Builds the router for one chain.
pub type RouterFactory = Box<dyn Fn(ChainId) -> Arc<dyn QuoteRouter> + Send + Sync>;

/// Build a quote request from the swap form.
///
/// The entered amount fixes one side of the trade; `None` when a currency or
/// the amount is missing, or the amount is zero.
#[must_use]
pub fn quote_request(
    trade_type: TradeType,
    input: Option<&Currency>,
    output: Option<&Currency>,
    amount: Option<&CurrencyAmount>,
) -> Option<QuoteRequest> {
    let (input, output, amount) = (input?, output?, amount?);
    if amount.is_zero() {
        return None;
    }
    let other = match trade_type {
        TradeType::ExactInput => output,
        TradeType::ExactOutput => input,
    };
    Some(QuoteRequest::new(trade_type, amount.clone(), other.clone()))
}

/// Quotes trades through a router per chain.
pub struct QuoteService {
    supported_chains: HashSet<ChainId>,
    factory: RouterFactory,
    routers: Mutex<HashMap<ChainId, Arc<dyn QuoteRouter>>>,
}

impl QuoteService {
    #[must_use]
    pub fn new(supported_chains: impl IntoIterator<Item = ChainId>, factory: RouterFactory) -> Self {
        Self {
            supported_chains: supported_chains.into_iter().collect(),
            factory,
            routers: Mutex::new(HashMap::new()),
        }
    }

    /// A service that uses the same router on every supported chain.
    #[must_use]
    pub fn with_router(
        supported_chains: impl IntoIterator<Item = ChainId>,
        router: Arc<dyn QuoteRouter>,
    ) -> Self {
        Self::new(supported_chains, Box::new(move |_| Arc::clone(&router)))
    }

    #[must_use]
    pub fn supports(&self, chain_id: ChainId) -> bool {
        self.supported_chains.contains(&chain_id)
    }

    fn router(&self, chain_id: ChainId) -> Arc<dyn QuoteRouter> {
        let mut routers = self.routers.lock();
        Arc::clone(
            routers
                .entry(chain_id)
                .or_insert_with(|| (self.factory)(chain_id)),
        )
    }

    /// Number of chains with a cached router.
    #[must_use]
    pub fn cached_routers(&self) -> usize {
        self.routers.lock().len()
    }

    /// Quote a trade.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::UnsupportedChain`] before calling any router
    /// when the chain is not served, or the router's error.
    pub async fn quote(&self, request: &QuoteRequest) -> Result<Trade, RouteError> {
        let chain_id = request.input_currency().chain_id();
        if !self.supports(chain_id) {
            return Err(RouteError::UnsupportedChain(chain_id));
        }
        let router = self.router(chain_id);
        router.route(request).await
    }

    /// Quote a trade and fold the outcome into a [`TradeState`].
    ///
    /// # Errors
    ///
    /// A missing route or an unsupported chain is a settled
    /// [`TradeState::NoRoute`]. Any other router failure is returned so the
    /// caller can retry the same request.
    pub async fn trade_state(
        &self,
        request: Option<&QuoteRequest>,
    ) -> Result<TradeState, RouteError> {
        let Some(request) = request else {
            return Ok(TradeState::Idle);
        };
        match self.quote(request).await {
            Ok(trade) => {
                debug!(
                    input = %trade.input_amount(),
                    output = %trade.output_amount(),
                    "Quote received"
                );
                Ok(TradeState::Valid(trade))
            }
            Err(RouteError::NotFound { input, output }) => {
                debug!(input = %input, output = %output, "No route");
                Ok(TradeState::NoRoute)
            }
            Err(RouteError::UnsupportedChain(chain_id)) => {
                debug!(chain_id = %chain_id, "Chain not routable");
                Ok(TradeState::NoRoute)
            }
            Err(error) => Err(error),
        }
    }
}
