use std::sync::Arc;

use alloy_primitives::U256;
use rust_decimal_macros::dec;

use swapwidget::application::{QuoteService, SessionPorts, SwapForm, SwapSession, SwapSettings};
use swapwidget::domain::{default_auto_slippage, PermitSupport, SupportedChain};
use swapwidget::testkit::domain::{amount, dai, eth, usdc, weth, ROUTER};
use swapwidget::testkit::events::RecordingHandler;
use swapwidget::testkit::router::StaticRouter;
use swapwidget::testkit::token::StaticReader;
use swapwidget::testkit::wallet::{ScriptedSender, ScriptedSigner};

use super::connectors::Backends;

/// 500 USDC in raw units.
pub const USDC_BALANCE: u64 = 500_000_000;

pub fn settings(permit_enabled: bool) -> SwapSettings {
    SwapSettings {
        spender: ROUTER,
        auto_slippage: default_auto_slippage(),
        max_slippage: dec!(0.5),
        permit_enabled,
        permit_deadline_secs: 1800,
    }
}

pub fn usdc_dai_form(value: &str) -> SwapForm {
    SwapForm {
        input: Some(usdc()),
        output: Some(dai()),
        amount: Some(amount(&usdc(), value)),
        ..SwapForm::default()
    }
}

pub fn wrap_form(value: &str) -> SwapForm {
    SwapForm {
        input: Some(eth()),
        output: Some(weth()),
        amount: Some(amount(&eth(), value)),
        ..SwapForm::default()
    }
}

/// A session with every collaborator kept for inspection.
pub struct Harness {
    pub session: SwapSession,
    pub backends: Backends,
    pub router: Arc<StaticRouter>,
    pub reader: Arc<StaticReader>,
    pub sender: Arc<ScriptedSender>,
    pub signer: Arc<ScriptedSigner>,
    pub events: Arc<RecordingHandler>,
}

pub struct HarnessBuilder {
    backends: Backends,
    router: StaticRouter,
    reader: StaticReader,
    sender: ScriptedSender,
    signer: ScriptedSigner,
    permit_enabled: bool,
}

impl HarnessBuilder {
    /// Injected wallet on mainnet holding 500 USDC with no allowance.
    pub fn new() -> Self {
        Self {
            backends: Backends::injected_wallet(1),
            router: StaticRouter::rate("0.99"),
            reader: StaticReader::new().with_balance(U256::from(USDC_BALANCE)),
            sender: ScriptedSender::new(),
            signer: ScriptedSigner::new(),
            permit_enabled: true,
        }
    }

    pub fn backends(mut self, backends: Backends) -> Self {
        self.backends = backends;
        self
    }

    pub fn router(mut self, router: StaticRouter) -> Self {
        self.router = router;
        self
    }

    pub fn reader(mut self, reader: StaticReader) -> Self {
        self.reader = reader;
        self
    }

    pub fn permit(mut self, support: PermitSupport) -> Self {
        self.reader = self.reader.with_permit(support);
        self
    }

    pub fn sender(mut self, sender: ScriptedSender) -> Self {
        self.sender = sender;
        self
    }

    pub fn signer(mut self, signer: ScriptedSigner) -> Self {
        self.signer = signer;
        self
    }

    pub fn permit_enabled(mut self, enabled: bool) -> Self {
        self.permit_enabled = enabled;
        self
    }

    pub fn build(self) -> Harness {
        let router = Arc::new(self.router);
        let reader = Arc::new(self.reader);
        let sender = Arc::new(self.sender);
        let signer = Arc::new(self.signer);
        let events = Arc::new(RecordingHandler::new());

        let quotes = QuoteService::with_router(
            SupportedChain::all().map(SupportedChain::id),
            router.clone(),
        );
        let session = SwapSession::new(
            settings(self.permit_enabled),
            self.backends.registry(),
            quotes,
            SessionPorts {
                reader: reader.clone(),
                sender: sender.clone(),
                signer: signer.clone(),
                handlers: events.clone(),
            },
        );

        Harness {
            session,
            backends: self.backends,
            router,
            reader,
            sender,
            signer,
            events,
        }
    }
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}
