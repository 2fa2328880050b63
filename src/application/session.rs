//! Swap session: the widget's single logical task.
//!
//! The session owns the connector registry, the latest quote and reads, and
//! the approval resolver. Every update recomputes strictly downstream:
//! active connection, then approval state, then the resolved action. The
//! action itself is always computed synchronously from the latest known
//! state; asynchronous work (connecting, quoting, reading, signing,
//! submitting) only feeds that state.

use std::collections::HashMap;
use std::sync::Arc;

use alloy_primitives::{Address, U256};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::approval::{ApprovalInputs, ApprovalResolver};
use super::connector::{ConnectorPrioritizer, ConnectorRegistry};
use super::dispatch::{DispatchPorts, Submission, SubmissionDispatcher, SubmitContext};
use super::routing::{quote_request, QuoteService};
use super::tracker::TransactionLog;
use crate::domain::{
    resolve, ActionInputs, ActiveConnection, Approval, ApprovalState, ChainId, Connection,
    ConnectorKind, Currency, CurrencyAmount, PermitSupport, ResolvedAction, Slippage, TradeState,
    TradeType, TxHash, TxStatus, WrapType,
};
use crate::error::{ApprovalError, ConnectError, SubmissionError};
use crate::port::{
    AllowanceReader, Connector, PermitSigner, QuoteRequest, TransactionSender,
    TransactionTracker, TxEventHandler,
};

/// Swap settings fixed at construction.
#[derive(Debug, Clone)]
pub struct SwapSettings {
    /// Router contract that spends the input token.
    pub spender: Address,
    /// Tolerance applied when the user's slippage is automatic.
    pub auto_slippage: Decimal,
    /// Cap on a user-entered tolerance.
    pub max_slippage: Decimal,
    pub permit_enabled: bool,
    pub permit_deadline_secs: u64,
}

/// What the user entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapForm {
    pub input: Option<Currency>,
    pub output: Option<Currency>,
    pub trade_type: TradeType,
    /// Entered amount, in the input currency for exact-input trades and the
    /// output currency for exact-output trades.
    pub amount: Option<CurrencyAmount>,
    pub slippage: Slippage,
    /// Host override disabling the action.
    pub disabled: bool,
}

impl Default for SwapForm {
    fn default() -> Self {
        Self {
            input: None,
            output: None,
            trade_type: TradeType::ExactInput,
            amount: None,
            slippage: Slippage::default(),
            disabled: false,
        }
    }
}

impl SwapForm {
    /// Chain of the selected tokens, preferring the input.
    #[must_use]
    pub fn token_chain(&self) -> Option<ChainId> {
        self.input
            .as_ref()
            .or(self.output.as_ref())
            .map(Currency::chain_id)
    }

    #[must_use]
    pub fn wrap_type(&self) -> Option<WrapType> {
        WrapType::detect(self.input.as_ref(), self.output.as_ref())
    }
}

/// Everything a front end renders for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapView {
    pub active: ActiveConnection,
    pub trade: TradeState,
    pub input_amount: Option<CurrencyAmount>,
    pub input_balance: Option<CurrencyAmount>,
    pub approval: Approval,
    pub action: ResolvedAction,
    /// A submission is in flight; the action button is busy.
    pub busy: bool,
}

/// Result of pressing the action button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The active connector moved to another chain.
    Switched(Connection),
    /// A transaction was sent or a permit signed.
    Submitted(Submission),
}

/// External collaborators of a session.
pub struct SessionPorts {
    pub reader: Arc<dyn AllowanceReader>,
    pub sender: Arc<dyn TransactionSender>,
    pub signer: Arc<dyn PermitSigner>,
    pub handlers: Arc<dyn TxEventHandler>,
}

fn unix_now() -> u64 {
    u64::try_from(Utc::now().timestamp()).unwrap_or_default()
}

/// One swap widget instance.
pub struct SwapSession {
    settings: SwapSettings,
    registry: ConnectorRegistry,
    prioritizer: ConnectorPrioritizer,
    quotes: QuoteService,
    reader: Arc<dyn AllowanceReader>,
    dispatcher: SubmissionDispatcher,
    approval: ApprovalResolver,
    form: SwapForm,
    last_request: Option<QuoteRequest>,
    trade: TradeState,
    balance: Option<CurrencyAmount>,
    allowance: Option<U256>,
    permit_support: HashMap<Address, PermitSupport>,
}

impl SwapSession {
    #[must_use]
    pub fn new(
        settings: SwapSettings,
        registry: ConnectorRegistry,
        quotes: QuoteService,
        ports: SessionPorts,
    ) -> Self {
        let dispatcher = SubmissionDispatcher::new(
            DispatchPorts {
                sender: ports.sender,
                signer: ports.signer,
                reader: Arc::clone(&ports.reader),
                handlers: ports.handlers,
            },
            Arc::new(TransactionLog::new()),
        );
        Self {
            approval: ApprovalResolver::new(settings.permit_enabled),
            settings,
            registry,
            prioritizer: ConnectorPrioritizer::new(),
            quotes,
            reader: ports.reader,
            dispatcher,
            form: SwapForm::default(),
            last_request: None,
            trade: TradeState::Idle,
            balance: None,
            allowance: None,
            permit_support: HashMap::new(),
        }
    }

    #[must_use]
    pub fn registry(&self) -> &ConnectorRegistry {
        &self.registry
    }

    #[must_use]
    pub fn prioritizer(&self) -> &ConnectorPrioritizer {
        &self.prioritizer
    }

    #[must_use]
    pub fn form(&self) -> &SwapForm {
        &self.form
    }

    #[must_use]
    pub fn transactions(&self) -> &Arc<TransactionLog> {
        self.dispatcher.log()
    }

    /// Run the connect policy for the current registry.
    pub async fn connect(&mut self) -> ActiveConnection {
        self.prioritizer.initialize(&self.registry).await;
        self.prioritizer.active(&self.registry)
    }

    /// Replace the host-supplied connector and re-run the connect policy.
    pub async fn set_user_connector(&mut self, user: Option<Arc<dyn Connector>>) -> ActiveConnection {
        self.registry = self.registry.with_user(user);
        self.connect().await
    }

    /// Replace the form. Quotes and reads are refreshed by [`Self::refresh`].
    pub fn set_form(&mut self, form: SwapForm) {
        self.form = form;
    }

    fn allowed_slippage(&self) -> Decimal {
        self.form
            .slippage
            .allowed(self.settings.auto_slippage)
            .min(self.settings.max_slippage)
    }

    /// Input amount implied by the form and the current quote.
    fn input_amount(&self) -> Option<CurrencyAmount> {
        let amount = self.form.amount.as_ref()?;
        match self.form.trade_type {
            TradeType::ExactInput => Some(amount.clone()),
            TradeType::ExactOutput if self.form.wrap_type().is_some() => {
                // Wraps are 1:1.
                let input = self.form.input.clone()?;
                Some(CurrencyAmount::from_raw(input, amount.raw()))
            }
            TradeType::ExactOutput => self.trade.trade().map(|t| t.input_amount().clone()),
        }
    }

    /// Fetch the quote and on-chain reads the form needs, then resolve.
    pub async fn refresh(&mut self) -> SwapView {
        let active = self.prioritizer.active(&self.registry);

        let request = if self.form.wrap_type().is_some() {
            None
        } else {
            quote_request(
                self.form.trade_type,
                self.form.input.as_ref(),
                self.form.output.as_ref(),
                self.form.amount.as_ref(),
            )
        };
        if request != self.last_request {
            match self.quotes.trade_state(request.as_ref()).await {
                Ok(trade) => {
                    self.trade = trade;
                    self.last_request = request;
                }
                Err(error) => {
                    // Unrecorded, so the next refresh asks again.
                    warn!(error = %error, "Quote failed");
                    self.trade = TradeState::NoRoute;
                    self.last_request = None;
                }
            }
        }

        self.read_token_state(active.account()).await;
        self.resolve()
    }

    async fn read_token_state(&mut self, account: Option<Address>) {
        self.balance = None;
        self.allowance = None;
        let (Some(owner), Some(input)) = (account, self.form.input.clone()) else {
            return;
        };

        match self.reader.balance(&input, owner).await {
            Ok(balance) => self.balance = Some(balance),
            Err(error) => warn!(currency = %input, error = %error, "Balance read failed"),
        }

        let Some(token) = input.address() else {
            return;
        };
        match self
            .reader
            .allowance(token, owner, self.settings.spender)
            .await
        {
            Ok(allowance) => self.allowance = Some(allowance),
            Err(error) => warn!(token = %token, error = %error, "Allowance read failed"),
        }
        if self.settings.permit_enabled && !self.permit_support.contains_key(&token) {
            let support = self.reader.permit_support(token).await;
            debug!(token = %token, support = ?support, "Permit support detected");
            self.permit_support.insert(token, support);
        }
    }

    /// Resolve the view from the latest known state without suspending.
    pub fn resolve(&mut self) -> SwapView {
        let active = self.prioritizer.active(&self.registry);
        let input_amount = self.input_amount();
        let permit_support = self
            .form
            .input
            .as_ref()
            .and_then(Currency::address)
            .and_then(|token| self.permit_support.get(&token).copied())
            .unwrap_or_default();

        let approval = self.approval.resolve(&ApprovalInputs {
            trade: self.trade.trade(),
            allowed_slippage: self.allowed_slippage(),
            amount: input_amount.as_ref(),
            allowance: self.allowance,
            permit_support,
            now: unix_now(),
        });

        let action = resolve(&ActionInputs {
            connection_chain: active.chain_id(),
            token_chain: self.form.token_chain(),
            trade: &self.trade,
            wrap: self.form.wrap_type(),
            input_amount: input_amount.as_ref(),
            input_balance: self.balance.as_ref(),
            approval: &approval,
            disabled: self.form.disabled,
        });

        SwapView {
            active,
            trade: self.trade.clone(),
            input_amount,
            input_balance: self.balance.clone(),
            approval,
            action,
            busy: self.dispatcher.is_busy(),
        }
    }

    /// Execute the currently resolved action.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError`] if the action cannot be submitted or the
    /// wallet refuses it. Approval failures also roll the approval state back.
    pub async fn submit(&mut self) -> Result<SubmitOutcome, SubmissionError> {
        let view = self.resolve();
        let input_amount = view.input_amount.clone();
        let context = SubmitContext {
            account: view.active.account(),
            spender: self.settings.spender,
            allowed_slippage: self.allowed_slippage(),
            input_amount: input_amount.as_ref(),
            now: unix_now(),
            permit_deadline_secs: self.settings.permit_deadline_secs,
        };

        if !view.action.is_submittable() {
            return Err(SubmissionError::NotSubmittable(view.action.to_string()));
        }

        match &view.action {
            ResolvedAction::SwitchChain(chain_id) => self
                .switch_chain(view.active, *chain_id)
                .await
                .map(SubmitOutcome::Switched)
                .map_err(SubmissionError::from),
            ResolvedAction::Approve {
                state: ApprovalState::RequiresPermitSignature,
                ..
            } => {
                let ticket = self.approval.begin_permit();
                let result = self.dispatcher.submit(&view.action, &context).await;
                let signature = match &result {
                    Ok(Submission::Signed(signature)) => Ok(signature.clone()),
                    Ok(Submission::Sent { .. }) => Err(ApprovalError::Signer(
                        "expected a permit signature".to_string(),
                    )),
                    Err(error) => Err(ApprovalError::from(error.clone())),
                };
                let recorded = self.approval.complete_permit(ticket, signature);
                let submission = result?;
                recorded?;
                Ok(SubmitOutcome::Submitted(submission))
            }
            ResolvedAction::Approve {
                state: ApprovalState::RequiresApproval,
                ..
            } => {
                let ticket = self.approval.begin_approval();
                let result = self.dispatcher.submit(&view.action, &context).await;
                let hash = match &result {
                    Ok(Submission::Sent { hash, .. }) => Ok(*hash),
                    Ok(Submission::Signed(_)) => Err(ApprovalError::Signer(
                        "expected an approval transaction".to_string(),
                    )),
                    Err(error) => Err(ApprovalError::from(error.clone())),
                };
                let recorded = self.approval.approval_sent(ticket, hash);
                let submission = result?;
                recorded?;
                Ok(SubmitOutcome::Submitted(submission))
            }
            ResolvedAction::Swap { .. } => {
                let submission = self.dispatcher.submit(&view.action, &context).await?;
                if matches!(submission, Submission::Sent { .. }) {
                    // The swap spends the permit nonce and the approved amount.
                    self.approval.consume();
                }
                Ok(SubmitOutcome::Submitted(submission))
            }
            action => self
                .dispatcher
                .submit(action, &context)
                .await
                .map(SubmitOutcome::Submitted),
        }
    }

    async fn switch_chain(
        &self,
        active: ActiveConnection,
        chain_id: ChainId,
    ) -> Result<Connection, ConnectError> {
        let kind = active.kind().unwrap_or(ConnectorKind::ReadOnlyNetwork);
        let slot = self
            .registry
            .get(kind)
            .ok_or_else(|| ConnectError::Unavailable(format!("no {kind} connector")))?;
        info!(kind = %kind, chain_id = %chain_id, "Switching chain");
        slot.switch_chain(chain_id).await
    }

    /// Poll the tracker for submitted transactions and apply final states.
    pub async fn track(&mut self, tracker: &dyn TransactionTracker) -> Vec<(TxHash, TxStatus)> {
        let pending_approval = self.approval.pending_approval();
        let settled = self.dispatcher.track(tracker).await;
        if let Some((ticket, hash)) = pending_approval {
            if let Some((_, status)) = settled.iter().find(|(settled, _)| *settled == hash) {
                // Reverts are already reported through the host handlers.
                let _ = self.approval.approval_settled(ticket, *status);
            }
        }
        settled
    }
}
