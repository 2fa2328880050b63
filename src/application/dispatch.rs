//! Submission dispatcher: executes the resolved action once per request.
//!
//! Only one submission may be in flight at a time; a second request made
//! while the wallet is still answering the first fails with
//! [`SubmissionError::InFlight`] and reaches no collaborator. Host handlers
//! hear about every transaction the wallet accepted or refused, but never
//! about actions rejected locally (a disabled or pending action).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::application::approval::Requirement;
use crate::domain::{
    chain_info, ApprovalState, CurrencyAmount, ResolvedAction, SignatureData, Trade,
    TransactionInfo, TxHash, TxStatus, WrapType,
};
use crate::error::SubmissionError;
use crate::port::{
    AllowanceReader, PermitRequest, PermitSigner, TransactionRequest, TransactionSender,
    TransactionTracker, TxEventHandler,
};

use super::tracker::TransactionLog;

/// Session facts a submission needs besides the action itself.
#[derive(Debug, Clone, Copy)]
pub struct SubmitContext<'a> {
    pub account: Option<Address>,
    /// Router contract authorized to spend the input.
    pub spender: Address,
    pub allowed_slippage: Decimal,
    pub input_amount: Option<&'a CurrencyAmount>,
    /// Unix time.
    pub now: u64,
    pub permit_deadline_secs: u64,
}

/// Outcome of a dispatched action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// The wallet accepted a transaction.
    Sent { hash: TxHash, info: TransactionInfo },
    /// The wallet signed a permit.
    Signed(SignatureData),
}

/// Collaborators the dispatcher drives.
pub struct DispatchPorts {
    pub sender: Arc<dyn TransactionSender>,
    pub signer: Arc<dyn PermitSigner>,
    pub reader: Arc<dyn AllowanceReader>,
    pub handlers: Arc<dyn TxEventHandler>,
}

/// Clears the in-flight flag when the submission ends, however it ends.
struct InFlight<'a>(&'a AtomicBool);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Executes resolved actions and reports them to the host.
pub struct SubmissionDispatcher {
    ports: DispatchPorts,
    log: Arc<TransactionLog>,
    in_flight: AtomicBool,
}

impl SubmissionDispatcher {
    #[must_use]
    pub fn new(ports: DispatchPorts, log: Arc<TransactionLog>) -> Self {
        Self {
            ports,
            log,
            in_flight: AtomicBool::new(false),
        }
    }

    /// Whether a submission is in flight (the action button is busy).
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn log(&self) -> &Arc<TransactionLog> {
        &self.log
    }

    /// Execute `action`.
    ///
    /// # Errors
    ///
    /// Returns [`SubmissionError::NotSubmittable`] for actions that cannot
    /// be pressed, [`SubmissionError::InFlight`] while another submission
    /// runs, and otherwise the collaborator's error.
    pub async fn submit(
        &self,
        action: &ResolvedAction,
        context: &SubmitContext<'_>,
    ) -> Result<Submission, SubmissionError> {
        if !action.is_submittable() {
            return Err(SubmissionError::NotSubmittable(action.to_string()));
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            debug!(action = action.label(), "Submission already in flight");
            return Err(SubmissionError::InFlight);
        }
        let _guard = InFlight(&self.in_flight);

        let account = context.account.ok_or(SubmissionError::NoAccount)?;
        info!(action = action.label(), account = %account, "Submitting action");

        match action {
            ResolvedAction::Approve {
                trade,
                state: ApprovalState::RequiresPermitSignature,
            } => self.sign_permit(trade, account, context).await,
            ResolvedAction::Approve { trade, .. } => {
                let (request, info) = approve_request(trade, context)?;
                self.send(account, &request, info).await
            }
            ResolvedAction::Swap { trade, signature } => {
                let (request, info) = swap_request(trade, signature.clone(), context)?;
                self.send(account, &request, info).await
            }
            ResolvedAction::Wrap(wrap_type) => {
                let (request, info) = wrap_request(*wrap_type, context)?;
                self.send(account, &request, info).await
            }
            // Chain switches go through the active connector.
            ResolvedAction::SwitchChain(_) | ResolvedAction::Disabled(_) => Err(
                SubmissionError::NotSubmittable(action.to_string()),
            ),
        }
    }

    async fn send(
        &self,
        account: Address,
        request: &TransactionRequest,
        info: TransactionInfo,
    ) -> Result<Submission, SubmissionError> {
        match self.ports.sender.send(account, request).await {
            Ok(hash) => {
                info!(
                    hash = %hash,
                    kind = %info.transaction_type(),
                    "Transaction submitted"
                );
                self.log.add(hash, info.clone());
                self.ports.handlers.on_tx_submit(hash, &info);
                Ok(Submission::Sent { hash, info })
            }
            Err(error) => {
                warn!(kind = %info.transaction_type(), error = %error, "Transaction failed");
                self.ports.handlers.on_tx_fail(None, &info, &error);
                Err(error)
            }
        }
    }

    async fn sign_permit(
        &self,
        trade: &Trade,
        owner: Address,
        context: &SubmitContext<'_>,
    ) -> Result<Submission, SubmissionError> {
        let required = Requirement::for_trade(
            Some(trade),
            context.input_amount,
            context.allowed_slippage,
        )
        .ok_or_else(|| SubmissionError::NotSubmittable("nothing to permit".to_string()))?;

        let reader = &self.ports.reader;
        let (nonce, token_name) = tokio::try_join!(
            reader.nonce(required.token, owner),
            reader.name(required.token)
        )?;

        let request = PermitRequest {
            chain_id: trade.input_currency().chain_id(),
            token: required.token,
            token_name,
            owner,
            spender: context.spender,
            amount: required.amount,
            nonce,
            deadline: context.now + context.permit_deadline_secs,
        };
        let signature = self.ports.signer.sign_permit(&request).await?;
        debug!(token = %request.token, nonce = %request.nonce, "Permit request signed");
        Ok(Submission::Signed(signature))
    }

    /// Apply a tracker status to a logged transaction and notify handlers
    /// when it becomes final.
    pub fn settle(&self, hash: TxHash, status: TxStatus) {
        let Some(transaction) = self.log.set_status(hash, status) else {
            return;
        };
        match status {
            TxStatus::Confirmed => {
                info!(hash = %hash, "Transaction confirmed");
                self.ports.handlers.on_tx_success(hash, &transaction.info);
            }
            TxStatus::Failed => {
                warn!(hash = %hash, "Transaction reverted");
                let error = SubmissionError::Reverted { hash };
                self.ports
                    .handlers
                    .on_tx_fail(Some(hash), &transaction.info, &error);
            }
            TxStatus::Pending => {}
        }
    }

    /// Poll the tracker for every pending transaction.
    ///
    /// Returns the transactions that reached a final status.
    pub async fn track(&self, tracker: &dyn TransactionTracker) -> Vec<(TxHash, TxStatus)> {
        let mut settled = Vec::new();
        for hash in self.log.pending() {
            let status = tracker.status(hash).await;
            if status.is_final() {
                self.settle(hash, status);
                settled.push((hash, status));
            }
        }
        settled
    }
}

fn approve_request(
    trade: &Trade,
    context: &SubmitContext<'_>,
) -> Result<(TransactionRequest, TransactionInfo), SubmissionError> {
    let required =
        Requirement::for_trade(Some(trade), context.input_amount, context.allowed_slippage)
            .ok_or_else(|| SubmissionError::NotSubmittable("nothing to approve".to_string()))?;
    let request = TransactionRequest::Approve {
        token: required.token,
        spender: context.spender,
        amount: required.amount,
    };
    let info = TransactionInfo::Approval {
        token: required.token,
        spender: context.spender,
        amount: required.amount,
    };
    Ok((request, info))
}

fn swap_request(
    trade: &Trade,
    permit: Option<SignatureData>,
    context: &SubmitContext<'_>,
) -> Result<(TransactionRequest, TransactionInfo), SubmissionError> {
    let parameters = trade
        .method_parameters()
        .cloned()
        .ok_or(SubmissionError::MissingCalldata)?;
    let minimum_output = trade
        .minimum_amount_out(context.allowed_slippage)
        .map_err(|e| SubmissionError::NotSubmittable(e.to_string()))?;
    let maximum_input = trade
        .maximum_amount_in(context.allowed_slippage)
        .map_err(|e| SubmissionError::NotSubmittable(e.to_string()))?;
    let info = TransactionInfo::swap(trade, minimum_output, maximum_input);
    Ok((TransactionRequest::Swap { parameters, permit }, info))
}

fn wrap_request(
    wrap_type: WrapType,
    context: &SubmitContext<'_>,
) -> Result<(TransactionRequest, TransactionInfo), SubmissionError> {
    let amount = context
        .input_amount
        .ok_or_else(|| SubmissionError::NotSubmittable("missing wrap amount".to_string()))?;
    let chain_id = amount.currency().chain_id();
    let wrapped = chain_info(chain_id)
        .map(|info| info.wrapped_native)
        .ok_or_else(|| SubmissionError::NotSubmittable(format!("cannot wrap on chain {chain_id}")))?;
    let request = TransactionRequest::Wrap {
        wrapped,
        wrap_type,
        amount: amount.raw(),
    };
    Ok((request, TransactionInfo::wrap(wrap_type, amount.clone())))
}
