//! Approval and permit resolution for the swap input token.
//!
//! The resolver keeps the lifecycle of one permit request and one approval
//! transaction for the current `(token, amount)` key. Any change of key bumps
//! the generation: cached signatures are dropped and results of attempts
//! started under an older generation are rejected as stale.

use alloy_primitives::{Address, U256};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::domain::{
    Approval, ApprovalState, CurrencyAmount, Operation, PermitSupport, SignatureData, Trade,
    TxHash, TxStatus,
};
use crate::error::ApprovalError;

/// Identifies the generation an async attempt was started under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(u64);

/// Inputs to one approval resolution.
#[derive(Debug, Clone, Copy)]
pub struct ApprovalInputs<'a> {
    pub trade: Option<&'a Trade>,
    /// Slippage tolerance as a fraction (0.005 = 0.5%).
    pub allowed_slippage: Decimal,
    /// The user's input amount.
    pub amount: Option<&'a CurrencyAmount>,
    /// Current router allowance; `None` while unknown.
    pub allowance: Option<U256>,
    pub permit_support: PermitSupport,
    /// Unix time used to check permit deadlines.
    pub now: u64,
}

/// What the router must be allowed to spend for the current trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Requirement {
    pub token: Address,
    pub amount: U256,
}

impl Requirement {
    /// Required authorization, or `None` when nothing needs authorizing
    /// (no trade, no amount, or a native input).
    ///
    /// The amount is the larger of the entered amount and the trade's
    /// slippage-adjusted maximum input.
    #[must_use]
    pub fn for_trade(
        trade: Option<&Trade>,
        amount: Option<&CurrencyAmount>,
        allowed_slippage: Decimal,
    ) -> Option<Self> {
        let (trade, amount) = (trade?, amount?);
        let token = amount.currency().address()?;
        let maximum_in = trade
            .maximum_amount_in(allowed_slippage)
            .map(|max| max.raw())
            .unwrap_or_else(|_| trade.input_amount().raw());
        Some(Self {
            token,
            amount: amount.raw().max(maximum_in),
        })
    }
}

/// Tracks authorization of the input token across update cycles.
#[derive(Debug)]
pub struct ApprovalResolver {
    permit_enabled: bool,
    key: Option<(Address, U256)>,
    generation: u64,
    signature: Option<SignatureData>,
    permit: Operation<(), ApprovalError>,
    approval: Operation<TxHash, ApprovalError>,
    approval_hash: Option<TxHash>,
}

impl ApprovalResolver {
    #[must_use]
    pub fn new(permit_enabled: bool) -> Self {
        Self {
            permit_enabled,
            key: None,
            generation: 0,
            signature: None,
            permit: Operation::Idle,
            approval: Operation::Idle,
            approval_hash: None,
        }
    }

    /// Resolve the approval state, invalidating stale attempts first.
    pub fn resolve(&mut self, inputs: &ApprovalInputs<'_>) -> Approval {
        let key = inputs
            .amount
            .and_then(|amount| Some((amount.currency().address()?, amount.raw())));
        self.rekey(key);

        let Some(required) =
            Requirement::for_trade(inputs.trade, inputs.amount, inputs.allowed_slippage)
        else {
            return Approval::new(ApprovalState::NotRequired);
        };

        if let Some(signature) = &self.signature {
            if signature.covers(required.token, required.amount, inputs.now) {
                return Approval::permitted(signature.clone());
            }
        }

        if self.approval.is_pending() {
            return Approval::new(ApprovalState::PendingApproval);
        }
        if self.approval.succeeded().is_some() {
            return Approval::new(ApprovalState::Approved);
        }
        if inputs
            .allowance
            .is_some_and(|allowance| allowance >= required.amount)
        {
            return Approval::new(ApprovalState::Approved);
        }

        if self.permit_enabled && inputs.permit_support == PermitSupport::Supported {
            Approval::new(ApprovalState::RequiresPermitSignature)
        } else {
            Approval::new(ApprovalState::RequiresApproval)
        }
    }

    fn rekey(&mut self, key: Option<(Address, U256)>) {
        if self.key == key {
            return;
        }
        if self.key.is_some() {
            debug!(
                generation = self.generation + 1,
                "Input changed, invalidating authorization attempts"
            );
        }
        self.key = key;
        self.generation += 1;
        self.signature = None;
        self.permit = Operation::Idle;
        self.approval = Operation::Idle;
        self.approval_hash = None;
    }

    /// Current generation ticket.
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        Ticket(self.generation)
    }

    #[must_use]
    pub fn signature(&self) -> Option<&SignatureData> {
        self.signature.as_ref()
    }

    #[must_use]
    pub fn is_signing(&self) -> bool {
        self.permit.is_pending()
    }

    fn check(&self, ticket: Ticket) -> Result<(), ApprovalError> {
        if ticket.0 == self.generation {
            Ok(())
        } else {
            warn!(
                ticket = ticket.0,
                generation = self.generation,
                "Dropping stale authorization result"
            );
            Err(ApprovalError::Stale)
        }
    }

    /// Mark a permit request as started.
    pub fn begin_permit(&mut self) -> Ticket {
        self.permit = Operation::Pending;
        self.ticket()
    }

    /// Apply the result of a permit request.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Stale`] if the input changed since the
    /// request started; the result is discarded. Otherwise returns the
    /// signer's error after rolling back to the unsigned state.
    pub fn complete_permit(
        &mut self,
        ticket: Ticket,
        result: Result<SignatureData, ApprovalError>,
    ) -> Result<(), ApprovalError> {
        self.check(ticket)?;
        match result {
            Ok(signature) => {
                info!(
                    token = %signature.token,
                    amount = %signature.amount,
                    deadline = signature.deadline,
                    "Permit signed"
                );
                self.signature = Some(signature);
                self.permit = Operation::Succeeded(());
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "Permit request failed");
                self.permit = Operation::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Mark an approval transaction as started.
    pub fn begin_approval(&mut self) -> Ticket {
        self.approval = Operation::Pending;
        self.approval_hash = None;
        self.ticket()
    }

    /// Apply the wallet's answer to an approval transaction.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Stale`] for an outdated ticket, or the
    /// submission error after rolling back.
    pub fn approval_sent(
        &mut self,
        ticket: Ticket,
        result: Result<TxHash, ApprovalError>,
    ) -> Result<(), ApprovalError> {
        self.check(ticket)?;
        match result {
            Ok(hash) => {
                info!(hash = %hash, "Approval submitted");
                self.approval_hash = Some(hash);
                Ok(())
            }
            Err(error) => {
                warn!(error = %error, "Approval submission failed");
                self.approval = Operation::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Apply the tracker's status for the pending approval.
    ///
    /// # Errors
    ///
    /// Returns [`ApprovalError::Stale`] for an outdated ticket and
    /// [`ApprovalError::Reverted`] when the transaction failed.
    pub fn approval_settled(
        &mut self,
        ticket: Ticket,
        status: TxStatus,
    ) -> Result<(), ApprovalError> {
        self.check(ticket)?;
        let Some(hash) = self.approval_hash else {
            return Ok(());
        };
        match status {
            TxStatus::Pending => Ok(()),
            TxStatus::Confirmed => {
                info!(hash = %hash, "Approval confirmed");
                self.approval = Operation::Succeeded(hash);
                Ok(())
            }
            TxStatus::Failed => {
                let error = ApprovalError::Reverted { hash };
                warn!(hash = %hash, "Approval reverted");
                self.approval = Operation::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Drop authorization spent by a sent swap.
    ///
    /// The permit nonce is used up and an exact approval is drawn down, so
    /// the next resolution goes back to the on-chain allowance.
    pub fn consume(&mut self) {
        if self.signature.take().is_some() {
            debug!("Permit consumed by swap");
        }
        self.permit = Operation::Idle;
        if self.approval.succeeded().is_some() {
            self.approval = Operation::Idle;
            self.approval_hash = None;
        }
    }

    /// The approval awaiting confirmation, with its ticket.
    #[must_use]
    pub fn pending_approval(&self) -> Option<(Ticket, TxHash)> {
        if !self.approval.is_pending() {
            return None;
        }
        self.approval_hash.map(|hash| (self.ticket(), hash))
    }

    /// Last authorization failure for the current input, if any.
    #[must_use]
    pub fn last_error(&self) -> Option<&ApprovalError> {
        self.approval.failed().or_else(|| self.permit.failed())
    }
}
