//! Submission dispatcher: single in-flight submission and host callbacks.

use std::sync::Arc;

use alloy_primitives::Address;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use swapwidget::application::{DispatchPorts, Submission, SubmissionDispatcher, SubmitContext, TransactionLog};
use swapwidget::domain::{
    CurrencyAmount, DisabledReason, ResolvedAction, Trade, TradeType, TransactionType, TxStatus,
};
use swapwidget::error::SubmissionError;
use swapwidget::testkit::connector::WALLET_ACCOUNT;
use swapwidget::testkit::domain::{amount, dai, usdc, usdc_dai_trade, ROUTER};
use swapwidget::testkit::events::{RecordingHandler, TxEvent};
use swapwidget::testkit::token::StaticReader;
use swapwidget::testkit::wallet::{ScriptedSender, ScriptedSigner};

struct Rig {
    dispatcher: SubmissionDispatcher,
    sender: Arc<ScriptedSender>,
    events: Arc<RecordingHandler>,
}

fn rig(sender: ScriptedSender) -> Rig {
    let sender = Arc::new(sender);
    let events = Arc::new(RecordingHandler::new());
    let dispatcher = SubmissionDispatcher::new(
        DispatchPorts {
            sender: sender.clone(),
            signer: Arc::new(ScriptedSigner::new()),
            reader: Arc::new(StaticReader::new()),
            handlers: events.clone(),
        },
        Arc::new(TransactionLog::new()),
    );
    Rig {
        dispatcher,
        sender,
        events,
    }
}

fn context(input: &CurrencyAmount, account: Option<Address>) -> SubmitContext<'_> {
    SubmitContext {
        account,
        spender: ROUTER,
        allowed_slippage: dec!(0.005),
        input_amount: Some(input),
        now: 1_700_000_000,
        permit_deadline_secs: 1800,
    }
}

fn swap(trade: Trade) -> ResolvedAction {
    ResolvedAction::Swap {
        trade,
        signature: None,
    }
}

#[tokio::test]
async fn concurrent_submission_is_rejected() {
    let (sender, gate) = ScriptedSender::gated();
    let rig = rig(sender);
    let trade = usdc_dai_trade("100");
    let input = trade.input_amount().clone();
    let action = swap(trade);
    let ctx = context(&input, Some(WALLET_ACCOUNT));

    let (first, second) = tokio::join!(rig.dispatcher.submit(&action, &ctx), async {
        let second = rig.dispatcher.submit(&action, &ctx).await;
        gate.notify_one();
        second
    });

    assert!(matches!(first, Ok(Submission::Sent { hash, .. }) if hash == ScriptedSender::hash(1)));
    assert_eq!(second, Err(SubmissionError::InFlight));
    assert_eq!(rig.sender.calls(), 1);
    assert!(!rig.dispatcher.is_busy());
    assert_eq!(
        rig.events.events(),
        vec![TxEvent::Submitted(ScriptedSender::hash(1), TransactionType::Swap)]
    );
}

#[tokio::test]
async fn submission_after_completion_is_accepted() {
    let rig = rig(ScriptedSender::new());
    let trade = usdc_dai_trade("100");
    let input = trade.input_amount().clone();
    let action = swap(trade);
    let ctx = context(&input, Some(WALLET_ACCOUNT));

    rig.dispatcher.submit(&action, &ctx).await.unwrap();
    rig.dispatcher.submit(&action, &ctx).await.unwrap();
    assert_eq!(rig.sender.calls(), 2);
    assert_eq!(rig.dispatcher.log().len(), 2);
}

#[tokio::test]
async fn disabled_action_reaches_nobody() {
    let rig = rig(ScriptedSender::new());
    let input = amount(&usdc(), "100");
    let action = ResolvedAction::Disabled(DisabledReason::MissingBalance);

    let result = rig
        .dispatcher
        .submit(&action, &context(&input, Some(WALLET_ACCOUNT)))
        .await;

    assert!(matches!(result, Err(SubmissionError::NotSubmittable(_))));
    assert_eq!(rig.sender.calls(), 0);
    assert!(rig.events.events().is_empty());
}

#[tokio::test]
async fn wallet_rejection_is_reported_without_hash() {
    let rig = rig(ScriptedSender::rejecting("user denied"));
    let trade = usdc_dai_trade("100");
    let input = trade.input_amount().clone();

    let result = rig
        .dispatcher
        .submit(&swap(trade), &context(&input, Some(WALLET_ACCOUNT)))
        .await;

    let rejected = SubmissionError::Rejected("user denied".to_string());
    assert_eq!(result, Err(rejected.clone()));
    assert_eq!(
        rig.events.events(),
        vec![TxEvent::Failed(None, TransactionType::Swap, rejected)]
    );
    assert!(rig.dispatcher.log().is_empty());
    assert!(!rig.dispatcher.is_busy());
}

#[tokio::test]
async fn missing_account_is_an_error() {
    let rig = rig(ScriptedSender::new());
    let trade = usdc_dai_trade("100");
    let input = trade.input_amount().clone();

    let result = rig.dispatcher.submit(&swap(trade), &context(&input, None)).await;

    assert_eq!(result, Err(SubmissionError::NoAccount));
    assert_eq!(rig.sender.calls(), 0);
}

#[tokio::test]
async fn trade_without_calldata_is_not_sent() {
    let rig = rig(ScriptedSender::new());
    let input = amount(&usdc(), "100");
    let trade = Trade::try_new(
        TradeType::ExactInput,
        input.clone(),
        amount(&dai(), "99"),
        Decimal::ZERO,
    )
    .unwrap();

    let result = rig
        .dispatcher
        .submit(&swap(trade), &context(&input, Some(WALLET_ACCOUNT)))
        .await;

    assert_eq!(result, Err(SubmissionError::MissingCalldata));
    assert_eq!(rig.sender.calls(), 0);
}

#[tokio::test]
async fn reverted_transaction_is_reported_once() {
    let rig = rig(ScriptedSender::new());
    let trade = usdc_dai_trade("100");
    let input = trade.input_amount().clone();
    rig.dispatcher
        .submit(&swap(trade), &context(&input, Some(WALLET_ACCOUNT)))
        .await
        .unwrap();

    let hash = ScriptedSender::hash(1);
    rig.dispatcher.settle(hash, TxStatus::Failed);
    rig.dispatcher.settle(hash, TxStatus::Failed);

    assert_eq!(
        rig.events.events(),
        vec![
            TxEvent::Submitted(hash, TransactionType::Swap),
            TxEvent::Failed(
                Some(hash),
                TransactionType::Swap,
                SubmissionError::Reverted { hash }
            ),
        ]
    );
    assert_eq!(
        rig.dispatcher.log().get(&hash).map(|tx| tx.status),
        Some(TxStatus::Failed)
    );
}

#[tokio::test]
async fn tracking_confirms_pending_transactions() {
    let rig = rig(ScriptedSender::new());
    let trade = usdc_dai_trade("100");
    let input = trade.input_amount().clone();
    let Ok(Submission::Sent { hash, info }) = rig
        .dispatcher
        .submit(&swap(trade), &context(&input, Some(WALLET_ACCOUNT)))
        .await
    else {
        panic!("expected a sent swap");
    };

    let chain = TransactionLog::new();
    chain.add(hash, info);
    assert!(rig.dispatcher.track(&chain).await.is_empty());

    chain.set_status(hash, TxStatus::Confirmed);
    assert_eq!(
        rig.dispatcher.track(&chain).await,
        vec![(hash, TxStatus::Confirmed)]
    );
    assert!(rig.dispatcher.log().pending().is_empty());
    assert_eq!(
        rig.events.events().last(),
        Some(&TxEvent::Succeeded(hash, TransactionType::Swap))
    );
}
