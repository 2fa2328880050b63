//! Eager-connect policy and active connection selection.

mod support;

use std::sync::Arc;

use support::connectors::Backends;
use swapwidget::application::ConnectorPrioritizer;
use swapwidget::domain::{ActiveConnection, ChainId, ConnectorKind};
use swapwidget::error::ConnectError;
use swapwidget::testkit::connector::{ScriptedConnector, WALLET_ACCOUNT};

#[tokio::test]
async fn user_connector_is_activated_alone() {
    let backends = Backends::injected_wallet(1).with_user(ScriptedConnector::wallet("host", 10));
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();

    assert!(prioritizer.initialize(&registry).await);

    assert_eq!(
        prioritizer.active(&registry),
        ActiveConnection::Wallet {
            kind: ConnectorKind::UserSupplied,
            chain_id: ChainId::new(10),
            account: WALLET_ACCOUNT,
        }
    );
    assert_eq!(backends.user.as_ref().unwrap().activations(), 1);
    assert_eq!(backends.injected.eager_attempts(), 0);
    assert_eq!(backends.network.activations(), 0);
}

#[tokio::test]
async fn user_connector_outranks_a_later_injected_connection() {
    let backends = Backends::injected_wallet(1).with_user(ScriptedConnector::wallet("host", 10));
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;

    let injected = registry.get(ConnectorKind::InjectedProvider).unwrap();
    let connection = injected.activate().await.unwrap();
    assert_eq!(connection.chain_id, ChainId::new(1));
    assert!(injected.state().has_account());

    assert_eq!(
        prioritizer.active(&registry),
        ActiveConnection::Wallet {
            kind: ConnectorKind::UserSupplied,
            chain_id: ChainId::new(10),
            account: WALLET_ACCOUNT,
        }
    );
}

#[tokio::test]
async fn failing_user_connector_has_no_fallback() {
    let backends = Backends::injected_wallet(1).with_user(ScriptedConnector::rejecting("host"));
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;

    assert_eq!(prioritizer.active(&registry), ActiveConnection::Disconnected);
    let user = registry.get(ConnectorKind::UserSupplied).unwrap();
    assert_eq!(user.state().error, Some(ConnectError::Rejected));
}

#[tokio::test]
async fn eager_failures_fall_back_to_read_only() {
    let backends = Backends::headless();
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();

    assert!(prioritizer.initialize(&registry).await);

    assert_eq!(
        prioritizer.active(&registry),
        ActiveConnection::ReadOnly {
            chain_id: ChainId::new(1)
        }
    );
    assert_eq!(backends.injected.eager_attempts(), 1);
    assert_eq!(backends.remote_popup.eager_attempts(), 1);
    assert_eq!(backends.network.activations(), 1);
    let injected = registry.get(ConnectorKind::InjectedProvider).unwrap();
    assert_eq!(injected.state().error, Some(ConnectError::NoSession));
}

#[tokio::test]
async fn qr_connector_waits_for_the_user() {
    let backends = Backends::headless();
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;

    assert_eq!(backends.remote_qr.eager_attempts(), 0);
    assert_eq!(backends.remote_qr.activations(), 0);
}

#[tokio::test]
async fn higher_priority_wallet_wins() {
    let backends = Backends::injected_wallet(1)
        .with_remote_popup(ScriptedConnector::wallet("remote-popup", 137));
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;

    let active = prioritizer.active(&registry);
    assert_eq!(active.kind(), Some(ConnectorKind::InjectedProvider));
    assert_eq!(active.chain_id(), Some(ChainId::new(1)));
}

#[tokio::test]
async fn failed_explicit_activation_keeps_active_wallet() {
    let backends = Backends::headless()
        .with_remote_popup(ScriptedConnector::wallet("remote-popup", 1));
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;
    assert!(matches!(
        prioritizer.active(&registry),
        ActiveConnection::Wallet { kind: ConnectorKind::RemotePopup, .. }
    ));

    let qr = registry.get(ConnectorKind::RemoteQr).unwrap();
    assert!(qr.activate().await.is_err());
    assert!(matches!(
        prioritizer.active(&registry),
        ActiveConnection::Wallet { kind: ConnectorKind::RemotePopup, .. }
    ));
}

#[tokio::test]
async fn unchanged_registry_initializes_once() {
    let backends = Backends::headless();
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();

    assert!(prioritizer.initialize(&registry).await);
    assert!(!prioritizer.initialize(&registry).await);
    // A rebuilt registry over the same instances is the same set.
    assert!(!prioritizer.initialize(&backends.registry()).await);

    assert_eq!(prioritizer.key(), 1);
    assert_eq!(backends.injected.eager_attempts(), 1);
    assert_eq!(backends.network.activations(), 1);
}

#[tokio::test]
async fn new_user_connector_reinitializes() {
    let backends = Backends::headless();
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;

    let user = Arc::new(ScriptedConnector::wallet("host", 1));
    let with_user = registry.with_user(Some(user));
    assert!(prioritizer.initialize(&with_user).await);
    assert_eq!(prioritizer.key(), 2);
    assert_eq!(
        prioritizer.active(&with_user).kind(),
        Some(ConnectorKind::UserSupplied)
    );

    // Same user instance: nothing to do.
    let same = with_user
        .get(ConnectorKind::UserSupplied)
        .map(|slot| Arc::clone(slot.connector()));
    let again = with_user.with_user(same);
    assert!(!prioritizer.initialize(&again).await);
    assert_eq!(prioritizer.key(), 2);
}

#[tokio::test]
async fn chain_switch_moves_active_connection() {
    let backends = Backends::injected_wallet(1);
    let registry = backends.registry();
    let mut prioritizer = ConnectorPrioritizer::new();
    prioritizer.initialize(&registry).await;

    let injected = registry.get(ConnectorKind::InjectedProvider).unwrap();
    let connection = injected.switch_chain(ChainId::new(42161)).await.unwrap();
    assert_eq!(connection.chain_id, ChainId::new(42161));
    assert_eq!(
        prioritizer.active(&registry).chain_id(),
        Some(ChainId::new(42161))
    );
}
