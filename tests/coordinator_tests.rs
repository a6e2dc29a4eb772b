use gwiz_presale::application::coordinator::PurchaseCoordinator;
use gwiz_presale::config::SaleConfig;
use gwiz_presale::domain::ports::AlertColor;
use gwiz_presale::domain::purchase::{PurchaseOutcome, PurchaseState};
use gwiz_presale::infrastructure::in_memory::{MemoryAlerts, RecordingInvestApi, SimulatedWallet};
use rust_decimal_macros::dec;
use std::sync::Arc;
use std::time::Duration;

const PAYER: &str = "0x00000000000000000000000000000000000000aa";

fn coordinator(
    wallet: SimulatedWallet,
    invest: RecordingInvestApi,
    alerts: MemoryAlerts,
) -> Arc<PurchaseCoordinator> {
    Arc::new(PurchaseCoordinator::new(
        Box::new(wallet),
        Box::new(invest),
        Box::new(alerts),
        &SaleConfig::default(),
    ))
}

async fn wait_until_awaiting_confirmation(coordinator: &PurchaseCoordinator) {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            if matches!(
                coordinator.state().await,
                PurchaseState::AwaitingConfirmation(_)
            ) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("coordinator never reached AwaitingConfirmation");
}

#[tokio::test]
async fn test_backend_failure_after_confirmation_is_the_inconsistency_window() {
    let wallet = SimulatedWallet::connected(PAYER);
    let invest = RecordingInvestApi::failing();
    let alerts = MemoryAlerts::new();
    let coordinator = coordinator(wallet.clone(), invest.clone(), alerts.clone());

    let state = coordinator.submit("10").await;
    assert!(matches!(
        state,
        PurchaseState::Done(PurchaseOutcome::Failure(_))
    ));

    // funds moved on-chain, record was never saved
    assert_eq!(wallet.confirmed_handles().await.len(), 1);
    assert!(invest.records().await.is_empty());

    assert!(!alerts.is_loading().await);
    let fired = alerts.alerts().await;
    assert_eq!(fired.len(), 1);
    assert_eq!(fired[0].0, AlertColor::Red);
}

#[tokio::test]
async fn test_second_submit_while_pending_is_a_no_op() {
    let wallet = SimulatedWallet::connected(PAYER).with_held_confirmation();
    let invest = RecordingInvestApi::new();
    let coordinator = coordinator(wallet.clone(), invest.clone(), MemoryAlerts::new());

    let first = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.submit("10").await })
    };
    wait_until_awaiting_confirmation(&coordinator).await;

    // second attempt must not overwrite the pending request
    let state = coordinator.submit("99").await;
    assert!(matches!(state, PurchaseState::AwaitingConfirmation(_)));
    assert_eq!(coordinator.request().await.unwrap().sell_amount, dec!(10));

    wallet.release_confirmation();
    let final_state = first.await.unwrap();
    assert_eq!(final_state, PurchaseState::Done(PurchaseOutcome::Success));

    let records = invest.records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sell_amount, dec!(10));
}

#[tokio::test]
async fn test_confirmation_after_disposal_is_ignored() {
    let wallet = SimulatedWallet::connected(PAYER).with_held_confirmation();
    let invest = RecordingInvestApi::new();
    let alerts = MemoryAlerts::new();
    let coordinator = coordinator(wallet.clone(), invest.clone(), alerts.clone());

    let flow = {
        let coordinator = Arc::clone(&coordinator);
        tokio::spawn(async move { coordinator.submit("1").await })
    };
    wait_until_awaiting_confirmation(&coordinator).await;

    coordinator.dispose();
    wallet.release_confirmation();
    let state = flow.await.unwrap();

    // the late resolution must not reach the backend or the user
    assert!(!matches!(state, PurchaseState::Done(_)));
    assert!(invest.records().await.is_empty());
    assert!(alerts.alerts().await.is_empty());
}

#[tokio::test]
async fn test_reset_allows_a_new_purchase() {
    let invest = RecordingInvestApi::new();
    let coordinator = coordinator(
        SimulatedWallet::connected(PAYER),
        invest.clone(),
        MemoryAlerts::new(),
    );

    assert_eq!(
        coordinator.submit("1").await,
        PurchaseState::Done(PurchaseOutcome::Success)
    );

    // Done is terminal until the dialog reopens
    assert!(matches!(coordinator.submit("2").await, PurchaseState::Done(_)));
    assert_eq!(invest.records().await.len(), 1);

    coordinator.reset().await;
    assert_eq!(
        coordinator.submit("2").await,
        PurchaseState::Done(PurchaseOutcome::Success)
    );
    assert_eq!(invest.records().await.len(), 2);
}
