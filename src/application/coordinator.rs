use crate::config::SaleConfig;
use crate::domain::amount::{WeiAmount, parse_amount};
use crate::domain::ports::{
    AlertChannel, AlertChannelBox, AlertColor, InvestApi, InvestApiBox, WalletProvider,
    WalletProviderBox,
};
use crate::domain::purchase::{PurchaseOutcome, PurchaseRequest, PurchaseState};
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

const SUCCESS_MESSAGE: &str = "Claimed.";
const FAILURE_MESSAGE: &str = "Error occured. not claimed.";

/// Sequences a single purchase attempt:
/// collect amount, submit the on-chain transaction, wait for confirmation,
/// notify the backend, report the result through the alert channel.
///
/// At most one request is in flight at a time; `submit` is a no-op while a
/// prior attempt is pending. Once disposed, late resolutions of in-flight
/// waits are dropped without touching state or alerts.
pub struct PurchaseCoordinator {
    wallet: WalletProviderBox,
    invest: InvestApiBox,
    alerts: AlertChannelBox,
    contract_address: String,
    token_id: u32,
    state: RwLock<PurchaseState>,
    request: RwLock<Option<PurchaseRequest>>,
    disposed: AtomicBool,
}

impl PurchaseCoordinator {
    pub fn new(
        wallet: WalletProviderBox,
        invest: InvestApiBox,
        alerts: AlertChannelBox,
        config: &SaleConfig,
    ) -> Self {
        Self {
            wallet,
            invest,
            alerts,
            contract_address: config.contract_address.clone(),
            token_id: config.token_id,
            state: RwLock::new(PurchaseState::Idle),
            request: RwLock::new(None),
            disposed: AtomicBool::new(false),
        }
    }

    pub async fn state(&self) -> PurchaseState {
        self.state.read().await.clone()
    }

    pub async fn request(&self) -> Option<PurchaseRequest> {
        self.request.read().await.clone()
    }

    /// Marks the coordinator as torn down. In-flight waits are not aborted;
    /// their eventual resolutions are ignored.
    pub fn dispose(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Returns a terminal coordinator to `Idle`. Called when the dialog is
    /// reopened; a no-op while a request is still in flight.
    pub async fn reset(&self) {
        let mut state = self.state.write().await;
        if matches!(*state, PurchaseState::Done(_)) {
            *state = PurchaseState::Idle;
            self.request.write().await.take();
        }
    }

    /// Runs one purchase attempt for `sell_amount` BNB and returns the state
    /// the coordinator is left in.
    ///
    /// Stays `Idle` without surfacing an error when no wallet is connected,
    /// when the amount cannot be encoded, or when the wallet rejects the
    /// submission. The backend is notified exactly once, after confirmation.
    pub async fn submit(&self, sell_amount: &str) -> PurchaseState {
        let request;
        let value;
        {
            let mut state = self.state.write().await;
            if *state != PurchaseState::Idle {
                tracing::debug!(state = ?*state, "submit ignored, purchase already in flight");
                return state.clone();
            }

            let Some(payer) = self.wallet.address().await else {
                tracing::debug!("submit ignored, no wallet connected");
                return PurchaseState::Idle;
            };
            value = match WeiAmount::parse(sell_amount) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!(%err, "submit ignored, transaction could not be prepared");
                    return PurchaseState::Idle;
                }
            };
            // infallible once the wei encoding succeeded
            let Some(amount) = parse_amount(sell_amount) else {
                return PurchaseState::Idle;
            };

            request = PurchaseRequest {
                payer,
                sell_amount: amount,
                token_id: self.token_id,
            };
            *state = PurchaseState::Submitting;
            *self.request.write().await = Some(request.clone());
        }

        tracing::info!(
            contract = %self.contract_address,
            wei = %value.value(),
            "submitting purchase transaction"
        );
        let handle = match self.wallet.submit(&self.contract_address, value).await {
            Ok(handle) => handle,
            Err(err) => {
                // wallet rejection: back to Idle, submit stays available,
                // nothing surfaced to the user
                tracing::warn!(%err, "transaction submission rejected");
                return self.return_to_idle().await;
            }
        };
        if self.is_disposed() {
            return self.state().await;
        }

        *self.state.write().await = PurchaseState::AwaitingConfirmation(handle.clone());
        self.alerts.open_loading().await;
        tracing::info!(handle = %handle, "awaiting on-chain confirmation");

        if let Err(err) = self.wallet.wait_for_confirmation(&handle).await {
            tracing::warn!(%err, handle = %handle, "confirmation wait failed");
            if self.is_disposed() {
                return self.state().await;
            }
            self.alerts.close_loading().await;
            return self.return_to_idle().await;
        }
        if self.is_disposed() {
            tracing::debug!(handle = %handle, "confirmation resolved after disposal, ignoring");
            return self.state().await;
        }

        *self.state.write().await = PurchaseState::Notifying(handle.clone());
        tracing::info!(handle = %handle, "confirmed, recording investment");
        let notified = self.invest.record(&request).await;
        if self.is_disposed() {
            return self.state().await;
        }

        self.alerts.close_loading().await;
        let outcome = match notified {
            Ok(()) => {
                self.alerts.alert(AlertColor::Green, SUCCESS_MESSAGE).await;
                PurchaseOutcome::Success
            }
            Err(err) => {
                // the transaction already succeeded on-chain; the funds have
                // moved but the record was not saved, and nothing reconciles
                // that automatically
                tracing::error!(%err, handle = %handle, "backend notification failed after on-chain success");
                self.alerts.alert(AlertColor::Red, FAILURE_MESSAGE).await;
                PurchaseOutcome::Failure(err.to_string())
            }
        };

        let done = PurchaseState::Done(outcome);
        *self.state.write().await = done.clone();
        done
    }

    async fn return_to_idle(&self) -> PurchaseState {
        let mut state = self.state.write().await;
        *state = PurchaseState::Idle;
        self.request.write().await.take();
        PurchaseState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::{MemoryAlerts, RecordingInvestApi, SimulatedWallet};
    use rust_decimal_macros::dec;

    const PAYER: &str = "0x00000000000000000000000000000000000000aa";

    fn coordinator(
        wallet: SimulatedWallet,
        invest: RecordingInvestApi,
        alerts: MemoryAlerts,
    ) -> PurchaseCoordinator {
        PurchaseCoordinator::new(
            Box::new(wallet),
            Box::new(invest),
            Box::new(alerts),
            &SaleConfig::default(),
        )
    }

    #[tokio::test]
    async fn test_successful_purchase() {
        let wallet = SimulatedWallet::connected(PAYER);
        let invest = RecordingInvestApi::new();
        let alerts = MemoryAlerts::new();
        let coordinator = coordinator(wallet.clone(), invest.clone(), alerts.clone());

        let state = coordinator.submit("10").await;
        assert_eq!(state, PurchaseState::Done(PurchaseOutcome::Success));

        let records = invest.records().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payer, PAYER);
        assert_eq!(records[0].sell_amount, dec!(10));
        assert_eq!(records[0].token_id, 1);

        assert_eq!(alerts.open_count(), 1);
        assert!(!alerts.is_loading().await);
        assert_eq!(
            alerts.alerts().await,
            vec![(AlertColor::Green, SUCCESS_MESSAGE.to_string())]
        );
    }

    #[tokio::test]
    async fn test_no_wallet_keeps_idle_and_backend_untouched() {
        let invest = RecordingInvestApi::new();
        let coordinator = coordinator(
            SimulatedWallet::disconnected(),
            invest.clone(),
            MemoryAlerts::new(),
        );

        let state = coordinator.submit("10").await;
        assert_eq!(state, PurchaseState::Idle);
        assert!(invest.records().await.is_empty());
        assert!(coordinator.request().await.is_none());
    }

    #[tokio::test]
    async fn test_malformed_amount_keeps_idle() {
        let coordinator = coordinator(
            SimulatedWallet::connected(PAYER),
            RecordingInvestApi::new(),
            MemoryAlerts::new(),
        );

        assert_eq!(coordinator.submit("12.3.4").await, PurchaseState::Idle);
        assert_eq!(coordinator.submit("-5").await, PurchaseState::Idle);
    }

    #[tokio::test]
    async fn test_wallet_rejection_returns_to_idle_silently() {
        let alerts = MemoryAlerts::new();
        let coordinator = coordinator(
            SimulatedWallet::rejecting(PAYER),
            RecordingInvestApi::new(),
            alerts.clone(),
        );

        let state = coordinator.submit("1").await;
        assert_eq!(state, PurchaseState::Idle);
        // no loading indicator, no alert: the submit control just stays live
        assert_eq!(alerts.open_count(), 0);
        assert!(alerts.alerts().await.is_empty());
    }

    #[tokio::test]
    async fn test_confirmation_failure_clears_loading_without_alert() {
        let alerts = MemoryAlerts::new();
        let coordinator = coordinator(
            SimulatedWallet::connected(PAYER).failing_confirmation(),
            RecordingInvestApi::new(),
            alerts.clone(),
        );

        let state = coordinator.submit("1").await;
        assert_eq!(state, PurchaseState::Idle);
        assert_eq!(alerts.open_count(), 1);
        assert!(!alerts.is_loading().await);
        assert!(alerts.alerts().await.is_empty());
    }

    #[tokio::test]
    async fn test_reset_only_from_done() {
        let coordinator = coordinator(
            SimulatedWallet::connected(PAYER),
            RecordingInvestApi::new(),
            MemoryAlerts::new(),
        );

        coordinator.submit("2").await;
        assert!(matches!(coordinator.state().await, PurchaseState::Done(_)));

        coordinator.reset().await;
        assert_eq!(coordinator.state().await, PurchaseState::Idle);
        assert!(coordinator.request().await.is_none());
    }
}
