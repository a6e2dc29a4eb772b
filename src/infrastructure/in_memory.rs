use crate::domain::amount::WeiAmount;
use crate::domain::ports::{AlertChannel, AlertColor, InvestApi, WalletProvider};
use crate::domain::purchase::{PurchaseRequest, TxHandle};
use crate::error::{PurchaseError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::{RwLock, Semaphore};

/// A scriptable in-memory wallet.
///
/// Clones share state, so a test can keep one clone to script and inspect
/// while the coordinator owns a boxed clone. Confirmations resolve
/// immediately unless the wallet is built with a held confirmation gate.
#[derive(Clone)]
pub struct SimulatedWallet {
    address: Option<String>,
    reject_submission: bool,
    fail_confirmation: bool,
    gate: Option<Arc<Semaphore>>,
    counter: Arc<AtomicU64>,
    submitted: Arc<RwLock<Vec<(String, WeiAmount)>>>,
    confirmed: Arc<RwLock<Vec<TxHandle>>>,
}

impl SimulatedWallet {
    pub fn connected(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            reject_submission: false,
            fail_confirmation: false,
            gate: None,
            counter: Arc::new(AtomicU64::new(0)),
            submitted: Arc::new(RwLock::new(Vec::new())),
            confirmed: Arc::new(RwLock::new(Vec::new())),
        }
    }

    pub fn disconnected() -> Self {
        let mut wallet = Self::connected("");
        wallet.address = None;
        wallet
    }

    /// A connected wallet whose user rejects every submission.
    pub fn rejecting(address: &str) -> Self {
        let mut wallet = Self::connected(address);
        wallet.reject_submission = true;
        wallet
    }

    /// Confirmation waits fail instead of resolving.
    pub fn failing_confirmation(mut self) -> Self {
        self.fail_confirmation = true;
        self
    }

    /// Confirmations block until `release_confirmation` is called.
    pub fn with_held_confirmation(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Lets one held confirmation through.
    pub fn release_confirmation(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub async fn submitted(&self) -> Vec<(String, WeiAmount)> {
        self.submitted.read().await.clone()
    }

    pub async fn confirmed_handles(&self) -> Vec<TxHandle> {
        self.confirmed.read().await.clone()
    }
}

#[async_trait]
impl WalletProvider for SimulatedWallet {
    async fn address(&self) -> Option<String> {
        self.address.clone()
    }

    async fn submit(&self, to: &str, value: WeiAmount) -> Result<TxHandle> {
        if self.reject_submission {
            return Err(PurchaseError::SubmissionError(
                "user rejected the transaction".to_string(),
            ));
        }
        let nonce = self.counter.fetch_add(1, Ordering::SeqCst);
        self.submitted.write().await.push((to.to_string(), value));
        Ok(TxHandle::new(format!("0x{nonce:064x}")))
    }

    async fn wait_for_confirmation(&self, handle: &TxHandle) -> Result<()> {
        if let Some(gate) = &self.gate {
            let permit = gate.acquire().await.map_err(|_| {
                PurchaseError::SubmissionError("confirmation gate closed".to_string())
            })?;
            permit.forget();
        }
        if self.fail_confirmation {
            return Err(PurchaseError::SubmissionError(
                "transaction dropped from the mempool".to_string(),
            ));
        }
        self.confirmed.write().await.push(handle.clone());
        Ok(())
    }
}

/// Records confirmed purchases in memory instead of POSTing them.
#[derive(Default, Clone)]
pub struct RecordingInvestApi {
    fail: bool,
    records: Arc<RwLock<Vec<PurchaseRequest>>>,
}

impl RecordingInvestApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that refuses every notification.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub async fn records(&self) -> Vec<PurchaseRequest> {
        self.records.read().await.clone()
    }
}

#[async_trait]
impl InvestApi for RecordingInvestApi {
    async fn record(&self, request: &PurchaseRequest) -> Result<()> {
        if self.fail {
            return Err(PurchaseError::NotificationError(
                "backend rejected the investment".to_string(),
            ));
        }
        self.records.write().await.push(request.clone());
        Ok(())
    }
}

/// Captures loading and alert activity for inspection.
#[derive(Default, Clone)]
pub struct MemoryAlerts {
    loading: Arc<RwLock<bool>>,
    opens: Arc<AtomicUsize>,
    alerts: Arc<RwLock<Vec<(AlertColor, String)>>>,
}

impl MemoryAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn is_loading(&self) -> bool {
        *self.loading.read().await
    }

    /// How many times the loading indicator has been opened.
    pub fn open_count(&self) -> usize {
        self.opens.load(Ordering::SeqCst)
    }

    pub async fn alerts(&self) -> Vec<(AlertColor, String)> {
        self.alerts.read().await.clone()
    }
}

#[async_trait]
impl AlertChannel for MemoryAlerts {
    async fn open_loading(&self) {
        self.opens.fetch_add(1, Ordering::SeqCst);
        *self.loading.write().await = true;
    }

    async fn close_loading(&self) {
        *self.loading.write().await = false;
    }

    async fn alert(&self, color: AlertColor, message: &str) {
        self.alerts.write().await.push((color, message.to_string()));
    }
}
