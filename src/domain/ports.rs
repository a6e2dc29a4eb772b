use super::amount::WeiAmount;
use super::purchase::{PurchaseRequest, TxHandle};
use crate::error::Result;
use async_trait::async_trait;

pub type WalletProviderBox = Box<dyn WalletProvider>;
pub type InvestApiBox = Box<dyn InvestApi>;
pub type AlertChannelBox = Box<dyn AlertChannel>;

/// Wallet-side collaborator: connected account plus the transaction
/// submission and confirmation primitives.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Address of the connected account, if any wallet is connected.
    async fn address(&self) -> Option<String>;

    /// Submits a native-value transfer to `to` and returns its handle.
    async fn submit(&self, to: &str, value: WeiAmount) -> Result<TxHandle>;

    /// Resolves once the network has confirmed the transaction.
    async fn wait_for_confirmation(&self, handle: &TxHandle) -> Result<()>;
}

/// Backend collaborator that records a confirmed purchase.
#[async_trait]
pub trait InvestApi: Send + Sync {
    async fn record(&self, request: &PurchaseRequest) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertColor {
    Green,
    Red,
}

impl std::fmt::Display for AlertColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Green => f.write_str("green"),
            Self::Red => f.write_str("red"),
        }
    }
}

/// User-feedback handle: the loading indicator and the color-coded alert
/// channel. Passed explicitly to the coordinator instead of living in
/// ambient shared state.
#[async_trait]
pub trait AlertChannel: Send + Sync {
    async fn open_loading(&self);
    async fn close_loading(&self);
    async fn alert(&self, color: AlertColor, message: &str);
}
