use rust_decimal::Decimal;
use std::fmt;

/// One user-initiated purchase attempt. Immutable once submitted.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseRequest {
    /// Address of the connected wallet paying for the purchase.
    pub payer: String,
    /// Amount of native currency being spent, as entered by the user.
    pub sell_amount: Decimal,
    /// Identifier of the token being bought.
    pub token_id: u32,
}

/// Opaque identifier for a transaction that has been submitted on-chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TxHandle(String);

impl TxHandle {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TxHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Terminal result of a purchase attempt. Surfaced to the user, then discarded.
#[derive(Debug, Clone, PartialEq)]
pub enum PurchaseOutcome {
    Success,
    Failure(String),
}

/// Lifecycle of a purchase attempt.
///
/// `Done` is terminal until the dialog is reopened, which resets to `Idle`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PurchaseState {
    #[default]
    Idle,
    Submitting,
    AwaitingConfirmation(TxHandle),
    Notifying(TxHandle),
    Done(PurchaseOutcome),
}

impl PurchaseState {
    /// True while a submitted request has not yet reached a terminal state.
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            Self::Submitting | Self::AwaitingConfirmation(_) | Self::Notifying(_)
        )
    }
}
