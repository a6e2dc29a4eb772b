use crate::domain::amount::parse_amount;
use crate::domain::rate::RateConverter;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

/// The pair of linked amount fields on the purchase dialog.
///
/// Editing either side re-derives the other through the fixed rate. Input
/// that fails the numeric pattern is dropped and both fields keep their
/// previous values.
#[derive(Debug, Clone)]
pub struct AmountPair {
    converter: RateConverter,
    sell: String,
    buy: String,
}

impl AmountPair {
    pub fn new(converter: RateConverter) -> Self {
        Self {
            converter,
            sell: "0".to_string(),
            buy: "0".to_string(),
        }
    }

    /// BNB side of the pair.
    pub fn sell(&self) -> &str {
        &self.sell
    }

    /// Token side of the pair.
    pub fn buy(&self) -> &str {
        &self.buy
    }

    /// Applies an edit to the sell field. Returns false when the input was
    /// rejected and the fields were left untouched.
    pub fn set_sell(&mut self, input: &str) -> bool {
        let Some(sell) = parse_amount(input) else {
            return false;
        };
        self.sell = input.to_string();
        self.buy = format_amount(self.converter.sell_to_buy(sell));
        true
    }

    /// Applies an edit to the buy field, re-deriving the sell side.
    pub fn set_buy(&mut self, input: &str) -> bool {
        let Some(buy) = parse_amount(input) else {
            return false;
        };
        self.buy = input.to_string();
        self.sell = format_amount(self.converter.buy_to_sell(buy));
        true
    }
}

fn format_amount(value: Decimal) -> String {
    value.normalize().to_string()
}

/// Timer-delayed commit of an amount value.
///
/// Each write restarts the window; only the last value written inside the
/// window becomes the committed value seen downstream.
#[derive(Clone)]
pub struct DebouncedAmount {
    window: Duration,
    generation: Arc<AtomicU64>,
    committed: Arc<RwLock<Option<String>>>,
}

impl DebouncedAmount {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            generation: Arc::new(AtomicU64::new(0)),
            committed: Arc::new(RwLock::new(None)),
        }
    }

    /// Records a new value and schedules its commit. Must be called from
    /// within a tokio runtime.
    pub fn write(&self, value: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let latest = Arc::clone(&self.generation);
        let committed = Arc::clone(&self.committed);
        let value = value.to_string();
        let window = self.window;
        tokio::spawn(async move {
            tokio::time::sleep(window).await;
            // a newer write supersedes this one
            if latest.load(Ordering::SeqCst) == generation {
                *committed.write().await = Some(value);
            }
        });
    }

    /// The last value to survive a full debounce window, if any.
    pub async fn committed(&self) -> Option<String> {
        self.committed.read().await.clone()
    }
}
