use crate::error::{PurchaseError, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Fixed sale rate: how much BNB one $GWIZ costs.
pub const CURRENCY_GWIZ_TO_BNB: Decimal = dec!(0.01);

/// Pure fixed-rate conversion between the native currency and the token.
///
/// `sell_to_buy` answers "how many tokens does this much BNB buy",
/// `buy_to_sell` answers "how much BNB do this many tokens cost".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateConverter {
    rate: Decimal,
}

impl RateConverter {
    pub fn new(rate: Decimal) -> Result<Self> {
        if rate > Decimal::ZERO {
            Ok(Self { rate })
        } else {
            Err(PurchaseError::ValidationError(
                "Rate must be positive".to_string(),
            ))
        }
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    pub fn sell_to_buy(&self, sell: Decimal) -> Decimal {
        sell / self.rate
    }

    pub fn buy_to_sell(&self, buy: Decimal) -> Decimal {
        buy * self.rate
    }
}

impl Default for RateConverter {
    fn default() -> Self {
        Self {
            rate: CURRENCY_GWIZ_TO_BNB,
        }
    }
}
