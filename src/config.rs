use crate::domain::rate::CURRENCY_GWIZ_TO_BNB;
use crate::error::Result;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;

/// Token-sale contract on BNB Smart Chain.
pub const CONTRACT_ADDRESS: &str = "0x6b8bbd3f3d0fcb6e1efa1af3a5d5a8b3f5e0c9d2";

/// Sale parameters. Fixed by the operator, never user-adjustable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SaleConfig {
    /// Destination of the native-value transfer.
    pub contract_address: String,
    /// Token recorded against each purchase.
    pub token_id: u32,
    /// BNB per token.
    pub rate: Decimal,
    /// Base URL of the investment backend.
    pub api_base_url: String,
    /// Debounce window applied to amount input, in milliseconds.
    pub debounce_ms: u64,
}

impl Default for SaleConfig {
    fn default() -> Self {
        Self {
            contract_address: CONTRACT_ADDRESS.to_string(),
            token_id: 1,
            rate: CURRENCY_GWIZ_TO_BNB,
            api_base_url: "http://localhost:5000".to_string(),
            debounce_ms: 1000,
        }
    }
}

impl SaleConfig {
    /// Loads a config from a JSON file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        let config = serde_json::from_reader(file)?;
        Ok(config)
    }
}
