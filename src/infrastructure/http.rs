use crate::domain::ports::InvestApi;
use crate::domain::purchase::PurchaseRequest;
use crate::error::{PurchaseError, Result};
use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

/// Backend adapter for the investment-recording endpoint.
///
/// Issues `POST {base}/invest/invest`; any 2xx response counts as recorded,
/// nothing in the response body is consumed.
pub struct HttpInvestApi {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct InvestBody<'a> {
    investor: &'a str,
    #[serde(rename = "tokenId")]
    token_id: u32,
    amount: f64,
}

impl HttpInvestApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl InvestApi for HttpInvestApi {
    async fn record(&self, request: &PurchaseRequest) -> Result<()> {
        let amount = request.sell_amount.to_f64().ok_or_else(|| {
            PurchaseError::EncodingError("amount not representable as a number".to_string())
        })?;
        let body = InvestBody {
            investor: &request.payer,
            token_id: request.token_id,
            amount,
        };

        let response = self
            .client
            .post(format!("{}/invest/invest", self.base_url))
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(PurchaseError::NotificationError(format!(
                "backend returned {}",
                response.status()
            )))
        }
    }
}
