use crate::error::ApiError;
use async_trait::async_trait;
use primitive_types::U256;
use rust_decimal::Decimal;
use rytell_earn_domain::value_objects::RemoteApr;
use rytell_earn_domain::{Address, TokenAmount};
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

/// Configuration for the exchange API client.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base URL without trailing path, e.g. `https://api.rytell.exchange`.
    pub base_url: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.rytell.exchange".to_string(),
            timeout_secs: 10,
        }
    }
}

/// Read-only endpoints of the exchange HTTP API.
#[cfg_attr(any(test, feature = "mocks"), mockall::automock)]
#[async_trait]
pub trait ExchangeApi: Send + Sync {
    /// Circulating RADI supply in raw units.
    async fn circulating_supply(&self) -> Result<TokenAmount, ApiError>;

    /// Swap-fee, staking and combined APR for one staking contract.
    async fn pool_apr(&self, staking_address: Address) -> Result<RemoteApr, ApiError>;

    /// Projected annual RADI bought back from swap volume, in whole tokens.
    async fn annual_projection(&self) -> Result<Decimal, ApiError>;
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AprResponse {
    #[serde(default)]
    swap_fee_apr: Value,
    #[serde(default)]
    staking_apr: Value,
    #[serde(default)]
    combined_apr: Value,
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}

/// APR fields arrive as JSON numbers or numeric strings.
fn decimal_field(name: &str, value: &Value) -> Result<Decimal, ApiError> {
    let parsed = match value {
        Value::Number(n) => parse_decimal(&n.to_string()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    };
    parsed.ok_or_else(|| ApiError::Parse(format!("{name}: {value}")))
}

pub(crate) fn parse_pool_apr(body: &str) -> Result<RemoteApr, ApiError> {
    let response: AprResponse =
        serde_json::from_str(body).map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(RemoteApr {
        swap_fee_apr: decimal_field("swapFeeApr", &response.swap_fee_apr)?,
        staking_apr: decimal_field("stakingApr", &response.staking_apr)?,
        combined_apr: decimal_field("combinedApr", &response.combined_apr)?,
    })
}

pub(crate) fn parse_circulating_supply(body: &str) -> Result<TokenAmount, ApiError> {
    U256::from_dec_str(body.trim())
        .map(TokenAmount::from)
        .map_err(|e| ApiError::Parse(format!("circulating supply {body:?}: {e:?}")))
}

pub(crate) fn parse_annual_projection(body: &str) -> Result<Decimal, ApiError> {
    parse_decimal(body).ok_or_else(|| ApiError::Parse(format!("annual projection {body:?}")))
}

/// [`ExchangeApi`] over HTTP.
pub struct ExchangeApiClient {
    client: reqwest::Client,
    config: ApiConfig,
}

impl ExchangeApiClient {
    /// Creates a new client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    async fn get_text(&self, path: &str) -> Result<String, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "Fetching from exchange API");
        let response = self.client.get(&url).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(body)
    }
}

#[async_trait]
impl ExchangeApi for ExchangeApiClient {
    async fn circulating_supply(&self) -> Result<TokenAmount, ApiError> {
        let body = self.get_text("radi/circulating-supply").await?;
        parse_circulating_supply(&body)
    }

    async fn pool_apr(&self, staking_address: Address) -> Result<RemoteApr, ApiError> {
        let body = self
            .get_text(&format!("rytell/apr/{staking_address:?}"))
            .await?;
        parse_pool_apr(&body)
    }

    async fn annual_projection(&self) -> Result<Decimal, ApiError> {
        let body = self.get_text("volume/annual-projection").await?;
        parse_annual_projection(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_pool_apr_mixed_types() {
        let body = r#"{"swapFeeApr": 12.5, "stakingApr": "40", "combinedApr": "52.5"}"#;
        let apr = parse_pool_apr(body).unwrap();
        assert_eq!(apr.swap_fee_apr, dec!(12.5));
        assert_eq!(apr.staking_apr, dec!(40));
        assert_eq!(apr.combined_apr, dec!(52.5));
    }

    #[test]
    fn test_parse_pool_apr_rejects_missing_field() {
        let body = r#"{"swapFeeApr": 1, "stakingApr": 2}"#;
        assert!(matches!(parse_pool_apr(body), Err(ApiError::Parse(_))));
    }

    #[test]
    fn test_parse_circulating_supply() {
        let supply = parse_circulating_supply("123000000000000000000\n").unwrap();
        assert_eq!(supply, TokenAmount::from(123_000_000_000_000_000_000u128));
        assert!(parse_circulating_supply("12.5").is_err());
    }

    #[test]
    fn test_parse_annual_projection() {
        assert_eq!(parse_annual_projection(" 1500.25 ").unwrap(), dec!(1500.25));
        assert!(parse_annual_projection("n/a").is_err());
    }

    #[test]
    fn test_url_join() {
        let client = ExchangeApiClient::new(ApiConfig {
            base_url: "https://api.example.org/".to_string(),
            timeout_secs: 1,
        })
        .unwrap();
        assert_eq!(
            client.url("radi/circulating-supply"),
            "https://api.example.org/radi/circulating-supply"
        );
    }

    #[tokio::test]
    async fn test_mock_exchange_api() {
        let mut api = MockExchangeApi::new();
        api.expect_annual_projection().returning(|| Ok(dec!(200)));
        assert_eq!(api.annual_projection().await.unwrap(), dec!(200));
    }
}
