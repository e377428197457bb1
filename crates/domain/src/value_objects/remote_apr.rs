use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// APR figures published by the exchange API for one staking contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteApr {
    pub swap_fee_apr: Decimal,
    pub staking_apr: Decimal,
    pub combined_apr: Decimal,
}
