use crate::error::MathError;
use crate::math::fixed_point::{apply_ratio, fixed_point_ratio};
use crate::token::{Token, TokenAmount};
use crate::value_objects::reserves::PairReserves;
use serde::{Deserialize, Serialize};

/// Price of one unit of the reference asset in `quote_token` units, as a
/// 10^18-scaled ratio of raw amounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    pub quote_token: Token,
    pub ratio: TokenAmount,
}

impl PriceQuote {
    pub fn new(quote_token: Token, ratio: TokenAmount) -> Self {
        Self { quote_token, ratio }
    }

    /// Derives the quote from a pair holding the reference asset and the
    /// quote token. Returns `None` if either token is missing from the pair.
    pub fn from_pair(
        pair: &PairReserves,
        reference: &Token,
        quote_token: &Token,
    ) -> Result<Option<Self>, MathError> {
        let (Some(reference_reserve), Some(quote_reserve)) = (
            pair.reserve_of(&reference.address),
            pair.reserve_of(&quote_token.address),
        ) else {
            return Ok(None);
        };
        let ratio = fixed_point_ratio(quote_reserve.0, reference_reserve.0)?;
        Ok(Some(Self::new(quote_token.clone(), TokenAmount(ratio))))
    }

    /// Converts an amount of the reference asset into the quote token.
    pub fn quote(&self, amount: TokenAmount) -> Result<QuotedAmount, MathError> {
        let quoted = apply_ratio(amount.0, self.ratio.0)?;
        Ok(QuotedAmount {
            token: self.quote_token.clone(),
            amount: TokenAmount(quoted),
        })
    }
}

/// An amount together with the token it is denominated in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotedAmount {
    pub token: Token,
    pub amount: TokenAmount,
}

/// Source of the reference asset's USD price.
pub trait ReferencePriceOracle {
    fn reference_price(&self) -> Option<PriceQuote>;
}

impl ReferencePriceOracle for Option<PriceQuote> {
    fn reference_price(&self) -> Option<PriceQuote> {
        self.clone()
    }
}

impl ReferencePriceOracle for PriceQuote {
    fn reference_price(&self) -> Option<PriceQuote> {
        Some(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::Address;
    use crate::value_objects::reserves::ReserveSnapshot;

    #[test]
    fn test_quote_from_pair() {
        let wavax = Token::new(Address::from_low_u64_be(1), "WAVAX", 18, "Wrapped AVAX");
        let usdc = Token::new(Address::from_low_u64_be(2), "USDC.e", 6, "USD Coin");
        // 10 AVAX against 200 USDC.e -> 20 USDC.e per AVAX
        let pair = PairReserves::new(
            Address::from_low_u64_be(9),
            usdc.address,
            wavax.address,
            ReserveSnapshot::new(200_000_000u64, 10_000_000_000_000_000_000u128),
        );

        let quote = PriceQuote::from_pair(&pair, &wavax, &usdc).unwrap().unwrap();
        let one_avax = TokenAmount::from(1_000_000_000_000_000_000u64);
        let quoted = quote.quote(one_avax).unwrap();
        assert_eq!(quoted.amount, TokenAmount::from(20_000_000u64));
        assert_eq!(quoted.token, usdc);
    }

    #[test]
    fn test_quote_from_unrelated_pair() {
        let wavax = Token::new(Address::from_low_u64_be(1), "WAVAX", 18, "Wrapped AVAX");
        let usdc = Token::new(Address::from_low_u64_be(2), "USDC.e", 6, "USD Coin");
        let pair = PairReserves::new(
            Address::from_low_u64_be(9),
            Address::from_low_u64_be(3),
            wavax.address,
            ReserveSnapshot::new(1u64, 1u64),
        );
        assert!(PriceQuote::from_pair(&pair, &wavax, &usdc).unwrap().is_none());
    }
}
