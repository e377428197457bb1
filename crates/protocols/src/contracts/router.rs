use super::{from_sol_uint, to_sol_address, to_sol_uint};
use crate::error::RpcError;
use crate::rpc::RpcProvider;
use alloy_sol_types::sol;
use primitive_types::U256;
use rytell_earn_domain::Address;
use rytell_earn_domain::enums::BlockTag;
use std::sync::Arc;

sol! {
    contract Router {
        function getAmountsOut(uint256 amountIn, address[] memory path) external view returns (uint256[] memory);
    }
}

/// Swap router, used only for price quotes along a path.
#[derive(Clone)]
pub struct RouterContract {
    provider: Arc<RpcProvider>,
    address: Address,
}

impl RouterContract {
    pub fn new(provider: Arc<RpcProvider>, address: Address) -> Self {
        Self { provider, address }
    }

    /// Amount received at the end of `path` for `amount_in` of its first token.
    pub async fn amount_out(
        &self,
        amount_in: U256,
        path: Vec<Address>,
        block: BlockTag,
    ) -> Result<U256, RpcError> {
        let call = Router::getAmountsOutCall {
            amountIn: to_sol_uint(amount_in),
            path: path.into_iter().map(to_sol_address).collect(),
        };
        let amounts = self.provider.call(self.address, &call, block).await?;
        amounts
            .last()
            .copied()
            .map(from_sol_uint)
            .ok_or_else(|| RpcError::InvalidResponse("empty amounts array".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;

    #[test]
    fn test_get_amounts_out_calldata() {
        let call = Router::getAmountsOutCall {
            amountIn: to_sol_uint(U256::from(5u64)),
            path: vec![
                to_sol_address(Address::from_low_u64_be(1)),
                to_sol_address(Address::from_low_u64_be(2)),
            ],
        };
        let data = call.abi_encode();
        // amountIn, offset, length, two addresses
        assert_eq!(data.len(), 4 + 5 * 32);
        assert_eq!(data[4 + 31], 5);
        assert_eq!(data[4 + 63], 64);
        assert_eq!(data[4 + 95], 2);
        assert_eq!(data[4 + 127], 1);
        assert_eq!(data[4 + 159], 2);
    }

    #[test]
    fn test_get_amounts_out_return() {
        let words: [u64; 4] = [32, 2, 10, 25];
        let data: Vec<u8> = words
            .iter()
            .flat_map(|w| {
                let mut word = [0u8; 32];
                word[24..].copy_from_slice(&w.to_be_bytes());
                word
            })
            .collect();
        let amounts = Router::getAmountsOutCall::abi_decode_returns(&data).unwrap();
        assert_eq!(amounts.len(), 2);
        assert_eq!(amounts.last().copied().map(from_sol_uint), Some(U256::from(25u64)));
    }
}
