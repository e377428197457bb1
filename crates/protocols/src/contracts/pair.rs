use super::{from_sol_address, to_sol_address};
use crate::error::RpcError;
use crate::rpc::RpcProvider;
use alloy_sol_types::sol;
use rytell_earn_domain::Address;
use rytell_earn_domain::TokenAmount;
use rytell_earn_domain::enums::BlockTag;
use rytell_earn_domain::value_objects::{PairReserves, ReserveSnapshot};
use std::sync::Arc;

sol! {
    contract Pair {
        function token0() external view returns (address);
        function token1() external view returns (address);
        function getReserves() external view returns (uint112 reserve0, uint112 reserve1, uint32 blockTimestampLast);
    }

    contract Factory {
        function getPair(address tokenA, address tokenB) external view returns (address);
    }
}

/// Constant-product pair.
#[derive(Clone)]
pub struct PairContract {
    provider: Arc<RpcProvider>,
    address: Address,
}

impl PairContract {
    pub fn new(provider: Arc<RpcProvider>, address: Address) -> Self {
        Self { provider, address }
    }

    pub async fn token0(&self, block: BlockTag) -> Result<Address, RpcError> {
        self.provider
            .call(self.address, &Pair::token0Call {}, block)
            .await
            .map(from_sol_address)
    }

    pub async fn token1(&self, block: BlockTag) -> Result<Address, RpcError> {
        self.provider
            .call(self.address, &Pair::token1Call {}, block)
            .await
            .map(from_sol_address)
    }

    /// Reserves tagged with the pair's token order.
    pub async fn reserves(&self, block: BlockTag) -> Result<PairReserves, RpcError> {
        let (token0, token1, reserves) = futures::try_join!(
            self.token0(block),
            self.token1(block),
            self.provider
                .call(self.address, &Pair::getReservesCall {}, block),
        )?;
        let snapshot = ReserveSnapshot::new(
            TokenAmount::from(reserves.reserve0.to::<u128>()),
            TokenAmount::from(reserves.reserve1.to::<u128>()),
        );
        Ok(PairReserves::new(self.address, token0, token1, snapshot))
    }
}

/// Pair factory.
#[derive(Clone)]
pub struct FactoryContract {
    provider: Arc<RpcProvider>,
    address: Address,
}

impl FactoryContract {
    pub fn new(provider: Arc<RpcProvider>, address: Address) -> Self {
        Self { provider, address }
    }

    /// Pair address for two tokens, `None` when the pair was never created.
    pub async fn get_pair(
        &self,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> Result<Option<Address>, RpcError> {
        let call = Factory::getPairCall {
            tokenA: to_sol_address(token_a),
            tokenB: to_sol_address(token_b),
        };
        let pair = self.provider.call(self.address, &call, block).await?;
        Ok((!pair.is_zero()).then(|| from_sol_address(pair)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_sol_types::SolCall;

    #[test]
    fn test_get_reserves_return() {
        let mut data = vec![0u8; 96];
        data[30..32].copy_from_slice(&[0x03, 0xe8]);
        data[62..64].copy_from_slice(&[0x07, 0xd0]);
        data[95] = 1;
        let reserves = Pair::getReservesCall::abi_decode_returns(&data).unwrap();
        assert_eq!(reserves.reserve0.to::<u128>(), 1000);
        assert_eq!(reserves.reserve1.to::<u128>(), 2000);
        assert_eq!(reserves.blockTimestampLast, 1);
    }

    #[test]
    fn test_get_pair_zero_address_means_missing() {
        let pair = Factory::getPairCall::abi_decode_returns(&[0u8; 32]).unwrap();
        assert!(pair.is_zero());
    }
}
