//! Typed read-only wrappers over the contracts the Earn pages query.
//!
//! Calls are declared with `sol!` and encoded through `SolCall`.

mod erc20;
mod minichef;
mod pair;
mod router;
mod staking_rewards;

pub use erc20::Erc20Contract;
pub use minichef::MiniChefContract;
pub use pair::{FactoryContract, PairContract};
pub use router::RouterContract;
pub use staking_rewards::StakingRewardsContract;

use primitive_types::U256;
use rytell_earn_domain::{Address, TokenAmount};

pub(crate) fn to_sol_address(address: Address) -> alloy_primitives::Address {
    alloy_primitives::Address::from(address.0)
}

pub(crate) fn from_sol_address(address: alloy_primitives::Address) -> Address {
    Address::from_slice(address.as_slice())
}

pub(crate) fn from_sol_uint(value: alloy_primitives::U256) -> U256 {
    TokenAmount::from(value).as_u256()
}

pub(crate) fn to_sol_uint(value: U256) -> alloy_primitives::U256 {
    TokenAmount(value).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_conversion() {
        let address = Address::from_low_u64_be(0xdead_beef);
        let sol = to_sol_address(address);
        assert_eq!(sol.as_slice(), address.as_bytes());
        assert_eq!(from_sol_address(sol), address);
    }

    #[test]
    fn test_uint_conversion() {
        let value = U256::from(123_456_789u64) << 128;
        assert_eq!(from_sol_uint(to_sol_uint(value)), value);
    }
}
