use crate::token::{Address, Token};
use serde::{Deserialize, Serialize};

/// Contract family a pool belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PoolKind {
    /// StakingRewards contract over an LP token with a configured weight.
    DoubleSided { tokens: [Token; 2], multiplier: u64 },
    /// MiniChef pool over an LP token; weight is the on-chain alloc point.
    MiniChef { tokens: [Token; 2], pid: u64 },
    /// StakingRewards contract over the governance token, paying `reward_token`.
    ///
    /// `route` lists intermediate tokens for the router quote from the
    /// governance token to the reward token.
    SingleSided {
        reward_token: Token,
        #[serde(default)]
        route: Vec<Address>,
    },
}

/// Capability set that selects a pool's valuation and weighting path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolCapabilities {
    pub has_direct_reference_reserve: bool,
    pub has_intermediate_hop_reserve: bool,
    pub has_external_weight_source: bool,
}

/// Registry entry for one staking pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingPool {
    pub id: String,
    /// StakingRewards contract, or the MiniChef contract for MiniChef pools.
    pub staking_address: Address,
    pub kind: PoolKind,
    /// Forces the multiplier to zero regardless of configured or on-chain weight.
    #[serde(default)]
    pub delisted: bool,
}

impl StakingPool {
    /// Pair tokens for LP pools, `None` for single-sided pools.
    pub fn pair_tokens(&self) -> Option<&[Token; 2]> {
        match &self.kind {
            PoolKind::DoubleSided { tokens, .. } | PoolKind::MiniChef { tokens, .. } => {
                Some(tokens)
            }
            PoolKind::SingleSided { .. } => None,
        }
    }

    pub fn involves_token(&self, token: &Address) -> bool {
        self.pair_tokens()
            .is_some_and(|tokens| tokens.iter().any(|t| t.address == *token))
    }

    pub fn capabilities(&self, reference: &Address, intermediate: &Address) -> PoolCapabilities {
        let has_direct_reference_reserve = self.involves_token(reference);
        PoolCapabilities {
            has_direct_reference_reserve,
            has_intermediate_hop_reserve: !has_direct_reference_reserve
                && self.involves_token(intermediate),
            has_external_weight_source: matches!(self.kind, PoolKind::MiniChef { .. }),
        }
    }

    pub fn label(&self) -> String {
        match &self.kind {
            PoolKind::DoubleSided { tokens, .. } | PoolKind::MiniChef { tokens, .. } => {
                format!("{}-{}", tokens[0].symbol, tokens[1].symbol)
            }
            PoolKind::SingleSided { reward_token, .. } => format!("stake for {}", reward_token.symbol),
        }
    }
}
