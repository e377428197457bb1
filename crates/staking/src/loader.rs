//! Concurrent loading of pool and market snapshots.

use crate::store::ReadModelStore;
use futures::future::join_all;
use rytell_earn_domain::entities::{PoolKind, StakingPool};
use rytell_earn_domain::enums::BlockTag;
use rytell_earn_domain::math::ONE_TOKEN;
use rytell_earn_domain::value_objects::{MarketSnapshot, PairReserves, PoolSnapshot, ReadState};
use rytell_earn_domain::{Address, TokenAmount};
use rytell_earn_protocols::{RpcError, StakingReader};
use std::sync::Arc;
use tracing::{debug, info};

/// Addresses the loader needs beyond the pools themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderConfig {
    /// Reference asset (WAVAX).
    pub reference: Address,
    /// Intermediate asset (RADI), also the single-sided staking token.
    pub intermediate: Address,
    /// USD token the reference asset is quoted in.
    pub quote: Address,
    /// Known reference/intermediate pair; looked up through the factory when unset.
    pub hop_pair: Option<Address>,
    /// Known reference/quote pair; looked up through the factory when unset.
    pub quote_pair: Option<Address>,
}

/// Issues every read of a pass concurrently and records the outcomes.
pub struct SnapshotLoader {
    reader: Arc<dyn StakingReader>,
    config: LoaderConfig,
}

type AmountState = ReadState<TokenAmount>;

impl SnapshotLoader {
    pub fn new(reader: Arc<dyn StakingReader>, config: LoaderConfig) -> Self {
        Self { reader, config }
    }

    /// Loads the market and every pool at `block`.
    ///
    /// Never fails: each read failure is recorded in the snapshot.
    pub async fn load(
        &self,
        pools: &[StakingPool],
        block: BlockTag,
        account: Option<Address>,
    ) -> (Vec<PoolSnapshot>, MarketSnapshot) {
        let needs_minichef = pools
            .iter()
            .any(|p| matches!(p.kind, PoolKind::MiniChef { .. }));

        let (market, snapshots) = futures::join!(
            self.load_market(block, needs_minichef),
            join_all(pools.iter().map(|pool| self.load_pool(pool, block, account))),
        );

        let failed = snapshots.iter().filter(|s| has_failure(s)).count();
        info!(
            block = %block,
            pools = snapshots.len(),
            failed,
            "Loaded staking snapshots"
        );
        (snapshots, market)
    }

    /// Runs one pass and commits it to `store`. Returns whether the commit
    /// was accepted.
    pub async fn refresh(
        &self,
        store: &ReadModelStore,
        pools: &[StakingPool],
        block: BlockTag,
        account: Option<Address>,
    ) -> bool {
        let pass = store.begin_pass(block).await;
        let (snapshots, market) = self.load(pools, block, account).await;
        store.commit(pass, snapshots, market).await
    }

    pub async fn load_market(&self, block: BlockTag, needs_minichef: bool) -> MarketSnapshot {
        let minichef = async {
            if needs_minichef {
                ReadState::from(self.reader.chef_state(block).await)
            } else {
                ReadState::Pending
            }
        };
        let (hop_pair, quote_pair, minichef) = futures::join!(
            self.pair(self.config.hop_pair, self.config.reference, self.config.intermediate, block),
            self.pair(self.config.quote_pair, self.config.reference, self.config.quote, block),
            minichef,
        );
        MarketSnapshot {
            hop_pair,
            quote_pair,
            minichef,
        }
    }

    async fn pair(
        &self,
        known: Option<Address>,
        token_a: Address,
        token_b: Address,
        block: BlockTag,
    ) -> ReadState<Option<PairReserves>> {
        match known {
            Some(address) => self.reader.pair_at(address, block).await.map(Some).into(),
            None => self.reader.pair_reserves(token_a, token_b, block).await.into(),
        }
    }

    /// Loads one pool. Reads that depend on the underlying pair wait for it.
    pub async fn load_pool(
        &self,
        pool: &StakingPool,
        block: BlockTag,
        account: Option<Address>,
    ) -> PoolSnapshot {
        let reader = &self.reader;
        let staking = pool.staking_address;
        let mut snapshot = PoolSnapshot::pending(pool.clone());

        match &pool.kind {
            PoolKind::DoubleSided { tokens, .. } => {
                let pair_reads = async {
                    let pair: ReadState<Option<PairReserves>> = reader
                        .pair_reserves(tokens[0].address, tokens[1].address, block)
                        .await
                        .into();
                    let supply = match pair.ready() {
                        Some(Some(pair)) => {
                            reader.total_supply(pair.pair_address, block).await.into()
                        }
                        Some(None) => ReadState::Ready(TokenAmount::zero()),
                        None => ReadState::Pending,
                    };
                    (pair, supply)
                };
                let (staked, earned, total, rate, finish, (pair, supply)) = futures::join!(
                    optional(account.map(|a| reader.balance_of(staking, a, block))),
                    optional(account.map(|a| reader.earned(staking, a, block))),
                    reader.total_supply(staking, block),
                    reader.reward_rate(staking, block),
                    reader.period_finish(staking, block),
                    pair_reads,
                );
                snapshot.staked_amount = staked;
                snapshot.earned_amount = earned;
                snapshot.total_staked = total.into();
                snapshot.reward_rate = rate.into();
                snapshot.period_finish = finish.into();
                snapshot.pair = pair;
                snapshot.stake_token_supply = supply;
            }
            PoolKind::MiniChef { tokens, pid } => {
                let pid = *pid;
                let minichef = reader.minichef_address();
                let pair_reads = async {
                    let pair: ReadState<Option<PairReserves>> = reader
                        .pair_reserves(tokens[0].address, tokens[1].address, block)
                        .await
                        .into();
                    let (supply, total): (AmountState, AmountState) = match pair.ready() {
                        Some(Some(pair)) => {
                            let lp = pair.pair_address;
                            let (supply, total) = futures::join!(
                                reader.total_supply(lp, block),
                                reader.balance_of(lp, minichef, block),
                            );
                            (supply.into(), total.into())
                        }
                        Some(None) => (
                            ReadState::Ready(TokenAmount::zero()),
                            ReadState::Ready(TokenAmount::zero()),
                        ),
                        None => (ReadState::Pending, ReadState::Pending),
                    };
                    (pair, supply, total)
                };
                let (staked, earned, alloc, (pair, supply, total)) = futures::join!(
                    optional(account.map(|a| reader.chef_staked(pid, a, block))),
                    optional(account.map(|a| reader.chef_pending_reward(pid, a, block))),
                    reader.chef_alloc_point(pid, block),
                    pair_reads,
                );
                snapshot.staked_amount = staked;
                snapshot.earned_amount = earned;
                snapshot.alloc_point = alloc.into();
                snapshot.pair = pair;
                snapshot.stake_token_supply = supply;
                snapshot.total_staked = total;
            }
            PoolKind::SingleSided {
                reward_token,
                route,
            } => {
                let path: Vec<Address> = std::iter::once(self.config.intermediate)
                    .chain(route.iter().copied())
                    .chain(std::iter::once(reward_token.address))
                    .collect();
                let (staked, earned, total, rate, finish, value) = futures::join!(
                    optional(account.map(|a| reader.balance_of(staking, a, block))),
                    optional(account.map(|a| reader.earned(staking, a, block))),
                    reader.total_supply(staking, block),
                    reader.reward_rate(staking, block),
                    reader.period_finish(staking, block),
                    reader.amount_out(TokenAmount(ONE_TOKEN), path, block),
                );
                snapshot.staked_amount = staked;
                snapshot.earned_amount = earned;
                snapshot.total_staked = total.into();
                snapshot.reward_rate = rate.into();
                snapshot.period_finish = finish.into();
                snapshot.staking_token_value = value.into();
            }
        }

        debug!(pool = %pool.id, failed = has_failure(&snapshot), "Loaded pool snapshot");
        snapshot
    }
}

/// Awaits an account-dependent read; `None` when no account is connected.
async fn optional<F>(read: Option<F>) -> Option<AmountState>
where
    F: Future<Output = Result<TokenAmount, RpcError>>,
{
    match read {
        Some(read) => Some(read.await.into()),
        None => None,
    }
}

fn has_failure(snapshot: &PoolSnapshot) -> bool {
    let account_failed = |state: &Option<AmountState>| state.as_ref().is_some_and(|s| s.is_failed());
    account_failed(&snapshot.staked_amount)
        || account_failed(&snapshot.earned_amount)
        || snapshot.total_staked.is_failed()
        || snapshot.reward_rate.is_failed()
        || snapshot.period_finish.is_failed()
        || snapshot.stake_token_supply.is_failed()
        || snapshot.pair.is_failed()
        || snapshot.alloc_point.is_failed()
        || snapshot.staking_token_value.is_failed()
}
