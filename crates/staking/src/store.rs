//! Read-model store for staking snapshots.

use rytell_earn_domain::entities::StakingPool;
use rytell_earn_domain::enums::BlockTag;
use rytell_earn_domain::value_objects::{MarketSnapshot, PoolSnapshot};
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::RwLock;
use tracing::debug;

/// Ticket for one load pass against one block tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassHandle {
    pub generation: u64,
    pub block: BlockTag,
}

/// Newest snapshots keyed by `(pool id, block tag)`.
///
/// Every pass takes a [`PassHandle`]; a commit is accepted only if no newer
/// pass for the same block tag has started since. Entries for pinned blocks
/// stay until [`ReadModelStore::prune`] drops them.
#[derive(Clone, Default)]
pub struct ReadModelStore {
    pools: Arc<RwLock<HashMap<(String, BlockTag), PoolSnapshot>>>,
    markets: Arc<RwLock<HashMap<BlockTag, MarketSnapshot>>>,
    latest: Arc<RwLock<HashMap<BlockTag, u64>>>,
    next_generation: Arc<AtomicU64>,
}

impl ReadModelStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a pass and makes every older pass for `block` stale.
    pub async fn begin_pass(&self, block: BlockTag) -> PassHandle {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.latest.write().await.insert(block, generation);
        debug!(generation, block = %block, "Started load pass");
        PassHandle { generation, block }
    }

    /// Whether `pass` is still the newest pass for its block tag.
    pub async fn is_current(&self, pass: PassHandle) -> bool {
        self.latest.read().await.get(&pass.block) == Some(&pass.generation)
    }

    /// Stores the results of `pass`. Returns `false` and drops the data if a
    /// newer pass has started.
    pub async fn commit(
        &self,
        pass: PassHandle,
        snapshots: Vec<PoolSnapshot>,
        market: MarketSnapshot,
    ) -> bool {
        // Hold the generation lock so a concurrent begin_pass cannot slip in
        // between the check and the write.
        let latest = self.latest.read().await;
        if latest.get(&pass.block) != Some(&pass.generation) {
            debug!(
                generation = pass.generation,
                block = %pass.block,
                "Discarding stale pass"
            );
            return false;
        }

        let mut pools = self.pools.write().await;
        for snapshot in snapshots {
            pools.insert((snapshot.pool.id.clone(), pass.block), snapshot);
        }
        self.markets.write().await.insert(pass.block, market);
        debug!(generation = pass.generation, block = %pass.block, "Committed pass");
        true
    }

    /// Snapshot for one pool, if any pass has committed it.
    pub async fn get(&self, pool_id: &str, block: BlockTag) -> Option<PoolSnapshot> {
        self.pools
            .read()
            .await
            .get(&(pool_id.to_string(), block))
            .cloned()
    }

    /// Snapshots for `pools` in the given order. Pools never loaded come back
    /// fully pending.
    pub async fn snapshots(&self, pools: &[StakingPool], block: BlockTag) -> Vec<PoolSnapshot> {
        let stored = self.pools.read().await;
        pools
            .iter()
            .map(|pool| {
                stored
                    .get(&(pool.id.clone(), block))
                    .cloned()
                    .unwrap_or_else(|| PoolSnapshot::pending(pool.clone()))
            })
            .collect()
    }

    pub async fn market(&self, block: BlockTag) -> MarketSnapshot {
        self.markets
            .read()
            .await
            .get(&block)
            .cloned()
            .unwrap_or_default()
    }

    /// Drops everything stored for block numbers below `before`. `Latest` is
    /// kept. Passes still running for a dropped block become stale.
    pub async fn prune(&self, before: u64) {
        let keep = |block: &BlockTag| match block {
            BlockTag::Latest => true,
            BlockTag::Number(n) => *n >= before,
        };
        // Same lock order as commit.
        let mut latest = self.latest.write().await;
        let mut pools = self.pools.write().await;
        let mut markets = self.markets.write().await;

        let dropped = pools.len();
        latest.retain(|block, _| keep(block));
        pools.retain(|(_, block), _| keep(block));
        markets.retain(|block, _| keep(block));
        debug!(before, dropped = dropped - pools.len(), "Pruned pinned snapshots");
    }
}
