//! Turns pool snapshots into view models.

use primitive_types::U256;
use rytell_earn_domain::entities::{PoolKind, StakingPool};
use rytell_earn_domain::enums::ValuationRoute;
use rytell_earn_domain::math::{apply_ratio, fixed_point_ratio};
use rytell_earn_domain::metrics::{
    annual_percentage_rate, individual_reward_rate, pool_reward_rate,
    reward_rate_in_staking_token, staked_value_in_reference, staked_value_via_hop,
};
use rytell_earn_domain::value_objects::{
    MarketSnapshot, PairReserves, PoolSnapshot, PoolViewModel, PriceQuote, QuotedAmount,
    ReadState, ReferencePriceOracle, RewardSchedule, StakePosition,
};
use rytell_earn_domain::{MathError, Token, TokenAmount};
use tracing::{debug, error, info, warn};

/// MiniChef alloc points per unit of displayed multiplier.
const ALLOC_POINTS_PER_MULTIPLIER: u64 = 100;

/// Why a pool is left out of one pass.
#[derive(Debug)]
enum Skip {
    /// A required read has not resolved; the pool shows up once it does.
    Pending,
    Failed(String),
}

impl From<MathError> for Skip {
    fn from(e: MathError) -> Self {
        Self::Failed(e.to_string())
    }
}

fn required<T: Clone>(state: &ReadState<T>, field: &str) -> Result<T, Skip> {
    match state {
        ReadState::Ready(value) => Ok(value.clone()),
        ReadState::Pending => Err(Skip::Pending),
        ReadState::Failed(reason) => Err(Skip::Failed(format!("{field}: {reason}"))),
    }
}

/// Account reads count as zero when no account is connected.
fn account_amount(
    state: &Option<ReadState<TokenAmount>>,
    field: &str,
) -> Result<TokenAmount, Skip> {
    match state {
        Some(state) => required(state, field),
        None => Ok(TokenAmount::zero()),
    }
}

fn existing_pair(
    state: &ReadState<Option<PairReserves>>,
    field: &str,
) -> Result<PairReserves, Skip> {
    required(state, field)?.ok_or_else(|| Skip::Failed(format!("{field} does not exist")))
}

fn reserve(pair: &PairReserves, token: &Token) -> Result<U256, Skip> {
    pair.reserve_of(&token.address)
        .map(|r| r.as_u256())
        .ok_or_else(|| {
            Skip::Failed(format!(
                "pair {:?} does not hold {}",
                pair.pair_address, token.symbol
            ))
        })
}

/// Tokens that select the valuation path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregatorConfig {
    /// Asset staked value is reported in (WAVAX).
    pub reference: Token,
    /// Asset valued through the hop pair (RADI).
    pub intermediate: Token,
    /// Stablecoins that value MiniChef pools directly in USD, in precedence order.
    pub stable_tokens: Vec<Token>,
}

/// Staked value of one pool.
struct Valuation {
    in_reference: TokenAmount,
    /// Set when the pool is valued in USD directly.
    in_usd: Option<QuotedAmount>,
}

/// Kind-specific figures feeding one view model.
struct PoolTerms {
    tokens: Vec<Token>,
    stake: StakePosition,
    schedule: RewardSchedule,
    finished: bool,
    /// Zero once the period has finished.
    total_rate: TokenAmount,
    multiplier: U256,
    valuation: Valuation,
    apr: Option<U256>,
}

/// Pure aggregation over immutable snapshots.
pub struct StakingAggregator {
    config: AggregatorConfig,
}

impl StakingAggregator {
    pub fn new(config: AggregatorConfig) -> Self {
        Self { config }
    }

    /// Builds one view model per ready pool, in input order.
    ///
    /// Pools with pending reads are left out silently. Pools with failed
    /// reads, a missing pair, or arithmetic overflow are left out with a
    /// warning. The batch itself never fails.
    pub fn aggregate(
        &self,
        snapshots: &[PoolSnapshot],
        market: &MarketSnapshot,
        oracle: &dyn ReferencePriceOracle,
        now: u64,
    ) -> Vec<PoolViewModel> {
        let price = oracle.reference_price();
        let mut models = Vec::with_capacity(snapshots.len());

        for snapshot in snapshots {
            match self.view_model(snapshot, market, price.as_ref(), now) {
                Ok(model) => models.push(model),
                Err(Skip::Pending) => {
                    debug!(pool = %snapshot.pool.id, "Pool still loading");
                }
                Err(Skip::Failed(reason)) => {
                    warn!(
                        pool = %snapshot.pool.id,
                        reason = %reason,
                        "Failed to load staking pool"
                    );
                }
            }
        }

        info!(
            pools = snapshots.len(),
            ready = models.len(),
            "Aggregated staking pools"
        );
        models
    }

    fn view_model(
        &self,
        snapshot: &PoolSnapshot,
        market: &MarketSnapshot,
        price: Option<&PriceQuote>,
        now: u64,
    ) -> Result<PoolViewModel, Skip> {
        let pool = &snapshot.pool;
        let staked = account_amount(&snapshot.staked_amount, "staked amount")?;
        let earned = account_amount(&snapshot.earned_amount, "earned amount")?;

        let terms = match &pool.kind {
            PoolKind::DoubleSided { tokens, multiplier } => {
                self.double_sided_terms(snapshot, market, tokens, *multiplier, staked, now)?
            }
            PoolKind::MiniChef { tokens, .. } => {
                self.minichef_terms(snapshot, market, tokens, staked, now)?
            }
            PoolKind::SingleSided { reward_token, .. } => {
                self.single_sided_terms(snapshot, market, reward_token, staked, now)?
            }
        };

        let individual = individual_reward_rate(
            terms.stake.staked_amount.as_u256(),
            terms.stake.total_staked_amount.as_u256(),
            terms.total_rate.as_u256(),
        )?;
        let staked_value_in_usd = match terms.valuation.in_usd {
            Some(usd) => Some(usd),
            None => price
                .map(|p| p.quote(terms.valuation.in_reference))
                .transpose()?,
        };

        Ok(PoolViewModel {
            pool_id: pool.id.clone(),
            label: pool.label(),
            staking_address: pool.staking_address,
            tokens: terms.tokens,
            stake: terms.stake,
            schedule: terms.schedule,
            is_period_finished: terms.finished,
            earned_amount: earned,
            total_reward_rate: terms.total_rate,
            individual_reward_rate: TokenAmount(individual),
            staked_value_in_reference: terms.valuation.in_reference,
            staked_value_in_usd,
            multiplier: if pool.delisted {
                U256::zero()
            } else {
                terms.multiplier
            },
            apr: terms.apr,
            remote_apr: None,
        })
    }

    fn double_sided_terms(
        &self,
        snapshot: &PoolSnapshot,
        market: &MarketSnapshot,
        tokens: &[Token; 2],
        multiplier: u64,
        staked: TokenAmount,
        now: u64,
    ) -> Result<PoolTerms, Skip> {
        let pair = existing_pair(&snapshot.pair, "pair")?;
        let total = required(&snapshot.total_staked, "total staked")?;
        let rate = required(&snapshot.reward_rate, "reward rate")?;
        let finish = required(&snapshot.period_finish, "period finish")?;
        let supply = required(&snapshot.stake_token_supply, "LP supply")?;

        let schedule = RewardSchedule::new(rate, Some(finish));
        Ok(PoolTerms {
            tokens: tokens.to_vec(),
            stake: StakePosition::new(staked, total, supply),
            schedule,
            finished: schedule.is_period_finished(now),
            total_rate: schedule.effective_rate(now),
            multiplier: U256::from(multiplier),
            valuation: self.valuation(&snapshot.pool, &pair, total, supply, market, false)?,
            apr: None,
        })
    }

    /// MiniChef pools take their weight and emission from the chef contract.
    /// An alloc point of zero ends the period once the chef has an
    /// expiration; a chef with no expiration never reports finished.
    fn minichef_terms(
        &self,
        snapshot: &PoolSnapshot,
        market: &MarketSnapshot,
        tokens: &[Token; 2],
        staked: TokenAmount,
        now: u64,
    ) -> Result<PoolTerms, Skip> {
        // The LP reads wait on the pair, so check it first.
        let pair = existing_pair(&snapshot.pair, "pair")?;
        let alloc = required(&snapshot.alloc_point, "alloc point")?;
        let chef = required(&market.minichef, "minichef")?;
        let total = required(&snapshot.total_staked, "total staked")?;
        let supply = required(&snapshot.stake_token_supply, "LP supply")?;

        let pool_rate = TokenAmount(pool_reward_rate(
            alloc.as_u256(),
            chef.total_alloc_point.as_u256(),
            chef.reward_per_second.as_u256(),
        )?);
        let schedule = RewardSchedule::new(pool_rate, Some(chef.rewards_expiration));
        let finished = schedule.is_period_finished(now)
            || (chef.rewards_expiration != 0 && alloc.is_zero());

        Ok(PoolTerms {
            tokens: tokens.to_vec(),
            stake: StakePosition::new(staked, total, supply),
            schedule,
            finished,
            total_rate: if finished {
                TokenAmount::zero()
            } else {
                pool_rate
            },
            multiplier: alloc.as_u256() / U256::from(ALLOC_POINTS_PER_MULTIPLIER),
            valuation: self.valuation(&snapshot.pool, &pair, total, supply, market, true)?,
            apr: None,
        })
    }

    /// Single-sided pools stake the intermediate asset, so APR compares the
    /// reward rate converted into staking-token units with the total staked.
    fn single_sided_terms(
        &self,
        snapshot: &PoolSnapshot,
        market: &MarketSnapshot,
        reward_token: &Token,
        staked: TokenAmount,
        now: u64,
    ) -> Result<PoolTerms, Skip> {
        let total = required(&snapshot.total_staked, "total staked")?;
        let rate = required(&snapshot.reward_rate, "reward rate")?;
        let finish = required(&snapshot.period_finish, "period finish")?;
        let value = required(&snapshot.staking_token_value, "staking token value")?;

        let schedule = RewardSchedule::new(rate, Some(finish));
        let finished = schedule.is_period_finished(now);
        let total_rate = schedule.effective_rate(now);
        let apr = if finished {
            U256::zero()
        } else {
            let rate_in_staking_token =
                reward_rate_in_staking_token(total_rate.as_u256(), Some(value.as_u256()))?;
            annual_percentage_rate(rate_in_staking_token, total.as_u256())?
        };

        Ok(PoolTerms {
            tokens: vec![self.config.intermediate.clone(), reward_token.clone()],
            stake: StakePosition::new(staked, total, total),
            schedule,
            finished,
            total_rate,
            multiplier: U256::zero(),
            valuation: Valuation {
                in_reference: self.intermediate_in_reference(total, market)?,
                in_usd: None,
            },
            apr: Some(apr),
        })
    }

    /// Picks how an LP pool is valued. Stablecoins are only considered for
    /// MiniChef pools.
    pub fn valuation_route(
        &self,
        pool: &StakingPool,
        consider_stables: bool,
    ) -> (ValuationRoute, Option<&Token>) {
        if consider_stables {
            if let Some(stable) = self
                .config
                .stable_tokens
                .iter()
                .find(|t| pool.involves_token(&t.address))
            {
                return (ValuationRoute::Stable, Some(stable));
            }
        }
        let caps = pool.capabilities(
            &self.config.reference.address,
            &self.config.intermediate.address,
        );
        if caps.has_direct_reference_reserve {
            (ValuationRoute::DirectReference, Some(&self.config.reference))
        } else if caps.has_intermediate_hop_reserve {
            (ValuationRoute::IntermediateHop, Some(&self.config.intermediate))
        } else {
            (ValuationRoute::Unidentified, None)
        }
    }

    fn valuation(
        &self,
        pool: &StakingPool,
        pair: &PairReserves,
        total: TokenAmount,
        supply: TokenAmount,
        market: &MarketSnapshot,
        consider_stables: bool,
    ) -> Result<Valuation, Skip> {
        let (total, supply) = (total.as_u256(), supply.as_u256());
        let (route, token) = self.valuation_route(pool, consider_stables);

        let valuation = match (route, token) {
            (ValuationRoute::Stable, Some(stable)) => {
                let value = staked_value_in_reference(total, supply, reserve(pair, stable)?)?;
                Valuation {
                    in_reference: TokenAmount::zero(),
                    in_usd: Some(QuotedAmount {
                        token: stable.clone(),
                        amount: TokenAmount(value),
                    }),
                }
            }
            (ValuationRoute::DirectReference, _) => {
                let reserve_of_reference = reserve(pair, &self.config.reference)?;
                Valuation {
                    in_reference: TokenAmount(staked_value_in_reference(
                        total,
                        supply,
                        reserve_of_reference,
                    )?),
                    in_usd: None,
                }
            }
            (ValuationRoute::IntermediateHop, _) => {
                let hop = existing_pair(&market.hop_pair, "hop pair")?;
                let value = staked_value_via_hop(
                    total,
                    supply,
                    reserve(pair, &self.config.intermediate)?,
                    reserve(&hop, &self.config.intermediate)?,
                    reserve(&hop, &self.config.reference)?,
                )?;
                Valuation {
                    in_reference: TokenAmount(value),
                    in_usd: None,
                }
            }
            _ => {
                error!(
                    pool = %pool.id,
                    pair = ?pair.pair_address,
                    "Could not identify total staked value for pair"
                );
                Valuation {
                    in_reference: TokenAmount::zero(),
                    in_usd: None,
                }
            }
        };
        Ok(valuation)
    }

    /// Value of an amount of the intermediate asset in the reference asset,
    /// zero until the hop pair is known.
    fn intermediate_in_reference(
        &self,
        amount: TokenAmount,
        market: &MarketSnapshot,
    ) -> Result<TokenAmount, Skip> {
        let Some(Some(hop)) = market.hop_pair.ready() else {
            return Ok(TokenAmount::zero());
        };
        let ratio = fixed_point_ratio(
            reserve(hop, &self.config.reference)?,
            reserve(hop, &self.config.intermediate)?,
        )?;
        Ok(TokenAmount(apply_ratio(amount.as_u256(), ratio)?))
    }
}

/// Reference asset price from the market's quote pair, if it is loaded.
pub fn reference_price_from_market(
    market: &MarketSnapshot,
    reference: &Token,
    quote: &Token,
) -> Option<PriceQuote> {
    let pair = market.quote_pair.ready()?.as_ref()?;
    match PriceQuote::from_pair(pair, reference, quote) {
        Ok(price) => price,
        Err(e) => {
            warn!(error = %e, quote = %quote, "Failed to price reference asset");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rytell_earn_domain::Address;
    use rytell_earn_domain::value_objects::{MiniChefState, ReserveSnapshot};

    const NOW: u64 = 1_000;
    const NO_PRICE: Option<PriceQuote> = None;

    fn addr(n: u64) -> Address {
        Address::from_low_u64_be(n)
    }

    fn token(n: u64, symbol: &str) -> Token {
        Token::new(addr(n), symbol, 18, symbol)
    }

    fn wavax() -> Token {
        token(1, "WAVAX")
    }

    fn radi() -> Token {
        token(2, "RADI")
    }

    fn usdc() -> Token {
        Token::new(addr(3), "USDC.e", 6, "USD Coin")
    }

    fn aggregator() -> StakingAggregator {
        StakingAggregator::new(AggregatorConfig {
            reference: wavax(),
            intermediate: radi(),
            stable_tokens: vec![usdc()],
        })
    }

    fn amount(v: u64) -> ReadState<TokenAmount> {
        ReadState::Ready(TokenAmount::from(v))
    }

    fn pair(address: u64, a: &Token, b: &Token, ra: u64, rb: u64) -> PairReserves {
        PairReserves::new(addr(address), a.address, b.address, ReserveSnapshot::new(ra, rb))
    }

    fn market() -> MarketSnapshot {
        MarketSnapshot {
            // 1 RADI = 0.5 WAVAX
            hop_pair: ReadState::Ready(Some(pair(10, &wavax(), &radi(), 1_000, 2_000))),
            quote_pair: ReadState::Ready(None),
            minichef: ReadState::Ready(MiniChefState {
                reward_per_second: TokenAmount::from(1_000u64),
                total_alloc_point: TokenAmount::from(1_000u64),
                rewards_expiration: 2_000,
            }),
        }
    }

    fn double_sided(id: &str, tokens: [Token; 2], multiplier: u64) -> PoolSnapshot {
        let pool = StakingPool {
            id: id.to_string(),
            staking_address: addr(100),
            kind: PoolKind::DoubleSided {
                tokens: tokens.clone(),
                multiplier,
            },
            delisted: false,
        };
        PoolSnapshot {
            staked_amount: Some(amount(10)),
            earned_amount: Some(amount(7)),
            total_staked: amount(100),
            reward_rate: amount(1_000),
            period_finish: ReadState::Ready(2_000),
            stake_token_supply: amount(200),
            pair: ReadState::Ready(Some(pair(20, &tokens[0], &tokens[1], 50, 80))),
            ..PoolSnapshot::pending(pool)
        }
    }

    fn minichef(id: &str, tokens: [Token; 2], alloc: u64) -> PoolSnapshot {
        let pool = StakingPool {
            id: id.to_string(),
            staking_address: addr(50),
            kind: PoolKind::MiniChef {
                tokens: tokens.clone(),
                pid: 0,
            },
            delisted: false,
        };
        PoolSnapshot {
            alloc_point: amount(alloc),
            total_staked: amount(100),
            stake_token_supply: amount(200),
            pair: ReadState::Ready(Some(pair(21, &tokens[0], &tokens[1], 50, 80))),
            ..PoolSnapshot::pending(pool)
        }
    }

    #[test]
    fn test_direct_reference_valuation() {
        let snapshot = double_sided("wavax-radi", [wavax(), radi()], 3);
        let models = aggregator().aggregate(&[snapshot], &market(), &NO_PRICE, NOW);

        let model = &models[0];
        // floor(100 * 50 * 2 / 200)
        assert_eq!(model.staked_value_in_reference, TokenAmount::from(50u64));
        // floor(1000 * 10 / 100)
        assert_eq!(model.individual_reward_rate, TokenAmount::from(100u64));
        assert_eq!(model.total_reward_rate, TokenAmount::from(1_000u64));
        assert_eq!(model.earned_amount, TokenAmount::from(7u64));
        assert_eq!(model.multiplier, U256::from(3u64));
        assert!(!model.is_period_finished);
        assert!(model.staked_value_in_usd.is_none());
        assert!(model.apr.is_none());
    }

    #[test]
    fn test_hop_valuation_and_usd_quote() {
        let xyz = token(9, "XYZ");
        // pair holds 50 RADI = 25 WAVAX
        let snapshot = double_sided("radi-xyz", [radi(), xyz], 1);
        // 1 WAVAX = 2 USDC (raw units)
        let price = PriceQuote::new(usdc(), TokenAmount::from(2_000_000_000_000_000_000u64));

        let models = aggregator().aggregate(&[snapshot], &market(), &price, NOW);
        let model = &models[0];
        // floor(100 * 25 * 2 / 200)
        assert_eq!(model.staked_value_in_reference, TokenAmount::from(25u64));
        let usd = model.staked_value_in_usd.as_ref().unwrap();
        assert_eq!(usd.token, usdc());
        assert_eq!(usd.amount, TokenAmount::from(50u64));
    }

    #[test]
    fn test_one_failed_pool_among_three() {
        let xyz = token(9, "XYZ");
        let first = double_sided("a", [wavax(), radi()], 1);
        let mut second = double_sided("b", [wavax(), xyz.clone()], 1);
        second.reward_rate = ReadState::Failed("execution reverted".to_string());
        let third = double_sided("c", [radi(), xyz], 1);

        let models = aggregator().aggregate(&[first, second, third], &market(), &NO_PRICE, NOW);
        let ids: Vec<&str> = models.iter().map(|m| m.pool_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_pending_and_missing_pair_are_skipped() {
        let mut pending = double_sided("pending", [wavax(), radi()], 1);
        pending.total_staked = ReadState::Pending;
        let mut missing = double_sided("missing", [wavax(), radi()], 1);
        missing.pair = ReadState::Ready(None);
        let ready = double_sided("ready", [wavax(), radi()], 1);

        let models = aggregator().aggregate(&[pending, missing, ready], &market(), &NO_PRICE, NOW);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].pool_id, "ready");
    }

    #[test]
    fn test_hop_pool_needs_hop_pair() {
        let snapshot = double_sided("radi-xyz", [radi(), token(9, "XYZ")], 1);
        let mut market = market();
        market.hop_pair = ReadState::Ready(None);
        assert!(aggregator().aggregate(&[snapshot.clone()], &market, &NO_PRICE, NOW).is_empty());

        // direct pools do not depend on it
        let direct = double_sided("wavax-radi", [wavax(), radi()], 1);
        assert_eq!(aggregator().aggregate(&[direct], &market, &NO_PRICE, NOW).len(), 1);
    }

    #[test]
    fn test_no_account_counts_as_zero() {
        let mut snapshot = double_sided("a", [wavax(), radi()], 1);
        snapshot.staked_amount = None;
        snapshot.earned_amount = None;

        let models = aggregator().aggregate(&[snapshot], &market(), &NO_PRICE, NOW);
        assert_eq!(models[0].stake.staked_amount, TokenAmount::zero());
        assert_eq!(models[0].individual_reward_rate, TokenAmount::zero());
        assert_eq!(models[0].earned_amount, TokenAmount::zero());
    }

    #[test]
    fn test_finished_period_zeroes_rate() {
        let mut snapshot = double_sided("a", [wavax(), radi()], 1);
        snapshot.period_finish = ReadState::Ready(NOW - 1);
        let models = aggregator().aggregate(&[snapshot], &market(), &NO_PRICE, NOW);
        assert!(models[0].is_period_finished);
        assert_eq!(models[0].total_reward_rate, TokenAmount::zero());

        let mut fresh = double_sided("b", [wavax(), radi()], 1);
        fresh.period_finish = ReadState::Ready(0);
        let models = aggregator().aggregate(&[fresh], &market(), &NO_PRICE, NOW);
        assert!(!models[0].is_period_finished);
    }

    #[test]
    fn test_delisted_forces_zero_multiplier() {
        let mut snapshot = double_sided("a", [wavax(), radi()], 5);
        snapshot.pool.delisted = true;
        let mut chef = minichef("b", [wavax(), radi()], 500);
        chef.pool.delisted = true;

        let models = aggregator().aggregate(&[snapshot, chef], &market(), &NO_PRICE, NOW);
        assert!(models.iter().all(|m| m.multiplier.is_zero()));
    }

    #[test]
    fn test_minichef_rate_and_multiplier() {
        let snapshot = minichef("wavax-radi", [wavax(), radi()], 300);
        let models = aggregator().aggregate(&[snapshot], &market(), &NO_PRICE, NOW);

        let model = &models[0];
        // floor(300 * 1000 / 1000)
        assert_eq!(model.total_reward_rate, TokenAmount::from(300u64));
        assert_eq!(model.multiplier, U256::from(3u64));
        assert_eq!(model.staked_value_in_reference, TokenAmount::from(50u64));
        assert_eq!(model.schedule.period_finish_timestamp, Some(2_000));
    }

    #[test]
    fn test_minichef_zero_alloc_is_finished() {
        let snapshot = minichef("wavax-radi", [wavax(), radi()], 0);
        let models = aggregator().aggregate(&[snapshot], &market(), &NO_PRICE, NOW);
        assert!(models[0].is_period_finished);
        assert_eq!(models[0].total_reward_rate, TokenAmount::zero());
        assert!(models[0].multiplier.is_zero());
    }

    #[test]
    fn test_minichef_zero_alloc_without_expiration_is_running() {
        let snapshot = minichef("wavax-radi", [wavax(), radi()], 0);
        let mut market = market();
        if let ReadState::Ready(chef) = &mut market.minichef {
            chef.rewards_expiration = 0;
        }
        let models = aggregator().aggregate(&[snapshot], &market, &NO_PRICE, NOW);
        assert!(!models[0].is_period_finished);
        assert_eq!(models[0].schedule.period_finish_timestamp, Some(0));
        assert!(models[0].total_reward_rate.is_zero());
    }

    #[test]
    fn test_overstaked_account_is_still_emitted() {
        let mut snapshot = double_sided("a", [wavax(), radi()], 1);
        snapshot.staked_amount = Some(amount(250));

        let models = aggregator().aggregate(&[snapshot], &market(), &NO_PRICE, NOW);
        assert_eq!(models.len(), 1);
        // floor(1000 * 250 / 100)
        assert_eq!(models[0].individual_reward_rate, TokenAmount::from(2_500u64));
    }

    #[test]
    fn test_minichef_needs_chef_state() {
        let snapshot = minichef("wavax-radi", [wavax(), radi()], 100);
        let mut market = market();
        market.minichef = ReadState::Pending;
        assert!(aggregator().aggregate(&[snapshot], &market, &NO_PRICE, NOW).is_empty());
    }

    #[test]
    fn test_minichef_stable_valuation_wins() {
        // USDC.e is listed first so it is token0 with reserve 50
        let snapshot = minichef("usdc-wavax", [usdc(), wavax()], 100);
        let price = PriceQuote::new(usdc(), TokenAmount::from(1u64));
        let models = aggregator().aggregate(&[snapshot], &market(), &price, NOW);

        let model = &models[0];
        assert_eq!(model.staked_value_in_reference, TokenAmount::zero());
        let usd = model.staked_value_in_usd.as_ref().unwrap();
        assert_eq!(usd.token, usdc());
        assert_eq!(usd.amount, TokenAmount::from(50u64));
    }

    #[test]
    fn test_unidentified_pool_emitted_with_zero_value() {
        let snapshot = minichef("xyz-abc", [token(8, "ABC"), token(9, "XYZ")], 100);
        assert_eq!(
            aggregator().valuation_route(&snapshot.pool, true).0,
            ValuationRoute::Unidentified
        );

        let models = aggregator().aggregate(&[snapshot], &market(), &NO_PRICE, NOW);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].staked_value_in_reference, TokenAmount::zero());
    }

    #[test]
    fn test_overflow_skips_pool() {
        let mut snapshot = double_sided("huge", [wavax(), radi()], 1);
        snapshot.total_staked = ReadState::Ready(TokenAmount(U256::MAX));
        snapshot.stake_token_supply = amount(1);
        let ok = double_sided("ok", [wavax(), radi()], 1);

        let models = aggregator().aggregate(&[snapshot, ok], &market(), &NO_PRICE, NOW);
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].pool_id, "ok");
    }

    fn single_sided(finish: u64) -> PoolSnapshot {
        let pool = StakingPool {
            id: "stake-xyz".to_string(),
            staking_address: addr(200),
            kind: PoolKind::SingleSided {
                reward_token: token(9, "XYZ"),
                route: Vec::new(),
            },
            delisted: false,
        };
        PoolSnapshot {
            total_staked: amount(10_000),
            reward_rate: amount(100),
            period_finish: ReadState::Ready(finish),
            // 1 RADI = 1 XYZ
            staking_token_value: amount(1_000_000_000_000_000_000),
            ..PoolSnapshot::pending(pool)
        }
    }

    #[test]
    fn test_single_sided_apr() {
        let models = aggregator().aggregate(&[single_sided(2_000)], &market(), &NO_PRICE, NOW);
        let model = &models[0];
        // floor(100 * 31_536_000 * 100 / 10_000)
        assert_eq!(model.apr, Some(U256::from(31_536_000u64)));
        // 10_000 RADI at 0.5 WAVAX
        assert_eq!(model.staked_value_in_reference, TokenAmount::from(5_000u64));
        assert_eq!(model.tokens, vec![radi(), token(9, "XYZ")]);
        assert_eq!(model.label, "stake for XYZ");
    }

    #[test]
    fn test_single_sided_finished_apr_is_zero() {
        let models = aggregator().aggregate(&[single_sided(NOW - 1)], &market(), &NO_PRICE, NOW);
        assert_eq!(models[0].apr, Some(U256::zero()));
        assert!(models[0].is_period_finished);
    }

    #[test]
    fn test_reference_price_from_market() {
        let mut market = market();
        assert!(reference_price_from_market(&market, &wavax(), &usdc()).is_none());

        market.quote_pair = ReadState::Ready(Some(pair(11, &wavax(), &usdc(), 1_000, 20_000)));
        let price = reference_price_from_market(&market, &wavax(), &usdc()).unwrap();
        assert_eq!(price.ratio, TokenAmount::from(20_000_000_000_000_000_000u128));
    }
}
