//! Command line interface for Rytell staking pools.
use anyhow::{Context, Result, anyhow, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use rust_decimal::Decimal;
use rytell_earn_data::{ApiConfig, ExchangeApi, ExchangeApiClient, PoolRegistry};
use rytell_earn_domain::entities::{PoolKind, StakingPool};
use rytell_earn_domain::enums::BlockTag;
use rytell_earn_domain::metrics::{ExchangeProjection, liquidity_value, pool_share_percent};
use rytell_earn_domain::stake_input::parse_stake_amount;
use rytell_earn_domain::{Address, TokenAmount};
use rytell_earn_protocols::{ChainStakingReader, RpcConfig, RpcProvider, StakingReader};
use rytell_earn_staking::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

use output::{DEFAULT_DECIMALS, amount, pools_table};

#[derive(Parser)]
#[command(name = "rytell-earn")]
#[command(about = "Rytell staking pools, rewards and APR", long_about = None)]
struct Cli {
    /// JSON-RPC endpoint of an Avalanche C-Chain node
    #[arg(long, env = "RPC_URL", default_value = "https://api.avax.network/ext/bc/C/rpc")]
    rpc_url: String,

    /// Base URL of the exchange API
    #[arg(long, env = "EXCHANGE_API", default_value = "https://api.rytell.exchange")]
    exchange_api: String,

    /// Account whose stakes and rewards are shown
    #[arg(long, env = "ACCOUNT", value_parser = parse_address)]
    account: Option<Address>,

    /// Pool registry JSON
    #[arg(long, env = "POOLS_FILE", default_value = "pools.json")]
    pools_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show every registered staking pool
    Pools {
        /// Pin reads to a block number instead of latest
        #[arg(long)]
        block: Option<u64>,

        /// Order as on the Earn page
        #[arg(long)]
        sorted: bool,

        /// Fetch swap-fee and staking APR from the exchange API
        #[arg(long)]
        with_apr: bool,
    },
    /// Circulating RADI supply
    CirculatingSupply,
    /// APR published by the exchange API for one staking contract
    Apr {
        #[arg(value_parser = parse_address)]
        staking_address: Address,
    },
    /// Projected xRADI share-price growth over a year
    Projection {
        /// RADI held by the staking bar, in whole tokens
        #[arg(long)]
        total_staked: Decimal,

        /// xRADI supply, in whole tokens
        #[arg(long)]
        total_shares: Decimal,
    },
    /// The account's share of a pool's liquidity
    Position {
        pool_id: String,
    },
    /// Check an amount before staking or unstaking it
    CheckStake {
        pool_id: String,

        /// Amount in whole tokens, e.g. 1.25
        amount: String,

        /// Check against the staked balance instead of the wallet balance
        #[arg(long)]
        unstake: bool,
    },
}

fn parse_address(value: &str) -> Result<Address, String> {
    let stripped = value.strip_prefix("0x").unwrap_or(value);
    let bytes = hex::decode(stripped).map_err(|e| format!("invalid address {value}: {e}"))?;
    if bytes.len() != 20 {
        return Err(format!("invalid address {value}: expected 20 bytes"));
    }
    Ok(Address::from_slice(&bytes))
}

fn unix_now() -> u64 {
    u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default()
}

fn find_pool<'a>(registry: &'a PoolRegistry, pool_id: &str) -> Result<&'a StakingPool> {
    registry
        .pools
        .iter()
        .find(|p| p.id == pool_id)
        .ok_or_else(|| anyhow!("unknown pool {pool_id}"))
}

struct ChainContext {
    registry: PoolRegistry,
    reader: Arc<dyn StakingReader>,
}

fn chain_context(cli: &Cli) -> Result<ChainContext> {
    let registry = PoolRegistry::load(&cli.pools_file)
        .with_context(|| format!("loading {}", cli.pools_file.display()))?;
    let provider = RpcProvider::new(RpcConfig {
        url: cli.rpc_url.clone(),
        ..RpcConfig::default()
    })?;
    let reader = Arc::new(ChainStakingReader::new(Arc::new(provider), registry.contracts));
    Ok(ChainContext { registry, reader })
}

fn exchange_api(cli: &Cli) -> Result<ExchangeApiClient> {
    Ok(ExchangeApiClient::new(ApiConfig {
        base_url: cli.exchange_api.clone(),
        ..ApiConfig::default()
    })?)
}

async fn show_pools(cli: &Cli, block: BlockTag, sorted: bool, with_apr: bool) -> Result<()> {
    let ctx = chain_context(cli)?;
    let registry = &ctx.registry;

    let loader = SnapshotLoader::new(
        ctx.reader.clone(),
        LoaderConfig {
            reference: registry.reference_token.address,
            intermediate: registry.intermediate_token.address,
            quote: registry.quote_token.address,
            hop_pair: registry.hop_pair,
            quote_pair: registry.quote_pair,
        },
    );
    let store = ReadModelStore::new();
    if !loader
        .refresh(&store, &registry.pools, block, cli.account)
        .await
    {
        bail!("load pass was superseded");
    }

    let snapshots = store.snapshots(&registry.pools, block).await;
    let market = store.market(block).await;
    let price =
        reference_price_from_market(&market, &registry.reference_token, &registry.quote_token);

    let aggregator = StakingAggregator::new(AggregatorConfig {
        reference: registry.reference_token.clone(),
        intermediate: registry.intermediate_token.clone(),
        stable_tokens: registry.stable_tokens.clone(),
    });
    let mut models = aggregator.aggregate(&snapshots, &market, &price, unix_now());

    if with_apr {
        let api = exchange_api(cli)?;
        let enriched = enrich_with_remote_apr(&api, &mut models).await;
        info!(enriched, pools = models.len(), "Attached remote APR");
    }
    if sorted {
        sort_for_display(&mut models);
    }

    if cli.account.is_some() {
        println!(
            "{} to claim: {}",
            registry.intermediate_token.symbol,
            amount(total_earned(&models), registry.intermediate_token.decimals)
        );
    }
    pools_table(&models).printstd();
    println!(
        "{} of {} pools loaded",
        models.len(),
        registry.pools.len()
    );
    Ok(())
}

async fn show_position(cli: &Cli, pool_id: &str) -> Result<()> {
    let ctx = chain_context(cli)?;
    let account = cli.account.context("ACCOUNT is required")?;
    let pool = find_pool(&ctx.registry, pool_id)?;
    let tokens = pool
        .pair_tokens()
        .ok_or_else(|| anyhow!("{pool_id} is not a liquidity pool"))?;

    let block = BlockTag::Latest;
    let pair = ctx
        .reader
        .pair_reserves(tokens[0].address, tokens[1].address, block)
        .await?
        .ok_or_else(|| anyhow!("pair for {pool_id} does not exist"))?;
    let (balance, supply) = tokio::try_join!(
        ctx.reader.balance_of(pair.pair_address, account, block),
        ctx.reader.total_supply(pair.pair_address, block),
    )?;

    println!("{}: {}% of the pool", pool.label(), pool_share_percent(balance, supply).round_dp(4));
    for token in tokens {
        let reserve = pair.reserve_of(&token.address).unwrap_or_default();
        let value = liquidity_value(reserve, supply, balance)?;
        println!("  {} {}", amount(value, token.decimals), token.symbol);
    }
    Ok(())
}

async fn check_stake(cli: &Cli, pool_id: &str, typed: &str, unstake: bool) -> Result<()> {
    let ctx = chain_context(cli)?;
    let pool = find_pool(&ctx.registry, pool_id)?;
    let block = BlockTag::Latest;

    let available = match cli.account {
        None => None,
        Some(account) => Some(match (&pool.kind, unstake) {
            (PoolKind::MiniChef { pid, .. }, true) => {
                ctx.reader.chef_staked(*pid, account, block).await?
            }
            (_, true) => {
                ctx.reader
                    .balance_of(pool.staking_address, account, block)
                    .await?
            }
            (PoolKind::SingleSided { .. }, false) => {
                ctx.reader
                    .balance_of(ctx.registry.intermediate_token.address, account, block)
                    .await?
            }
            (PoolKind::DoubleSided { tokens, .. } | PoolKind::MiniChef { tokens, .. }, false) => {
                let pair = ctx
                    .reader
                    .pair_address(tokens[0].address, tokens[1].address, block)
                    .await?
                    .ok_or_else(|| anyhow!("pair for {pool_id} does not exist"))?;
                ctx.reader.balance_of(pair, account, block).await?
            }
        }),
    };

    match parse_stake_amount(typed, DEFAULT_DECIMALS, available, cli.account.is_some()) {
        Ok(parsed) => println!("ok: {} raw units", parsed),
        Err(e) => println!("{e}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Pools {
            block,
            sorted,
            with_apr,
        } => {
            let block = block.map(BlockTag::Number).unwrap_or_default();
            show_pools(&cli, block, *sorted, *with_apr).await?;
        }
        Commands::CirculatingSupply => {
            let supply: TokenAmount = exchange_api(&cli)?.circulating_supply().await?;
            println!("{}", amount(supply, DEFAULT_DECIMALS));
        }
        Commands::Apr { staking_address } => {
            let apr = exchange_api(&cli)?.pool_apr(*staking_address).await?;
            println!("swap fees: {}%", apr.swap_fee_apr);
            println!("staking:   {}%", apr.staking_apr);
            println!("combined:  {}%", apr.combined_apr);
        }
        Commands::Projection {
            total_staked,
            total_shares,
        } => {
            let annual = exchange_api(&cli)?.annual_projection().await?;
            let projection = ExchangeProjection::new(*total_staked, *total_shares, annual);
            println!("share price:           {}", projection.share_price().round_dp(6));
            println!("projected share price: {}", projection.projected_share_price().round_dp(6));
            println!("projected APR:         {}%", projection.projected_apr());
        }
        Commands::Position { pool_id } => show_position(&cli, pool_id).await?,
        Commands::CheckStake {
            pool_id,
            amount,
            unstake,
        } => check_stake(&cli, pool_id, amount, *unstake).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_address() {
        let address = parse_address("0x0000000000000000000000000000000000000064").unwrap();
        assert_eq!(address, Address::from_low_u64_be(100));
        assert_eq!(
            parse_address("0000000000000000000000000000000000000064").unwrap(),
            address
        );
        assert!(parse_address("0x1234").is_err());
        assert!(parse_address("0xzz").is_err());
    }

    #[test]
    fn test_cli_parses_pools_command() {
        let cli = Cli::try_parse_from([
            "rytell-earn",
            "--pools-file",
            "registry.json",
            "pools",
            "--block",
            "42",
            "--sorted",
        ])
        .unwrap();
        match cli.command {
            Commands::Pools {
                block,
                sorted,
                with_apr,
            } => {
                assert_eq!(block, Some(42));
                assert!(sorted);
                assert!(!with_apr);
            }
            _ => panic!("expected pools command"),
        }
    }
}
