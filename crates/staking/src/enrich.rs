use futures::future::join_all;
use rytell_earn_data::ExchangeApi;
use rytell_earn_domain::value_objects::PoolViewModel;
use tracing::{debug, warn};

/// Attaches the exchange API's APR figures to each view model.
///
/// All requests run concurrently. A failed request leaves that model's
/// `remote_apr` empty and never drops the model. Returns how many models
/// were enriched.
pub async fn enrich_with_remote_apr(api: &dyn ExchangeApi, models: &mut [PoolViewModel]) -> usize {
    let results = join_all(models.iter().map(|m| api.pool_apr(m.staking_address))).await;

    let mut enriched = 0;
    for (model, result) in models.iter_mut().zip(results) {
        match result {
            Ok(apr) => {
                debug!(pool = %model.pool_id, combined = %apr.combined_apr, "Fetched remote APR");
                model.remote_apr = Some(apr);
                enriched += 1;
            }
            Err(e) => {
                warn!(pool = %model.pool_id, error = %e, "Failed to fetch remote APR");
            }
        }
    }
    enriched
}
