use crate::error::RegistryError;
use rytell_earn_domain::entities::StakingPool;
use rytell_earn_domain::{Address, Token};
use rytell_earn_protocols::ContractAddresses;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Static pool configuration for one deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolRegistry {
    /// Asset staked value is reported in (WAVAX).
    pub reference_token: Token,
    /// Governance token used as the valuation hop (RADI).
    pub intermediate_token: Token,
    /// USD token the reference asset is quoted against.
    pub quote_token: Token,
    /// Stablecoins that value a MiniChef pool directly in USD.
    #[serde(default)]
    pub stable_tokens: Vec<Token>,
    /// Reference/intermediate pair. Resolved through the factory when unset.
    #[serde(default)]
    pub hop_pair: Option<Address>,
    /// Reference/quote pair. Resolved through the factory when unset.
    #[serde(default)]
    pub quote_pair: Option<Address>,
    pub contracts: ContractAddresses,
    pub pools: Vec<StakingPool>,
}

impl PoolRegistry {
    /// Reads and validates a registry file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// fails [`PoolRegistry::validate`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let registry = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            pools = registry.pools.len(),
            "Loaded pool registry"
        );
        Ok(registry)
    }

    pub fn from_json(text: &str) -> Result<Self, RegistryError> {
        let registry: Self = serde_json::from_str(text)?;
        registry.validate()?;
        Ok(registry)
    }

    /// Pool ids must be unique; reference and intermediate tokens must differ.
    pub fn validate(&self) -> Result<(), RegistryError> {
        if self.reference_token.address == self.intermediate_token.address {
            return Err(RegistryError::Invalid(
                "reference and intermediate tokens are the same".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        for pool in &self.pools {
            if !seen.insert(pool.id.as_str()) {
                return Err(RegistryError::DuplicatePool(pool.id.clone()));
            }
        }
        Ok(())
    }

    /// Looks up a known token by address.
    pub fn token(&self, address: &Address) -> Option<&Token> {
        [
            &self.reference_token,
            &self.intermediate_token,
            &self.quote_token,
        ]
        .into_iter()
        .chain(self.stable_tokens.iter())
        .find(|t| t.address == *address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const REGISTRY: &str = r#"{
        "reference_token": {
            "address": "0x0000000000000000000000000000000000000001",
            "symbol": "WAVAX", "decimals": 18, "name": "Wrapped AVAX"
        },
        "intermediate_token": {
            "address": "0x0000000000000000000000000000000000000002",
            "symbol": "RADI", "decimals": 18, "name": "Rytell"
        },
        "quote_token": {
            "address": "0x0000000000000000000000000000000000000003",
            "symbol": "USDC.e", "decimals": 6, "name": "USD Coin"
        },
        "hop_pair": "0x0000000000000000000000000000000000000010",
        "quote_pair": "0x0000000000000000000000000000000000000011",
        "contracts": {
            "factory": "0x0000000000000000000000000000000000000020",
            "router": "0x0000000000000000000000000000000000000021",
            "minichef": "0x0000000000000000000000000000000000000022"
        },
        "pools": [
            {
                "id": "wavax-radi",
                "staking_address": "0x0000000000000000000000000000000000000100",
                "kind": {
                    "type": "double_sided",
                    "tokens": [
                        {
                            "address": "0x0000000000000000000000000000000000000001",
                            "symbol": "WAVAX", "decimals": 18, "name": "Wrapped AVAX"
                        },
                        {
                            "address": "0x0000000000000000000000000000000000000002",
                            "symbol": "RADI", "decimals": 18, "name": "Rytell"
                        }
                    ],
                    "multiplier": 3
                }
            }
        ]
    }"#;

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(REGISTRY.as_bytes()).unwrap();

        let registry = PoolRegistry::load(file.path()).unwrap();
        assert_eq!(registry.pools.len(), 1);
        assert!(registry.stable_tokens.is_empty());
        assert_eq!(registry.contracts.minichef, Address::from_low_u64_be(0x22));
        assert_eq!(
            registry
                .token(&Address::from_low_u64_be(3))
                .map(|t| t.symbol.as_str()),
            Some("USDC.e")
        );
    }

    #[test]
    fn test_pair_addresses_are_optional() {
        let registry = PoolRegistry::from_json(REGISTRY).unwrap();
        assert_eq!(registry.hop_pair, Some(Address::from_low_u64_be(0x10)));

        let without_pairs = REGISTRY
            .replace(r#""hop_pair": "0x0000000000000000000000000000000000000010","#, "")
            .replace(r#""quote_pair": "0x0000000000000000000000000000000000000011","#, "");
        let registry = PoolRegistry::from_json(&without_pairs).unwrap();
        assert_eq!(registry.hop_pair, None);
        assert_eq!(registry.quote_pair, None);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = PoolRegistry::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(RegistryError::Io(_))));
    }

    #[test]
    fn test_duplicate_pool_rejected() {
        let mut registry = PoolRegistry::from_json(REGISTRY).unwrap();
        registry.pools.push(registry.pools[0].clone());
        assert!(matches!(
            registry.validate(),
            Err(RegistryError::DuplicatePool(id)) if id == "wavax-radi"
        ));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PoolRegistry::from_json("{"),
            Err(RegistryError::Json(_))
        ));
    }
}
