use serde::{Deserialize, Serialize};
use std::fmt;

/// Block height a read is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockTag {
    #[default]
    Latest,
    Number(u64),
}

impl fmt::Display for BlockTag {
    /// JSON-RPC encoding: `latest` or a 0x-prefixed hex quantity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Latest => write!(f, "latest"),
            Self::Number(n) => write!(f, "0x{n:x}"),
        }
    }
}

/// How a pair pool's staked LP tokens are valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValuationRoute {
    /// Pair holds a USD stablecoin; valued in USD directly.
    Stable,
    /// Pair holds the reference asset (WAVAX).
    DirectReference,
    /// Pair holds the intermediate asset (RADI), valued through the
    /// intermediate/reference pair.
    IntermediateHop,
    /// Pair holds none of the known tokens.
    Unidentified,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_tag_display() {
        assert_eq!(BlockTag::Latest.to_string(), "latest");
        assert_eq!(BlockTag::Number(255).to_string(), "0xff");
    }
}
