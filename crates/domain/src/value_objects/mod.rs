pub mod pool_view_model;
pub mod price;
pub mod read_state;
pub mod remote_apr;
pub mod reserves;
pub mod reward_schedule;
pub mod snapshot;
pub mod stake_position;

pub use pool_view_model::PoolViewModel;
pub use price::{PriceQuote, QuotedAmount, ReferencePriceOracle};
pub use read_state::ReadState;
pub use remote_apr::RemoteApr;
pub use reserves::{PairReserves, ReserveSnapshot};
pub use reward_schedule::RewardSchedule;
pub use snapshot::{MarketSnapshot, MiniChefState, PoolSnapshot};
pub use stake_position::StakePosition;
