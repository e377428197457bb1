use crate::token::TokenAmount;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardSchedule {
    pub reward_rate_per_second: TokenAmount,
    /// Unix timestamp in seconds. Zero means the contract was never started.
    pub period_finish_timestamp: Option<u64>,
}

impl RewardSchedule {
    pub fn new(reward_rate_per_second: TokenAmount, period_finish_timestamp: Option<u64>) -> Self {
        Self {
            reward_rate_per_second,
            period_finish_timestamp,
        }
    }

    /// True when the finish timestamp is set, nonzero and strictly before `now`.
    pub fn is_period_finished(&self, now: u64) -> bool {
        match self.period_finish_timestamp {
            Some(0) | None => false,
            Some(finish) => finish < now,
        }
    }

    /// Emission rate that still applies at `now`; zero once the period ended.
    pub fn effective_rate(&self, now: u64) -> TokenAmount {
        if self.is_period_finished(now) {
            TokenAmount::zero()
        } else {
            self.reward_rate_per_second
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_period_finished() {
        let rate = TokenAmount::from(10u64);
        assert!(!RewardSchedule::new(rate, None).is_period_finished(1_000));
        assert!(!RewardSchedule::new(rate, Some(0)).is_period_finished(1_000));
        assert!(!RewardSchedule::new(rate, Some(1_000)).is_period_finished(1_000));
        assert!(!RewardSchedule::new(rate, Some(2_000)).is_period_finished(1_000));
        assert!(RewardSchedule::new(rate, Some(999)).is_period_finished(1_000));
    }

    #[test]
    fn test_effective_rate() {
        let rate = TokenAmount::from(10u64);
        assert_eq!(RewardSchedule::new(rate, Some(999)).effective_rate(1_000), TokenAmount::zero());
        assert_eq!(RewardSchedule::new(rate, Some(0)).effective_rate(1_000), rate);
    }
}
