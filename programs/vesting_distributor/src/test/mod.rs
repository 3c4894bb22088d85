use anchor_lang::error::Error;
use std::fmt::Debug;

use crate::constants::PERCENTAGE_DECIMALS;
use crate::error::DistributorError;
use crate::state::Period;

pub mod test_claim;
pub mod test_schedule_change;
pub mod test_vesting;

/// `percent`% in schedule units
pub fn pct(percent: u64) -> u64 {
    percent * 10u64.pow(PERCENTAGE_DECIMALS)
}

pub fn linear(percent: u64, start_ts: u64, interval_sec: u64, times: u64) -> Period {
    Period {
        token_percentage: pct(percent),
        start_ts,
        interval_sec,
        times,
        airdropped: false,
    }
}

pub fn airdrop(percent: u64, start_ts: u64) -> Period {
    Period {
        token_percentage: pct(percent),
        start_ts,
        interval_sec: 0,
        times: 0,
        airdropped: true,
    }
}

pub fn assert_error<T: Debug>(result: anchor_lang::Result<T>, expected: DistributorError) {
    let expected: Error = expected.into();
    assert_eq!(result.unwrap_err(), expected);
}
