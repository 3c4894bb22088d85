use anchor_lang::prelude::*;

use crate::constants::FULL_PERCENTAGE;
use crate::error::DistributorError;

/// Extra fixed-point digits used while summing partial periods.
/// Complete periods are summed exactly, partial ones round down.
const ACCRUAL_PRECISION: u128 = 1_000_000;

/**
 * One tranche of a vesting schedule
 *
 * A linear period releases `token_percentage` in `times` equal steps, one
 * every `interval_sec` seconds from `start_ts`. An airdropped period releases
 * its whole percentage at `start_ts`.
 */
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Period {
    /// Share of the allocation released by the whole period, 1% == 10^9
    pub token_percentage: u64,
    pub start_ts: u64,
    pub interval_sec: u64,
    pub times: u64,
    pub airdropped: bool,
}

impl Period {
    /// Borsh size: four u64 fields and a bool
    pub const SIZE: usize = 8 * 4 + 1;

    pub fn duration(&self) -> Result<u64> {
        self.interval_sec
            .checked_mul(self.times)
            .ok_or_else(|| error!(DistributorError::IntegerOverflow))
    }

    pub fn end_ts(&self) -> Result<u64> {
        self.start_ts
            .checked_add(self.duration()?)
            .ok_or_else(|| error!(DistributorError::IntegerOverflow))
    }

    /// A period counts as started from its first second on
    pub fn has_started(&self, now: u64) -> bool {
        self.start_ts <= now
    }

    /// Percentage released by this period between `from` and `now`,
    /// scaled by ACCRUAL_PRECISION
    fn linear_share(&self, from: u64, now: u64) -> Result<u128> {
        require!(self.interval_sec > 0 && self.times > 0, DistributorError::EmptyPeriod);

        let intervals_passed = std::cmp::min(
            now.saturating_sub(from) / self.interval_sec,
            self.times,
        );

        (self.token_percentage as u128)
            .checked_mul(ACCRUAL_PRECISION)
            .and_then(|value| value.checked_mul(intervals_passed as u128))
            .map(|value| value / self.times as u128)
            .ok_or_else(|| error!(DistributorError::IntegerOverflow))
    }
}

/// Ordered list of periods stored inside a distributor
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct Vesting {
    pub schedule: Vec<Period>,
}

impl Vesting {
    pub fn new(schedule: Vec<Period>) -> Result<Self> {
        let vesting = Self { schedule };
        vesting.validate()?;

        Ok(vesting)
    }

    pub fn new_unchecked(schedule: Vec<Period>) -> Self {
        Self { schedule }
    }

    /// Encoded size of a schedule holding `periods` periods
    pub fn space_required(periods: usize) -> usize {
        4 + periods * Period::SIZE
    }

    pub fn len(&self) -> usize {
        self.schedule.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schedule.is_empty()
    }

    pub fn validate(&self) -> Result<()> {
        require!(!self.schedule.is_empty(), DistributorError::EmptySchedule);

        // periods may touch but never overlap; start_ts 0 is reserved for "never claimed"
        let mut previous_end_ts = 0;
        let mut first = true;

        for period in &self.schedule {
            if !period.airdropped {
                require!(
                    period.interval_sec > 0 && period.times > 0,
                    DistributorError::EmptyPeriod
                );
            }

            if first {
                require!(period.start_ts > 0, DistributorError::InvalidScheduleOrder);
                first = false;
            } else {
                require!(
                    period.start_ts >= previous_end_ts,
                    DistributorError::InvalidScheduleOrder
                );
            }

            previous_end_ts = period.end_ts()?;
        }

        require!(
            self.total_percentage()? == FULL_PERCENTAGE,
            DistributorError::PercentageDoesntCoverAllTokens
        );

        Ok(())
    }

    pub fn total_percentage(&self) -> Result<u64> {
        self.schedule.iter().try_fold(0u64, |total, period| {
            total
                .checked_add(period.token_percentage)
                .ok_or_else(|| error!(DistributorError::IntegerOverflow))
        })
    }

    pub fn has_started(&self, now: u64) -> bool {
        self.schedule
            .first()
            .map_or(false, |period| period.has_started(now))
    }

    /// True when no period can accrue anything linearly anymore: every
    /// period that has not ended yet is airdropped.
    pub fn has_stopped(&self, now: u64) -> Result<bool> {
        for period in &self.schedule {
            if period.end_ts()? <= now {
                continue;
            }

            if !period.airdropped {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /**
     * Amount released between `last_claimed_ts` and `now`
     *
     * @param now - current unix timestamp
     * @param last_claimed_ts - timestamp of the previous claim, 0 if none
     * @param total_amount - allocation the percentages apply to
     *
     * With `last_claimed_ts == 0` this is the cumulative vested amount.
     * Periods are scanned in order and the scan stops at the first one that
     * has not started. Linear periods count whole intervals since the later
     * of their start and the interval-aligned previous claim. The result is
     * rounded down.
     */
    pub fn compute_claimable(
        &self,
        now: u64,
        last_claimed_ts: u64,
        total_amount: u64,
    ) -> Result<u64> {
        let mut released: u128 = 0;

        for period in &self.schedule {
            if period.start_ts > now {
                break;
            }

            if period.end_ts()? <= last_claimed_ts {
                continue;
            }

            let share = if period.airdropped {
                // released once, at start
                if period.start_ts <= last_claimed_ts {
                    continue;
                }
                (period.token_percentage as u128)
                    .checked_mul(ACCRUAL_PRECISION)
                    .ok_or(DistributorError::IntegerOverflow)?
            } else {
                let alignment = last_claimed_ts
                    .checked_rem(period.interval_sec)
                    .ok_or(DistributorError::EmptyPeriod)?;
                let last_claimed_aligned = last_claimed_ts - alignment;

                period.linear_share(std::cmp::max(period.start_ts, last_claimed_aligned), now)?
            };

            released = released
                .checked_add(share)
                .ok_or(DistributorError::IntegerOverflow)?;
        }

        let amount = (total_amount as u128)
            .checked_mul(released)
            .ok_or(DistributorError::IntegerOverflow)?
            / (FULL_PERCENTAGE as u128 * ACCRUAL_PRECISION);

        u64::try_from(amount).map_err(|_| error!(DistributorError::IntegerOverflow))
    }

    /// Part of `total_amount` that is not vesting yet at `now`.
    ///
    /// Equals the sum of not-started periods for a complete schedule. After
    /// `stop` the percentage cut from the schedule is included as well.
    pub fn compute_withdrawable(&self, now: u64, total_amount: u64) -> Result<u64> {
        let mut started_percentage: u64 = 0;
        for period in self.schedule.iter().filter(|period| period.has_started(now)) {
            started_percentage = started_percentage
                .checked_add(period.token_percentage)
                .ok_or(DistributorError::IntegerOverflow)?;
        }

        let unvested = FULL_PERCENTAGE
            .checked_sub(started_percentage)
            .ok_or(DistributorError::IntegerOverflow)?;

        let amount = (total_amount as u128) * (unvested as u128) / (FULL_PERCENTAGE as u128);

        u64::try_from(amount).map_err(|_| error!(DistributorError::IntegerOverflow))
    }

    /**
     * Freezes the schedule at `now`
     *
     * - Ended and airdropped periods that already started are kept
     * - The running linear period is cut after its last complete interval;
     *   its percentage is scaled down (rounded up, so nothing already vested
     *   is taken back) and it is dropped if no interval completed
     * - Periods that have not started are dropped
     *
     * The percentage that disappears becomes withdrawable by the owner.
     */
    pub fn stop(&mut self, now: u64) -> Result<()> {
        let mut kept = Vec::with_capacity(self.schedule.len());

        for period in &self.schedule {
            if !period.has_started(now) {
                break;
            }

            if period.airdropped || period.end_ts()? <= now {
                kept.push(*period);
                continue;
            }

            let intervals_passed = (now - period.start_ts)
                .checked_div(period.interval_sec)
                .ok_or(DistributorError::EmptyPeriod)?;
            if intervals_passed == 0 {
                continue;
            }

            let scaled = (period.token_percentage as u128)
                .checked_mul(intervals_passed as u128)
                .ok_or(DistributorError::IntegerOverflow)?;
            let times = period.times as u128;
            let token_percentage = ((scaled + times - 1) / times) as u64;

            require!(
                token_percentage <= period.token_percentage,
                DistributorError::TokenPercentageIncreased
            );

            kept.push(Period {
                token_percentage,
                times: intervals_passed,
                ..*period
            });
        }

        self.schedule = kept;

        Ok(())
    }
}
