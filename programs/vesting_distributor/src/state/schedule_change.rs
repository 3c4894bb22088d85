use anchor_lang::prelude::*;

use crate::constants::MAX_CHANGES_PER_BATCH;
use crate::error::DistributorError;
use crate::state::vesting::{Period, Vesting};

/// One edit of a schedule. Indices address the schedule as it was before
/// the batch started, followed by periods pushed earlier in the same batch.
#[derive(AnchorSerialize, AnchorDeserialize, Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Push { period: Period },
    Update { index: u64, period: Period },
    Remove { index: u64 },
}

impl Vesting {
    /**
     * Applies a batch of changes and validates the result
     *
     * @param changes - ordered edits, at most MAX_CHANGES_PER_BATCH
     * @param now - current unix timestamp, decides which periods are live
     * @param capacity - number of periods the distributor account can hold
     *
     * Returns the new schedule; `self` is never touched, so a failing batch
     * leaves the stored schedule exactly as it was.
     */
    pub fn apply_changes(&self, changes: &[Change], now: u64, capacity: usize) -> Result<Vesting> {
        let updated = self.stage_changes(changes, now, capacity)?;
        updated.validate()?;

        Ok(updated)
    }

    /// Same as `apply_changes` without the final validation. Used to build a
    /// schedule over several transactions while the distributor is paused.
    pub fn stage_changes(&self, changes: &[Change], now: u64, capacity: usize) -> Result<Vesting> {
        require!(
            changes.len() <= MAX_CHANGES_PER_BATCH,
            DistributorError::InvalidSchedule
        );

        // removed periods stay as tombstones until the batch is folded
        let mut slots: Vec<Option<Period>> = self.schedule.iter().copied().map(Some).collect();

        for change in changes {
            match change {
                Change::Push { period } => slots.push(Some(*period)),
                Change::Update { index, period } => {
                    let index = usize::try_from(*index)
                        .map_err(|_| error!(DistributorError::InvalidSchedule))?;
                    let slot = slots
                        .get_mut(index)
                        .filter(|slot| slot.is_some())
                        .ok_or(DistributorError::InvalidSchedule)?;

                    if let Some(current) = self.schedule.get(index) {
                        check_live_update(current, period, now)?;
                    }

                    *slot = Some(*period);
                }
                Change::Remove { index } => {
                    let index = usize::try_from(*index)
                        .map_err(|_| error!(DistributorError::InvalidSchedule))?;
                    let slot = slots
                        .get_mut(index)
                        .filter(|slot| slot.is_some())
                        .ok_or(DistributorError::InvalidSchedule)?;

                    if let Some(current) = self.schedule.get(index) {
                        require!(
                            !current.has_started(now),
                            DistributorError::VestingAlreadyStarted
                        );
                    }

                    *slot = None;
                }
            }
        }

        let schedule: Vec<Period> = slots.into_iter().flatten().collect();
        require!(schedule.len() <= capacity, DistributorError::MaxPeriods);

        Ok(Vesting::new_unchecked(schedule))
    }
}

/// A live period may only shrink: same start and kind, no larger share,
/// no longer duration.
fn check_live_update(current: &Period, updated: &Period, now: u64) -> Result<()> {
    if !current.has_started(now) {
        return Ok(());
    }

    require!(
        updated.start_ts == current.start_ts && updated.airdropped == current.airdropped,
        DistributorError::VestingAlreadyStarted
    );
    require!(
        updated.token_percentage <= current.token_percentage,
        DistributorError::TokenPercentageIncreased
    );
    require!(
        updated.duration()? <= current.duration()?,
        DistributorError::PeriodDurationIncreased
    );

    Ok(())
}
