#[cfg(test)]
mod tests {
    use anchor_lang::prelude::Pubkey;

    use crate::error::DistributorError;
    use crate::state::{
        Change, ClaimBitmap, ClaimMode, ClaimStatus, MerkleDistributor, Period, Vesting,
    };
    use crate::test::{airdrop, assert_error, linear, pct};
    use crate::utils::{AllocationEntry, MerkleTree};

    const T0: u64 = 1_700_000_000;

    fn distributor(claim_mode: ClaimMode, schedule: Vec<Period>, total_amount: u64) -> MerkleDistributor {
        MerkleDistributor {
            claim_mode,
            total_amount,
            schedule_capacity: 4,
            vesting: Vesting::new(schedule).unwrap(),
            ..Default::default()
        }
    }

    fn allocations() -> Vec<AllocationEntry> {
        [0u64, 1000, 2000, 3000, 4000]
            .iter()
            .enumerate()
            .map(|(index, amount)| AllocationEntry {
                index: index as u64,
                recipient: Pubkey::new_unique(),
                amount: *amount,
            })
            .collect()
    }

    #[test]
    fn test_verify_allocation() {
        let entries = allocations();
        let tree = MerkleTree::new(&entries);
        let mut distributor = distributor(ClaimMode::Bitmap, vec![airdrop(100, T0)], 10_000);
        distributor.merkle_root = tree.root().unwrap();

        for entry in &entries {
            let proof = tree.get_entry_proof(entry).unwrap();
            distributor
                .verify_allocation(entry.index, &entry.recipient, entry.amount, &proof)
                .unwrap();
        }

        let entry = &entries[2];
        let proof = tree.get_entry_proof(entry).unwrap();
        assert_error(
            distributor.verify_allocation(entry.index, &entry.recipient, entry.amount * 2, &proof),
            DistributorError::InvalidProof,
        );

        // a new root invalidates old proofs
        distributor
            .update_root(MerkleTree::new(&allocations()).root().unwrap(), 10_000, false)
            .unwrap();
        assert_error(
            distributor.verify_allocation(entry.index, &entry.recipient, entry.amount, &proof),
            DistributorError::InvalidProof,
        );
    }

    #[test]
    fn test_bitmap_double_claim() {
        let mut bitmap = ClaimBitmap::default();
        bitmap.initialize(0, 254);
        assert_eq!(bitmap.bits.len(), ClaimBitmap::CAPACITY as usize / 8);

        assert!(!bitmap.is_claimed(3).unwrap());
        bitmap.set_claimed(3).unwrap();
        assert!(bitmap.is_claimed(3).unwrap());
        assert!(!bitmap.is_claimed(2).unwrap());
        assert!(!bitmap.is_claimed(4).unwrap());

        assert_error(bitmap.set_claimed(3), DistributorError::AlreadyClaimed);

        // initializing an existing bitmap keeps its bits
        bitmap.initialize(0, 254);
        assert!(bitmap.is_claimed(3).unwrap());

        let last = ClaimBitmap::CAPACITY - 1;
        bitmap.set_claimed(last).unwrap();
        assert!(bitmap.is_claimed(last).unwrap());
        assert_error(
            bitmap.set_claimed(ClaimBitmap::CAPACITY),
            DistributorError::ClaimIndexOutOfRange,
        );

        // the next epoch gets a fresh bitmap
        let mut next_epoch = ClaimBitmap::default();
        next_epoch.initialize(1, 253);
        assert_eq!(next_epoch.epoch, 1);
        assert!(!next_epoch.is_claimed(3).unwrap());
    }

    #[test]
    fn test_accrual_cumulative_cap() {
        let distributor = distributor(ClaimMode::Accrual, vec![linear(100, 1000, 100, 10)], 1000);
        let mut status = ClaimStatus::default();

        assert_error(
            distributor.accrual_claim_amount(&status, 1000, 1050),
            DistributorError::NothingToClaim,
        );

        let amount = distributor.accrual_claim_amount(&status, 1000, 1300).unwrap();
        assert_eq!(amount, 300);
        assert_eq!(status.record_claim(amount, 1300, 0).unwrap(), 300);

        assert_error(
            distributor.accrual_claim_amount(&status, 1000, 1350),
            DistributorError::NothingToClaim,
        );

        let amount = distributor.accrual_claim_amount(&status, 1000, 1700).unwrap();
        assert_eq!(amount, 400);
        status.record_claim(amount, 1700, 0).unwrap();

        let amount = distributor.accrual_claim_amount(&status, 1000, 9999).unwrap();
        assert_eq!(amount, 300);
        assert_eq!(status.record_claim(amount, 9999, 0).unwrap(), 1000);
        assert_eq!(status.last_claimed_ts, 9999);

        // everything delivered and nothing left to accrue
        assert_error(
            distributor.accrual_claim_amount(&status, 1000, 10_000),
            DistributorError::ScheduleStopped,
        );
    }

    #[test]
    fn test_root_update_nets_total_claimed() {
        let mut distributor = distributor(ClaimMode::Accrual, vec![linear(100, 1000, 100, 10)], 1000);
        let mut status = ClaimStatus::default();

        let amount = distributor.accrual_claim_amount(&status, 1000, 1500).unwrap();
        status.record_claim(amount, 1500, distributor.epoch).unwrap();
        assert_eq!(status.claimed_amount, 500);

        let epoch = distributor.update_root([7u8; 32], 1500, false).unwrap();
        assert_eq!(epoch, 1);

        // 60% of the raised allocation minus the 500 already delivered
        let amount = distributor.accrual_claim_amount(&status, 1500, 1600).unwrap();
        assert_eq!(amount, 400);
        status.record_claim(amount, 1600, epoch).unwrap();
        assert_eq!(status.claimed_amount, 900);
        assert_eq!(status.last_epoch, 1);

        // a lowered allocation that is already covered releases nothing
        assert_error(
            distributor.accrual_claim_amount(&status, 800, 1900),
            DistributorError::NothingToClaim,
        );
    }

    #[test]
    fn test_wallet_with_two_leaves_gets_larger_amount() {
        let distributor = distributor(ClaimMode::Accrual, vec![airdrop(100, T0)], 800);
        let mut status = ClaimStatus::default();

        // same original wallet under index 0 (300) and index 1 (500)
        let amount = distributor.accrual_claim_amount(&status, 300, T0).unwrap();
        status.record_claim(amount, T0, 0).unwrap();

        let amount = distributor.accrual_claim_amount(&status, 500, T0).unwrap();
        assert_eq!(amount, 200);
        status.record_claim(amount, T0, 0).unwrap();
        assert_eq!(status.claimed_amount, 500);

        assert!(distributor.accrual_claim_amount(&status, 300, T0 + 1).is_err());
    }

    #[test]
    fn test_claim_mode_is_enforced() {
        let bitmap = distributor(ClaimMode::Bitmap, vec![airdrop(100, T0)], 1000);
        let accrual = distributor(ClaimMode::Accrual, vec![airdrop(100, T0)], 1000);

        assert!(bitmap.ensure_mode(ClaimMode::Bitmap).is_ok());
        assert_error(bitmap.ensure_mode(ClaimMode::Accrual), DistributorError::WrongClaimMode);
        assert_error(accrual.ensure_mode(ClaimMode::Bitmap), DistributorError::WrongClaimMode);
    }

    #[test]
    fn test_pause_guard() {
        let mut distributor = distributor(ClaimMode::Bitmap, vec![airdrop(100, T0)], 1000);

        assert!(distributor.ensure_not_paused().is_ok());
        assert_error(
            distributor.set_paused(false),
            DistributorError::ChangingPauseValueToTheSame,
        );

        distributor.set_paused(true).unwrap();
        assert_error(distributor.ensure_not_paused(), DistributorError::Paused);
        assert_error(
            distributor.set_paused(true),
            DistributorError::ChangingPauseValueToTheSame,
        );

        distributor.set_paused(false).unwrap();
        assert!(!distributor.paused);
    }

    #[test]
    fn test_draft_schedule_in_batches() {
        let mut draft = MerkleDistributor {
            paused: true,
            schedule_capacity: 3,
            total_amount: 1000,
            ..Default::default()
        };

        assert_error(draft.set_paused(false), DistributorError::EmptySchedule);
        assert!(draft.paused);

        draft
            .stage_schedule(
                &[Change::Push {
                    period: linear(40, 1000, 100, 10),
                }],
                500,
            )
            .unwrap();
        assert_error(
            draft.set_paused(false),
            DistributorError::PercentageDoesntCoverAllTokens,
        );

        draft
            .stage_schedule(
                &[
                    Change::Push {
                        period: linear(30, 2000, 100, 10),
                    },
                    Change::Push {
                        period: airdrop(30, 3000),
                    },
                ],
                500,
            )
            .unwrap();
        assert_error(
            draft.stage_schedule(
                &[Change::Push {
                    period: airdrop(1, 4000),
                }],
                500,
            ),
            DistributorError::MaxPeriods,
        );

        // unpausing through a root update validates the same way
        let epoch = draft.update_root([1u8; 32], 1000, true).unwrap();
        assert_eq!(epoch, 1);
        assert!(!draft.paused);
        assert_eq!(draft.vesting.total_percentage().unwrap(), pct(100));

        assert_error(
            draft.stage_schedule(&[Change::Remove { index: 2 }], 500),
            DistributorError::ScheduleNotPaused,
        );
    }

    #[test]
    fn test_failed_update_keeps_schedule() {
        let mut distributor = distributor(
            ClaimMode::Accrual,
            vec![linear(50, 1000, 100, 10), linear(50, 2000, 100, 10)],
            1000,
        );
        let before = distributor.vesting.clone();

        assert_error(
            distributor.update_schedule(
                &[Change::Update {
                    index: 1,
                    period: linear(40, 2000, 100, 10),
                }],
                500,
            ),
            DistributorError::PercentageDoesntCoverAllTokens,
        );
        assert_eq!(distributor.vesting, before);
    }

    #[test]
    fn test_stop_vesting() {
        let mut distributor = distributor(
            ClaimMode::Accrual,
            vec![linear(40, 1000, 100, 10), linear(60, 2000, 100, 10)],
            1000,
        );

        assert_eq!(distributor.vesting.compute_withdrawable(1350, 1000).unwrap(), 600);

        let remaining = distributor.stop_vesting(1350).unwrap();
        assert_eq!(remaining, pct(12));
        assert!(distributor.vesting_stopped);

        // vested part stays claimable, the rest goes back to the owner
        let status = ClaimStatus::default();
        assert_eq!(distributor.accrual_claim_amount(&status, 1000, 1400).unwrap(), 120);
        assert_eq!(distributor.record_withdrawal(880, 1400).unwrap(), 880);

        assert_error(
            distributor.update_schedule(&[Change::Remove { index: 0 }], 1400),
            DistributorError::ScheduleStopped,
        );
        assert_error(distributor.stop_vesting(1400), DistributorError::ScheduleStopped);

        // a stopped schedule does not need to be complete to unpause
        distributor.set_paused(true).unwrap();
        distributor.set_paused(false).unwrap();
    }

    #[test]
    fn test_withdraw_unvested_only() {
        let mut distributor = distributor(
            ClaimMode::Accrual,
            vec![airdrop(20, T0), airdrop(80, T0 + 10)],
            1000,
        );

        assert_error(distributor.record_withdrawal(0, T0), DistributorError::InvalidAmount);

        assert_eq!(distributor.record_withdrawal(500, T0).unwrap(), 500);
        assert_eq!(distributor.record_withdrawal(300, T0).unwrap(), 800);
        assert_error(
            distributor.record_withdrawal(1, T0),
            DistributorError::AmountExceedsWithdrawable,
        );
        assert_eq!(distributor.withdrawn_amount, 800);

        // withdrawn plus claimable stays within the committed total
        let claimable = distributor
            .accrual_claim_amount(&ClaimStatus::default(), 1000, T0)
            .unwrap();
        assert_eq!(claimable + distributor.withdrawn_amount, 1000);

        assert_error(
            distributor.record_withdrawal(1, T0 + 10),
            DistributorError::AmountExceedsWithdrawable,
        );
    }

    #[test]
    fn test_bitmap_distributor_is_not_withdrawable() {
        let entries = allocations();
        let total: u64 = entries.iter().map(|entry| entry.amount).sum();
        let mut distributor = distributor(
            ClaimMode::Bitmap,
            vec![airdrop(20, T0), airdrop(80, T0 + 10)],
            total,
        );

        for now in [T0 - 1, T0, T0 + 10] {
            assert_eq!(distributor.withdrawable_amount(now).unwrap(), 0);
            assert_error(
                distributor.record_withdrawal(1, now),
                DistributorError::AmountExceedsWithdrawable,
            );
        }

        // every allocation is paid in full at once, the vault has to keep all of it
        let mut bitmap = ClaimBitmap::default();
        bitmap.initialize(0, 254);
        let mut claimed = 0;
        for entry in &entries {
            bitmap.set_claimed(entry.index).unwrap();
            claimed += entry.amount;
        }
        assert!(claimed + distributor.withdrawn_amount <= distributor.total_amount);

        distributor.stop_vesting(T0).unwrap();
        assert_error(
            distributor.record_withdrawal(1, T0),
            DistributorError::AmountExceedsWithdrawable,
        );
    }

    #[test]
    fn test_refund_window() {
        let mut distributor = distributor(ClaimMode::Accrual, vec![airdrop(100, T0)], 1000);

        assert!(distributor.refund_window_open(u64::MAX));

        distributor.refund_deadline_ts = Some(T0);
        assert!(distributor.ensure_refund_window_open(T0 - 1).is_ok());
        assert!(distributor.ensure_refund_window_open(T0).is_ok());
        assert_error(
            distributor.ensure_refund_window_open(T0 + 1),
            DistributorError::RefundDeadlineIsOver,
        );
    }
}
