#[cfg(test)]
mod tests {
    use crate::constants::MAX_CHANGES_PER_BATCH;
    use crate::error::DistributorError;
    use crate::state::{Change, Vesting};
    use crate::test::{assert_error, linear, pct};

    const CAPACITY: usize = 4;

    /// 50% over [1000, 2000) and 50% over [2000, 3000)
    fn base() -> Vesting {
        Vesting::new(vec![linear(50, 1000, 100, 10), linear(50, 2000, 100, 10)]).unwrap()
    }

    #[test]
    fn test_incomplete_batch_leaves_schedule_unchanged() {
        let vesting = base();
        let snapshot = vesting.clone();

        let result = vesting.apply_changes(
            &[Change::Update {
                index: 1,
                period: linear(40, 2000, 100, 10),
            }],
            500,
            CAPACITY,
        );

        assert_error(result, DistributorError::PercentageDoesntCoverAllTokens);
        assert_eq!(vesting, snapshot);
    }

    #[test]
    fn test_rebalance_before_start() {
        let updated = base()
            .apply_changes(
                &[
                    Change::Update {
                        index: 0,
                        period: linear(60, 1000, 100, 10),
                    },
                    Change::Update {
                        index: 1,
                        period: linear(40, 2000, 100, 10),
                    },
                ],
                500,
                CAPACITY,
            )
            .unwrap();

        assert_eq!(updated.schedule[0].token_percentage, pct(60));
        assert_eq!(updated.schedule[1].token_percentage, pct(40));
    }

    #[test]
    fn test_live_period_guards() {
        let vesting = base();

        assert_error(
            vesting.apply_changes(&[Change::Remove { index: 0 }], 1500, CAPACITY),
            DistributorError::VestingAlreadyStarted,
        );

        // start is the first live second
        assert_error(
            vesting.apply_changes(&[Change::Remove { index: 0 }], 1000, CAPACITY),
            DistributorError::VestingAlreadyStarted,
        );

        assert_error(
            vesting.apply_changes(
                &[Change::Update {
                    index: 0,
                    period: linear(50, 1100, 100, 9),
                }],
                1500,
                CAPACITY,
            ),
            DistributorError::VestingAlreadyStarted,
        );

        let mut airdropped = linear(50, 1000, 100, 10);
        airdropped.airdropped = true;
        assert_error(
            vesting.apply_changes(
                &[Change::Update {
                    index: 0,
                    period: airdropped,
                }],
                1500,
                CAPACITY,
            ),
            DistributorError::VestingAlreadyStarted,
        );

        assert_error(
            vesting.apply_changes(
                &[
                    Change::Update {
                        index: 0,
                        period: linear(60, 1000, 100, 10),
                    },
                    Change::Update {
                        index: 1,
                        period: linear(40, 2000, 100, 10),
                    },
                ],
                1500,
                CAPACITY,
            ),
            DistributorError::TokenPercentageIncreased,
        );

        assert_error(
            vesting.apply_changes(
                &[Change::Update {
                    index: 0,
                    period: linear(50, 1000, 100, 11),
                }],
                1500,
                CAPACITY,
            ),
            DistributorError::PeriodDurationIncreased,
        );

        assert_eq!(vesting, base());
    }

    #[test]
    fn test_live_period_can_shrink() {
        let updated = base()
            .apply_changes(
                &[
                    Change::Update {
                        index: 0,
                        period: linear(40, 1000, 100, 8),
                    },
                    Change::Update {
                        index: 1,
                        period: linear(60, 2000, 100, 10),
                    },
                ],
                1500,
                CAPACITY,
            )
            .unwrap();

        assert_eq!(updated.schedule[0], linear(40, 1000, 100, 8));
        assert_eq!(updated.schedule[1], linear(60, 2000, 100, 10));
    }

    #[test]
    fn test_indices_are_stable_within_batch() {
        // index 1 still names the second period after index 0 was removed
        let updated = base()
            .apply_changes(
                &[
                    Change::Remove { index: 0 },
                    Change::Update {
                        index: 1,
                        period: linear(100, 2000, 100, 10),
                    },
                ],
                500,
                CAPACITY,
            )
            .unwrap();
        assert_eq!(updated.schedule, vec![linear(100, 2000, 100, 10)]);

        // pushed periods continue the numbering
        let updated = base()
            .apply_changes(
                &[
                    Change::Update {
                        index: 1,
                        period: linear(25, 2000, 100, 10),
                    },
                    Change::Push {
                        period: linear(10, 3000, 100, 10),
                    },
                    Change::Update {
                        index: 2,
                        period: linear(25, 3000, 100, 10),
                    },
                ],
                500,
                CAPACITY,
            )
            .unwrap();
        assert_eq!(updated.len(), 3);
        assert_eq!(updated.schedule[2], linear(25, 3000, 100, 10));
    }

    #[test]
    fn test_invalid_indices() {
        let vesting = base();

        assert_error(
            vesting.apply_changes(&[Change::Remove { index: 5 }], 500, CAPACITY),
            DistributorError::InvalidSchedule,
        );
        assert_error(
            vesting.apply_changes(
                &[Change::Remove { index: 0 }, Change::Remove { index: 0 }],
                500,
                CAPACITY,
            ),
            DistributorError::InvalidSchedule,
        );
        assert_error(
            vesting.apply_changes(
                &[
                    Change::Remove { index: 1 },
                    Change::Update {
                        index: 1,
                        period: linear(50, 2000, 100, 10),
                    },
                ],
                500,
                CAPACITY,
            ),
            DistributorError::InvalidSchedule,
        );
    }

    #[test]
    fn test_capacity_and_batch_size() {
        let vesting = base();

        assert_error(
            vesting.apply_changes(
                &[Change::Push {
                    period: linear(10, 3000, 100, 10),
                }],
                500,
                2,
            ),
            DistributorError::MaxPeriods,
        );

        let batch = vec![Change::Remove { index: 0 }; MAX_CHANGES_PER_BATCH + 1];
        assert_error(
            vesting.apply_changes(&batch, 500, CAPACITY),
            DistributorError::InvalidSchedule,
        );
    }

    #[test]
    fn test_stage_changes_skips_validation() {
        let draft = Vesting::default();

        let staged = draft
            .stage_changes(
                &[Change::Push {
                    period: linear(50, 1000, 100, 10),
                }],
                500,
                CAPACITY,
            )
            .unwrap();
        assert_eq!(staged.len(), 1);
        assert_error(staged.validate(), DistributorError::PercentageDoesntCoverAllTokens);

        let completed = staged
            .apply_changes(
                &[Change::Push {
                    period: linear(50, 2000, 100, 10),
                }],
                500,
                CAPACITY,
            )
            .unwrap();
        assert_eq!(completed, base());

        assert_error(
            staged.stage_changes(
                &[Change::Push {
                    period: linear(50, 2000, 100, 10),
                }],
                500,
                1,
            ),
            DistributorError::MaxPeriods,
        );
    }
}
