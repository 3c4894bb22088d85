#[cfg(test)]
mod tests {
    use crate::constants::FULL_PERCENTAGE;
    use crate::error::DistributorError;
    use crate::state::{Period, Vesting};
    use crate::test::{airdrop, assert_error, linear, pct};

    const T0: u64 = 1_700_000_000;

    #[test]
    fn test_validate() {
        assert_error(Vesting::new(vec![]), DistributorError::EmptySchedule);

        assert_error(
            Vesting::new(vec![linear(100, T0, 0, 10)]),
            DistributorError::EmptyPeriod,
        );
        assert_error(
            Vesting::new(vec![linear(100, T0, 10, 0)]),
            DistributorError::EmptyPeriod,
        );

        assert_error(
            Vesting::new(vec![linear(100, 0, 10, 10)]),
            DistributorError::InvalidScheduleOrder,
        );

        // second period starts before the first one ends
        assert_error(
            Vesting::new(vec![linear(50, 100, 10, 10), linear(50, 150, 10, 10)]),
            DistributorError::InvalidScheduleOrder,
        );

        assert_error(
            Vesting::new(vec![linear(50, 100, 10, 10), linear(40, 200, 10, 10)]),
            DistributorError::PercentageDoesntCoverAllTokens,
        );

        // touching periods are fine
        let vesting = Vesting::new(vec![linear(50, 100, 10, 10), linear(50, 200, 10, 10)]).unwrap();
        assert_eq!(vesting.total_percentage().unwrap(), FULL_PERCENTAGE);

        // airdropped periods need no interval
        assert!(Vesting::new(vec![airdrop(20, T0), airdrop(80, T0)]).is_ok());
    }

    #[test]
    fn test_two_airdropped_tranches() {
        let vesting = Vesting::new(vec![airdrop(20, T0), airdrop(80, T0 + 10)]).unwrap();

        assert_eq!(vesting.compute_claimable(T0 - 1, 0, 1000).unwrap(), 0);
        assert_eq!(vesting.compute_claimable(T0, 0, 1000).unwrap(), 200);
        assert_eq!(vesting.compute_claimable(T0 + 9, 0, 1000).unwrap(), 200);
        assert_eq!(vesting.compute_claimable(T0 + 10, 0, 1000).unwrap(), 1000);

        // claimed at T0, only the second tranche is left
        assert_eq!(vesting.compute_claimable(T0 + 10, T0, 1000).unwrap(), 800);
        assert_eq!(vesting.compute_claimable(T0 + 10, T0 + 10, 1000).unwrap(), 0);
    }

    #[test]
    fn test_two_linear_tranches() {
        // one-step linear periods unlock one interval after their start
        let vesting = Vesting::new(vec![linear(20, T0, 1, 1), linear(80, T0 + 10, 1, 1)]).unwrap();

        assert_eq!(vesting.compute_claimable(T0, 0, 1000).unwrap(), 0);
        assert_eq!(vesting.compute_claimable(T0 + 1, 0, 1000).unwrap(), 200);
        assert_eq!(vesting.compute_claimable(T0 + 10, 0, 1000).unwrap(), 200);
        assert_eq!(vesting.compute_claimable(T0 + 11, 0, 1000).unwrap(), 1000);
    }

    #[test]
    fn test_linear_claimable() {
        let vesting = Vesting::new(vec![linear(100, 1000, 100, 10)]).unwrap();

        assert_eq!(vesting.compute_claimable(999, 0, 1_000_000).unwrap(), 0);
        assert_eq!(vesting.compute_claimable(1099, 0, 1_000_000).unwrap(), 0);
        assert_eq!(vesting.compute_claimable(1500, 0, 1_000_000).unwrap(), 500_000);
        assert_eq!(vesting.compute_claimable(2000, 0, 1_000_000).unwrap(), 1_000_000);
        assert_eq!(vesting.compute_claimable(5000, 0, 1_000_000).unwrap(), 1_000_000);

        // from a claim in the middle of an interval
        assert_eq!(vesting.compute_claimable(1500, 1250, 1000).unwrap(), 300);
        assert_eq!(
            vesting.compute_claimable(1250, 0, 1000).unwrap()
                + vesting.compute_claimable(1500, 1250, 1000).unwrap(),
            vesting.compute_claimable(1500, 0, 1000).unwrap()
        );
    }

    #[test]
    fn test_rounding_never_over_delivers() {
        let vesting = Vesting::new(vec![linear(100, 1000, 100, 3)]).unwrap();

        assert_eq!(vesting.compute_claimable(1100, 0, 999).unwrap(), 332);
        assert_eq!(vesting.compute_claimable(1200, 0, 999).unwrap(), 665);
        // exact once every period is complete
        assert_eq!(vesting.compute_claimable(1300, 0, 999).unwrap(), 999);
    }

    #[test]
    fn test_mixed_periods() {
        let vesting = Vesting::new(vec![airdrop(10, 1000), linear(90, 1000, 100, 9)]).unwrap();

        assert_eq!(vesting.compute_claimable(1000, 0, 1000).unwrap(), 100);
        assert_eq!(vesting.compute_claimable(1100, 0, 1000).unwrap(), 200);
        assert_eq!(vesting.compute_claimable(1100, 1000, 1000).unwrap(), 100);
        assert_eq!(vesting.compute_claimable(1900, 0, 1000).unwrap(), 1000);
    }

    #[test]
    fn test_claimable_is_monotonic() {
        let vesting = Vesting::new(vec![
            airdrop(5, 1000),
            linear(45, 1000, 70, 13),
            linear(30, 2000, 33, 7),
            airdrop(20, 3000),
        ])
        .unwrap();
        let total = 987_654_321;

        let mut previous = 0;
        for now in (900..3100).step_by(7) {
            let claimable = vesting.compute_claimable(now, 0, total).unwrap();
            assert!(claimable >= previous, "claimable decreased at {}", now);
            assert!(claimable <= total);
            previous = claimable;
        }
        assert_eq!(vesting.compute_claimable(3000, 0, total).unwrap(), total);
    }

    #[test]
    fn test_withdrawable() {
        let vesting = Vesting::new(vec![airdrop(20, T0), airdrop(80, T0 + 10)]).unwrap();

        assert_eq!(vesting.compute_withdrawable(T0 - 1, 1000).unwrap(), 1000);
        assert_eq!(vesting.compute_withdrawable(T0, 1000).unwrap(), 800);
        assert_eq!(vesting.compute_withdrawable(T0 + 10, 1000).unwrap(), 0);
    }

    #[test]
    fn test_has_started_and_stopped() {
        let vesting = Vesting::new(vec![linear(50, 1000, 100, 10), airdrop(50, 2000)]).unwrap();

        assert!(!vesting.has_started(999));
        assert!(vesting.has_started(1000));

        assert!(!vesting.has_stopped(1500).unwrap());
        assert!(!vesting.has_stopped(1999).unwrap());
        assert!(vesting.has_stopped(2000).unwrap());

        let airdrops = Vesting::new(vec![airdrop(20, T0), airdrop(80, T0 + 10)]).unwrap();
        assert!(airdrops.has_stopped(T0 - 1).unwrap());
    }

    #[test]
    fn test_stop_truncates_running_period() {
        let mut vesting = Vesting::new(vec![linear(40, 1000, 100, 10), linear(60, 2000, 100, 10)]).unwrap();
        let before = vesting.compute_claimable(1350, 0, 1000).unwrap();

        vesting.stop(1350).unwrap();

        assert_eq!(
            vesting.schedule,
            vec![Period {
                token_percentage: pct(12),
                start_ts: 1000,
                interval_sec: 100,
                times: 3,
                airdropped: false,
            }]
        );
        assert_eq!(before, 120);
        assert_eq!(vesting.compute_claimable(1350, 0, 1000).unwrap(), 120);
        assert_eq!(vesting.compute_claimable(5000, 0, 1000).unwrap(), 120);
        assert_eq!(vesting.compute_withdrawable(1350, 1000).unwrap(), 880);
    }

    #[test]
    fn test_stop_rounds_up() {
        let mut vesting = Vesting::new(vec![linear(100, 1000, 100, 3)]).unwrap();
        let before = vesting.compute_claimable(1100, 0, 999).unwrap();

        vesting.stop(1100).unwrap();

        assert_eq!(vesting.schedule[0].token_percentage, 33_333_333_334);
        assert_eq!(vesting.schedule[0].times, 1);
        let after = vesting.compute_claimable(1100, 0, 999).unwrap();
        assert!(after >= before, "stop took back {} -> {}", before, after);
    }

    #[test]
    fn test_stop_keeps_started_airdrops() {
        let mut vesting = Vesting::new(vec![airdrop(30, 1000), linear(70, 1000, 100, 7)]).unwrap();

        vesting.stop(1250).unwrap();

        assert_eq!(vesting.len(), 2);
        assert_eq!(vesting.schedule[0], airdrop(30, 1000));
        assert_eq!(vesting.schedule[1].token_percentage, pct(20));
        assert_eq!(vesting.schedule[1].times, 2);
        assert_eq!(vesting.total_percentage().unwrap(), pct(50));
    }

    #[test]
    fn test_stop_before_first_interval() {
        let mut vesting = Vesting::new(vec![linear(100, 1000, 100, 10)]).unwrap();

        vesting.stop(1050).unwrap();

        assert!(vesting.is_empty());
        assert_eq!(vesting.compute_withdrawable(1050, 1000).unwrap(), 1000);
        assert_eq!(vesting.compute_claimable(5000, 0, 1000).unwrap(), 0);
    }
}
