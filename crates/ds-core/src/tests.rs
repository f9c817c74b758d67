//! Unit tests for ds-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ActivityId, ScheduleId};

    #[test]
    fn fresh_ids_are_distinct_and_increasing() {
        let a = ActivityId::fresh();
        let b = ActivityId::fresh();
        assert_ne!(a, b);
        assert!(a < b);
    }

    #[test]
    fn display() {
        let id = ScheduleId::fresh();
        assert_eq!(id.to_string(), format!("ScheduleId({})", id.get()));
    }
}

#[cfg(test)]
mod normalize {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::Offset;

    fn parts(o: Offset) -> (i64, i64, i64, bool) {
        (o.hours(), o.minutes(), o.seconds(), o.is_negative())
    }

    #[test]
    fn already_normal_is_unchanged() {
        assert_eq!(parts(Offset::new(2, 15, 30)), (2, 15, 30, false));
        assert_eq!(parts(Offset::ZERO), (0, 0, 0, false));
    }

    #[test]
    fn overflow_carries_upward() {
        assert_eq!(Offset::new(0, 90, 0), Offset::new(1, 30, 0));
        assert_eq!(Offset::new(0, 0, 3_725), Offset::new(1, 2, 5));
        assert_eq!(Offset::new(0, 59, 60), Offset::new(1, 0, 0));
    }

    #[test]
    fn mixed_signs_borrow() {
        assert_eq!(Offset::new(1, -30, 0), Offset::new(0, 30, 0));
        assert_eq!(Offset::new(1, 0, -1), Offset::new(0, 59, 59));
    }

    #[test]
    fn negative_whole_value_flips_sign() {
        let o = Offset::new(0, 0, -30);
        assert!(o.is_negative());
        assert_eq!(parts(o), (0, 0, -30, true));

        let o = Offset::new(-1, 30, 0);
        assert_eq!(parts(o), (0, -30, 0, true));
    }

    #[test]
    fn flagged_negative_constructor() {
        assert_eq!(Offset::new_negative(1, 30, 0), Offset::new(-1, -30, 0));
        // Negating an already negative raw value yields a positive offset.
        assert_eq!(Offset::new_negative(0, -5, 0), Offset::new(0, 5, 0));
    }

    #[test]
    fn zero_is_never_negative() {
        assert!(!Offset::new(1, -60, 0).is_negative());
        assert!(!Offset::new_negative(0, 0, 0).is_negative());
        assert!((-Offset::ZERO).is_zero());
        assert!(!(-Offset::ZERO).is_negative());
    }

    #[test]
    fn equivalent_inputs_share_one_representative() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        for _ in 0..2_000 {
            let h = rng.gen_range(-50i64..50);
            let m = rng.gen_range(-500i64..500);
            let s = rng.gen_range(-5_000i64..5_000);
            let total = h * 3_600 + m * 60 + s;

            let o = Offset::new(h, m, s);
            assert_eq!(o, Offset::from_seconds(total), "({h}, {m}, {s})");
            assert_eq!(o.total_seconds(), total);
            assert!((0..60).contains(&o.minutes().abs()));
            assert!((0..60).contains(&o.seconds().abs()));

            // Re-normalizing the normalized parts is a no-op.
            assert_eq!(Offset::new(o.hours(), o.minutes(), o.seconds()), o);
        }
    }

    #[test]
    fn totals_and_remainders() {
        let o = Offset::new(2, 15, 30);
        assert_eq!(o.total_minutes(), 135);
        assert_eq!(o.total_seconds(), 8_130);
        assert_eq!(o.hour_remainder(), Offset::new(0, 15, 30));
        assert_eq!(o.minute_remainder(), Offset::new(0, 0, 30));

        let n = -o;
        assert_eq!(n.total_minutes(), -135);
        assert_eq!(n.hour_remainder(), Offset::new_negative(0, 15, 30));
    }
}

#[cfg(test)]
mod arithmetic {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::Offset;

    #[test]
    fn add_and_sub() {
        let a = Offset::new(1, 45, 0);
        let b = Offset::new(0, 30, 30);
        assert_eq!(a + b, Offset::new(2, 15, 30));
        assert_eq!(a - b, Offset::new(1, 14, 30));
        assert_eq!(b - a, Offset::new_negative(1, 14, 30));

        let mut c = a;
        c += b;
        c -= b;
        assert_eq!(c, a);
    }

    #[test]
    fn add_then_sub_is_identity() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..1_000 {
            let a = Offset::from_seconds(rng.gen_range(-200_000i64..200_000));
            let b = Offset::from_seconds(rng.gen_range(-200_000i64..200_000));
            assert_eq!(a + b - b, a);
        }
    }

    #[test]
    fn scale_carries_fractions_downward() {
        assert_eq!(Offset::new(1, 0, 0) * 1.5, Offset::new(1, 30, 0));
        assert_eq!(Offset::new(3, 0, 0) * 2.0, Offset::new(6, 0, 0));
        assert_eq!(Offset::new(1, 0, 0) / 3.0, Offset::new(0, 20, 0));
        assert_eq!(Offset::new(1, 0, 0) * -0.5, Offset::new_negative(0, 30, 0));
    }

    #[test]
    fn scale_by_zero_or_non_finite_is_zero() {
        assert_eq!(Offset::new(4, 0, 0) * 0.0, Offset::ZERO);
        assert_eq!(Offset::new(4, 0, 0) / 0.0, Offset::ZERO);
        assert_eq!(Offset::new(4, 0, 0) * f64::NAN, Offset::ZERO);
    }

    #[test]
    fn mul_then_div_round_trips_within_a_second() {
        let mut rng = SmallRng::seed_from_u64(99);
        for _ in 0..1_000 {
            let a = Offset::from_seconds(rng.gen_range(-100_000i64..100_000));
            let k = rng.gen_range(1.0f64..10.0);
            let back = a * k / k;
            assert!(
                (back - a).abs() <= Offset::new(0, 0, 1),
                "{a} * {k} / {k} = {back}"
            );
        }
    }

    #[test]
    fn ratio() {
        assert_eq!(Offset::new(8, 0, 0).ratio(Offset::new(4, 0, 0)), Some(2.0));
        assert_eq!(Offset::new(8, 0, 0).ratio(Offset::ZERO), None);
    }

    #[test]
    fn extreme_hours_saturate() {
        let big = Offset::new(i64::MAX, 0, 0);
        assert_eq!((big + big).hours(), i64::MAX);
        assert_eq!(big.total_seconds(), i64::MAX);
        assert_eq!((-big - big).hours(), -i64::MAX);
        assert_eq!((-big - big).total_seconds(), i64::MIN);
        assert_eq!(big.ratio(big), Some(1.0));
    }

    #[test]
    fn sum() {
        let parts = [Offset::new(1, 0, 0), Offset::new(0, 45, 0), Offset::new(0, 15, 0)];
        assert_eq!(parts.iter().sum::<Offset>(), Offset::new(2, 0, 0));
    }
}

#[cfg(test)]
mod ordering {
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    use crate::Offset;

    #[test]
    fn comparisons() {
        let early = Offset::new(8, 0, 0);
        let late = Offset::new(8, 0, 1);
        assert!(early < late);
        assert!(late > early);
        assert!(early <= early);
        assert!(early >= early);
        assert!(early != late);
        assert!(Offset::new_negative(0, 0, 30) < Offset::ZERO);
        assert!(Offset::new_negative(2, 0, 0) < Offset::new_negative(1, 59, 59));
    }

    #[test]
    fn order_matches_total_seconds() {
        let mut rng = SmallRng::seed_from_u64(3);
        for _ in 0..2_000 {
            let a = Offset::from_seconds(rng.gen_range(-20_000i64..20_000));
            let b = Offset::from_seconds(rng.gen_range(-20_000i64..20_000));
            assert_eq!(a.cmp(&b), a.total_seconds().cmp(&b.total_seconds()), "{a} vs {b}");
        }
    }

    #[test]
    fn min_max_clamp() {
        let a = Offset::new(1, 0, 0);
        let b = Offset::new(2, 0, 0);
        assert_eq!(a.max(b), b);
        assert_eq!(a.min(b), a);
        assert_eq!(Offset::new(3, 0, 0).clamp(a, b), b);
    }
}

#[cfg(test)]
mod text {
    use crate::{DsError, Offset, MAX_HOURS};

    #[test]
    fn display_pads_every_field() {
        assert_eq!(Offset::new(6, 0, 0).to_string(), "06:00:00");
        assert_eq!(Offset::new(0, 5, 9).to_string(), "00:05:09");
        assert_eq!(Offset::new(123, 4, 5).to_string(), "123:04:05");
        assert_eq!(Offset::new_negative(1, 30, 0).to_string(), "-01:30:00");
        assert_eq!(Offset::ZERO.to_string(), "00:00:00");
    }

    #[test]
    fn parse_full_and_partial_forms() {
        assert_eq!(Offset::parse("08:30:15").unwrap(), Offset::new(8, 30, 15));
        assert_eq!(Offset::parse("5:00").unwrap(), Offset::new(0, 5, 0));
        assert_eq!(Offset::parse("45").unwrap(), Offset::new(0, 0, 45));
        assert_eq!(Offset::parse(" 1:2:3 ").unwrap(), Offset::new(1, 2, 3));
    }

    #[test]
    fn parse_normalizes_overflow() {
        assert_eq!(Offset::parse("0:90:00").unwrap(), Offset::new(1, 30, 0));
    }

    #[test]
    fn parse_leading_minus_negates_whole_value() {
        assert_eq!(Offset::parse("-01:30:00").unwrap(), Offset::new_negative(1, 30, 0));
    }

    #[test]
    fn display_parse_round_trip() {
        for o in [Offset::new(14, 7, 3), Offset::new_negative(0, 0, 1), Offset::ZERO] {
            assert_eq!(o.to_string().parse::<Offset>().unwrap(), o);
        }
    }

    #[test]
    fn parse_rejects_malformed_text() {
        for bad in ["", "-", "1:2:3:4", "ab:00", "1::2", "1:-2:00", "1.5"] {
            let err = Offset::parse(bad).unwrap_err();
            assert!(matches!(err, DsError::Parse { .. }), "{bad:?} gave {err:?}");
        }
    }

    #[test]
    fn parse_bounds_hours() {
        let err = Offset::parse("3000000000000000:00:00").unwrap_err();
        assert!(matches!(err, DsError::Parse { .. }), "{err:?}");
        assert!(Offset::parse("-3000000000000000:00:00").is_err());
        assert!(Offset::parse(&format!("0:{}:00", i64::MAX)).is_err());

        let largest = Offset::parse(&format!("{MAX_HOURS}:59:59")).unwrap();
        assert_eq!(largest.total_seconds(), MAX_HOURS * 3600 + 3599);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_display_form() {
        let o = Offset::new(2, 5, 0);
        assert_eq!(serde_json::to_string(&o).unwrap(), "\"02:05:00\"");
        assert_eq!(serde_json::from_str::<Offset>("\"-0:30\"").unwrap(), Offset::new_negative(0, 0, 30));
    }
}
