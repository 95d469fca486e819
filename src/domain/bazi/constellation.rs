//! Western zodiac sign lookup by solar month and day.

/// `(month, last day of the sign in that month, sign)`, in calendar order.
const SIGN_CUTOFFS: [(u32, u32, &str); 12] = [
    (1, 20, "摩羯座"),
    (2, 19, "水瓶座"),
    (3, 21, "雙魚座"),
    (4, 20, "白羊座"),
    (5, 21, "金牛座"),
    (6, 21, "雙子座"),
    (7, 23, "巨蟹座"),
    (8, 23, "獅子座"),
    (9, 23, "處女座"),
    (10, 23, "天秤座"),
    (11, 22, "天蠍座"),
    (12, 22, "射手座"),
];

/// Sign whose period starts in late December; returned when no month matches.
const DEFAULT_SIGN: &str = "摩羯座";

/// All sign names, in the order their periods end within the year.
pub fn sign_names() -> impl Iterator<Item = &'static str> {
    SIGN_CUTOFFS.iter().map(|(_, _, name)| *name)
}

/// Resolves the sign for a solar `month` (1-12) and `day`.
///
/// A day on or before the month's cutoff belongs to the sign ending that
/// month; later days belong to the next sign, wrapping December into
/// Capricorn.
pub fn constellation_for(month: u32, day: u32) -> &'static str {
    SIGN_CUTOFFS
        .iter()
        .position(|(m, _, _)| *m == month)
        .map(|idx| {
            let (_, cutoff, name) = SIGN_CUTOFFS[idx];
            if day <= cutoff {
                name
            } else {
                SIGN_CUTOFFS[(idx + 1) % SIGN_CUTOFFS.len()].2
            }
        })
        .unwrap_or(DEFAULT_SIGN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn cutoff_day_belongs_to_ending_sign() {
        assert_eq!(constellation_for(1, 20), "摩羯座");
        assert_eq!(constellation_for(3, 21), "雙魚座");
        assert_eq!(constellation_for(11, 22), "天蠍座");
    }

    #[test]
    fn day_after_cutoff_belongs_to_next_sign() {
        assert_eq!(constellation_for(1, 21), "水瓶座");
        assert_eq!(constellation_for(3, 22), "白羊座");
        assert_eq!(constellation_for(7, 24), "獅子座");
    }

    #[test]
    fn december_wraps_to_capricorn() {
        assert_eq!(constellation_for(12, 22), "射手座");
        assert_eq!(constellation_for(12, 23), "摩羯座");
        assert_eq!(constellation_for(12, 31), "摩羯座");
    }

    #[test]
    fn unknown_month_defaults_to_capricorn() {
        assert_eq!(constellation_for(13, 1), "摩羯座");
        assert_eq!(constellation_for(0, 15), "摩羯座");
    }

    #[test]
    fn twelve_distinct_signs() {
        let mut names: Vec<_> = sign_names().collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    proptest! {
        #[test]
        fn always_returns_a_known_sign(month in 1u32..=12, day in 1u32..=31) {
            let sign = constellation_for(month, day);
            prop_assert!(sign_names().any(|name| name == sign));
        }

        #[test]
        fn boundaries_are_consistent(idx in 0usize..12) {
            let (month, cutoff, name) = SIGN_CUTOFFS[idx];
            prop_assert_eq!(constellation_for(month, cutoff), name);
            prop_assert_eq!(constellation_for(month, cutoff + 1), SIGN_CUTOFFS[(idx + 1) % 12].2);
        }
    }
}
