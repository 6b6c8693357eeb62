//! Stem/branch derivation for the four pillars.
//!
//! The arithmetic here reproduces the simplified sexagenary reckoning of
//! the source material: cycles are anchored to 1900 and months follow the
//! calendar ordinal rather than solar terms. The day count is the only
//! place real calendar rules enter, through the Gregorian leap year.

use crate::{BirthMoment, EarthlyBranch, Element, ElementTally, FourPillars, HeavenlyStem, Pillar};

/// Reference year anchoring both cycles; 1900 opens on the first stem and
/// the first branch.
pub const EPOCH_YEAR: i32 = 1900;

/// Month ordinal 1 is anchored to the Yin branch, per the lunar-month
/// ordering, not the branch that labels the calendar year.
const FIRST_MONTH_BRANCH: i64 = EarthlyBranch::Yin as i64;

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

/// Days elapsed from the epoch new year up to and including the given
/// date. Whole years first, then the months preceding the birth month,
/// then the day of month itself.
pub fn elapsed_days(year: i32, month: u32, day: u32) -> i64 {
    let mut total: i64 = 0;
    for y in EPOCH_YEAR..year {
        total += if is_leap_year(y) { 366 } else { 365 };
    }
    for m in 1..month {
        total += days_in_month(year, m) as i64;
    }
    total + day as i64
}

/// Year pillar: both cycles step once per calendar year from the epoch.
pub fn year_pillar(year: i32) -> Pillar {
    let offset = (year - EPOCH_YEAR) as i64;
    Pillar::new(HeavenlyStem::cyclic(offset), EarthlyBranch::cyclic(offset))
}

/// Month pillar: the branch follows the fixed month-ordinal table and the
/// stem advances two places per year plus one per month.
pub fn month_pillar(year: i32, month: u32) -> Pillar {
    let year_offset = (year - EPOCH_YEAR) as i64;
    let stem = HeavenlyStem::cyclic(year_offset * 2 + month as i64 - 1);
    let branch = EarthlyBranch::cyclic(FIRST_MONTH_BRANCH + month as i64 - 1);
    Pillar::new(stem, branch)
}

/// Day pillar: the stem cycles with the elapsed-day count, the branch with
/// the day of month.
pub fn day_pillar(year: i32, month: u32, day: u32) -> Pillar {
    let stem = HeavenlyStem::cyclic(elapsed_days(year, month, day));
    let branch = EarthlyBranch::cyclic(day as i64 - 1);
    Pillar::new(stem, branch)
}

/// The branch governing an hour of day. The first window wraps midnight:
/// 23:00 and 00:xx both fall under Zi.
pub fn hour_branch(hour: u32) -> EarthlyBranch {
    EarthlyBranch::cyclic(((hour as i64) + 1) / 2)
}

/// Hour pillar under the five-Zi rule: the hour stem is seeded by the day
/// stem, two places per day, plus the hour branch.
pub fn hour_pillar(day_stem: HeavenlyStem, hour: u32) -> Pillar {
    let branch = hour_branch(hour);
    let stem = HeavenlyStem::cyclic(day_stem.index() as i64 * 2 + branch.index() as i64);
    Pillar::new(stem, branch)
}

/// All four pillars for a validated birth moment.
pub fn four_pillars(moment: &BirthMoment) -> FourPillars {
    let day = day_pillar(moment.year(), moment.month(), moment.day());
    FourPillars {
        year: year_pillar(moment.year()),
        month: month_pillar(moment.year(), moment.month()),
        hour: hour_pillar(day.stem, moment.hour()),
        day,
    }
}

/// Counts one element per stem and one per branch; a four-pillar chart
/// always contributes eight.
pub fn tally_elements(pillars: &[Pillar]) -> ElementTally {
    let mut tally = ElementTally::default();
    for pillar in pillars {
        tally.add(pillar.stem.element());
        tally.add(pillar.branch.element());
    }
    tally
}

/// Simplified nayin element of the year stem.
pub fn nayin_element(year_stem: HeavenlyStem) -> Element {
    match year_stem.index() {
        0 | 1 => Element::Metal,
        2 | 3 => Element::Wood,
        4 | 5 => Element::Water,
        6 | 7 => Element::Fire,
        _ => Element::Earth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BirthMoment;

    #[test]
    fn test_leap_year_rule() {
        assert!(is_leap_year(2000));
        assert!(is_leap_year(1904));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(1990));
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }

    #[test]
    fn test_elapsed_days_reference() {
        // Jan 1st of the epoch year itself is day one.
        assert_eq!(elapsed_days(1900, 1, 1), 1);
        assert_eq!(elapsed_days(1900, 12, 31), 365);
        assert_eq!(elapsed_days(1901, 1, 1), 366);
        // 1990-05-15: 90 years (22 leap: 1904..1988, 1900 excluded)
        // = 32872 days, plus Jan-Apr of 1990 (31+28+31+30 = 120), plus 15.
        assert_eq!(elapsed_days(1990, 5, 15), 32872 + 120 + 15);
    }

    #[test]
    fn test_year_pillar_epoch_and_cycle() {
        let epoch = year_pillar(1900);
        assert_eq!(epoch.stem, HeavenlyStem::Jia);
        assert_eq!(epoch.branch, EarthlyBranch::Zi);
        // The sexagenary cycle repeats every 60 years.
        assert_eq!(year_pillar(1960), epoch);
        assert_eq!(year_pillar(1984).stem, HeavenlyStem::Jia);
        assert_eq!(year_pillar(1984).branch, EarthlyBranch::Zi);
    }

    #[test]
    fn test_month_pillar_branch_table() {
        // Month 1 anchors to Yin, month 11 comes around to Zi.
        assert_eq!(month_pillar(1900, 1).branch, EarthlyBranch::Yin);
        assert_eq!(month_pillar(1900, 11).branch, EarthlyBranch::Zi);
        assert_eq!(month_pillar(1900, 12).branch, EarthlyBranch::Chou);
        // Stem: 2 * year offset + month - 1.
        assert_eq!(month_pillar(1900, 1).stem, HeavenlyStem::Jia);
        assert_eq!(month_pillar(1901, 1).stem, HeavenlyStem::Bing);
    }

    #[test]
    fn test_day_pillar_uses_leap_rule() {
        // 1990 is not a leap year: March 1st is day 60 of that year.
        let feb28 = day_pillar(1990, 2, 28);
        let mar1 = day_pillar(1990, 3, 1);
        let expected = (elapsed_days(1990, 2, 28) + 1).rem_euclid(10);
        assert_eq!(mar1.stem.index() as i64, expected);
        assert_eq!(
            elapsed_days(1990, 3, 1) - elapsed_days(1990, 2, 28),
            1
        );
        // Across a leap February the gap widens by a day.
        assert_eq!(
            elapsed_days(2000, 3, 1) - elapsed_days(2000, 2, 1),
            29
        );
        assert_ne!(feb28.stem, mar1.stem);
    }

    #[test]
    fn test_day_pillar_reference_value() {
        // Manually computed: elapsed_days(1990, 5, 15) = 33007,
        // 33007 % 10 = 7 -> Xin; (15 - 1) % 12 = 2 -> Yin.
        let pillar = day_pillar(1990, 5, 15);
        assert_eq!(pillar.stem, HeavenlyStem::Xin);
        assert_eq!(pillar.branch, EarthlyBranch::Yin);
    }

    #[test]
    fn test_hour_branch_windows() {
        assert_eq!(hour_branch(23), EarthlyBranch::Zi);
        assert_eq!(hour_branch(0), EarthlyBranch::Zi);
        assert_eq!(hour_branch(1), EarthlyBranch::Chou);
        assert_eq!(hour_branch(2), EarthlyBranch::Chou);
        assert_eq!(hour_branch(3), EarthlyBranch::Yin);
        assert_eq!(hour_branch(11), EarthlyBranch::Wu);
        assert_eq!(hour_branch(12), EarthlyBranch::Wu);
        assert_eq!(hour_branch(22), EarthlyBranch::Hai);
    }

    #[test]
    fn test_hour_stem_formula() {
        // Jia day, Zi hour: (0 * 2 + 0) % 10 = Jia.
        assert_eq!(
            hour_pillar(HeavenlyStem::Jia, 0).stem,
            HeavenlyStem::Jia
        );
        // Gui day, Wu hour: (9 * 2 + 6) % 10 = 4 -> Wu.
        let pillar = hour_pillar(HeavenlyStem::Gui, 12);
        assert_eq!(pillar.stem, HeavenlyStem::Wu);
        assert_eq!(pillar.branch, EarthlyBranch::Wu);
    }

    #[test]
    fn test_four_pillars_deterministic() {
        let moment = BirthMoment::new(1990, 5, 15, 14).unwrap();
        let first = four_pillars(&moment);
        let second = four_pillars(&moment);
        assert_eq!(first, second);
        // The hour stem is derived from the day stem.
        assert_eq!(
            first.hour.stem,
            hour_pillar(first.day.stem, 14).stem
        );
    }

    #[test]
    fn test_tally_sums_to_eight() {
        for (y, m, d, h) in [
            (1900, 1, 1, 0),
            (1965, 7, 4, 9),
            (1990, 5, 15, 14),
            (2024, 12, 31, 23),
        ] {
            let moment = BirthMoment::new(y, m, d, h).unwrap();
            let tally = tally_elements(&moment.four_pillars().all());
            assert_eq!(tally.total(), 8);
        }
    }

    #[test]
    fn test_nayin_table() {
        assert_eq!(nayin_element(HeavenlyStem::Jia), Element::Metal);
        assert_eq!(nayin_element(HeavenlyStem::Bing), Element::Wood);
        assert_eq!(nayin_element(HeavenlyStem::Wu), Element::Water);
        assert_eq!(nayin_element(HeavenlyStem::Geng), Element::Fire);
        assert_eq!(nayin_element(HeavenlyStem::Ren), Element::Earth);
    }
}
