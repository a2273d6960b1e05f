use chrono::{Datelike, NaiveDate};

/// Whole-years age on `today`.
///
/// The anniversary date itself counts the year as complete; a birthday
/// still ahead in the calendar year decrements. Future birth dates come
/// out negative, unguarded.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth_date.year();

    if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
        age -= 1;
    }

    age
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    #[test]
    fn anniversary_counts_the_full_year() {
        assert_eq!(age_on(date(1990, 6, 15), date(2024, 6, 15)), 34);
    }

    #[test]
    fn birthday_tomorrow_decrements() {
        assert_eq!(age_on(date(1990, 6, 16), date(2024, 6, 15)), 33);
    }

    #[test]
    fn birthday_earlier_this_year_keeps_the_difference() {
        assert_eq!(age_on(date(1990, 2, 1), date(2024, 6, 15)), 34);
    }

    #[test]
    fn exact_year_offsets_hold_for_any_n() {
        for n in 0..120 {
            assert_eq!(age_on(date(2024 - n, 3, 10), date(2024, 3, 10)), n);
        }
    }

    #[test]
    fn future_birth_dates_go_negative() {
        assert_eq!(age_on(date(2030, 1, 1), date(2024, 6, 15)), -6);
    }

    #[test]
    fn month_comparison_dominates_day() {
        // Born Dec 31: birthday pending in June regardless of the day.
        assert_eq!(age_on(date(1966, 12, 31), date(2025, 6, 15)), 58);
    }
}
