//! Month labels and month arithmetic.
//!
//! Budgets are keyed by a free-text month label such as "March 2025" rather
//! than a calendar range. The label is derived from the server's current
//! date in the configured timezone, so two servers in different timezones
//! can compute different "current" months for the same instant.

use time::{Date, Duration, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

/// The month label for `date`, e.g. "March 2025".
///
/// Month names are always the full English names, regardless of the system
/// locale.
pub fn month_label(date: Date) -> String {
    format!("{} {}", date.month(), date.year())
}

/// The month label for today's date in the timezone given by `local_offset`.
pub fn current_month_label(local_offset: UtcOffset) -> String {
    month_label(today(local_offset))
}

/// Today's date in the timezone given by `local_offset`.
pub fn today(local_offset: UtcOffset) -> Date {
    OffsetDateTime::now_utc().to_offset(local_offset).date()
}

/// The current date and time in the timezone given by `local_offset`,
/// without the offset attached.
pub fn now(local_offset: UtcOffset) -> PrimitiveDateTime {
    let now = OffsetDateTime::now_utc().to_offset(local_offset);
    PrimitiveDateTime::new(now.date(), now.time())
}

/// The first day of the month containing `date`, at midnight.
pub fn start_of_month(date: Date) -> PrimitiveDateTime {
    let first = date
        .replace_day(1)
        .expect("day 1 is valid for every month");
    PrimitiveDateTime::new(first, Time::MIDNIGHT)
}

/// The last day of the month containing `date`, at 23:59:59.
pub fn end_of_month(date: Date) -> PrimitiveDateTime {
    let first_of_next = start_of_month(shift_months(date, 1)).date();
    let last = first_of_next - Duration::days(1);
    PrimitiveDateTime::new(last, time::macros::time!(23:59:59))
}

/// The date `months` calendar months away from `date` (negative values go
/// backwards). The day of month is clamped to the length of the target
/// month, so shifting March 31 back one month yields February 28 or 29.
pub fn shift_months(date: Date, months: i32) -> Date {
    let zero_based = date.year() * 12 + (date.month() as i32 - 1) + months;
    let year = zero_based.div_euclid(12);
    let month = Month::try_from((zero_based.rem_euclid(12) + 1) as u8)
        .expect("rem_euclid(12) + 1 is always in 1..=12");

    let mut day = date.day();
    while day > 28 {
        if let Ok(shifted) = Date::from_calendar_date(year, month, day) {
            return shifted;
        }
        day -= 1;
    }

    Date::from_calendar_date(year, month, day).expect("day 28 or less is valid for every month")
}

#[cfg(test)]
mod month_label_tests {
    use time::macros::date;

    use super::month_label;

    #[test]
    fn formats_full_month_name_and_year() {
        assert_eq!(month_label(date!(2025 - 03 - 14)), "March 2025");
    }

    #[test]
    fn formats_every_month() {
        let want = [
            "January", "February", "March", "April", "May", "June", "July", "August", "September",
            "October", "November", "December",
        ];

        for (index, name) in want.iter().enumerate() {
            let date = date!(2025 - 01 - 01).replace_month(
                time::Month::try_from((index + 1) as u8).unwrap(),
            );
            assert_eq!(month_label(date.unwrap()), format!("{name} 2025"));
        }
    }
}

#[cfg(test)]
mod shift_months_tests {
    use time::macros::date;

    use super::shift_months;

    #[test]
    fn shifts_forward_within_year() {
        assert_eq!(shift_months(date!(2025 - 03 - 14), 2), date!(2025 - 05 - 14));
    }

    #[test]
    fn shifts_backward_across_year_boundary() {
        assert_eq!(shift_months(date!(2025 - 02 - 10), -6), date!(2024 - 08 - 10));
    }

    #[test]
    fn clamps_day_to_target_month_length() {
        assert_eq!(shift_months(date!(2025 - 03 - 31), -1), date!(2025 - 02 - 28));
        assert_eq!(shift_months(date!(2024 - 03 - 31), -1), date!(2024 - 02 - 29));
        assert_eq!(shift_months(date!(2025 - 01 - 31), 1), date!(2025 - 02 - 28));
    }
}

#[cfg(test)]
mod month_bounds_tests {
    use time::macros::{date, datetime};

    use super::{end_of_month, start_of_month};

    #[test]
    fn start_of_month_is_first_day_at_midnight() {
        assert_eq!(
            start_of_month(date!(2025 - 03 - 14)),
            datetime!(2025 - 03 - 01 00:00:00)
        );
    }

    #[test]
    fn end_of_month_is_last_day_at_end_of_day() {
        assert_eq!(
            end_of_month(date!(2025 - 03 - 14)),
            datetime!(2025 - 03 - 31 23:59:59)
        );
        assert_eq!(
            end_of_month(date!(2024 - 02 - 01)),
            datetime!(2024 - 02 - 29 23:59:59)
        );
        assert_eq!(
            end_of_month(date!(2025 - 12 - 31)),
            datetime!(2025 - 12 - 31 23:59:59)
        );
    }
}
