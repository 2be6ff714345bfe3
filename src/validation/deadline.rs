use chrono::NaiveDate;

use crate::error::AppError;

pub fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}

/// Deadlines must fall strictly after `today` on every save.
pub fn validate_deadline(deadline: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if deadline <= today {
        return Err(AppError::field(
            "deadline",
            "The deadline cannot be in the past.",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn today_and_earlier_are_rejected() {
        let today = date(2025, 3, 10);
        for deadline in [date(2025, 3, 10), date(2025, 3, 9), date(2020, 1, 1)] {
            let err = validate_deadline(deadline, today).unwrap_err();
            assert_eq!(err.field_name(), Some("deadline"));
        }
    }

    #[test]
    fn tomorrow_is_accepted() {
        assert!(validate_deadline(date(2025, 3, 11), date(2025, 3, 10)).is_ok());
    }
}
