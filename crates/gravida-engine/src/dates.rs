//! Clinical date and pressure arithmetic shared by the scoring models.

use chrono::NaiveDate;

/// Gestational age in days at `reference`, counted from the last menstrual
/// period per the LMP dating convention (conception ~2 weeks after LMP).
///
/// A `reference` earlier than `lmp` yields a negative count; plausibility
/// checks are the caller's responsibility, not this function's.
pub fn gestational_days(lmp: NaiveDate, reference: NaiveDate) -> i64 {
    (reference - lmp).num_days() + 14
}

/// Mean arterial pressure: diastolic plus a third of the pulse pressure.
///
/// No bounds-checking; NaN or negative inputs propagate unchanged.
pub fn mean_arterial_pressure(systolic: f64, diastolic: f64) -> f64 {
    diastolic + (systolic - diastolic) / 3.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn gestational_days_at_lmp_is_fourteen() {
        let lmp = date(2024, 1, 1);
        assert_eq!(gestational_days(lmp, lmp), 14);
    }

    #[test]
    fn gestational_days_one_week_later() {
        let lmp = date(2024, 1, 1);
        let week_later = lmp.checked_add_days(Days::new(7)).unwrap();
        assert_eq!(gestational_days(lmp, week_later), 21);
    }

    #[test]
    fn gestational_days_before_lmp_goes_negative() {
        let lmp = date(2024, 3, 1);
        assert_eq!(gestational_days(lmp, date(2024, 2, 1)), -29 + 14);
    }

    #[test]
    fn map_of_120_over_80() {
        let map = mean_arterial_pressure(120.0, 80.0);
        assert!((map - (80.0 + 40.0 / 3.0)).abs() < 1e-12);
    }

    #[test]
    fn map_propagates_nan() {
        assert!(mean_arterial_pressure(f64::NAN, 80.0).is_nan());
    }
}
