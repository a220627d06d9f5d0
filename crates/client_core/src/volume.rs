pub const DB_OFFSET: f64 = 80.0;
pub const DISPLAY_MIN: f64 = 0.0;
pub const DISPLAY_MAX: f64 = 98.0;

/// Maps a backend dB value onto the display scale, rounded to the nearest 0.5
/// and clamped to `[0, 98]`. Non-finite input has no display value.
pub fn db_to_display(db: f64) -> Option<f64> {
    if !db.is_finite() {
        return None;
    }
    let display = ((db + DB_OFFSET) * 2.0).round() / 2.0;
    Some(clamp_display(display))
}

pub fn display_to_db(display: f64) -> f64 {
    display - DB_OFFSET
}

pub fn clamp_display(display: f64) -> f64 {
    if display.is_nan() {
        return DISPLAY_MIN;
    }
    display.clamp(DISPLAY_MIN, DISPLAY_MAX)
}

pub fn format_display(display: f64) -> String {
    if display.fract() == 0.0 {
        format!("{display:.0}")
    } else {
        format!("{display:.1}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_display_values_round_trip() {
        for value in 0..=98 {
            let display = f64::from(value);
            assert_eq!(db_to_display(display_to_db(display)), Some(display));
        }
    }

    #[test]
    fn half_steps_are_idempotent() {
        for step in 0..=196 {
            let display = f64::from(step) / 2.0;
            let once = db_to_display(display_to_db(display)).expect("finite");
            let twice = db_to_display(display_to_db(once)).expect("finite");
            assert_eq!(once, display);
            assert_eq!(twice, once);
        }
    }

    #[test]
    fn display_is_clamped_for_any_db() {
        for db in [-200.0, -80.5, -80.0, 0.0, 18.0, 18.25, 40.0, f64::MAX] {
            let display = db_to_display(db).expect("finite");
            assert!((DISPLAY_MIN..=DISPLAY_MAX).contains(&display), "{db} -> {display}");
        }
        assert_eq!(db_to_display(-200.0), Some(0.0));
        assert_eq!(db_to_display(40.0), Some(98.0));
    }

    #[test]
    fn rounds_to_nearest_half() {
        assert_eq!(db_to_display(-40.2), Some(40.0));
        assert_eq!(db_to_display(-40.3), Some(39.5));
        assert_eq!(db_to_display(-39.75), Some(40.5));
    }

    #[test]
    fn non_finite_db_has_no_display() {
        assert_eq!(db_to_display(f64::NAN), None);
        assert_eq!(db_to_display(f64::INFINITY), None);
    }

    #[test]
    fn formats_whole_and_half_values() {
        assert_eq!(format_display(40.0), "40");
        assert_eq!(format_display(40.5), "40.5");
        assert_eq!(format_display(0.0), "0");
    }
}
