use super::model::LevelStatus;

/// Lowest level (percent) still considered safe.
pub const SAFE_LEVEL_THRESHOLD: f64 = 60.0;
/// Lowest level (percent) still considered moderate.
pub const MODERATE_LEVEL_THRESHOLD: f64 = 30.0;

/// Classifies a well level into a status.
///
/// Monotone in `level_percent` and total: every input, including values
/// outside 0-100 and NaN, maps to some status.
pub fn classify_level(level_percent: f64) -> LevelStatus {
    let level = level_percent.clamp(0.0, 100.0);
    if level >= SAFE_LEVEL_THRESHOLD {
        LevelStatus::Safe
    } else if level >= MODERATE_LEVEL_THRESHOLD {
        LevelStatus::Moderate
    } else {
        LevelStatus::Risky
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_wells_classify_as_recorded() {
        assert_eq!(classify_level(75.0), LevelStatus::Safe);
        assert_eq!(classify_level(40.0), LevelStatus::Moderate);
        assert_eq!(classify_level(15.0), LevelStatus::Risky);
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(classify_level(60.0), LevelStatus::Safe);
        assert_eq!(classify_level(59.9), LevelStatus::Moderate);
        assert_eq!(classify_level(30.0), LevelStatus::Moderate);
        assert_eq!(classify_level(29.9), LevelStatus::Risky);
    }

    #[test]
    fn test_out_of_range_and_nan() {
        assert_eq!(classify_level(150.0), LevelStatus::Safe);
        assert_eq!(classify_level(-5.0), LevelStatus::Risky);
        assert_eq!(classify_level(f64::NAN), LevelStatus::Risky);
    }

    #[test]
    fn test_monotone() {
        let mut previous = classify_level(0.0);
        for step in 0..=1000 {
            let current = classify_level(step as f64 / 10.0);
            assert!(current >= previous);
            previous = current;
        }
    }
}
