use super::schema::Config;
use crate::scoring::MIN_GRADEABLE_SCORES;

/// Validate configuration at startup.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(judges) = config.judges {
        if judges < MIN_GRADEABLE_SCORES {
            errors.push(format!(
                "judges: must be at least {} (got {})",
                MIN_GRADEABLE_SCORES, judges
            ));
        }
    }

    if let Some(range) = config.score_range {
        if !range.min.is_finite() || !range.max.is_finite() {
            errors.push("score_range: bounds must be finite numbers".to_string());
        } else {
            if range.min < 0.0 || range.max > 100.0 {
                errors.push(format!(
                    "score_range: must lie within 0-100 (got {}-{})",
                    range.min, range.max
                ));
            }
            if range.min >= range.max {
                errors.push(format!(
                    "score_range: min ({}) must be below max ({})",
                    range.min, range.max
                ));
            }
        }
    }

    if let Some(ref dir) = config.data_dir {
        if dir.trim().is_empty() {
            errors.push("data_dir: must not be empty".to_string());
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScoreRange;

    #[test]
    fn test_default_config_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_too_few_judges() {
        let config = Config {
            judges: Some(2),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("judges"));
    }

    #[test]
    fn test_inverted_range() {
        let config = Config {
            score_range: Some(ScoreRange { min: 50.0, max: 10.0 }),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("min (50)"));
    }

    #[test]
    fn test_range_outside_bounds() {
        let config = Config {
            score_range: Some(ScoreRange { min: -5.0, max: 120.0 }),
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert!(errors[0].contains("within 0-100"));
    }

    #[test]
    fn test_collects_all_errors() {
        let config = Config {
            data_dir: Some("  ".to_string()),
            judges: Some(1),
            score_range: Some(ScoreRange { min: 10.0, max: 10.0 }),
            podium_colors: None,
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
