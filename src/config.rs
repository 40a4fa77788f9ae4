use crate::error::AnalyticsError;
use serde::{Deserialize, Serialize};
use tracing::warn;
use validator::{Validate, ValidationError};

pub const DEFAULT_WEAK_TOPIC_THRESHOLD: f64 = 60.0;
pub const DEFAULT_STRONG_TOPIC_THRESHOLD: f64 = 80.0;
pub const DEFAULT_HIGH_RISK_CUT: f64 = 40.0;
pub const DEFAULT_MEDIUM_RISK_CUT: f64 = 65.0;
pub const DEFAULT_STUDENT_WEAK_TOPIC_THRESHOLD: f64 = 60.0;
pub const DEFAULT_BAND_MODERATE_THRESHOLD: f64 = 60.0;
pub const DEFAULT_BAND_STRONG_THRESHOLD: f64 = 75.0;
pub const DEFAULT_INSIGHT_TOPIC_LIMIT: usize = 5;

/// Cutoffs used by the analytics engine.
///
/// The class-level weak topic cutoff, the per-student weak topic cutoff and the
/// display band cutoffs share default values but are separate knobs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_cut_order"))]
pub struct AnalyticsConfig {
    #[validate(range(min = 0.0, max = 100.0))]
    pub weak_topic_threshold: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub strong_topic_threshold: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub high_risk_cut: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub medium_risk_cut: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub student_weak_topic_threshold: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub band_moderate_threshold: f64,
    #[validate(range(min = 0.0, max = 100.0))]
    pub band_strong_threshold: f64,
    #[validate(range(min = 1, max = 50))]
    pub insight_topic_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            weak_topic_threshold: DEFAULT_WEAK_TOPIC_THRESHOLD,
            strong_topic_threshold: DEFAULT_STRONG_TOPIC_THRESHOLD,
            high_risk_cut: DEFAULT_HIGH_RISK_CUT,
            medium_risk_cut: DEFAULT_MEDIUM_RISK_CUT,
            student_weak_topic_threshold: DEFAULT_STUDENT_WEAK_TOPIC_THRESHOLD,
            band_moderate_threshold: DEFAULT_BAND_MODERATE_THRESHOLD,
            band_strong_threshold: DEFAULT_BAND_STRONG_THRESHOLD,
            insight_topic_limit: DEFAULT_INSIGHT_TOPIC_LIMIT,
        }
    }
}

fn validate_cut_order(cfg: &AnalyticsConfig) -> Result<(), ValidationError> {
    // NaN passes every range check, so finiteness is checked first.
    let cuts = [
        cfg.weak_topic_threshold,
        cfg.strong_topic_threshold,
        cfg.high_risk_cut,
        cfg.medium_risk_cut,
        cfg.student_weak_topic_threshold,
        cfg.band_moderate_threshold,
        cfg.band_strong_threshold,
    ];
    if cuts.iter().any(|c| !c.is_finite()) {
        return Err(ValidationError::new("threshold_not_finite"));
    }
    if cfg.high_risk_cut > cfg.medium_risk_cut {
        return Err(ValidationError::new("high_risk_cut_above_medium_risk_cut"));
    }
    if cfg.weak_topic_threshold > cfg.strong_topic_threshold {
        return Err(ValidationError::new("weak_topic_threshold_above_strong"));
    }
    if cfg.band_moderate_threshold > cfg.band_strong_threshold {
        return Err(ValidationError::new("band_moderate_above_band_strong"));
    }
    Ok(())
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!("ignoring unparseable {}={:?}, using default", key, raw);
                default
            }
        },
        _ => default,
    }
}

impl AnalyticsConfig {
    pub fn from_env() -> Result<Self, AnalyticsError> {
        let cfg = Self {
            weak_topic_threshold: env_or("ANALYTICS_WEAK_TOPIC_THRESHOLD", DEFAULT_WEAK_TOPIC_THRESHOLD),
            strong_topic_threshold: env_or("ANALYTICS_STRONG_TOPIC_THRESHOLD", DEFAULT_STRONG_TOPIC_THRESHOLD),
            high_risk_cut: env_or("ANALYTICS_HIGH_RISK_CUT", DEFAULT_HIGH_RISK_CUT),
            medium_risk_cut: env_or("ANALYTICS_MEDIUM_RISK_CUT", DEFAULT_MEDIUM_RISK_CUT),
            student_weak_topic_threshold: env_or(
                "ANALYTICS_STUDENT_WEAK_TOPIC_THRESHOLD",
                DEFAULT_STUDENT_WEAK_TOPIC_THRESHOLD,
            ),
            band_moderate_threshold: env_or("ANALYTICS_BAND_MODERATE_THRESHOLD", DEFAULT_BAND_MODERATE_THRESHOLD),
            band_strong_threshold: env_or("ANALYTICS_BAND_STRONG_THRESHOLD", DEFAULT_BAND_STRONG_THRESHOLD),
            insight_topic_limit: env_or("ANALYTICS_INSIGHT_TOPIC_LIMIT", DEFAULT_INSIGHT_TOPIC_LIMIT),
        };
        cfg.checked()
    }

    pub fn checked(self) -> Result<Self, AnalyticsError> {
        self.validate()
            .map_err(|e| AnalyticsError::InvalidConfig(e.to_string()))?;
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env_or("BACKEND_PORT", 8080u16);
        Self { host, port }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = AnalyticsConfig::default();
        assert!(cfg.clone().checked().is_ok());
        assert_eq!(cfg.weak_topic_threshold, 60.0);
        assert_eq!(cfg.strong_topic_threshold, 80.0);
        assert_eq!(cfg.high_risk_cut, 40.0);
        assert_eq!(cfg.medium_risk_cut, 65.0);
    }

    #[test]
    fn out_of_range_threshold_rejected() {
        let cfg = AnalyticsConfig {
            strong_topic_threshold: 120.0,
            ..AnalyticsConfig::default()
        };
        assert!(matches!(cfg.checked(), Err(AnalyticsError::InvalidConfig(_))));
    }

    #[test]
    fn inverted_risk_cuts_rejected() {
        let cfg = AnalyticsConfig {
            high_risk_cut: 70.0,
            medium_risk_cut: 50.0,
            ..AnalyticsConfig::default()
        };
        assert!(matches!(cfg.checked(), Err(AnalyticsError::InvalidConfig(_))));
    }

    #[test]
    fn nan_cuts_rejected() {
        let cfg = AnalyticsConfig {
            high_risk_cut: f64::NAN,
            medium_risk_cut: f64::NAN,
            ..AnalyticsConfig::default()
        };
        assert!(matches!(cfg.checked(), Err(AnalyticsError::InvalidConfig(_))));

        let cfg = AnalyticsConfig {
            student_weak_topic_threshold: f64::NAN,
            ..AnalyticsConfig::default()
        };
        assert!(cfg.checked().is_err());
    }

    #[test]
    fn infinite_threshold_rejected() {
        let cfg = AnalyticsConfig {
            band_strong_threshold: f64::INFINITY,
            ..AnalyticsConfig::default()
        };
        assert!(cfg.checked().is_err());
    }

    #[test]
    fn zero_insight_limit_rejected() {
        let cfg = AnalyticsConfig {
            insight_topic_limit: 0,
            ..AnalyticsConfig::default()
        };
        assert!(cfg.checked().is_err());
    }
}
