//! Configuration types for the session manager

use std::time::Duration;

use crate::AuthError;

/// Session lifecycle configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Sliding inactivity timeout
    pub timeout: Duration,
    /// How long before the timeout the client shows its warning
    pub warning_lead: Duration,
    /// Interval between cleanup sweeps
    pub cleanup_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30 * 60),      // 30 minutes
            warning_lead: Duration::from_secs(5 * 60),  // 5 minutes
            cleanup_interval: Duration::from_secs(15 * 60),
        }
    }
}

impl SessionConfig {
    /// Create a config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the inactivity timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the warning lead time
    pub fn with_warning_lead(mut self, lead: Duration) -> Self {
        self.warning_lead = lead;
        self
    }

    /// Set the cleanup sweep interval
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }

    /// Point at which the idle warning fires
    pub fn warning_after(&self) -> Duration {
        self.timeout.saturating_sub(self.warning_lead)
    }

    /// Timeout as a chrono duration for timestamp arithmetic
    pub fn timeout_delta(&self) -> Result<chrono::Duration, AuthError> {
        chrono::Duration::from_std(self.timeout)
            .map_err(|_| AuthError::Configuration("session timeout out of range".to_string()))
    }

    /// Check the values are usable
    pub fn validate(&self) -> Result<(), AuthError> {
        if self.timeout.is_zero() {
            return Err(AuthError::Configuration(
                "session timeout must be positive".to_string(),
            ));
        }
        if self.warning_lead >= self.timeout {
            return Err(AuthError::Configuration(
                "warning lead must be shorter than the session timeout".to_string(),
            ));
        }
        if self.cleanup_interval.is_zero() {
            return Err(AuthError::Configuration(
                "cleanup interval must be positive".to_string(),
            ));
        }
        self.timeout_delta().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(1800));
        assert_eq!(config.warning_after(), Duration::from_secs(1500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_warning_lead_must_be_shorter() {
        let config = SessionConfig::new()
            .with_timeout(Duration::from_secs(60))
            .with_warning_lead(Duration::from_secs(60));
        assert!(matches!(config.validate(), Err(AuthError::Configuration(_))));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let config = SessionConfig::new()
            .with_timeout(Duration::ZERO)
            .with_warning_lead(Duration::ZERO);
        assert!(config.validate().is_err());
    }
}
