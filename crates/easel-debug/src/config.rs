use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{DebugError, DebugResult};

/// Environment variable overriding the FPS sampling window, in milliseconds.
pub const ENV_FPS_WINDOW_MS: &str = "EASEL_FPS_WINDOW_MS";
/// Environment variable selecting the [`Environment`].
pub const ENV_ENVIRONMENT: &str = "EASEL_ENV";

/// Deployment environment; selects flag defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    pub fn as_str(self) -> &'static str {
        match self {
            Environment::Development => "development",
            Environment::Staging => "staging",
            Environment::Production => "production",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = DebugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "staging" => Ok(Environment::Staging),
            "production" | "prod" => Ok(Environment::Production),
            other => Err(DebugError::InvalidConfig(format!("unknown environment `{other}`"))),
        }
    }
}

/// FPS monitor tuning.
#[derive(Debug, Clone, PartialEq)]
pub struct FpsConfig {
    /// Sampling window. A window closes on the first frame strictly after it.
    pub window: Duration,
    /// Fraction of the best observed FPS below which the meter reads slow.
    pub slow_ratio: f32,
}

impl Default for FpsConfig {
    fn default() -> Self {
        Self { window: Duration::from_millis(250), slow_ratio: 0.75 }
    }
}

impl FpsConfig {
    pub fn validate(&self) -> DebugResult<()> {
        if self.window.is_zero() {
            return Err(DebugError::InvalidConfig("fps window must be positive".into()));
        }
        if !(self.slow_ratio > 0.0 && self.slow_ratio <= 1.0) {
            return Err(DebugError::InvalidConfig(format!(
                "fps slow ratio must be in (0, 1], got {}",
                self.slow_ratio
            )));
        }
        Ok(())
    }
}

/// Overlay configuration.
///
/// # Example
/// ```rust,ignore
/// let config = OverlayConfig::from_env()?.font_size(13.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub fps: FpsConfig,
    pub environment: Environment,
    /// Number of shapes the "Create shapes" action adds.
    pub create_shape_count: usize,
    pub font_size: f32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fps: FpsConfig::default(),
            environment: Environment::default(),
            create_shape_count: 100,
            font_size: 12.0,
        }
    }
}

impl OverlayConfig {
    pub fn fps_window(mut self, window: Duration) -> Self { self.fps.window = window; self }
    pub fn slow_ratio(mut self, ratio: f32) -> Self { self.fps.slow_ratio = ratio; self }
    pub fn environment(mut self, env: Environment) -> Self { self.environment = env; self }
    pub fn create_shape_count(mut self, n: usize) -> Self { self.create_shape_count = n; self }
    pub fn font_size(mut self, size: f32) -> Self { self.font_size = size; self }

    /// Defaults overridden by `EASEL_FPS_WINDOW_MS` and `EASEL_ENV`.
    pub fn from_env() -> DebugResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DebugResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_FPS_WINDOW_MS) {
            let ms: u64 = raw.trim().parse().map_err(|_| {
                DebugError::InvalidConfig(format!("{ENV_FPS_WINDOW_MS}: `{raw}` is not a whole number of milliseconds"))
            })?;
            config.fps.window = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(ENV_ENVIRONMENT) {
            config.environment = raw.parse()?;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> DebugResult<()> {
        self.fps.validate()?;
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(DebugError::InvalidConfig(format!("font size must be positive, got {}", self.font_size)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let c = OverlayConfig::default();
        assert_eq!(c.fps.window, Duration::from_millis(250));
        assert_eq!(c.fps.slow_ratio, 0.75);
        assert_eq!(c.environment, Environment::Development);
        assert_eq!(c.create_shape_count, 100);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn env_overrides() {
        let c = OverlayConfig::from_lookup(lookup(&[
            (ENV_FPS_WINDOW_MS, "500"),
            (ENV_ENVIRONMENT, "Production"),
        ]))
        .unwrap();
        assert_eq!(c.fps.window, Duration::from_millis(500));
        assert_eq!(c.environment, Environment::Production);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            OverlayConfig::from_lookup(lookup(&[(ENV_FPS_WINDOW_MS, "fast")])),
            Err(DebugError::InvalidConfig(_))
        ));
        assert!(OverlayConfig::from_lookup(lookup(&[(ENV_FPS_WINDOW_MS, "0")])).is_err());
        assert!(OverlayConfig::from_lookup(lookup(&[(ENV_ENVIRONMENT, "moon")])).is_err());
        assert!(OverlayConfig::default().slow_ratio(0.0).validate().is_err());
        assert!(OverlayConfig::default().slow_ratio(1.5).validate().is_err());
        assert!(OverlayConfig::default().slow_ratio(1.0).validate().is_ok());
    }
}
