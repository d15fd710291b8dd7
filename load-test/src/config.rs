//! Settings that are not covered by the goose command line.
//!
//! Host, users, hatch rate, run time and report file belong to goose; everything the
//! scenarios need on top of that is read from `LOADTEST_*` environment variables.
use std::{fmt::Display, str::FromStr, time::Duration};

use crate::error::ConfigError;

pub const WAIT_MIN_MS: &str = "LOADTEST_WAIT_MIN_MS";
pub const WAIT_MAX_MS: &str = "LOADTEST_WAIT_MAX_MS";
pub const REQUEST_TIMEOUT_MS: &str = "LOADTEST_REQUEST_TIMEOUT_MS";
pub const PASSWORD: &str = "LOADTEST_PASSWORD";
pub const USERNAME_PREFIX: &str = "LOADTEST_USERNAME_PREFIX";
pub const EMAIL_DOMAIN: &str = "LOADTEST_EMAIL_DOMAIN";
pub const ORDER_FEE_MIN: &str = "LOADTEST_ORDER_FEE_MIN";
pub const ORDER_FEE_MAX: &str = "LOADTEST_ORDER_FEE_MAX";
pub const CATALOG_WEIGHT: &str = "LOADTEST_CATALOG_WEIGHT";
pub const SHOPPER_WEIGHT: &str = "LOADTEST_SHOPPER_WEIGHT";
pub const SMOKE_WEIGHT: &str = "LOADTEST_SMOKE_WEIGHT";

#[derive(Debug, Clone, PartialEq)]
/// Configuration shared by every scenario
pub struct LoadTestConfig {
    /// shortest pause between two transactions of the same user
    pub wait_min: Duration,
    /// longest pause between two transactions of the same user
    pub wait_max: Duration,
    /// timeout applied to every single request
    pub request_timeout: Duration,
    pub password: String,
    pub username_prefix: String,
    pub email_domain: String,
    pub order_fee_min: f64,
    pub order_fee_max: f64,
    pub catalog_weight: usize,
    pub shopper_weight: usize,
    pub smoke_weight: usize,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            wait_min: Duration::from_secs(1),
            wait_max: Duration::from_secs(3),
            request_timeout: Duration::from_secs(10),
            password: "Pass1234!".to_string(),
            username_prefix: "loadtest".to_string(),
            email_domain: "loadtest.example.com".to_string(),
            order_fee_min: 10.0,
            order_fee_max: 500.0,
            catalog_weight: 3,
            shopper_weight: 2,
            smoke_weight: 1,
        }
    }
}

impl LoadTestConfig {
    /// read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// read the configuration through `lookup`, unset (or blank) keys keep their default
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let wait_min = match get(WAIT_MIN_MS) {
            Some(v) => Duration::from_millis(parse(WAIT_MIN_MS, &v)?),
            None => defaults.wait_min,
        };
        let wait_max = match get(WAIT_MAX_MS) {
            Some(v) => Duration::from_millis(parse(WAIT_MAX_MS, &v)?),
            None => defaults.wait_max,
        };
        let request_timeout = match get(REQUEST_TIMEOUT_MS) {
            Some(v) => Duration::from_millis(parse(REQUEST_TIMEOUT_MS, &v)?),
            None => defaults.request_timeout,
        };

        let config = Self {
            wait_min,
            wait_max,
            request_timeout,
            password: lookup(PASSWORD).unwrap_or(defaults.password),
            username_prefix: get(USERNAME_PREFIX)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.username_prefix),
            email_domain: get(EMAIL_DOMAIN)
                .map(|v| v.trim().to_string())
                .unwrap_or(defaults.email_domain),
            order_fee_min: get(ORDER_FEE_MIN)
                .map(|v| parse(ORDER_FEE_MIN, &v))
                .transpose()?
                .unwrap_or(defaults.order_fee_min),
            order_fee_max: get(ORDER_FEE_MAX)
                .map(|v| parse(ORDER_FEE_MAX, &v))
                .transpose()?
                .unwrap_or(defaults.order_fee_max),
            catalog_weight: get(CATALOG_WEIGHT)
                .map(|v| parse(CATALOG_WEIGHT, &v))
                .transpose()?
                .unwrap_or(defaults.catalog_weight),
            shopper_weight: get(SHOPPER_WEIGHT)
                .map(|v| parse(SHOPPER_WEIGHT, &v))
                .transpose()?
                .unwrap_or(defaults.shopper_weight),
            smoke_weight: get(SMOKE_WEIGHT)
                .map(|v| parse(SMOKE_WEIGHT, &v))
                .transpose()?
                .unwrap_or(defaults.smoke_weight),
        };
        config.validate()?;
        Ok(config)
    }

    /// checks the constraints between fields
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wait_min > self.wait_max {
            return Err(ConfigError::InvertedRange {
                min_key: WAIT_MIN_MS,
                max_key: WAIT_MAX_MS,
                min: self.wait_min.as_millis().to_string(),
                max: self.wait_max.as_millis().to_string(),
            });
        }
        if self.request_timeout.is_zero() {
            return Err(invalid(REQUEST_TIMEOUT_MS, "0", "timeout must be positive"));
        }
        if self.password.is_empty() {
            return Err(invalid(PASSWORD, "", "password must not be empty"));
        }
        if !(self.order_fee_min.is_finite() && self.order_fee_min >= 0.0) {
            return Err(invalid(
                ORDER_FEE_MIN,
                &self.order_fee_min.to_string(),
                "fee must be a non negative number",
            ));
        }
        if !self.order_fee_max.is_finite() {
            return Err(invalid(
                ORDER_FEE_MAX,
                &self.order_fee_max.to_string(),
                "fee must be a finite number",
            ));
        }
        if self.order_fee_min > self.order_fee_max {
            return Err(ConfigError::InvertedRange {
                min_key: ORDER_FEE_MIN,
                max_key: ORDER_FEE_MAX,
                min: self.order_fee_min.to_string(),
                max: self.order_fee_max.to_string(),
            });
        }
        for (key, weight) in [
            (CATALOG_WEIGHT, self.catalog_weight),
            (SHOPPER_WEIGHT, self.shopper_weight),
            (SMOKE_WEIGHT, self.smoke_weight),
        ] {
            if weight == 0 {
                return Err(invalid(key, "0", "weight must be at least 1"));
            }
        }
        Ok(())
    }
}

fn invalid(key: &'static str, value: &str, reason: &str) -> ConfigError {
    ConfigError::Invalid {
        key,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, value, &e.to_string()))
}
