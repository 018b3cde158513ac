//! Ledger configuration from defaults or environment variables.

use crate::adapters::event_bus::DEFAULT_CHANNEL_CAPACITY;
use crate::domain::value_objects::{Address, AddressParseError};
use std::env;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// `BOND_LEDGER_SETTLEMENT_TOKEN` is not a 20-byte hex address.
    #[error("invalid settlement token: {0}")]
    InvalidSettlementToken(#[from] AddressParseError),

    /// No settlement token configured.
    #[error("settlement token must not be the zero address")]
    MissingSettlementToken,

    /// Event bus capacity of zero.
    #[error("event channel capacity must be positive")]
    ZeroEventCapacity,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Service name attached to log records.
    pub service_name: String,
    /// Filter directive (trace, debug, info, warn, error or full `EnvFilter` syntax).
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            service_name: "bond-ledger".to_string(),
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Token every purchase and redemption settles in.
    pub settlement_token: Address,
    /// Reject `create_bond` when the maturity date is not in the future.
    pub reject_past_maturity: bool,
    /// Buffer size of the in-memory event bus, applied by
    /// [`InMemoryEventBus::from_config`](crate::adapters::InMemoryEventBus::from_config).
    pub event_channel_capacity: usize,
    /// Logging.
    pub telemetry: TelemetryConfig,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            settlement_token: Address::ZERO,
            reject_past_maturity: false,
            event_channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl LedgerConfig {
    /// Default configuration settling in `settlement_token`.
    #[must_use]
    pub fn with_token(settlement_token: Address) -> Self {
        Self {
            settlement_token,
            ..Self::default()
        }
    }

    /// Read configuration from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `BOND_LEDGER_SETTLEMENT_TOKEN`: token address in hex (default: zero)
    /// - `BOND_LEDGER_REJECT_PAST_MATURITY`: `true`/`1` to enable (default: false)
    /// - `BOND_LEDGER_EVENT_CAPACITY`: bus capacity (default: 1024)
    /// - `BOND_LEDGER_LOG_LEVEL` or `RUST_LOG`: log filter (default: info)
    /// - `BOND_LEDGER_JSON_LOGS`: `true`/`1` for JSON logs (default: false)
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidSettlementToken` if the token is not valid hex.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`LedgerConfig::from_env`] with a custom variable source.
    ///
    /// # Errors
    ///
    /// `ConfigError::InvalidSettlementToken` if the token is not valid hex.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let flag = |key: &str| {
            lookup(key).map(|v| v.eq_ignore_ascii_case("true") || v == "1")
        };

        let settlement_token = match lookup("BOND_LEDGER_SETTLEMENT_TOKEN") {
            Some(raw) => raw.trim().parse()?,
            None => defaults.settlement_token,
        };

        Ok(Self {
            settlement_token,
            reject_past_maturity: flag("BOND_LEDGER_REJECT_PAST_MATURITY")
                .unwrap_or(defaults.reject_past_maturity),
            event_channel_capacity: lookup("BOND_LEDGER_EVENT_CAPACITY")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.event_channel_capacity),
            telemetry: TelemetryConfig {
                service_name: defaults.telemetry.service_name,
                log_level: lookup("BOND_LEDGER_LOG_LEVEL")
                    .or_else(|| lookup("RUST_LOG"))
                    .unwrap_or(defaults.telemetry.log_level),
                json_logs: flag("BOND_LEDGER_JSON_LOGS").unwrap_or(defaults.telemetry.json_logs),
            },
        })
    }

    /// Check the configuration is usable for a deployment.
    ///
    /// # Errors
    ///
    /// - `MissingSettlementToken` for the zero token
    /// - `ZeroEventCapacity` for a zero bus capacity
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settlement_token.is_zero() {
            return Err(ConfigError::MissingSettlementToken);
        }
        if self.event_channel_capacity == 0 {
            return Err(ConfigError::ZeroEventCapacity);
        }
        Ok(())
    }
}
