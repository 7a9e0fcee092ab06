//! TOML-based tariff schedule document and the built-in rate preset.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// High/low rate pair in hundredths of a currency unit per kWh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RatePair {
    /// High-rate (peak) price.
    pub high: f64,
    /// Low-rate (off-peak) price.
    pub low: f64,
}

/// Single-register rate in hundredths of a currency unit per kWh.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SingleRate {
    pub single: f64,
}

/// Block tariff with high/low rate classes per block (`group_5`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockTwoRateTariff {
    /// Fixed monthly fee in currency units.
    pub fixed_fee: f64,
    /// Prices below the block threshold.
    pub block_1: RatePair,
    /// Prices above the block threshold.
    pub block_2: RatePair,
}

/// Block tariff with a single rate class per block (`group_6`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlockOneRateTariff {
    /// Fixed monthly fee in currency units.
    pub fixed_fee: f64,
    pub block_1: SingleRate,
    pub block_2: SingleRate,
}

/// Flat dual-rate tariff (`group_1`, `group_2`, `group_3`).
///
/// `demand_charge` is authored in base currency units per kW while every
/// other rate is in hundredths. That asymmetry comes from the source
/// tariff document and is preserved as-is.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlatDualRateTariff {
    /// Fixed monthly fee in currency units.
    pub fixed_fee: f64,
    /// Active energy prices in hundredths per kWh.
    pub active_energy: RatePair,
    /// Peak demand price in currency units per kW (`group_3` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demand_charge: Option<f64>,
    /// Reactive energy price in hundredths per kVArh (`group_3` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reactive_energy: Option<f64>,
}

/// Flat single-rate tariff (`group_4`, `group_7`, `group_8`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FlatSingleRateTariff {
    /// Fixed monthly fee in currency units.
    pub fixed_fee: f64,
    /// Active energy price in hundredths per kWh.
    pub active_energy: SingleRate,
}

/// Complete tariff schedule: one record per billing group.
///
/// Loaded from a TOML document with [`TariffSchedule::from_toml_file`] or
/// taken from the built-in [`TariffSchedule::proposal_2025`] preset. A
/// document must list all eight groups; unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TariffSchedule {
    pub group_1: FlatDualRateTariff,
    pub group_2: FlatDualRateTariff,
    pub group_3: FlatDualRateTariff,
    pub group_4: FlatSingleRateTariff,
    /// Household with two-rate metering (`household_two`).
    pub group_5: BlockTwoRateTariff,
    /// Household with one-rate metering (`household_one`).
    pub group_6: BlockOneRateTariff,
    pub group_7: FlatSingleRateTariff,
    pub group_8: FlatSingleRateTariff,
}

/// Configuration error with field path and constraint description.
#[derive(Debug)]
pub struct ConfigError {
    /// Dotted field path (e.g., `"group_3.demand_charge"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tariff error: {} — {}", self.field, self.message)
    }
}

impl TariffSchedule {
    /// Returns the 2025 proposed rate schedule baked into the binary.
    pub fn proposal_2025() -> Self {
        Self {
            group_1: FlatDualRateTariff {
                fixed_fee: 4.20,
                active_energy: RatePair {
                    high: 9.96,
                    low: 5.18,
                },
                demand_charge: None,
                reactive_energy: None,
            },
            group_2: FlatDualRateTariff {
                fixed_fee: 3.60,
                active_energy: RatePair {
                    high: 10.44,
                    low: 5.61,
                },
                demand_charge: None,
                reactive_energy: None,
            },
            group_3: FlatDualRateTariff {
                fixed_fee: 3.00,
                active_energy: RatePair {
                    high: 11.82,
                    low: 6.39,
                },
                demand_charge: Some(5.00),
                reactive_energy: Some(1.10),
            },
            group_4: FlatSingleRateTariff {
                fixed_fee: 2.80,
                active_energy: SingleRate { single: 10.90 },
            },
            group_5: BlockTwoRateTariff {
                fixed_fee: 2.00,
                block_1: RatePair {
                    high: 7.79,
                    low: 3.34,
                },
                block_2: RatePair {
                    high: 13.29,
                    low: 6.27,
                },
            },
            group_6: BlockOneRateTariff {
                fixed_fee: 2.00,
                block_1: SingleRate { single: 5.61 },
                block_2: SingleRate { single: 9.95 },
            },
            group_7: FlatSingleRateTariff {
                fixed_fee: 1.90,
                active_energy: SingleRate { single: 9.30 },
            },
            group_8: FlatSingleRateTariff {
                fixed_fee: 1.50,
                active_energy: SingleRate { single: 7.95 },
            },
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["proposal_2025"];

    /// Loads a schedule from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        match name {
            "proposal_2025" => Ok(Self::proposal_2025()),
            _ => Err(ConfigError {
                field: "preset".to_string(),
                message: format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            }),
        }
    }

    /// Parses a schedule from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "tariffs".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a schedule from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, a group is missing,
    /// or an unknown field is present.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// Validates all rates and fees, returning a list of errors.
    ///
    /// Returns an empty vector if the schedule is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let mut check = |field: &str, value: f64| {
            if !value.is_finite() || value < 0.0 {
                errors.push(ConfigError {
                    field: field.to_string(),
                    message: "must be a non-negative finite number".into(),
                });
            }
        };

        for (name, t) in [
            ("group_1", &self.group_1),
            ("group_2", &self.group_2),
            ("group_3", &self.group_3),
        ] {
            check(&format!("{name}.fixed_fee"), t.fixed_fee);
            check(&format!("{name}.active_energy.high"), t.active_energy.high);
            check(&format!("{name}.active_energy.low"), t.active_energy.low);
            if let Some(d) = t.demand_charge {
                check(&format!("{name}.demand_charge"), d);
            }
            if let Some(r) = t.reactive_energy {
                check(&format!("{name}.reactive_energy"), r);
            }
        }

        for (name, t) in [
            ("group_4", &self.group_4),
            ("group_7", &self.group_7),
            ("group_8", &self.group_8),
        ] {
            check(&format!("{name}.fixed_fee"), t.fixed_fee);
            check(
                &format!("{name}.active_energy.single"),
                t.active_energy.single,
            );
        }

        check("group_5.fixed_fee", self.group_5.fixed_fee);
        check("group_5.block_1.high", self.group_5.block_1.high);
        check("group_5.block_1.low", self.group_5.block_1.low);
        check("group_5.block_2.high", self.group_5.block_2.high);
        check("group_5.block_2.low", self.group_5.block_2.low);

        check("group_6.fixed_fee", self.group_6.fixed_fee);
        check("group_6.block_1.single", self.group_6.block_1.single);
        check("group_6.block_2.single", self.group_6.block_2.single);

        // A schedule without group_3 demand/reactive rates bills both
        // charges at 0, which is almost certainly a data entry mistake.
        if self.group_3.demand_charge.is_none() {
            errors.push(ConfigError {
                field: "group_3.demand_charge".into(),
                message: "missing; group_3 demand would be billed at 0".into(),
            });
        }
        if self.group_3.reactive_energy.is_none() {
            errors.push(ConfigError {
                field: "group_3.reactive_energy".into(),
                message: "missing; group_3 reactive energy would be billed at 0".into(),
            });
        }

        errors
    }
}
