//! # Freight Configuration
//!
//! Carrier packing limits used to split orders into parcels.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     FREIGHT_DEFAULT_CARRIER=dhl                                        │
//! │     FREIGHT_MAX_PARCEL_WEIGHT=31.5kg                                   │
//! │     FREIGHT_FILLER_WEIGHT=200g                                         │
//! │     FREIGHT_FALLBACK_PARCEL_WEIGHT=2kg                                 │
//! │     (weights apply to the default carrier)                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/freight/freight.toml (Linux)                             │
//! │     ~/Library/Application Support/com.freight.freight/freight.toml     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     carrier "dhl", 31.5 kg per parcel                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! default_carrier = "dhl"
//!
//! [[carriers]]
//! code = "dhl"
//! name = "DHL Paket"
//!
//! [carriers.packing]
//! max_parcel_weight = "31.5kg"
//! filler_weight_per_parcel = "200g"
//! fallback_parcel_weight = "2kg"
//!
//! [[carriers]]
//! code = "pickup"
//! name = "Store pickup"
//! # no max_parcel_weight: everything ships in one parcel
//! ```
//!
//! Weights are written either as unit strings (`"31.5kg"`) or as integer
//! milligrams. Saved files use milligrams.

use freight_core::validation::validate_capacity;
use freight_core::Weight;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{ShipError, ShipResult};

// =============================================================================
// Packing Settings
// =============================================================================

/// How parcels are formed for one carrier.
///
/// ## Capacity Available to Items
/// ```text
/// ┌───────────────────────── max_parcel_weight (31.5 kg) ─────────────────┐
/// │ filler (box, padding) │          capacity for items (31.3 kg)         │
/// │       200 g           │                                               │
/// └───────────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackingSettings {
    /// Heaviest parcel the carrier accepts. `None` disables splitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_parcel_weight: Option<Weight>,

    /// Packaging weight added to every parcel.
    #[serde(default)]
    pub filler_weight_per_parcel: Weight,

    /// Weight reported for a parcel whose contents are not all weighed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_parcel_weight: Option<Weight>,
}

impl PackingSettings {
    /// Capacity left for items once the filler is accounted for.
    ///
    /// `Ok(None)` when the carrier has no weight limit.
    ///
    /// ## Example
    /// ```rust
    /// use freight_core::Weight;
    /// use freight_ship::config::PackingSettings;
    ///
    /// let settings = PackingSettings {
    ///     max_parcel_weight: Some(Weight::from_kg_g(31, 500)),
    ///     filler_weight_per_parcel: Weight::from_grams(200),
    ///     fallback_parcel_weight: None,
    /// };
    /// assert_eq!(settings.item_capacity().unwrap(), Some(Weight::from_kg_g(31, 300)));
    /// ```
    pub fn item_capacity(&self) -> ShipResult<Option<Weight>> {
        let Some(max) = self.max_parcel_weight else {
            return Ok(None);
        };

        let capacity = max
            .checked_sub(self.filler_weight_per_parcel)
            .ok_or_else(|| {
                ShipError::InvalidConfig(format!(
                    "filler weight {} exceeds max parcel weight {}",
                    self.filler_weight_per_parcel, max
                ))
            })?;

        validate_capacity(capacity).map_err(|_| {
            ShipError::InvalidConfig(format!(
                "filler weight {} leaves no room for items under max parcel weight {}",
                self.filler_weight_per_parcel, max
            ))
        })?;

        Ok(Some(capacity))
    }
}

// =============================================================================
// Carrier Settings
// =============================================================================

/// One configured carrier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarrierSettings {
    /// Short code used on the command line and in env vars (e.g. "dhl").
    pub code: String,

    /// Human-readable carrier name.
    #[serde(default)]
    pub name: String,

    /// Parcel limits.
    #[serde(default)]
    pub packing: PackingSettings,
}

fn default_carrier_code() -> String {
    "dhl".to_string()
}

fn default_carriers() -> Vec<CarrierSettings> {
    vec![CarrierSettings {
        code: default_carrier_code(),
        name: "DHL Paket".to_string(),
        packing: PackingSettings {
            max_parcel_weight: Some(Weight::from_kg_g(31, 500)),
            ..PackingSettings::default()
        },
    }]
}

// =============================================================================
// Main Freight Configuration
// =============================================================================

/// Complete freight configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightConfig {
    /// Carrier used when none is requested explicitly.
    #[serde(default = "default_carrier_code")]
    pub default_carrier: String,

    /// All known carriers.
    #[serde(default = "default_carriers")]
    pub carriers: Vec<CarrierSettings>,
}

impl Default for FreightConfig {
    fn default() -> Self {
        FreightConfig {
            default_carrier: default_carrier_code(),
            carriers: default_carriers(),
        }
    }
}

impl FreightConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (explicit path, else the platform default)
    /// 3. Environment variables
    ///
    /// An explicit path that does not exist is an error; a missing file at
    /// the platform default location just means defaults.
    pub fn load(config_path: Option<PathBuf>) -> ShipResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ShipError::ConfigLoadFailed(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                config = Self::read_file(&path)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => config = Self::read_file(&path)?,
                Some(path) => debug!(?path, "Config file not found, using defaults"),
                None => debug!("No config directory available, using defaults"),
            },
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load freight config: {}. Using defaults.", e);
            Self::default()
        })
    }

    fn read_file(path: &Path) -> ShipResult<Self> {
        info!(?path, "Loading freight config from file");
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ShipResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ShipError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ShipError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ShipError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Freight config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ShipResult<()> {
        if self.carriers.is_empty() {
            return Err(ShipError::InvalidConfig(
                "at least one carrier must be configured".into(),
            ));
        }

        let mut seen = HashSet::new();
        for carrier in &self.carriers {
            if carrier.code.trim().is_empty() {
                return Err(ShipError::InvalidConfig("carrier code must not be empty".into()));
            }
            if !seen.insert(carrier.code.as_str()) {
                return Err(ShipError::InvalidConfig(format!(
                    "carrier '{}' is configured more than once",
                    carrier.code
                )));
            }
            carrier.packing.item_capacity().map_err(|e| match e {
                ShipError::InvalidConfig(reason) => {
                    ShipError::InvalidConfig(format!("carrier '{}': {}", carrier.code, reason))
                }
                other => other,
            })?;
        }

        self.carrier(&self.default_carrier)?;

        Ok(())
    }

    /// Looks up a carrier by code.
    pub fn carrier(&self, code: &str) -> ShipResult<&CarrierSettings> {
        self.carriers
            .iter()
            .find(|carrier| carrier.code == code)
            .ok_or_else(|| ShipError::UnknownCarrier {
                code: code.to_string(),
                available: self.carrier_codes().join(", "),
            })
    }

    /// The carrier used when none is requested.
    pub fn default_carrier(&self) -> ShipResult<&CarrierSettings> {
        self.carrier(&self.default_carrier)
    }

    /// Codes of all configured carriers, in file order.
    pub fn carrier_codes(&self) -> Vec<&str> {
        self.carriers.iter().map(|carrier| carrier.code.as_str()).collect()
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from `lookup` (environment variables in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(code) = lookup("FREIGHT_DEFAULT_CARRIER") {
            debug!(carrier = %code, "Overriding default carrier from environment");
            self.default_carrier = code;
        }

        let default_code = self.default_carrier.clone();
        let Some(carrier) = self.carriers.iter_mut().find(|c| c.code == default_code) else {
            warn!(carrier = %default_code, "Default carrier not configured, skipping weight overrides");
            return;
        };

        if let Some(weight) = parse_env_weight(&lookup, "FREIGHT_MAX_PARCEL_WEIGHT") {
            debug!(weight = %weight, "Overriding max parcel weight from environment");
            carrier.packing.max_parcel_weight = Some(weight);
        }

        if let Some(weight) = parse_env_weight(&lookup, "FREIGHT_FILLER_WEIGHT") {
            debug!(weight = %weight, "Overriding filler weight from environment");
            carrier.packing.filler_weight_per_parcel = weight;
        }

        if let Some(weight) = parse_env_weight(&lookup, "FREIGHT_FALLBACK_PARCEL_WEIGHT") {
            debug!(weight = %weight, "Overriding fallback parcel weight from environment");
            carrier.packing.fallback_parcel_weight = Some(weight);
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "freight", "freight")
            .map(|dirs| dirs.config_dir().join("freight.toml"))
    }
}

fn parse_env_weight(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<Weight> {
    let raw = lookup(key)?;
    match raw.parse::<Weight>() {
        Ok(weight) => Some(weight),
        Err(e) => {
            warn!(key, value = %raw, error = %e, "Ignoring unparseable weight in environment");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn carrier(code: &str, max: Option<Weight>) -> CarrierSettings {
        CarrierSettings {
            code: code.to_string(),
            name: code.to_uppercase(),
            packing: PackingSettings {
                max_parcel_weight: max,
                ..PackingSettings::default()
            },
        }
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = FreightConfig::default();
        assert!(config.validate().is_ok());

        let dhl = config.default_carrier().unwrap();
        assert_eq!(dhl.code, "dhl");
        assert_eq!(dhl.packing.max_parcel_weight, Some(Weight::from_kg_g(31, 500)));
    }

    #[test]
    fn test_parse_toml_with_unit_strings() {
        let toml = r#"
            default_carrier = "dpd"

            [[carriers]]
            code = "dpd"
            name = "DPD Classic"

            [carriers.packing]
            max_parcel_weight = "31.5kg"
            filler_weight_per_parcel = "200g"
            fallback_parcel_weight = 2000000

            [[carriers]]
            code = "pickup"
        "#;

        let config: FreightConfig = toml::from_str(toml).unwrap();
        config.validate().unwrap();

        let dpd = config.carrier("dpd").unwrap();
        assert_eq!(dpd.packing.filler_weight_per_parcel, Weight::from_grams(200));
        assert_eq!(dpd.packing.fallback_parcel_weight, Some(Weight::from_kilograms(2)));
        assert_eq!(
            dpd.packing.item_capacity().unwrap(),
            Some(Weight::from_kg_g(31, 300))
        );

        let pickup = config.carrier("pickup").unwrap();
        assert_eq!(pickup.packing, PackingSettings::default());
        assert_eq!(pickup.packing.item_capacity().unwrap(), None);
    }

    #[test]
    fn test_empty_file_means_defaults() {
        let config: FreightConfig = toml::from_str("").unwrap();
        assert_eq!(config, FreightConfig::default());
    }

    #[test]
    fn test_validate_rejects_bad_configs() {
        let mut config = FreightConfig::default();
        config.carriers.clear();
        assert!(config.validate().is_err());

        let mut config = FreightConfig::default();
        config.carriers.push(carrier("dhl", None));
        assert!(matches!(config.validate(), Err(ShipError::InvalidConfig(_))));

        let mut config = FreightConfig::default();
        config.default_carrier = "ups".to_string();
        assert!(matches!(
            config.validate(),
            Err(ShipError::UnknownCarrier { .. })
        ));

        let mut config = FreightConfig::default();
        config.carriers[0].packing.filler_weight_per_parcel = Weight::from_kg_g(31, 500);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("carrier 'dhl'"));
    }

    #[test]
    fn test_unknown_carrier_lists_available() {
        let mut config = FreightConfig::default();
        config.carriers.push(carrier("gls", Some(Weight::from_kilograms(40))));

        let err = config.carrier("ups").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unknown carrier 'ups'. Configured carriers: dhl, gls"
        );
    }

    #[test]
    fn test_env_overrides_apply_to_default_carrier() {
        let mut config = FreightConfig::default();
        config.carriers.push(carrier("gls", Some(Weight::from_kilograms(40))));

        config.apply_overrides(env(&[
            ("FREIGHT_DEFAULT_CARRIER", "gls"),
            ("FREIGHT_MAX_PARCEL_WEIGHT", "25kg"),
            ("FREIGHT_FILLER_WEIGHT", "150 g"),
            ("FREIGHT_FALLBACK_PARCEL_WEIGHT", "1kg"),
        ]));

        assert_eq!(config.default_carrier, "gls");
        let gls = config.carrier("gls").unwrap();
        assert_eq!(gls.packing.max_parcel_weight, Some(Weight::from_kilograms(25)));
        assert_eq!(gls.packing.filler_weight_per_parcel, Weight::from_grams(150));
        assert_eq!(gls.packing.fallback_parcel_weight, Some(Weight::from_kilograms(1)));

        // the other carrier is untouched
        let dhl = config.carrier("dhl").unwrap();
        assert_eq!(dhl.packing.max_parcel_weight, Some(Weight::from_kg_g(31, 500)));
    }

    #[test]
    fn test_env_override_ignores_bad_weight() {
        let mut config = FreightConfig::default();
        config.apply_overrides(env(&[("FREIGHT_MAX_PARCEL_WEIGHT", "heavy")]));
        assert_eq!(config, FreightConfig::default());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("freight.toml");

        let mut config = FreightConfig::default();
        config.carriers[0].packing.filler_weight_per_parcel = Weight::from_grams(200);
        config.carriers[0].packing.fallback_parcel_weight = Some(Weight::from_kilograms(2));
        config.carriers.push(carrier("pickup", None));
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let loaded: FreightConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = FreightConfig::load(Some(dir.path().join("absent.toml")));
        assert!(matches!(result, Err(ShipError::ConfigLoadFailed(_))));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freight.toml");
        std::fs::write(&path, "default_carrier = [").unwrap();

        let result = FreightConfig::load(Some(path.clone()));
        assert!(matches!(result, Err(ShipError::ConfigLoadFailed(_))));
        assert_eq!(FreightConfig::load_or_default(Some(path)), FreightConfig::default());
    }
}
