//! Configuration module
//!
//! The preprocessor is configured through an explicitly constructed [`PreprocessorConfig`]
//! passed by reference to whatever needs it. [`PreprocessorConfig::from_env`] is the single
//! initialization point for binaries.

use std::env;

use serde::{Deserialize, Serialize};

const DEFAULT_JPEG_QUALITY: u8 = 75;
const DEFAULT_MAX_INPUT_MB: usize = 50;

/// How the output raster is dimensioned for non-identity orientations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionPolicy {
    /// Swap width and height for every orientation other than 1, including the
    /// flips (2, 4) and the half turn (3). Compatible with existing stored images.
    #[default]
    SwapAllNonIdentity,
    /// Swap only for the quarter-turn family (5, 6, 7, 8).
    SwapRotationsOnly,
}

impl DimensionPolicy {
    pub fn parse(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "all" | "swap_all_non_identity" => Ok(DimensionPolicy::SwapAllNonIdentity),
            "rotations" | "swap_rotations_only" => Ok(DimensionPolicy::SwapRotationsOnly),
            other => Err(format!(
                "Unknown dimension policy: {} (expected 'all' or 'rotations')",
                other
            )),
        }
    }

    /// Whether the output raster swaps source width/height for this orientation code.
    pub fn swaps_dimensions(self, orientation: u8) -> bool {
        match self {
            DimensionPolicy::SwapAllNonIdentity => orientation != 1,
            DimensionPolicy::SwapRotationsOnly => (5..=8).contains(&orientation),
        }
    }
}

/// Image preprocessor configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PreprocessorConfig {
    pub accepted_mime_types: Vec<String>,
    pub jpeg_quality: u8,
    pub dimension_policy: DimensionPolicy,
    /// Inputs above this size pass through untouched. 0 = unlimited.
    pub max_input_bytes: usize,
}

impl Default for PreprocessorConfig {
    fn default() -> Self {
        Self {
            accepted_mime_types: vec!["image/jpeg".to_string(), "image/jpg".to_string()],
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            dimension_policy: DimensionPolicy::default(),
            max_input_bytes: DEFAULT_MAX_INPUT_MB * 1024 * 1024,
        }
    }
}

impl PreprocessorConfig {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. Unset keys take their defaults;
    /// set but unparseable keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let accepted_mime_types = match lookup("UPRIGHT_ACCEPTED_MIME_TYPES") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.accepted_mime_types,
        };

        let jpeg_quality = match lookup("UPRIGHT_JPEG_QUALITY") {
            Some(raw) => raw.trim().parse::<u8>().map_err(|e| {
                anyhow::anyhow!("UPRIGHT_JPEG_QUALITY must be an integer 1-100: {}", e)
            })?,
            None => defaults.jpeg_quality,
        };

        let dimension_policy = match lookup("UPRIGHT_DIMENSION_POLICY") {
            Some(raw) => DimensionPolicy::parse(&raw).map_err(|e| anyhow::anyhow!(e))?,
            None => defaults.dimension_policy,
        };

        let max_input_bytes = match lookup("UPRIGHT_MAX_INPUT_MB") {
            Some(raw) => {
                let mb = raw.trim().parse::<usize>().map_err(|e| {
                    anyhow::anyhow!("UPRIGHT_MAX_INPUT_MB must be a non-negative integer: {}", e)
                })?;
                mb.saturating_mul(1024 * 1024)
            }
            None => defaults.max_input_bytes,
        };

        let config = Self {
            accepted_mime_types,
            jpeg_quality,
            dimension_policy,
            max_input_bytes,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(anyhow::anyhow!(
                "UPRIGHT_JPEG_QUALITY must be between 1 and 100, got {}",
                self.jpeg_quality
            ));
        }

        if self.accepted_mime_types.is_empty() {
            return Err(anyhow::anyhow!(
                "UPRIGHT_ACCEPTED_MIME_TYPES must list at least one MIME type"
            ));
        }

        Ok(())
    }

    /// Whether a declared MIME type is handled by the pipeline. Parameters after `;`
    /// are ignored and the comparison is ASCII case-insensitive.
    pub fn accepts_mime(&self, mime: &str) -> bool {
        let essence = mime.split(';').next().unwrap_or("").trim();
        self.accepted_mime_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(essence))
    }

    pub fn exceeds_input_limit(&self, len: usize) -> bool {
        self.max_input_bytes != 0 && len > self.max_input_bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = PreprocessorConfig::default();
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.dimension_policy, DimensionPolicy::SwapAllNonIdentity);
        assert_eq!(config.max_input_bytes, 50 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_accepts_jpeg_aliases() {
        let config = PreprocessorConfig::default();
        assert!(config.accepts_mime("image/jpeg"));
        assert!(config.accepts_mime("image/jpg"));
        assert!(config.accepts_mime("IMAGE/JPEG"));
        assert!(config.accepts_mime("image/jpeg; charset=binary"));
        assert!(!config.accepts_mime("image/png"));
        assert!(!config.accepts_mime(""));
    }

    #[test]
    fn test_from_lookup_empty_uses_defaults() {
        let config = PreprocessorConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.jpeg_quality, 75);
        assert_eq!(config.accepted_mime_types.len(), 2);
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = PreprocessorConfig::from_lookup(lookup_from(&[
            ("UPRIGHT_ACCEPTED_MIME_TYPES", "image/jpeg, image/pjpeg"),
            ("UPRIGHT_JPEG_QUALITY", "90"),
            ("UPRIGHT_DIMENSION_POLICY", "rotations"),
            ("UPRIGHT_MAX_INPUT_MB", "0"),
        ]))
        .unwrap();

        assert_eq!(config.accepted_mime_types, vec!["image/jpeg", "image/pjpeg"]);
        assert_eq!(config.jpeg_quality, 90);
        assert_eq!(config.dimension_policy, DimensionPolicy::SwapRotationsOnly);
        assert!(!config.exceeds_input_limit(usize::MAX));
    }

    #[test]
    fn test_from_lookup_rejects_bad_values() {
        assert!(
            PreprocessorConfig::from_lookup(lookup_from(&[("UPRIGHT_JPEG_QUALITY", "high")]))
                .is_err()
        );
        assert!(
            PreprocessorConfig::from_lookup(lookup_from(&[("UPRIGHT_JPEG_QUALITY", "0")]))
                .is_err()
        );
        assert!(PreprocessorConfig::from_lookup(lookup_from(&[(
            "UPRIGHT_DIMENSION_POLICY",
            "sideways"
        )]))
        .is_err());
        assert!(PreprocessorConfig::from_lookup(lookup_from(&[(
            "UPRIGHT_ACCEPTED_MIME_TYPES",
            " , "
        )]))
        .is_err());
    }

    #[test]
    fn test_dimension_policy_swaps() {
        let all = DimensionPolicy::SwapAllNonIdentity;
        let rotations = DimensionPolicy::SwapRotationsOnly;

        assert!(!all.swaps_dimensions(1));
        assert!(!rotations.swaps_dimensions(1));
        for code in 2..=8 {
            assert!(all.swaps_dimensions(code));
        }
        for code in 2..=4 {
            assert!(!rotations.swaps_dimensions(code));
        }
        for code in 5..=8 {
            assert!(rotations.swaps_dimensions(code));
        }
    }

    #[test]
    fn test_config_serialization() {
        let config = PreprocessorConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("swap_all_non_identity"));
        let back: PreprocessorConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.jpeg_quality, config.jpeg_quality);
    }
}
