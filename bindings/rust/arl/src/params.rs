//! Run parameters for the ICAL demo
//!
//! Parameters are read from a TOML file. Every key is optional and falls
//! back to the values of the reference ICAL run:
//!
//! ```toml
//! config_name = "LOWBD2-CORE"
//! rmax = 300.0
//! phase_centre_ra = 30.0
//! phase_centre_dec = -60.0
//! nfreqs = 5
//! freq_start = 0.8e8
//! freq_end = 1.2e8
//! ntimes = 11
//! time_start = -1.0471975511965976
//! time_end = 1.0471975511965976
//! output_dir = "results"
//!
//! [advice]
//! guard_band_image = 4.0
//! del_a = 0.02
//! wprojection_planes = 1
//! ```

use crate::config::LowConfig;
use crate::error::Result;
use serde::Deserialize;
use std::f64::consts::FRAC_PI_3;
use std::path::{Path, PathBuf};

/// Inputs to wide-field imaging advice
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AdviceRequest {
    /// Image size as a multiple of the primary beam width
    pub guard_band_image: f64,
    /// Tolerance on the w-term phase error
    pub del_a: f64,
    pub wprojection_planes: i32,
}

impl Default for AdviceRequest {
    fn default() -> Self {
        Self {
            guard_band_image: 4.0,
            del_a: 0.02,
            wprojection_planes: 1,
        }
    }
}

/// Parameters of an ICAL demo run
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IcalParams {
    pub config_name: String,
    pub rmax: f64,
    pub phase_centre_ra: f64,
    pub phase_centre_dec: f64,
    pub nfreqs: usize,
    pub freq_start: f64,
    pub freq_end: f64,
    pub ntimes: usize,
    pub time_start: f64,
    pub time_end: f64,
    pub advice: AdviceRequest,
    pub output_dir: PathBuf,
}

impl Default for IcalParams {
    fn default() -> Self {
        Self {
            config_name: String::from("LOWBD2-CORE"),
            rmax: 300.0,
            phase_centre_ra: 30.0,
            phase_centre_dec: -60.0,
            nfreqs: 5,
            freq_start: 0.8e8,
            freq_end: 1.2e8,
            ntimes: 11,
            time_start: -FRAC_PI_3,
            time_end: FRAC_PI_3,
            advice: AdviceRequest::default(),
            output_dir: PathBuf::from("results"),
        }
    }
}

impl IcalParams {
    /// Parse parameters from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read parameters from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let params = Self::from_toml_str(&text)?;
        log::debug!("loaded run parameters from {}", path.as_ref().display());
        Ok(params)
    }

    /// Overlay these parameters on a configuration (usually the library's
    /// default for `config_name`).
    pub fn apply(&self, config: LowConfig) -> Result<LowConfig> {
        config
            .rmax(self.rmax)
            .phase_centre(self.phase_centre_ra, self.phase_centre_dec)
            .frequencies(self.freq_start, self.freq_end, self.nfreqs)?
            .times(self.time_start, self.time_end, self.ntimes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let params = IcalParams::default();
        assert_eq!(params.config_name, "LOWBD2-CORE");
        assert_eq!(params.nfreqs, 5);
        assert_eq!(params.ntimes, 11);
        assert_eq!(params.advice.wprojection_planes, 1);
        assert_eq!(params.output_dir, PathBuf::from("results"));
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        assert_eq!(IcalParams::from_toml_str("").unwrap(), IcalParams::default());
    }

    #[test]
    fn test_partial_override() {
        let params = IcalParams::from_toml_str(
            r#"
            nfreqs = 3
            output_dir = "out/run1"

            [advice]
            del_a = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(params.nfreqs, 3);
        assert_eq!(params.output_dir, PathBuf::from("out/run1"));
        assert_eq!(params.advice.del_a, 0.05);
        assert_eq!(params.advice.guard_band_image, 4.0);
        assert_eq!(params.rmax, 300.0);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = IcalParams::from_toml_str("nfreq = 3").unwrap_err();
        assert!(matches!(err, Error::Params(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "config_name = \"LOWBD2\"\nntimes = 7").unwrap();

        let params = IcalParams::load(file.path()).unwrap();
        assert_eq!(params.config_name, "LOWBD2");
        assert_eq!(params.ntimes, 7);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = IcalParams::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_apply() {
        let config = LowConfig::new("LOWBD2-CORE").array(166, 13695, 1, 1);
        let config = IcalParams::default().apply(config).unwrap();

        assert_eq!(config.max_radius(), 300.0);
        assert_eq!(config.phase_centre_deg(), (30.0, -60.0));
        assert_eq!(config.nfreqs(), 5);
        assert_eq!(config.ntimes(), 11);
        assert_eq!(config.nbases(), 13695);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_rejects_zero_channels() {
        let params = IcalParams {
            nfreqs: 0,
            ..IcalParams::default()
        };
        assert!(params.apply(LowConfig::new("x")).is_err());
    }
}
