// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! Shared plumbing for the ARL demo programs
//!
//! Run: cargo run -p arl-demos --features native --example ical_demo -- --help

use arl::{IcalParams, LowConfig};
use clap::Parser;
use std::path::PathBuf;

/// Command line accepted by the demo programs
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct DemoArgs {
    /// TOML file with run parameters; built-in ICAL defaults when omitted
    #[arg(short, long, value_name = "FILE")]
    pub params: Option<PathBuf>,

    /// Directory for FITS output (overrides the parameter file)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

/// Command line of `ical_demo`: the shared options plus the record check
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct IcalArgs {
    #[command(flatten)]
    pub common: DemoArgs,

    /// Skip the equivalence check between the two simulated records
    #[arg(long)]
    pub no_verify: bool,
}

impl DemoArgs {
    /// Resolve the run parameters from the file and command-line overrides.
    pub fn params(&self) -> arl::Result<IcalParams> {
        let mut params = match &self.params {
            Some(path) => IcalParams::load(path)?,
            None => IcalParams::default(),
        };
        if let Some(dir) = &self.output_dir {
            params.output_dir = dir.clone();
        }
        Ok(params)
    }
}

/// Install the `env_logger` backend, defaulting to `info`.
pub fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env).try_init().unwrap_or(());
}

/// Table of channel frequencies and bandwidths
pub fn frequency_table(config: &LowConfig) -> String {
    let mut out = String::from("Frequency and bandwidth list\n");
    for (i, (freq, bw)) in config
        .freqs()
        .iter()
        .zip(config.channel_bandwidth())
        .enumerate()
    {
        out.push_str(&format!("{} {:e} {:e}\n", i, freq, bw));
    }
    out
}

/// Table of observation times
pub fn time_table(config: &LowConfig) -> String {
    let mut out = String::from("A list of the times (in rad)\n");
    for (i, time) in config.time_list().iter().enumerate() {
        out.push_str(&format!("{} {:e}\n", i, time));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_args_defaults() {
        let args = DemoArgs::parse_from(["imaging_pipeline"]);
        assert!(args.params.is_none());

        let params = args.params().unwrap();
        assert_eq!(params, IcalParams::default());
    }

    #[test]
    fn test_no_verify_only_on_ical_demo() {
        assert!(DemoArgs::try_parse_from(["imaging_pipeline", "--no-verify"]).is_err());

        let args = IcalArgs::parse_from(["ical_demo", "--no-verify", "-o", "out"]);
        assert!(args.no_verify);
        assert_eq!(args.common.output_dir, Some(PathBuf::from("out")));

        let args = IcalArgs::parse_from(["ical_demo"]);
        assert!(!args.no_verify);
    }

    #[test]
    fn test_output_dir_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "output_dir = \"from_file\"\nnfreqs = 2").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = DemoArgs::parse_from(["ical_demo", "--params", &path, "-o", "from_cli"]);
        let params = args.params().unwrap();
        assert_eq!(params.nfreqs, 2);
        assert_eq!(params.output_dir, PathBuf::from("from_cli"));
    }

    #[test]
    fn test_tables() {
        let config = LowConfig::new("LOWBD2-CORE")
            .frequencies(0.8e8, 1.2e8, 5)
            .unwrap()
            .times(-1.0, 1.0, 3)
            .unwrap();

        let freqs = frequency_table(&config);
        assert_eq!(freqs.lines().count(), 6);
        assert!(freqs.contains("0 8e7 1e7"));

        let times = time_table(&config);
        assert_eq!(times.lines().count(), 4);
        assert!(times.contains("1 0e0"));
    }
}
