// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! ICAL set-up through the ARL bindings
//!
//! This example walks the first stage of an ICAL run:
//! 1. Load the LOWBD2-CORE configuration and overlay the run parameters
//! 2. Simulate two block visibilities and check they are distinct, equal records
//! 3. Ask the library for wide-field imaging parameters
//! 4. Generate the GLEAM sky model image and write it as FITS
//!
//! Run: cargo run -p arl-demos --features native --example ical_demo -- -o results

use arl::{verify_copy, Result, Session};
use arl_demos::{frequency_table, init_logging, time_table, IcalArgs};
use clap::Parser;
use log::{info, warn};

fn main() -> Result<()> {
    init_logging();
    let args = IcalArgs::parse();
    let params = args.common.params()?;

    let session = Session::initialize();
    let config = params.apply(session.default_config(&params.config_name)?)?;

    println!("{}", frequency_table(&config));
    println!("{}", time_table(&config));

    info!("Allocate vis data...");
    let mut vt = session.allocate_blockvis(&config)?;

    info!("Create blockvisibility...");
    session.create_blockvisibility(&config, &mut vt)?;

    if !args.no_verify {
        let mut vtmp = session.allocate_blockvis(&config)?;
        session.create_blockvisibility(&config, &mut vtmp)?;
        let check = verify_copy(&vt, &vtmp);
        if check.is_equivalent() {
            info!("Visibility records verified ({} bytes)", vt.payload_len().unwrap_or(0));
        } else {
            warn!("Visibility record check failed with code {}: {}", check.code(), check);
        }
    }

    info!("Calculating wide field parameters...");
    let advice = session.advise_wide_field(&config, &mut vt, params.advice)?;
    println!(
        "Vis_slices = {},  npixel = {}, cellsize = {:e}",
        advice.vis_slices, advice.npixel, advice.cellsize
    );

    let shape = session.image_shape_multifreq(&config, advice.cellsize, advice.npixel)?;
    println!("A shape of the modeled GLEAM image: {}", shape);

    let mut gleam_model = session.allocate_image(shape)?;
    session.create_low_test_image_from_gleam(
        &config,
        advice.cellsize,
        advice.npixel,
        &vt,
        &mut gleam_model,
    )?;

    let path = params.output_dir.join("gleam_model.fits");
    gleam_model.export_fits(&path)?;
    info!("Wrote {}", path.display());

    Ok(())
}
