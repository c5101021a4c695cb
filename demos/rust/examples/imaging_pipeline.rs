// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! 2D imaging pipeline through the ARL bindings
//!
//! Simulates observations of the M31 test image, makes the dirty image and
//! PSF, deconvolves, restores, and predicts visibilities back from the clean
//! components. All images are written as FITS.
//!
//! Run: cargo run -p arl-demos --features native --example imaging_pipeline

use arl::{Result, Session};
use arl_demos::{init_logging, DemoArgs};
use clap::Parser;
use log::info;

const CELLSIZE: f64 = 0.0005;

fn main() -> Result<()> {
    init_logging();
    let args = DemoArgs::parse();
    let params = args.params()?;

    let session = Session::initialize();
    let config = params.apply(session.default_config(&params.config_name)?)?;
    let nvis = config.nvis();

    info!("Get image shape...");
    let shape = session.image_shape(&config, CELLSIZE)?;

    info!("Allocate images...");
    let mut model = session.allocate_image(shape)?;
    let mut m31image = session.allocate_image(shape)?;
    let mut dirty = session.allocate_image(shape)?;
    let mut psf = session.allocate_image(shape)?;
    let mut comp = session.allocate_image(shape)?;
    let mut residual = session.allocate_image(shape)?;
    let mut restored = session.allocate_image(shape)?;

    info!("Create visibility...");
    let mut vt = session.allocate_vis(config.npol(), nvis)?;
    session.create_visibility(&config, &mut vt)?;

    session.create_test_image(&config, CELLSIZE, &vt, &mut m31image)?;

    let mut vtmp = session.allocate_vis(config.npol(), nvis)?;
    session.predict_2d(&vt, &m31image, &mut vtmp)?;
    drop(vt);
    let vt = vtmp;

    session.create_image_from_visibility(&vt, &mut model)?;

    let sumwt = session.invert_2d(&vt, &model, false, &mut dirty)?;
    info!("Dirty image sum of weights: {:e}", sumwt);
    session.invert_2d(&vt, &model, true, &mut psf)?;

    session.deconvolve_cube(&mut dirty, &mut psf, &mut comp, &mut residual)?;
    session.restore_cube(&mut comp, &mut psf, &mut residual, &mut restored)?;

    let out = &params.output_dir;
    m31image.export_fits(out.join("m31image.fits"))?;
    dirty.export_fits(out.join("dirty.fits"))?;
    psf.export_fits(out.join("psf.fits"))?;
    residual.export_fits(out.join("residual.fits"))?;
    restored.export_fits(out.join("restored.fits"))?;
    comp.export_fits(out.join("solution.fits"))?;
    info!("Wrote images to {}", out.display());

    drop((model, m31image, dirty, psf, residual, restored, vt));

    let mut vtmodel = session.allocate_vis(config.npol(), nvis)?;
    let mut vtmp = session.allocate_vis(config.npol(), nvis)?;
    session.create_visibility(&config, &mut vtmodel)?;
    session.predict_2d(&vtmodel, &comp, &mut vtmp)?;
    info!("Predicted {} visibilities from the clean components", vtmp.nvis());

    Ok(())
}
