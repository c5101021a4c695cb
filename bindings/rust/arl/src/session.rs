// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! Library session: initialisation, allocation, simulation and advice

use crate::config::{take_library_config, LowConfig, RawConf};
use crate::error::{Error, Result};
use crate::image::Image;
use crate::params::AdviceRequest;
use crate::shape::ImageShape;
use crate::vis::Visibility;

use log::{debug, trace};
use std::ffi::CString;
use std::os::raw::c_int;
use std::sync::Once;

static INIT: Once = Once::new();

/// Wide-field imaging advice returned by the library
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Advice {
    /// Number of w slices
    pub vis_slices: i32,
    /// Image size in pixels
    pub npixel: i32,
    /// Cell size in radians
    pub cellsize: f64,
}

/// Token proving the library has been initialised
///
/// All entry points hang off a session so that `arl_initialize` is always
/// called first. Creating further sessions is free.
///
/// # Example
///
/// ```no_run
/// use arl::{Session, AdviceRequest};
///
/// # fn main() -> arl::Result<()> {
/// let session = Session::initialize();
/// let config = session.default_config("LOWBD2-CORE")?;
/// let mut vis = session.allocate_blockvis(&config)?;
/// session.create_blockvisibility(&config, &mut vis)?;
///
/// let advice = session.advise_wide_field(&config, &mut vis, AdviceRequest::default())?;
/// println!("npixel = {}", advice.npixel);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Session {
    _private: (),
}

fn to_c_int(value: usize, what: &'static str) -> Result<c_int> {
    c_int::try_from(value).map_err(|_| Error::InvalidArgument(what))
}

impl Session {
    /// Initialise the library (once per process) and return a session.
    pub fn initialize() -> Self {
        INIT.call_once(|| {
            debug!("initialising ARL");
            unsafe { arl_sys::arl_initialize() };
        });
        Self { _private: () }
    }

    // =========================================================================
    // Configuration
    // =========================================================================

    /// Load the library's default configuration for a named array.
    pub fn default_config(&self, name: &str) -> Result<LowConfig> {
        let c_name = CString::new(name)?;
        let raw = unsafe { arl_sys::allocate_arlconf_default(c_name.as_ptr()) };
        if raw.is_null() {
            return Err(Error::Allocation("configuration"));
        }
        let config = unsafe { take_library_config(raw, name) };
        debug!(
            "loaded configuration {}: nant={} nbases={} npol={}",
            config.name(),
            config.nant(),
            config.nbases(),
            config.npol()
        );
        Ok(config)
    }

    // =========================================================================
    // Visibility allocation and simulation
    // =========================================================================

    /// Allocate a visibility record for `nvis` samples of `npol` products.
    pub fn allocate_vis(&self, npol: usize, nvis: usize) -> Result<Visibility> {
        let ptr = unsafe {
            arl_sys::allocate_vis_data(
                to_c_int(npol, "npol out of range")?,
                to_c_int(nvis, "nvis out of range")?,
            )
        };
        unsafe { Visibility::from_raw(ptr) }.ok_or(Error::Allocation("visibility"))
    }

    /// Allocate a block visibility record sized for `config`'s array and axes.
    pub fn allocate_blockvis(&self, config: &LowConfig) -> Result<Visibility> {
        config.validate()?;
        let ptr = unsafe {
            arl_sys::allocate_blockvis_data(
                to_c_int(config.nant(), "nant out of range")?,
                to_c_int(config.nfreqs(), "nfreqs out of range")?,
                to_c_int(config.npol(), "npol out of range")?,
                to_c_int(config.ntimes(), "ntimes out of range")?,
            )
        };
        unsafe { Visibility::from_raw(ptr) }.ok_or(Error::Allocation("block visibility"))
    }

    /// Simulate visibilities for `config` into `vis`.
    pub fn create_visibility(&self, config: &LowConfig, vis: &mut Visibility) -> Result<()> {
        let mut raw = RawConf::new(config)?;
        trace!("start create_visibility");
        unsafe { arl_sys::arl_create_visibility(raw.as_mut_ptr(), vis.as_mut_ptr()) };
        trace!("end create_visibility");
        Ok(())
    }

    /// Simulate block visibilities for `config` into `vis`.
    pub fn create_blockvisibility(&self, config: &LowConfig, vis: &mut Visibility) -> Result<()> {
        let mut raw = RawConf::new(config)?;
        trace!("start create_blockvisibility");
        unsafe { arl_sys::arl_create_blockvisibility(raw.as_mut_ptr(), vis.as_mut_ptr()) };
        trace!("end create_blockvisibility");
        Ok(())
    }

    /// Advise on wide-field imaging parameters for `vis`.
    pub fn advise_wide_field(
        &self,
        config: &LowConfig,
        vis: &mut Visibility,
        request: AdviceRequest,
    ) -> Result<Advice> {
        let mut raw = RawConf::new(config)?;
        let mut adv = arl_sys::ARLadvice {
            guard_band_image: request.guard_band_image,
            delA: request.del_a,
            wprojection_planes: request.wprojection_planes,
            ..Default::default()
        };
        trace!("start advise_wide_field");
        unsafe { arl_sys::arl_advise_wide_field(raw.as_mut_ptr(), vis.as_mut_ptr(), &mut adv) };
        trace!("end advise_wide_field");

        Ok(Advice {
            vis_slices: adv.vis_slices,
            npixel: adv.npixel,
            cellsize: adv.cellsize,
        })
    }

    // =========================================================================
    // Images
    // =========================================================================

    /// Shape of a single-plane image at `cellsize` for `config`'s first frequency.
    pub fn image_shape(&self, config: &LowConfig, cellsize: f64) -> Result<ImageShape> {
        let raw = RawConf::new(config)?;
        let mut shape = [0 as c_int; 4];
        unsafe { arl_sys::helper_get_image_shape(raw.freqs_ptr(), cellsize, shape.as_mut_ptr()) };
        ImageShape::from_c(shape)
    }

    /// Shape of a multi-frequency image of `npixel` square pixels.
    pub fn image_shape_multifreq(
        &self,
        config: &LowConfig,
        cellsize: f64,
        npixel: i32,
    ) -> Result<ImageShape> {
        let mut raw = RawConf::new(config)?;
        let mut shape = [0 as c_int; 4];
        unsafe {
            arl_sys::helper_get_image_shape_multifreq(
                raw.as_mut_ptr(),
                cellsize,
                npixel,
                shape.as_mut_ptr(),
            )
        };
        ImageShape::from_c(shape)
    }

    /// Allocate an image cube of the given shape.
    pub fn allocate_image(&self, shape: ImageShape) -> Result<Image> {
        let mut dims = shape.to_c()?;
        let ptr = unsafe { arl_sys::allocate_image(dims.as_mut_ptr()) };
        unsafe { Image::from_raw(ptr) }.ok_or(Error::Allocation("image"))
    }

    /// Fill `image` with the M31 test image, centred on `vis`'s phase centre.
    pub fn create_test_image(
        &self,
        config: &LowConfig,
        cellsize: f64,
        vis: &Visibility,
        image: &mut Image,
    ) -> Result<()> {
        let raw = RawConf::new(config)?;
        trace!("start create_test_image");
        unsafe {
            arl_sys::arl_create_test_image(
                raw.freqs_ptr(),
                cellsize,
                vis.phasecentre(),
                image.as_mut_ptr(),
            )
        };
        trace!("end create_test_image");
        Ok(())
    }

    /// Fill `image` with the low-frequency GLEAM sky model.
    pub fn create_low_test_image_from_gleam(
        &self,
        config: &LowConfig,
        cellsize: f64,
        npixel: i32,
        vis: &Visibility,
        image: &mut Image,
    ) -> Result<()> {
        let mut raw = RawConf::new(config)?;
        trace!("start create_low_test_image_from_gleam");
        unsafe {
            arl_sys::arl_create_low_test_image_from_gleam(
                raw.as_mut_ptr(),
                cellsize,
                npixel,
                vis.phasecentre(),
                image.as_mut_ptr(),
            )
        };
        trace!("end create_low_test_image_from_gleam");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{verify_copy, CopyCheck};

    // These tests drive the native library and need libarlffi at link time.

    fn small_config(session: &Session) -> LowConfig {
        session
            .default_config("LOWBD2-CORE")
            .and_then(|c| c.rmax(100.0).frequencies(1.0e8, 1.1e8, 2))
            .and_then(|c| c.times(-0.1, 0.1, 3))
            .expect("default configuration")
    }

    #[test]
    fn test_simulated_records_are_equivalent() {
        let session = Session::initialize();
        let config = small_config(&session);
        let mut vt = session.allocate_vis(config.npol(), config.nvis()).unwrap();
        let mut vtmp = session.allocate_vis(config.npol(), config.nvis()).unwrap();
        session.create_visibility(&config, &mut vt).unwrap();
        session.create_visibility(&config, &mut vtmp).unwrap();

        assert_eq!(verify_copy(&vt, &vtmp), CopyCheck::Equivalent);
        assert_eq!(verify_copy(&vt, &vt), CopyCheck::IdentityAliasing);
    }

    #[test]
    fn test_shape_mismatch_between_records() {
        let session = Session::initialize();
        let a = session.allocate_vis(1, 2).unwrap();
        let b = session.allocate_vis(1, 3).unwrap();
        assert_eq!(verify_copy(&a, &b), CopyCheck::ShapeMismatch);
    }

    #[test]
    fn test_allocate_vis_rejects_oversized_counts() {
        let session = Session::initialize();
        let err = session.allocate_vis(usize::MAX, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }
}
