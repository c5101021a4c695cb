// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! Raw FFI bindings for the ARL C wrapper
//!
//! This crate provides unsafe, low-level bindings to `libarlffi`, the C
//! wrapper around the Algorithm Reference Library. The record layouts mirror
//! `arlwrap.h`. For a safe, idiomatic Rust API, use the `arl` crate instead.
//!
//! # Safety
//!
//! All functions in this crate are unsafe and follow C calling conventions.
//! The caller is responsible for:
//! - Calling `arl_initialize` once before any other function
//! - Ensuring record pointers are valid and were allocated by the library
//! - Keeping the arrays referenced by an `ARLConf` alive for the whole call
//! - Not using a record after `destroy_vis` / `destroy_image`
//!
//! # Example
//!
//! ```no_run
//! use arl_sys::*;
//!
//! unsafe {
//!     arl_initialize();
//!     let vis = allocate_vis_data(1, 1024);
//!     if vis.is_null() {
//!         panic!("Failed to allocate visibility");
//!     }
//!
//!     // ... use the visibility ...
//!
//!     destroy_vis(vis);
//! }
//! ```

#![allow(non_camel_case_types)]
#![allow(non_snake_case)]

use libc::{c_char, c_double, c_int, c_void, size_t};

/// Telescope configuration plus the observation's frequency and time axes.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ARLConf {
    pub confname: *mut c_char,
    pub pc_ra: c_double,
    pub pc_dec: c_double,
    pub times: *mut c_double,
    pub ntimes: c_int,
    pub freqs: *mut c_double,
    pub nfreqs: c_int,
    pub channel_bandwidth: *mut c_double,
    pub nchanwidth: c_int,
    pub nbases: c_int,
    pub nant: c_int,
    pub npol: c_int,
    pub nrec: c_int,
    pub rmax: c_double,
    pub polframe: *mut c_char,
}

/// Visibility record. `data` holds `80 + 32 * npol * nvis` bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct ARLVis {
    pub nvis: size_t,
    pub npol: c_int,
    pub data: *mut c_void,
    pub phasecentre: *mut c_char,
}

/// Wide-field imaging advice. The last three fields are inputs.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone)]
pub struct ARLadvice {
    pub vis_slices: c_int,
    pub npixel: c_int,
    pub cellsize: c_double,
    pub guard_band_image: c_double,
    pub delA: c_double,
    pub wprojection_planes: c_int,
}

/// Image record; `data_shape` is (channel, polarisation, y, x).
#[repr(C)]
#[derive(Debug, Copy, Clone)]
pub struct Image {
    pub size: size_t,
    pub data_shape: [c_int; 4],
    pub data: *mut c_void,
    pub wcs: *mut c_char,
    pub polarisation_frame: *mut c_char,
}

extern "C" {
    pub fn arl_initialize();

    // =========================================================================
    // Allocation
    // =========================================================================

    pub fn allocate_arlconf_default(conf_name: *const c_char) -> *mut ARLConf;
    pub fn allocate_vis_data(npol: c_int, nvis: c_int) -> *mut ARLVis;
    pub fn allocate_blockvis_data(
        nants: c_int,
        nchan: c_int,
        npol: c_int,
        ntimes: c_int,
    ) -> *mut ARLVis;
    pub fn destroy_vis(vis: *mut ARLVis) -> *mut ARLVis;
    pub fn allocate_image(shape: *mut c_int) -> *mut Image;
    pub fn destroy_image(image: *mut Image) -> *mut Image;

    // =========================================================================
    // Helpers
    // =========================================================================

    pub fn helper_get_image_shape(freqs: *const c_double, cellsize: c_double, shape: *mut c_int);
    pub fn helper_get_image_shape_multifreq(
        lowconfig: *mut ARLConf,
        cellsize: c_double,
        npixel: c_int,
        shape: *mut c_int,
    );

    // =========================================================================
    // Visibility simulation
    // =========================================================================

    pub fn arl_create_visibility(lowconfig: *mut ARLConf, res_vis: *mut ARLVis);
    pub fn arl_create_blockvisibility(lowconfig: *mut ARLConf, res_vis: *mut ARLVis);
    pub fn arl_advise_wide_field(
        lowconfig: *mut ARLConf,
        vis_in: *mut ARLVis,
        adv: *mut ARLadvice,
    );

    // =========================================================================
    // Test images
    // =========================================================================

    pub fn arl_create_test_image(
        frequency: *const c_double,
        cellsize: c_double,
        phasecentre: *mut c_char,
        res_img: *mut Image,
    );
    pub fn arl_create_low_test_image_from_gleam(
        lowconfig: *mut ARLConf,
        cellsize: c_double,
        npixel: c_int,
        phasecentre: *mut c_char,
        res_img: *mut Image,
    );

    // =========================================================================
    // Imaging and deconvolution
    // =========================================================================

    pub fn arl_predict_2d(visin: *const ARLVis, img: *const Image, visout: *mut ARLVis);
    pub fn arl_create_image_from_visibility(vis: *const ARLVis, model: *mut Image);
    pub fn arl_invert_2d(
        visin: *const ARLVis,
        img_in: *const Image,
        dopsf: bool,
        out: *mut Image,
        sumwt: *mut c_double,
    );
    pub fn arl_deconvolve_cube(
        dirty: *mut Image,
        psf: *mut Image,
        restored: *mut Image,
        residual: *mut Image,
    );
    pub fn arl_restore_cube(
        model: *mut Image,
        psf: *mut Image,
        residual: *mut Image,
        restored: *mut Image,
    );

    // =========================================================================
    // FITS
    // =========================================================================

    pub fn export_image_to_fits_c(im: *mut Image, filename: *mut c_char) -> c_int;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::{align_of, offset_of, size_of};

    // Layout checks for an LP64 target, matching what the C compiler
    // produces for arlwrap.h.

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_arlvis_layout() {
        assert_eq!(size_of::<ARLVis>(), 32);
        assert_eq!(align_of::<ARLVis>(), 8);
        assert_eq!(offset_of!(ARLVis, nvis), 0);
        assert_eq!(offset_of!(ARLVis, npol), 8);
        assert_eq!(offset_of!(ARLVis, data), 16);
        assert_eq!(offset_of!(ARLVis, phasecentre), 24);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_advice_layout() {
        assert_eq!(size_of::<ARLadvice>(), 40);
        assert_eq!(offset_of!(ARLadvice, cellsize), 8);
        assert_eq!(offset_of!(ARLadvice, wprojection_planes), 32);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_image_layout() {
        assert_eq!(size_of::<Image>(), 48);
        assert_eq!(offset_of!(Image, data_shape), 8);
        assert_eq!(offset_of!(Image, data), 24);
        assert_eq!(offset_of!(Image, polarisation_frame), 40);
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn test_arlconf_layout() {
        assert_eq!(offset_of!(ARLConf, pc_ra), 8);
        assert_eq!(offset_of!(ARLConf, times), 24);
        assert_eq!(offset_of!(ARLConf, ntimes), 32);
        assert_eq!(offset_of!(ARLConf, freqs), 40);
        assert_eq!(offset_of!(ARLConf, channel_bandwidth), 56);
        assert_eq!(offset_of!(ARLConf, nchanwidth), 64);
        assert_eq!(offset_of!(ARLConf, rmax), 88);
        assert_eq!(offset_of!(ARLConf, polframe), 96);
        assert_eq!(size_of::<ARLConf>(), 104);
    }
}
