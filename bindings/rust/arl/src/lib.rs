// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! Safe Rust bindings for the ARL C wrapper
//!
//! The Algorithm Reference Library simulates and images radio-interferometer
//! data. Its C wrapper (`libarlffi`) exposes configuration, visibility and
//! image records plus the processing entry points; this crate wraps them in
//! owned handles and an explicit configuration value.
//!
//! # Quick Start
//!
//! Requires the `native` feature.
//!
//! ```ignore
//! use arl::{verify_copy, IcalParams, Session};
//!
//! fn main() -> arl::Result<()> {
//!     let params = IcalParams::default();
//!     let session = Session::initialize();
//!     let config = params.apply(session.default_config(&params.config_name)?)?;
//!
//!     let mut vis = session.allocate_blockvis(&config)?;
//!     let mut other = session.allocate_blockvis(&config)?;
//!     session.create_blockvisibility(&config, &mut vis)?;
//!     session.create_blockvisibility(&config, &mut other)?;
//!     verify_copy(&vis, &other).into_result()?;
//!
//!     let advice = session.advise_wide_field(&config, &mut vis, params.advice)?;
//!     let shape = session.image_shape_multifreq(&config, advice.cellsize, advice.npixel)?;
//!     let mut model = session.allocate_image(shape)?;
//!     session.create_low_test_image_from_gleam(
//!         &config,
//!         advice.cellsize,
//!         advice.npixel,
//!         &vis,
//!         &mut model,
//!     )?;
//!     model.export_fits(params.output_dir.join("gleam_model.fits"))?;
//!     Ok(())
//! }
//! ```
//!
//! # API Overview
//!
//! Always available:
//!
//! - [`verify_copy`] - Check that a visibility copy is a distinct, identical record
//! - [`VisibilityView`] - Read-only accessors the check works against
//! - [`LowConfig`] - Telescope configuration and observation axes
//! - [`IcalParams`] - Run parameters loaded from TOML
//! - [`ImageShape`] - Image cube dimensions
//!
//! With the `native` feature (links `libarlffi`):
//!
//! - `Session` - Library initialisation and all processing entry points
//! - `Visibility` - RAII visibility record
//! - `Image` - RAII image record with FITS export
//!
//! # Soundness Limitations
//!
//! The library runs on an embedded Python interpreter and keeps its own
//! references to records passed in. Handles are `Send` but not `Sync`: drive
//! the library from one thread at a time.

mod config;
mod error;
mod params;
mod shape;
mod verify;

#[cfg(feature = "native")]
mod image;
#[cfg(feature = "native")]
mod imaging;
#[cfg(feature = "native")]
mod session;
#[cfg(feature = "native")]
mod vis;

pub use config::LowConfig;
pub use error::{Error, Result};
pub use params::{AdviceRequest, IcalParams};
pub use shape::ImageShape;
pub use verify::{
    payload_size, verify_copy, CopyCheck, RawVis, VisibilityView, PAYLOAD_ELEMENT_BYTES,
    PAYLOAD_HEADER_BYTES,
};

#[cfg(feature = "native")]
pub use image::Image;
#[cfg(feature = "native")]
pub use session::{Advice, Session};
#[cfg(feature = "native")]
pub use vis::Visibility;
