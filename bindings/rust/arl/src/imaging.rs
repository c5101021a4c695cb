// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! 2D imaging and deconvolution entry points

use crate::error::Result;
use crate::image::Image;
use crate::session::Session;
use crate::vis::Visibility;

use log::trace;

impl Session {
    /// Predict visibilities for `model` on the sampling of `vis` into `out`.
    pub fn predict_2d(&self, vis: &Visibility, model: &Image, out: &mut Visibility) -> Result<()> {
        trace!("start predict_2d");
        unsafe { arl_sys::arl_predict_2d(vis.as_ptr(), model.as_ptr(), out.as_mut_ptr()) };
        trace!("end predict_2d");
        Ok(())
    }

    /// Fill `model` with an empty image matching `vis`.
    pub fn create_image_from_visibility(&self, vis: &Visibility, model: &mut Image) -> Result<()> {
        trace!("start create_image_from_visibility");
        unsafe { arl_sys::arl_create_image_from_visibility(vis.as_ptr(), model.as_mut_ptr()) };
        trace!("end create_image_from_visibility");
        Ok(())
    }

    /// Make the dirty image (or the PSF when `dopsf` is set) into `out`.
    ///
    /// Returns the sum of weights.
    pub fn invert_2d(
        &self,
        vis: &Visibility,
        model: &Image,
        dopsf: bool,
        out: &mut Image,
    ) -> Result<f64> {
        let mut sumwt = 0.0f64;
        trace!("start invert_2d (dopsf={})", dopsf);
        unsafe {
            arl_sys::arl_invert_2d(vis.as_ptr(), model.as_ptr(), dopsf, out.as_mut_ptr(), &mut sumwt)
        };
        trace!("end invert_2d");
        Ok(sumwt)
    }

    /// Deconvolve `psf` from `dirty`, writing clean components and the residual.
    pub fn deconvolve_cube(
        &self,
        dirty: &mut Image,
        psf: &mut Image,
        components: &mut Image,
        residual: &mut Image,
    ) -> Result<()> {
        trace!("start deconvolve_cube");
        unsafe {
            arl_sys::arl_deconvolve_cube(
                dirty.as_mut_ptr(),
                psf.as_mut_ptr(),
                components.as_mut_ptr(),
                residual.as_mut_ptr(),
            )
        };
        trace!("end deconvolve_cube");
        Ok(())
    }

    /// Restore clean components with the fitted beam and add the residual.
    pub fn restore_cube(
        &self,
        components: &mut Image,
        psf: &mut Image,
        residual: &mut Image,
        restored: &mut Image,
    ) -> Result<()> {
        trace!("start restore_cube");
        unsafe {
            arl_sys::arl_restore_cube(
                components.as_mut_ptr(),
                psf.as_mut_ptr(),
                residual.as_mut_ptr(),
                restored.as_mut_ptr(),
            )
        };
        trace!("end restore_cube");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Drives the native library and needs libarlffi at link time.
    #[test]
    fn test_clean_cycle_keeps_shape() {
        let session = Session::initialize();
        let config = session
            .default_config("LOWBD2-CORE")
            .and_then(|c| c.rmax(100.0).frequencies(1.0e8, 1.1e8, 2))
            .and_then(|c| c.times(-0.1, 0.1, 3))
            .unwrap();
        let shape = session.image_shape(&config, 0.0005).unwrap();
        let mut images: Vec<Image> = (0..6)
            .map(|_| session.allocate_image(shape).unwrap())
            .collect();
        let [model, dirty, psf, comp, residual, restored] = &mut images[..] else {
            unreachable!()
        };

        let mut vis = session.allocate_vis(config.npol(), config.nvis()).unwrap();
        session.create_visibility(&config, &mut vis).unwrap();
        session.create_image_from_visibility(&vis, model).unwrap();

        let sumwt = session.invert_2d(&vis, model, false, dirty).unwrap();
        assert!(sumwt > 0.0);
        session.invert_2d(&vis, model, true, psf).unwrap();
        session.deconvolve_cube(dirty, psf, comp, residual).unwrap();
        session.restore_cube(comp, psf, residual, restored).unwrap();

        assert_eq!(restored.shape().unwrap(), shape);
    }
}
