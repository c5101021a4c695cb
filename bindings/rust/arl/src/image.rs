// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! Image handle and FITS export

use crate::error::{Error, Result};
use crate::shape::ImageShape;

use std::ffi::CString;
use std::fmt;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;
use std::ptr::NonNull;

/// Path bytes as a C string, unchanged (non-UTF-8 names included).
fn path_to_cstring(path: &Path) -> Result<CString> {
    Ok(CString::new(path.as_os_str().as_bytes())?)
}

/// RAII handle to a library-allocated image cube
///
/// Created by [`Session::allocate_image`](crate::Session::allocate_image)
/// and returned to the library when dropped.
pub struct Image {
    handle: NonNull<arl_sys::Image>,
}

// Safety: the record is exclusively owned by this handle.
unsafe impl Send for Image {}

impl Image {
    /// Take ownership of a record returned by `allocate_image`.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate_image` and must not be owned by any
    /// other handle.
    pub unsafe fn from_raw(ptr: *mut arl_sys::Image) -> Option<Self> {
        NonNull::new(ptr).map(|handle| Self { handle })
    }

    /// Shape recorded in the image header
    pub fn shape(&self) -> Result<ImageShape> {
        let raw = unsafe { self.handle.as_ref() };
        ImageShape::from_c(raw.data_shape)
    }

    /// Write the image to a FITS file, creating the parent directory if needed.
    pub fn export_fits(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }

        let c_path = path_to_cstring(path)?;
        log::debug!("exporting image to {}", path.display());
        let status =
            unsafe { arl_sys::export_image_to_fits_c(self.as_mut_ptr(), c_path.as_ptr() as *mut _) };

        if status == 0 {
            Ok(())
        } else {
            Err(Error::Fits {
                path: path.to_path_buf(),
                status,
            })
        }
    }

    /// Get the raw record pointer (for advanced use)
    pub fn as_ptr(&self) -> *const arl_sys::Image {
        self.handle.as_ptr()
    }

    /// Get the raw mutable record pointer (for advanced use)
    pub fn as_mut_ptr(&mut self) -> *mut arl_sys::Image {
        self.handle.as_ptr()
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        unsafe { arl_sys::destroy_image(self.handle.as_ptr()) };
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let raw = unsafe { self.handle.as_ref() };
        f.debug_struct("Image")
            .field("shape", &raw.data_shape)
            .finish_non_exhaustive()
    }
}
