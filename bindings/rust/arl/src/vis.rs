// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 ARL Rust Bindings Contributors


//! Visibility handle

use crate::verify::{count_from_c, payload_size, VisibilityView};

use std::fmt;
use std::ptr::NonNull;

/// RAII handle to a library-allocated visibility record
///
/// Created by [`Session::allocate_vis`](crate::Session::allocate_vis) or
/// [`Session::allocate_blockvis`](crate::Session::allocate_blockvis) and
/// returned to the library when dropped.
pub struct Visibility {
    handle: NonNull<arl_sys::ARLVis>,
}

// Safety: the record is exclusively owned by this handle and the library
// keeps no thread-affine state in it.
unsafe impl Send for Visibility {}

impl Visibility {
    /// Take ownership of a record returned by an allocation routine.
    ///
    /// Returns `None` for a null pointer.
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate_vis_data` or `allocate_blockvis_data`
    /// and must not be owned by any other handle.
    pub unsafe fn from_raw(ptr: *mut arl_sys::ARLVis) -> Option<Self> {
        NonNull::new(ptr).map(|handle| Self { handle })
    }

    fn raw(&self) -> &arl_sys::ARLVis {
        unsafe { self.handle.as_ref() }
    }

    /// Number of visibility samples
    pub fn nvis(&self) -> usize {
        self.raw().nvis
    }

    /// Number of polarisation products, as recorded (negative if corrupt)
    pub fn npol(&self) -> i32 {
        self.raw().npol
    }

    /// Payload size in bytes; `None` for a corrupt count or one that
    /// overflows `usize`
    pub fn payload_len(&self) -> Option<usize> {
        payload_size(self.nvis(), count_from_c(self.npol()))
    }

    /// The payload as bytes; empty when the record has no data buffer or
    /// its counts do not describe a valid length
    pub fn payload_bytes(&self) -> &[u8] {
        let data = self.raw().data as *const u8;
        match self.payload_len() {
            Some(len) if !data.is_null() && len <= isize::MAX as usize => unsafe {
                std::slice::from_raw_parts(data, len)
            },
            _ => &[],
        }
    }

    /// Opaque phase-centre blob consumed by the test-image routines
    pub(crate) fn phasecentre(&self) -> *mut std::os::raw::c_char {
        self.raw().phasecentre
    }

    /// Get the raw record pointer (for advanced use)
    pub fn as_ptr(&self) -> *const arl_sys::ARLVis {
        self.handle.as_ptr()
    }

    /// Get the raw mutable record pointer (for advanced use)
    pub fn as_mut_ptr(&mut self) -> *mut arl_sys::ARLVis {
        self.handle.as_ptr()
    }
}

impl Drop for Visibility {
    fn drop(&mut self) {
        unsafe { arl_sys::destroy_vis(self.handle.as_ptr()) };
    }
}

impl VisibilityView for Visibility {
    fn visibility_count(&self) -> usize {
        self.nvis()
    }

    fn polarization_count(&self) -> usize {
        count_from_c(self.npol())
    }

    fn payload_bytes(&self) -> &[u8] {
        Visibility::payload_bytes(self)
    }

    fn identity(&self) -> *const () {
        self.handle.as_ptr() as *const ()
    }
}

impl fmt::Debug for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Visibility")
            .field("nvis", &self.nvis())
            .field("npol", &self.npol())
            .finish_non_exhaustive()
    }
}
