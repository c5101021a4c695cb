//! Visibility copy verification
//!
//! A deep copy of a visibility record must live in its own allocation, keep
//! the same shape and carry a byte-identical payload. [`verify_copy`] checks
//! those properties in a fixed order and reports the first one that fails.
//!
//! # Example
//!
//! ```
//! use arl::{verify_copy, payload_size, CopyCheck, RawVis};
//!
//! let source = vec![7u8; payload_size(2, 1).unwrap()];
//! let copy = source.clone();
//!
//! let original = RawVis::new(2, 1, &source);
//! let candidate = RawVis::new(2, 1, &copy);
//!
//! assert_eq!(verify_copy(&original, &candidate), CopyCheck::Equivalent);
//! assert_eq!(verify_copy(&original, &original), CopyCheck::IdentityAliasing);
//! ```

use crate::error::{Error, Result};
use std::fmt;

/// Fixed header at the start of every visibility payload, in bytes.
pub const PAYLOAD_HEADER_BYTES: usize = 80;

/// Bytes per (visibility, polarisation) element.
pub const PAYLOAD_ELEMENT_BYTES: usize = 32;

/// Payload length of a visibility record with `nvis` samples of `npol`
/// polarisation products, or `None` if it does not fit in `usize`.
pub fn payload_size(nvis: usize, npol: usize) -> Option<usize> {
    PAYLOAD_ELEMENT_BYTES
        .checked_mul(npol)?
        .checked_mul(nvis)?
        .checked_add(PAYLOAD_HEADER_BYTES)
}

/// Widen a C `int` count to `usize`.
///
/// Negative values sign-extend, so distinct raw counts stay distinct and a
/// corrupt (negative) count never yields a representable payload size.
#[cfg_attr(not(feature = "native"), allow(dead_code))]
pub(crate) fn count_from_c(value: i32) -> usize {
    value as isize as usize
}

/// Read-only view of a visibility record.
///
/// Implemented by the native [`Visibility`](crate::Visibility) handle and by
/// [`RawVis`] for payloads held in ordinary memory.
pub trait VisibilityView {
    /// Number of visibility samples
    fn visibility_count(&self) -> usize;

    /// Number of polarisation products per sample
    fn polarization_count(&self) -> usize;

    /// The payload bytes. Must cover at least
    /// `payload_size(visibility_count(), polarization_count())` bytes.
    fn payload_bytes(&self) -> &[u8];

    /// Address identifying the underlying record allocation.
    ///
    /// Defaults to the address of `self`; handles wrapping a foreign record
    /// return the record's address instead.
    fn identity(&self) -> *const () {
        (self as *const Self).cast()
    }
}

/// Outcome of [`verify_copy`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CopyCheck {
    /// Distinct allocations, same shape, identical payload
    Equivalent,
    /// Both handles refer to the same record
    IdentityAliasing,
    /// Visibility or polarisation counts differ
    ShapeMismatch,
    /// Distinct records share one payload buffer
    PayloadAliasing,
    /// At least one payload byte differs
    PayloadMismatch,
}

impl CopyCheck {
    /// Numeric code, 0 for [`CopyCheck::Equivalent`] and 1..=4 for the
    /// failures in check order.
    pub fn code(self) -> i32 {
        match self {
            CopyCheck::Equivalent => 0,
            CopyCheck::IdentityAliasing => 1,
            CopyCheck::ShapeMismatch => 2,
            CopyCheck::PayloadAliasing => 3,
            CopyCheck::PayloadMismatch => 4,
        }
    }

    pub fn is_equivalent(self) -> bool {
        self == CopyCheck::Equivalent
    }

    /// Convert a failed check into [`Error::CopyVerification`].
    pub fn into_result(self) -> Result<()> {
        if self.is_equivalent() {
            Ok(())
        } else {
            Err(Error::CopyVerification(self))
        }
    }

    fn description(self) -> &'static str {
        match self {
            CopyCheck::Equivalent => "copy is equivalent",
            CopyCheck::IdentityAliasing => "copy is the same record as its source",
            CopyCheck::ShapeMismatch => "visibility or polarisation count differs",
            CopyCheck::PayloadAliasing => "copy shares the payload buffer of its source",
            CopyCheck::PayloadMismatch => "payload bytes differ",
        }
    }
}

impl fmt::Display for CopyCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// Check that `candidate` is a deep copy of `original`.
///
/// Checks run in order and the first failure is returned: record identity,
/// shape, payload identity, payload bytes. The compared length is computed
/// from `original`'s counts; bytes past it are ignored. A payload shorter
/// than that length cannot match and is reported as
/// [`CopyCheck::PayloadMismatch`], as are counts whose payload size
/// overflows `usize`.
pub fn verify_copy<V>(original: &V, candidate: &V) -> CopyCheck
where
    V: VisibilityView + ?Sized,
{
    if std::ptr::eq(original.identity(), candidate.identity()) {
        return CopyCheck::IdentityAliasing;
    }

    if original.visibility_count() != candidate.visibility_count()
        || original.polarization_count() != candidate.polarization_count()
    {
        return CopyCheck::ShapeMismatch;
    }

    let original_payload = original.payload_bytes();
    let candidate_payload = candidate.payload_bytes();

    if std::ptr::eq(original_payload.as_ptr(), candidate_payload.as_ptr()) {
        return CopyCheck::PayloadAliasing;
    }

    let Some(size) = payload_size(original.visibility_count(), original.polarization_count())
    else {
        return CopyCheck::PayloadMismatch;
    };
    match (original_payload.get(..size), candidate_payload.get(..size)) {
        (Some(a), Some(b)) if a == b => CopyCheck::Equivalent,
        _ => CopyCheck::PayloadMismatch,
    }
}

/// Borrowed visibility view over plain memory.
#[derive(Debug, Clone, Copy)]
pub struct RawVis<'a> {
    nvis: usize,
    npol: usize,
    payload: &'a [u8],
}

impl<'a> RawVis<'a> {
    pub fn new(nvis: usize, npol: usize, payload: &'a [u8]) -> Self {
        Self {
            nvis,
            npol,
            payload,
        }
    }
}

impl VisibilityView for RawVis<'_> {
    fn visibility_count(&self) -> usize {
        self.nvis
    }

    fn polarization_count(&self) -> usize {
        self.npol
    }

    fn payload_bytes(&self) -> &[u8] {
        self.payload
    }
}
