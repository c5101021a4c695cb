//! Image cube dimensions

use crate::error::{Error, Result};
use std::fmt;

/// Image cube shape as (channel, polarisation, y, x)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageShape([usize; 4]);

impl ImageShape {
    pub fn new(nchan: usize, npol: usize, ny: usize, nx: usize) -> Self {
        Self([nchan, npol, ny, nx])
    }

    /// Convert the `int[4]` shape written by the library's shape helpers.
    pub fn from_c(shape: [i32; 4]) -> Result<Self> {
        let mut dims = [0usize; 4];
        for (dim, &value) in dims.iter_mut().zip(shape.iter()) {
            *dim = usize::try_from(value).map_err(|_| Error::ShapeOutOfRange(shape))?;
        }
        Ok(Self(dims))
    }

    /// Shape as the library's `int[4]`
    pub fn to_c(self) -> Result<[i32; 4]> {
        let mut out = [0i32; 4];
        for (slot, &dim) in out.iter_mut().zip(self.0.iter()) {
            *slot = i32::try_from(dim)
                .map_err(|_| Error::InvalidArgument("image dimension exceeds i32"))?;
        }
        Ok(out)
    }

    pub fn dims(&self) -> [usize; 4] {
        self.0
    }

    pub fn nchan(&self) -> usize {
        self.0[0]
    }

    pub fn npol(&self) -> usize {
        self.0[1]
    }

    pub fn ny(&self) -> usize {
        self.0[2]
    }

    pub fn nx(&self) -> usize {
        self.0[3]
    }

    /// Number of pixels in the cube
    pub fn len(&self) -> usize {
        self.0.iter().product()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for ImageShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [c, p, y, x] = self.0;
        write!(f, "[ {}, {}, {}, {}]", c, p, y, x)
    }
}
