//! Telescope and observation configuration
//!
//! [`LowConfig`] is an owned value describing the array, the phase centre
//! and the frequency/time axes. It is handed to every library call that
//! needs a configuration and marshalled into a fresh `ARLConf` each time.

use crate::error::{Error, Result};

/// Telescope configuration and observation axes
///
/// Use the builder methods to customise a configuration:
///
/// ```
/// use arl::LowConfig;
///
/// let config = LowConfig::new("LOWBD2-CORE")
///     .rmax(300.0)
///     .phase_centre(30.0, -60.0)
///     .frequencies(0.8e8, 1.2e8, 5)
///     .unwrap()
///     .times(-1.0, 1.0, 11)
///     .unwrap();
///
/// assert_eq!(config.nfreqs(), 5);
/// assert_eq!(config.channel_bandwidth()[0], 1.0e7);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LowConfig {
    name: String,
    pc_ra: f64,
    pc_dec: f64,
    rmax: f64,
    freqs: Vec<f64>,
    channel_bandwidth: Vec<f64>,
    times: Vec<f64>,
    nbases: usize,
    nant: usize,
    npol: usize,
    nrec: usize,
    polframe: String,
}

impl LowConfig {
    /// Create a configuration for the named array with an empty observation.
    ///
    /// Antenna and baseline counts default to zero; use
    /// [`Session::default_config`](crate::Session::default_config) to load
    /// the library's values for a named configuration.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pc_ra: 0.0,
            pc_dec: 0.0,
            rmax: 0.0,
            freqs: Vec::new(),
            channel_bandwidth: Vec::new(),
            times: Vec::new(),
            nbases: 0,
            nant: 0,
            npol: 1,
            nrec: 1,
            polframe: String::from("stokesI"),
        }
    }

    /// Set the maximum distance of included stations from the array centre, in metres
    pub fn rmax(mut self, rmax: f64) -> Self {
        self.rmax = rmax;
        self
    }

    /// Set the phase centre (RA, Dec) in degrees
    pub fn phase_centre(mut self, ra: f64, dec: f64) -> Self {
        self.pc_ra = ra;
        self.pc_dec = dec;
        self
    }

    /// Set `count` linearly spaced frequencies from `start` to `end` (Hz).
    ///
    /// Each channel's bandwidth is the frequency step.
    pub fn frequencies(mut self, start: f64, end: f64, count: usize) -> Result<Self> {
        let (freqs, step) = linear_axis(start, end, count)?;
        self.channel_bandwidth = vec![step; freqs.len()];
        self.freqs = freqs;
        Ok(self)
    }

    /// Set explicit frequencies and channel bandwidths (Hz)
    pub fn with_frequency_list(mut self, freqs: Vec<f64>, bandwidths: Vec<f64>) -> Result<Self> {
        if freqs.len() != bandwidths.len() {
            return Err(Error::InvalidArgument(
                "frequency and bandwidth lists differ in length",
            ));
        }
        self.freqs = freqs;
        self.channel_bandwidth = bandwidths;
        Ok(self)
    }

    /// Set `count` linearly spaced hour angles from `start` to `end` (radians)
    pub fn times(mut self, start: f64, end: f64, count: usize) -> Result<Self> {
        self.times = linear_axis(start, end, count)?.0;
        Ok(self)
    }

    /// Set the array dimensions
    pub fn array(mut self, nant: usize, nbases: usize, npol: usize, nrec: usize) -> Self {
        self.nant = nant;
        self.nbases = nbases;
        self.npol = npol;
        self.nrec = nrec;
        self
    }

    /// Set the polarisation frame name
    pub fn polarisation_frame(mut self, frame: impl Into<String>) -> Self {
        self.polframe = frame.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Phase centre (RA, Dec) in degrees
    pub fn phase_centre_deg(&self) -> (f64, f64) {
        (self.pc_ra, self.pc_dec)
    }

    pub fn max_radius(&self) -> f64 {
        self.rmax
    }

    pub fn freqs(&self) -> &[f64] {
        &self.freqs
    }

    pub fn channel_bandwidth(&self) -> &[f64] {
        &self.channel_bandwidth
    }

    pub fn time_list(&self) -> &[f64] {
        &self.times
    }

    pub fn nfreqs(&self) -> usize {
        self.freqs.len()
    }

    pub fn ntimes(&self) -> usize {
        self.times.len()
    }

    pub fn nbases(&self) -> usize {
        self.nbases
    }

    pub fn nant(&self) -> usize {
        self.nant
    }

    pub fn npol(&self) -> usize {
        self.npol
    }

    pub fn nrec(&self) -> usize {
        self.nrec
    }

    pub fn polframe(&self) -> &str {
        &self.polframe
    }

    /// Number of visibilities in the observation (baselines x channels x times)
    pub fn nvis(&self) -> usize {
        self.nbases * self.nfreqs() * self.ntimes()
    }

    /// Check that the configuration can be handed to the library.
    pub fn validate(&self) -> Result<()> {
        if self.freqs.is_empty() {
            return Err(Error::InvalidArgument("frequency list is empty"));
        }
        if self.freqs.len() != self.channel_bandwidth.len() {
            return Err(Error::InvalidArgument(
                "frequency and bandwidth lists differ in length",
            ));
        }
        if self.times.is_empty() {
            return Err(Error::InvalidArgument("time list is empty"));
        }
        if self.npol == 0 {
            return Err(Error::InvalidArgument("npol must be positive"));
        }
        if self.rmax.is_nan() || self.rmax < 0.0 {
            return Err(Error::InvalidArgument("rmax must be non-negative"));
        }
        Ok(())
    }
}

/// `count` evenly spaced samples from `start` to `end` inclusive, plus the step.
///
/// A single sample sits at `start` and its step spans the whole range.
fn linear_axis(start: f64, end: f64, count: usize) -> Result<(Vec<f64>, f64)> {
    match count {
        0 => Err(Error::InvalidArgument("axis must have at least one sample")),
        1 => Ok((vec![start], end - start)),
        n => {
            let step = (end - start) / (n - 1) as f64;
            let samples = (0..n).map(|i| start + i as f64 * step).collect();
            Ok((samples, step))
        }
    }
}

#[cfg(feature = "native")]
pub(crate) use raw::{take_library_config, RawConf};

#[cfg(feature = "native")]
mod raw {
    use super::LowConfig;
    use crate::error::{Error, Result};
    use std::ffi::{CStr, CString};
    use std::os::raw::c_int;

    /// `ARLConf` view of a [`LowConfig`], owning the strings and arrays it
    /// points into. Lives for the duration of one library call.
    pub(crate) struct RawConf {
        inner: arl_sys::ARLConf,
        _name: CString,
        _polframe: CString,
        _freqs: Vec<f64>,
        _bandwidth: Vec<f64>,
        _times: Vec<f64>,
    }

    fn to_c_int(value: usize, what: &'static str) -> Result<c_int> {
        c_int::try_from(value).map_err(|_| Error::InvalidArgument(what))
    }

    impl RawConf {
        pub(crate) fn new(config: &LowConfig) -> Result<Self> {
            config.validate()?;

            let name = CString::new(config.name.as_str())?;
            let polframe = CString::new(config.polframe.as_str())?;
            let mut freqs = config.freqs.clone();
            let mut bandwidth = config.channel_bandwidth.clone();
            let mut times = config.times.clone();

            let inner = arl_sys::ARLConf {
                confname: name.as_ptr() as *mut _,
                pc_ra: config.pc_ra,
                pc_dec: config.pc_dec,
                times: times.as_mut_ptr(),
                ntimes: to_c_int(times.len(), "too many times")?,
                freqs: freqs.as_mut_ptr(),
                nfreqs: to_c_int(freqs.len(), "too many frequencies")?,
                channel_bandwidth: bandwidth.as_mut_ptr(),
                nchanwidth: to_c_int(bandwidth.len(), "too many channels")?,
                nbases: to_c_int(config.nbases, "nbases out of range")?,
                nant: to_c_int(config.nant, "nant out of range")?,
                npol: to_c_int(config.npol, "npol out of range")?,
                nrec: to_c_int(config.nrec, "nrec out of range")?,
                rmax: config.rmax,
                polframe: polframe.as_ptr() as *mut _,
            };

            Ok(Self {
                inner,
                _name: name,
                _polframe: polframe,
                _freqs: freqs,
                _bandwidth: bandwidth,
                _times: times,
            })
        }

        pub(crate) fn as_mut_ptr(&mut self) -> *mut arl_sys::ARLConf {
            &mut self.inner
        }

        /// First frequency, for helpers that take a frequency array.
        pub(crate) fn freqs_ptr(&self) -> *const f64 {
            self.inner.freqs
        }
    }

    /// Copy a library-allocated `ARLConf` into a [`LowConfig`] and release
    /// the record and its arrays.
    ///
    /// # Safety
    ///
    /// `raw` must be a non-null record returned by `allocate_arlconf_default`
    /// whose arrays were allocated with `malloc`. It is freed on return.
    /// `fallback_name` is used when the record carries no name.
    pub(crate) unsafe fn take_library_config(
        raw: *mut arl_sys::ARLConf,
        fallback_name: &str,
    ) -> LowConfig {
        let conf = unsafe { *raw };

        let copy_list = |ptr: *mut f64, len: c_int| -> Vec<f64> {
            if ptr.is_null() || len <= 0 {
                Vec::new()
            } else {
                unsafe { std::slice::from_raw_parts(ptr, len as usize) }.to_vec()
            }
        };
        let copy_str = |ptr: *mut std::os::raw::c_char| -> Option<String> {
            if ptr.is_null() {
                None
            } else {
                Some(unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned())
            }
        };

        let name = copy_str(conf.confname)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback_name.to_string());
        let mut config = LowConfig::new(name);
        config.pc_ra = conf.pc_ra;
        config.pc_dec = conf.pc_dec;
        config.rmax = conf.rmax;
        config.freqs = copy_list(conf.freqs, conf.nfreqs);
        config.channel_bandwidth = copy_list(conf.channel_bandwidth, conf.nchanwidth);
        config.times = copy_list(conf.times, conf.ntimes);
        config.nbases = conf.nbases.max(0) as usize;
        config.nant = conf.nant.max(0) as usize;
        config.npol = conf.npol.max(0) as usize;
        config.nrec = conf.nrec.max(0) as usize;
        if let Some(frame) = copy_str(conf.polframe) {
            config.polframe = frame;
        }

        // confname and polframe stay with the library
        unsafe {
            libc::free(conf.freqs as *mut libc::c_void);
            libc::free(conf.channel_bandwidth as *mut libc::c_void);
            libc::free(conf.times as *mut libc::c_void);
            libc::free(raw as *mut libc::c_void);
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f64, b: f64) {
        assert!((a - b).abs() <= 1e-9 * b.abs().max(1.0), "{} != {}", a, b);
    }

    #[test]
    fn test_frequency_axis() {
        let config = LowConfig::new("LOWBD2-CORE")
            .frequencies(0.8e8, 1.2e8, 5)
            .unwrap();

        let expected = [0.8e8, 0.9e8, 1.0e8, 1.1e8, 1.2e8];
        assert_eq!(config.nfreqs(), 5);
        for (f, e) in config.freqs().iter().zip(expected) {
            assert_close(*f, e);
        }
        assert!(config.channel_bandwidth().iter().all(|&bw| bw == 1.0e7));
    }

    #[test]
    fn test_time_axis() {
        let third = std::f64::consts::PI / 3.0;
        let config = LowConfig::new("LOWBD2-CORE")
            .times(-third, third, 11)
            .unwrap();

        let times = config.time_list();
        assert_eq!(times.len(), 11);
        assert_close(times[0], -third);
        assert_close(times[10], third);
        assert!(times[5].abs() < 1e-12);
    }

    #[test]
    fn test_single_sample_axis() {
        let config = LowConfig::new("x").frequencies(1.0e8, 1.5e8, 1).unwrap();
        assert_eq!(config.freqs(), &[1.0e8]);
        assert_eq!(config.channel_bandwidth(), &[0.5e8]);
    }

    #[test]
    fn test_empty_axis_rejected() {
        assert!(matches!(
            LowConfig::new("x").times(0.0, 1.0, 0),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_nvis() {
        let config = LowConfig::new("LOWBD2-CORE")
            .array(166, 13695, 1, 1)
            .frequencies(0.8e8, 1.2e8, 5)
            .unwrap()
            .times(-1.0, 1.0, 11)
            .unwrap();
        assert_eq!(config.nvis(), 13695 * 5 * 11);
    }

    #[test]
    fn test_validate() {
        let base = LowConfig::new("x")
            .rmax(300.0)
            .frequencies(1.0e8, 1.2e8, 3)
            .unwrap();
        assert!(base.validate().is_err(), "no times yet");

        let ok = base.clone().times(0.0, 1.0, 2).unwrap();
        assert!(ok.validate().is_ok());

        let negative = ok.clone().rmax(-1.0);
        assert!(negative.validate().is_err());

        let no_pol = ok.clone().array(4, 6, 0, 1);
        assert!(no_pol.validate().is_err());
    }

    #[test]
    fn test_frequency_list_lengths() {
        let err = LowConfig::new("x").with_frequency_list(vec![1.0e8, 1.1e8], vec![1.0e6]);
        assert!(err.is_err());

        let config = LowConfig::new("x")
            .with_frequency_list(vec![1.0e8, 1.1e8], vec![1.0e6, 1.0e6])
            .unwrap();
        assert_eq!(config.nfreqs(), 2);
    }

    #[test]
    fn test_builder_fields() {
        let config = LowConfig::new("LOWBD2-CORE")
            .phase_centre(30.0, -60.0)
            .polarisation_frame("linear");
        assert_eq!(config.name(), "LOWBD2-CORE");
        assert_eq!(config.phase_centre_deg(), (30.0, -60.0));
        assert_eq!(config.polframe(), "linear");
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_raw_conf_marshalling() {
        let config = LowConfig::new("LOWBD2-CORE")
            .array(10, 45, 1, 1)
            .rmax(300.0)
            .phase_centre(30.0, -60.0)
            .frequencies(0.8e8, 1.2e8, 5)
            .unwrap()
            .times(-1.0, 1.0, 3)
            .unwrap();

        let mut raw = RawConf::new(&config).unwrap();
        let conf = unsafe { *raw.as_mut_ptr() };
        assert_eq!(conf.nfreqs, 5);
        assert_eq!(conf.nchanwidth, 5);
        assert_eq!(conf.ntimes, 3);
        assert_eq!(conf.nbases, 45);
        assert_eq!(conf.pc_dec, -60.0);
        let freqs = unsafe { std::slice::from_raw_parts(conf.freqs, 5) };
        assert_eq!(freqs, config.freqs());
    }
}
