//! Degrees-minutes-seconds angles.

/// Convert a degrees/minutes/seconds triple to decimal degrees.
///
/// No range checking is done: negative or out-of-range components are
/// carried through the arithmetic unchanged.
///
/// # Examples
///
/// ```
/// use gazetteer_server::gazetteer::to_decimal_degrees;
///
/// assert_eq!(to_decimal_degrees(36.0, 30.0, 0.0), 36.5);
/// ```
pub fn to_decimal_degrees(degrees: f64, minutes: f64, seconds: f64) -> f64 {
    // Reverse lookup compares these values for exact equality, so the
    // evaluation order must stay fixed.
    degrees + minutes / 60.0 + seconds / 3600.0
}

/// An angle stored as degrees, minutes and seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    pub degrees: f64,
    pub minutes: f64,
    pub seconds: f64,
}

impl Dms {
    /// Create a new DMS angle.
    pub fn new(degrees: f64, minutes: f64, seconds: f64) -> Self {
        Self {
            degrees,
            minutes,
            seconds,
        }
    }

    /// The angle in decimal degrees.
    pub fn to_decimal(&self) -> f64 {
        to_decimal_degrees(self.degrees, self.minutes, self.seconds)
    }
}
