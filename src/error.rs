use core::fmt;

/// Errors returned when configuring a [`ScapegoatSet`](crate::ScapegoatSet).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Error {
    /// The weight factor α lies outside `[0.5, 1.0]` (or is NaN).
    InvalidArgument {
        /// The rejected value.
        alpha: f64,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument { alpha } => {
                write!(f, "invalid alpha: {alpha} (expected a value in [0.5, 1.0])")
            }
        }
    }
}

impl core::error::Error for Error {}

/// Result type for fallible set construction.
pub type Result<T> = core::result::Result<T, Error>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_names_value_and_range() {
        let error = Error::InvalidArgument { alpha: 0.3 };
        assert_eq!(error.to_string(), "invalid alpha: 0.3 (expected a value in [0.5, 1.0])");
    }
}
