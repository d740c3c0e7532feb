use crate::error::{Error, Result};

/// The weight-balance factor of a scapegoat tree.
///
/// After every insertion or removal, no node on the mutated path may have a
/// child whose subtree holds more than `α` times the node's own subtree. The
/// highest node breaking that rule (the scapegoat) is rebuilt into a perfectly
/// balanced subtree.
///
/// Values close to `0.5` keep the tree nearly perfectly balanced at the cost of
/// frequent rebuilds; `1.0` disables rebuilding altogether.
///
/// # Examples
///
/// ```
/// use scapegoat_tree::{Alpha, Error};
///
/// assert_eq!(Alpha::default().get(), 0.8);
/// assert_eq!(Alpha::new(0.6).map(Alpha::get), Ok(0.6));
/// assert_eq!(Alpha::new(1.5), Err(Error::InvalidArgument { alpha: 1.5 }));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct Alpha(f64);

impl Alpha {
    /// Smallest accepted factor.
    pub const MIN: f64 = 0.5;
    /// Largest accepted factor.
    pub const MAX: f64 = 1.0;
    /// Works well for typical workloads.
    pub const DEFAULT: Self = Self(0.8);

    /// Validates `alpha`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `alpha` is outside `[0.5, 1.0]` or NaN.
    pub fn new(alpha: f64) -> Result<Self> {
        if (Self::MIN..=Self::MAX).contains(&alpha) {
            Ok(Self(alpha))
        } else {
            Err(Error::InvalidArgument { alpha })
        }
    }

    /// Returns the factor as a float.
    #[must_use]
    pub const fn get(self) -> f64 {
        self.0
    }

    /// Returns true if a child subtree of `child_size` keys is too heavy for a
    /// parent subtree of `parent_size` keys.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn is_violated_by(self, child_size: usize, parent_size: usize) -> bool {
        child_size as f64 > self.0 * parent_size as f64
    }
}

impl Default for Alpha {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Alpha {
    type Error = Error;

    fn try_from(alpha: f64) -> Result<Self> {
        Self::new(alpha)
    }
}
