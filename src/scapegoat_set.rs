use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;

use alloc::vec::Vec;

use crate::error::Result;
use crate::raw::{InOrder, RawScapegoatTree};
use crate::Alpha;

/// An ordered set based on a scapegoat tree.
///
/// Keys are kept in a plain binary search tree whose nodes only record the size
/// of their subtree. After every insertion or removal, the sizes along the
/// mutated path are refreshed; if some node on that path has a child holding
/// more than [`Alpha`] times its own keys, the highest such node (the
/// *scapegoat*) is rebuilt into a perfectly balanced subtree. Search, insertion
/// and removal are amortized O(log n).
///
/// It is a logic error for an item to be modified in such a way that the item's ordering relative
/// to any other item, as determined by the [`Ord`] trait, changes while it is in the set.
///
/// # Examples
///
/// ```
/// use scapegoat_tree::ScapegoatSet;
///
/// let mut set = ScapegoatSet::new();
/// for key in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
///     set.insert(key);
/// }
///
/// assert!(set.contains(&4));
/// assert!(set.remove(&4));
/// assert!(!set.remove(&4));
/// assert_eq!(set.values(), [1, 2, 3, 5, 6, 7, 8, 9]);
/// ```
///
/// A stricter balance factor can be chosen up front:
///
/// ```
/// use scapegoat_tree::{Error, ScapegoatSet};
///
/// let set: ScapegoatSet<i64> = ScapegoatSet::with_alpha(0.6)?;
/// assert_eq!(set.alpha().get(), 0.6);
///
/// assert!(matches!(ScapegoatSet::<i64>::with_alpha(0.3), Err(Error::InvalidArgument { .. })));
/// # Ok::<(), Error>(())
/// ```
pub struct ScapegoatSet<T> {
    tree: RawScapegoatTree<T>,
}

/// An iterator over the items of a `ScapegoatSet`, in ascending order.
///
/// This `struct` is created by the [`iter`] method on [`ScapegoatSet`].
///
/// [`iter`]: ScapegoatSet::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, T: 'a> {
    inner: InOrder<'a, T>,
}

impl<T> ScapegoatSet<T> {
    /// Makes a new, empty set with the default balance factor (0.8).
    ///
    /// # Examples
    ///
    /// ```
    /// use scapegoat_tree::ScapegoatSet;
    ///
    /// let set: ScapegoatSet<i32> = ScapegoatSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        Self::with_config(Alpha::DEFAULT)
    }

    /// Makes a new, empty set that rebuilds once a child outweighs `alpha`
    /// times its parent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`](crate::Error::InvalidArgument) if
    /// `alpha` is outside `[0.5, 1.0]`. No set is created in that case.
    pub fn with_alpha(alpha: f64) -> Result<Self> {
        Alpha::new(alpha).map(Self::with_config)
    }

    /// Makes a new, empty set with an already validated balance factor.
    #[must_use]
    pub const fn with_config(alpha: Alpha) -> Self {
        Self {
            tree: RawScapegoatTree::new(alpha),
        }
    }

    /// Makes a new, empty set with room for at least `capacity` items.
    ///
    /// # Examples
    ///
    /// ```
    /// use scapegoat_tree::ScapegoatSet;
    ///
    /// let set: ScapegoatSet<i32> = ScapegoatSet::with_capacity(16);
    /// assert!(set.capacity() >= 16);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            tree: RawScapegoatTree::with_capacity(Alpha::DEFAULT, capacity),
        }
    }

    /// Returns the balance factor the set was built with.
    #[must_use]
    pub const fn alpha(&self) -> Alpha {
        self.tree.alpha()
    }

    /// Returns the number of items the set can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.tree.capacity()
    }

    /// Returns the number of elements in the set.
    ///
    /// # Examples
    ///
    /// ```
    /// use scapegoat_tree::ScapegoatSet;
    ///
    /// let mut v = ScapegoatSet::new();
    /// assert_eq!(v.len(), 0);
    /// v.insert(1);
    /// assert_eq!(v.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    /// Returns `true` if the set contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Clears the set, removing all elements.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Returns `true` if the set contains an element equal to the value.
    ///
    /// # Complexity
    ///
    /// Amortized O(log n)
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.contains(value)
    }

    /// Returns a reference to the element in the set, if any, that is equal to the value.
    pub fn get<Q>(&self, value: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.get(value)
    }

    /// Returns a reference to the first (smallest) element in the set, if any.
    ///
    /// # Examples
    ///
    /// ```
    /// use scapegoat_tree::ScapegoatSet;
    ///
    /// let set = ScapegoatSet::from([2, 1, 3]);
    /// assert_eq!(set.first(), Some(&1));
    /// assert_eq!(set.last(), Some(&3));
    /// ```
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.tree.first()
    }

    /// Returns a reference to the last (largest) element in the set, if any.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tree.last()
    }

    /// Adds a value to the set.
    ///
    /// Returns whether the value was newly inserted. If the set already
    /// contained an equal value, `false` is returned and the set is left
    /// untouched.
    ///
    /// # Examples
    ///
    /// ```
    /// use scapegoat_tree::ScapegoatSet;
    ///
    /// let mut set = ScapegoatSet::new();
    ///
    /// assert_eq!(set.insert(2), true);
    /// assert_eq!(set.insert(2), false);
    /// assert_eq!(set.len(), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// Amortized O(log n)
    pub fn insert(&mut self, value: T) -> bool
    where
        T: Ord,
    {
        self.tree.insert(value)
    }

    /// Removes a value from the set. Returns whether the value was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use scapegoat_tree::ScapegoatSet;
    ///
    /// let mut set = ScapegoatSet::from([10, 5, 15, 3, 7, 12, 18]);
    ///
    /// assert_eq!(set.remove(&10), true);
    /// assert_eq!(set.remove(&10), false);
    /// assert_eq!(set.values(), [3, 5, 7, 12, 15, 18]);
    /// ```
    ///
    /// # Complexity
    ///
    /// Amortized O(log n)
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.tree.remove(value)
    }

    /// Returns the elements in ascending order.
    ///
    /// # Complexity
    ///
    /// O(n)
    #[must_use]
    pub fn values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.tree.values()
    }

    /// Gets an iterator that visits the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use scapegoat_tree::ScapegoatSet;
    ///
    /// let set = ScapegoatSet::from([3, 1, 2]);
    /// let mut iter = set.iter();
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), Some(&3));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, T> {
        Iter { inner: self.tree.iter() }
    }
}

impl<T: Clone> Clone for ScapegoatSet<T> {
    fn clone(&self) -> Self {
        Self { tree: self.tree.clone() }
    }
}

impl<T: PartialEq> PartialEq for ScapegoatSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for ScapegoatSet<T> {}

impl<T: fmt::Debug> fmt::Debug for ScapegoatSet<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T> Default for ScapegoatSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for ScapegoatSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T: Ord> Extend<T> for ScapegoatSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl<'a, T: 'a + Ord + Copy> Extend<&'a T> for ScapegoatSet<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Ord, const N: usize> From<[T; N]> for ScapegoatSet<T> {
    fn from(arr: [T; N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, T> IntoIterator for &'a ScapegoatSet<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter {
            inner: self.inner.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
