//! Element policies.
//!
//! An [`ElementPolicy`] decides which elements a [`TypedContainer`] accepts
//! when it is constructed, and may rewrite the accepted elements before they
//! are stored. Policies are consulted at construction time only; elements
//! added later through [`TypedContainer::add`] and friends are stored as-is.
//!
//! [`TypedContainer`]: crate::TypedContainer
//! [`TypedContainer::add`]: crate::TypedContainer::add

use std::fmt;

use crate::key::Key;

/// Membership rules for a typed container.
///
/// # Example
///
/// ```
/// use toolbelt_collection::{ElementPolicy, Key, TypedContainer};
///
/// #[derive(Debug, Clone, Default)]
/// struct Words;
///
/// impl ElementPolicy<String> for Words {
///     fn is_valid_type(&self, element: &String) -> bool {
///         !element.is_empty() && element.chars().all(char::is_alphabetic)
///     }
///
///     fn prepare_elements(&self, elements: Vec<(Key, String)>) -> Vec<(Key, String)> {
///         elements
///             .into_iter()
///             .map(|(key, word)| (key, word.to_lowercase()))
///             .collect()
///     }
/// }
///
/// let words: TypedContainer<String, Words> =
///     TypedContainer::from_values(["Lorem".to_string(), "12".to_string(), "Ipsum".to_string()]);
///
/// assert_eq!(words.count(), 2);
/// assert_eq!(words.get(2), Some(&"ipsum".to_string()));
/// ```
pub trait ElementPolicy<T> {
    /// Returns `true` if `element` may be stored by the container.
    fn is_valid_type(&self, element: &T) -> bool;

    /// Transforms the already-filtered elements before they are stored.
    ///
    /// The default implementation returns the elements unchanged.
    fn prepare_elements(&self, elements: Vec<(Key, T)>) -> Vec<(Key, T)> {
        elements
    }
}

/// Policy accepting every element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnyElement;

impl<T> ElementPolicy<T> for AnyElement {
    fn is_valid_type(&self, _element: &T) -> bool {
        true
    }
}

/// Policy backed by a predicate closure.
///
/// ```
/// use toolbelt_collection::{FnPolicy, TypedContainer};
///
/// let evens = TypedContainer::from_values_with(FnPolicy::new(|n: &i32| n % 2 == 0), [1, 2, 3, 4]);
/// assert_eq!(evens.to_values(), vec![2, 4]);
/// ```
#[derive(Clone, Copy)]
pub struct FnPolicy<F> {
    predicate: F,
}

impl<F> FnPolicy<F> {
    /// Wraps a predicate.
    pub fn new(predicate: F) -> Self {
        FnPolicy { predicate }
    }
}

impl<F> fmt::Debug for FnPolicy<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnPolicy").finish_non_exhaustive()
    }
}

impl<T, F> ElementPolicy<T> for FnPolicy<F>
where
    F: Fn(&T) -> bool,
{
    fn is_valid_type(&self, element: &T) -> bool {
        (self.predicate)(element)
    }
}
