//! Typed collections - ordered, keyed containers with neighbor and position
//! queries.
//!
//! A [`TypedContainer`] stores elements under integer or string [`Key`]s and
//! keeps their insertion order. It supports:
//!
//! - Array-style access: get, set, unset, key existence
//! - Bulk mutation: add, add-multiple, append, prepend, remove, clear
//! - Position queries: first, last, is-first, is-last, next, previous
//! - Slicing with [`TypedContainer::limit`]
//!
//! # Quick Start
//!
//! ```rust
//! use toolbelt_collection::{FnPolicy, Key, TypedContainer};
//!
//! // Only non-empty strings are accepted when the container is built
//! let policy = FnPolicy::new(|s: &&str| !s.is_empty());
//! let mut words = TypedContainer::from_values_with(policy, ["lorem", "", "ipsum"]);
//!
//! assert_eq!(words.count(), 2);
//! assert_eq!(words.get(2), Some(&"ipsum"));
//!
//! words.prepend("first");
//! assert_eq!(words.get(0), Some(&"first"));
//! assert_eq!(words.get_next(&"first"), Some(&"lorem"));
//! ```
//!
//! # Validation Semantics
//!
//! The container's [`ElementPolicy`] is consulted only while the container is
//! built:
//!
//! ```text
//! construct(elements) = prepare_elements(filter(is_valid_type, elements))
//! ```
//!
//! Rejected elements are dropped without an error. Elements stored later
//! through `add`, `append`, `prepend` or `set` are not checked.
//!
//! # Equality
//!
//! Membership and neighbor queries compare elements with [`PartialEq`] and
//! always resolve relative to the first matching element. Store shared
//! handles (`Rc<T>`, `&T`) when elements are owned elsewhere.

mod container;
mod key;
mod policy;

pub use container::{Iter, TypedContainer};
pub use key::Key;
pub use policy::{AnyElement, ElementPolicy, FnPolicy};
