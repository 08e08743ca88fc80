//! The typed container.
//!
//! [`TypedContainer`] is an ordered, keyed collection. Keys are integers or
//! strings and keep their insertion order. Elements rejected by the
//! container's [`ElementPolicy`] are dropped silently when the container is
//! built; elements added afterwards are not checked.

use std::fmt;

use tracing::debug;

use crate::key::Key;
use crate::policy::{AnyElement, ElementPolicy};

/// An ordered, keyed, type-filtered collection.
///
/// # Example
///
/// ```
/// use toolbelt_collection::{Key, TypedContainer};
///
/// let words: TypedContainer<&str> = TypedContainer::new([
///     (Key::Index(0), "lorem"),
///     (Key::Index(1), "ipsum"),
///     (Key::Index(123), "dolor"),
///     (Key::Index(345), "sit"),
/// ]);
///
/// assert_eq!(words.count(), 4);
/// assert_eq!(words.first(), Some(&"lorem"));
/// assert_eq!(words.last(), Some(&"sit"));
/// assert_eq!(words.get_next(&"ipsum"), Some(&"dolor"));
/// assert_eq!(words.get_previous(&"sit"), Some(&"dolor"));
/// ```
#[derive(Clone)]
pub struct TypedContainer<T, P = AnyElement> {
    elements: Vec<(Key, T)>,
    next_index: i64,
    policy: P,
}

impl<T, P> TypedContainer<T, P>
where
    P: ElementPolicy<T>,
{
    /// Creates a container from keyed elements using the default policy.
    pub fn new<I, K>(elements: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<Key>,
        P: Default,
    {
        Self::with_policy(P::default(), elements)
    }

    /// Creates a container from values, keyed `0..n` in iteration order.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        P: Default,
    {
        Self::from_values_with(P::default(), values)
    }

    /// Creates a container from values using the given policy.
    pub fn from_values_with<I>(policy: P, values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self::with_policy(
            policy,
            values
                .into_iter()
                .enumerate()
                .map(|(index, value)| (Key::from(index), value)),
        )
    }

    /// Creates a container from keyed elements using the given policy.
    ///
    /// Elements failing [`ElementPolicy::is_valid_type`] are dropped. The
    /// survivors keep their keys and order and are then passed through
    /// [`ElementPolicy::prepare_elements`].
    pub fn with_policy<I, K>(policy: P, elements: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<Key>,
    {
        let mut dropped = 0usize;
        let mut accepted = Vec::new();

        for (key, element) in elements {
            if policy.is_valid_type(&element) {
                accepted.push((key.into(), element));
            } else {
                dropped += 1;
            }
        }

        if dropped > 0 {
            debug!(
                dropped,
                accepted = accepted.len(),
                "dropped elements rejected by collection policy"
            );
        }

        let prepared = policy.prepare_elements(accepted);
        let mut container = TypedContainer {
            elements: Vec::with_capacity(prepared.len()),
            next_index: 0,
            policy,
        };
        for (key, element) in prepared {
            container.insert(key, element);
        }
        container
    }
}

impl<T, P> TypedContainer<T, P> {
    /// Creates an empty container with the given policy.
    pub fn empty(policy: P) -> Self {
        TypedContainer {
            elements: Vec::new(),
            next_index: 0,
            policy,
        }
    }

    /// Returns the container's policy.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    fn position_of_key(&self, key: &Key) -> Option<usize> {
        self.elements.iter().position(|(k, _)| k == key)
    }

    fn insert(&mut self, key: Key, element: T) {
        if let Key::Index(index) = key {
            if index >= self.next_index {
                self.next_index = index.saturating_add(1);
            }
        }
        match self.position_of_key(&key) {
            Some(position) => self.elements[position].1 = element,
            None => self.elements.push((key, element)),
        }
    }

    fn push(&mut self, element: T) -> Option<Key> {
        let key = Key::Index(self.next_index);
        if self.position_of_key(&key).is_some() {
            debug!(%key, "next index is already occupied, element not appended");
            return None;
        }
        self.next_index = self.next_index.saturating_add(1);
        self.elements.push((key.clone(), element));
        Some(key)
    }

    // ========================================================================
    // Array access
    // ========================================================================

    /// Returns the number of stored elements.
    pub fn count(&self) -> usize {
        self.elements.len()
    }

    /// Returns the element stored under `key`.
    pub fn get(&self, key: impl Into<Key>) -> Option<&T> {
        let key = key.into();
        self.elements
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, element)| element)
    }

    /// Returns a mutable reference to the element stored under `key`.
    pub fn get_mut(&mut self, key: impl Into<Key>) -> Option<&mut T> {
        let key = key.into();
        self.elements
            .iter_mut()
            .find(|(k, _)| *k == key)
            .map(|(_, element)| element)
    }

    /// Stores `element` under `key`, or appends it when `key` is `None`.
    ///
    /// An existing element under the same key is overwritten in place. An
    /// append never overwrites: see [`append`](Self::append).
    pub fn set<K: Into<Key>>(&mut self, key: Option<K>, element: T) {
        match key {
            Some(key) => self.insert(key.into(), element),
            None => {
                self.push(element);
            }
        }
    }

    /// Removes the element stored under `key`, returning it.
    pub fn unset(&mut self, key: impl Into<Key>) -> Option<T> {
        let key = key.into();
        let position = self.position_of_key(&key)?;
        Some(self.elements.remove(position).1)
    }

    /// Returns `true` if an element is stored under `key`.
    pub fn contains_key(&self, key: impl Into<Key>) -> bool {
        let key = key.into();
        self.position_of_key(&key).is_some()
    }

    /// Iterates over `(key, element)` pairs in order.
    ///
    /// Every call starts a fresh iterator over the current contents.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            inner: self.elements.iter(),
        }
    }

    /// Iterates over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.elements.iter().map(|(key, _)| key)
    }

    /// Iterates over the elements in order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.elements.iter().map(|(_, element)| element)
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Adds an element under `index`, or appends it when `index` is `None`.
    ///
    /// The policy is not consulted.
    pub fn add<K: Into<Key>>(&mut self, element: T, index: Option<K>) {
        self.set(index, element);
    }

    /// Adds many elements.
    ///
    /// With `use_indexes` the given keys are kept; otherwise the elements are
    /// appended one after another.
    pub fn add_multiple<I, K>(&mut self, elements: I, use_indexes: bool)
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<Key>,
    {
        for (key, element) in elements {
            if use_indexes {
                self.insert(key.into(), element);
            } else {
                self.push(element);
            }
        }
    }

    /// Appends an element after the last one, returning its key.
    ///
    /// The element goes under the next free integer index. When that index
    /// is already occupied (the container holds `i64::MAX`) the element is
    /// dropped and `None` is returned.
    pub fn append(&mut self, element: T) -> Option<Key> {
        self.push(element)
    }

    /// Inserts an element before the first one.
    ///
    /// The new element is stored under key `0` and every integer key is
    /// renumbered sequentially; string keys are kept.
    pub fn prepend(&mut self, element: T) {
        let existing = std::mem::take(&mut self.elements);
        self.elements.reserve(existing.len() + 1);
        self.elements.push((Key::Index(0), element));

        let mut next = 1i64;
        for (key, element) in existing {
            let key = match key {
                Key::Index(_) => {
                    let renumbered = Key::Index(next);
                    next += 1;
                    renumbered
                }
                name => name,
            };
            self.elements.push((key, element));
        }
        self.next_index = next;
    }

    /// Removes all elements.
    pub fn clear(&mut self) {
        self.elements.clear();
        self.next_index = 0;
    }

    /// Returns `true` if the container holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the first element.
    pub fn first(&self) -> Option<&T> {
        self.elements.first().map(|(_, element)| element)
    }

    /// Returns the last element.
    pub fn last(&self) -> Option<&T> {
        self.elements.last().map(|(_, element)| element)
    }

    /// Returns the element stored under `index`.
    pub fn get_by_index(&self, index: impl Into<Key>) -> Option<&T> {
        self.get(index)
    }

    /// Returns a new container holding at most `max` elements, starting at
    /// position `offset`. Keys are preserved.
    pub fn limit(&self, max: usize, offset: usize) -> Self
    where
        T: Clone,
        P: Clone,
    {
        TypedContainer {
            elements: self
                .elements
                .iter()
                .skip(offset)
                .take(max)
                .cloned()
                .collect(),
            next_index: self.next_index,
            policy: self.policy.clone(),
        }
    }

    /// Exports the stored `(key, element)` pairs.
    pub fn to_array(&self) -> Vec<(Key, T)>
    where
        T: Clone,
    {
        self.elements.clone()
    }

    /// Exports the stored elements without their keys.
    pub fn to_values(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.values().cloned().collect()
    }
}

impl<T, P> TypedContainer<T, P>
where
    T: PartialEq,
{
    fn position_of(&self, element: &T) -> Option<usize> {
        self.elements.iter().position(|(_, e)| e == element)
    }

    fn neighbor(&self, element: &T, forward: bool) -> Option<&T> {
        let position = self.position_of(element)?;
        let target = if forward {
            position.checked_add(1)?
        } else {
            position.checked_sub(1)?
        };
        self.elements.get(target).map(|(_, e)| e)
    }

    /// Removes the first element equal to `element`.
    pub fn remove(&mut self, element: &T) {
        if let Some(position) = self.position_of(element) {
            self.elements.remove(position);
        }
    }

    /// Returns `true` if an element equal to `element` is stored.
    pub fn has(&self, element: &T) -> bool {
        self.position_of(element).is_some()
    }

    /// Returns the key of the first element equal to `element`.
    pub fn key_of(&self, element: &T) -> Option<&Key> {
        self.position_of(element).map(|position| &self.elements[position].0)
    }

    /// Returns `true` if `element` equals the first element.
    pub fn is_first(&self, element: &T) -> bool {
        self.first() == Some(element)
    }

    /// Returns `true` if `element` equals the last element.
    pub fn is_last(&self, element: &T) -> bool {
        self.last() == Some(element)
    }

    /// Returns the element positioned after the first occurrence of `element`.
    pub fn get_next(&self, element: &T) -> Option<&T> {
        self.neighbor(element, true)
    }

    /// Returns the element positioned before the first occurrence of `element`.
    pub fn get_previous(&self, element: &T) -> Option<&T> {
        self.neighbor(element, false)
    }
}

impl<T, P: Default> Default for TypedContainer<T, P> {
    fn default() -> Self {
        TypedContainer::empty(P::default())
    }
}

impl<T: fmt::Debug, P> fmt::Debug for TypedContainer<T, P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.elements.iter().map(|(k, v)| (k, v)))
            .finish()
    }
}

impl<T: PartialEq, P> PartialEq for TypedContainer<T, P> {
    fn eq(&self, other: &Self) -> bool {
        self.elements == other.elements
    }
}

impl<T, P> FromIterator<T> for TypedContainer<T, P>
where
    P: ElementPolicy<T> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        TypedContainer::from_values(iter)
    }
}

impl<T, P> Extend<T> for TypedContainer<T, P> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.push(element);
        }
    }
}

impl<T, P> IntoIterator for TypedContainer<T, P> {
    type Item = (Key, T);
    type IntoIter = std::vec::IntoIter<(Key, T)>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, T, P> IntoIterator for &'a TypedContainer<T, P> {
    type Item = (&'a Key, &'a T);
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the `(key, element)` pairs of a [`TypedContainer`].
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    inner: std::slice::Iter<'a, (Key, T)>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (&'a Key, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, element)| (key, element))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, element)| (key, element))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::FnPolicy;

    fn sample() -> TypedContainer<&'static str> {
        TypedContainer::new([
            (Key::Index(0), "lorem"),
            (Key::Index(1), "ipsum"),
            (Key::Index(123), "dolor"),
            (Key::Index(345), "sit"),
        ])
    }

    fn sequential() -> TypedContainer<&'static str> {
        TypedContainer::from_values(["lorem", "ipsum", "dolor", "sit"])
    }

    #[test]
    fn positional_queries() {
        let words = sample();

        assert_eq!(words.count(), 4);
        assert_eq!(words.first(), Some(&"lorem"));
        assert_eq!(words.last(), Some(&"sit"));
        assert!(words.is_first(&"lorem"));
        assert!(!words.is_last(&"dolor"));
        assert_eq!(words.get_next(&"ipsum"), Some(&"dolor"));
        assert_eq!(words.get_previous(&"sit"), Some(&"dolor"));
    }

    #[test]
    fn neighbors_at_boundaries() {
        let words = sample();

        assert_eq!(words.get_previous(&"lorem"), None);
        assert_eq!(words.get_next(&"sit"), None);
        assert_eq!(words.get_next(&"missing"), None);
        assert_eq!(words.get_previous(&"missing"), None);
    }

    #[test]
    fn neighbors_resolve_from_first_occurrence() {
        let words: TypedContainer<&str> = TypedContainer::from_values(["a", "b", "a", "c"]);

        assert_eq!(words.get_next(&"a"), Some(&"b"));
        assert_eq!(words.get_previous(&"a"), None);
    }

    #[test]
    fn empty_container_queries() {
        let empty: TypedContainer<&str> = TypedContainer::default();

        assert!(empty.is_empty());
        assert_eq!(empty.first(), None);
        assert_eq!(empty.last(), None);
        assert!(!empty.is_first(&"x"));
        assert!(!empty.is_last(&"x"));
    }

    #[test]
    fn construction_drops_invalid_elements_and_keeps_keys() {
        let policy = FnPolicy::new(|s: &&str| !s.is_empty());
        let words = TypedContainer::with_policy(
            policy,
            [(Key::Index(0), "lorem"), (Key::Index(1), ""), (Key::Index(5), "sit")],
        );

        assert_eq!(words.count(), 2);
        let keys: Vec<&Key> = words.keys().collect();
        assert_eq!(keys, vec![&Key::Index(0), &Key::Index(5)]);
    }

    #[test]
    fn mutations_are_not_checked() {
        let mut words = TypedContainer::from_values_with(
            FnPolicy::new(|s: &&str| !s.is_empty()),
            ["lorem", ""],
        );
        assert_eq!(words.count(), 1);

        words.append("");
        assert_eq!(words.count(), 2);
        assert!(words.has(&""));
    }

    #[test]
    fn get_missing_key_is_none() {
        let words = sample();
        assert_eq!(words.get(2), None);
        assert_eq!(words.get("lorem"), None);
        assert_eq!(words.get(123), Some(&"dolor"));
        assert_eq!(words.get("123"), Some(&"dolor"));
    }

    #[test]
    fn set_appends_after_largest_index() {
        let mut words = sample();
        words.set(None::<Key>, "amet");

        assert_eq!(words.get(346), Some(&"amet"));
        assert_eq!(words.last(), Some(&"amet"));
    }

    #[test]
    fn set_overwrites_in_place() {
        let mut words = sample();
        words.set(Some(1), "IPSUM");

        assert_eq!(words.count(), 4);
        assert_eq!(words.get_next(&"lorem"), Some(&"IPSUM"));
    }

    #[test]
    fn set_with_name_key() {
        let mut words = sample();
        words.set(Some("extra"), "amet");

        assert_eq!(words.get("extra"), Some(&"amet"));
        assert!(words.contains_key("extra"));
    }

    #[test]
    fn unset_removes_and_ignores_missing() {
        let mut words = sample();

        assert_eq!(words.unset(123), Some("dolor"));
        assert_eq!(words.unset(123), None);
        assert_eq!(words.count(), 3);
        assert!(!words.contains_key(123));
    }

    #[test]
    fn append_after_unset_keeps_counting() {
        let mut words = sequential();
        words.unset(3);
        words.append("amet");

        assert_eq!(words.get(4), Some(&"amet"));
        assert_eq!(words.get(3), None);
    }

    #[test]
    fn append_returns_the_new_key() {
        let mut words = sequential();
        assert_eq!(words.append("amet"), Some(Key::Index(4)));
    }

    #[test]
    fn append_never_overwrites_the_largest_index() {
        let mut words: TypedContainer<&str> = TypedContainer::new([(Key::Index(i64::MAX), "a")]);

        assert_eq!(words.append("b"), None);
        words.set(None::<Key>, "c");
        words.extend(["d"]);

        assert_eq!(words.count(), 1);
        assert_eq!(words.get(i64::MAX), Some(&"a"));
    }

    #[test]
    fn append_fills_the_largest_index_once_free() {
        let mut words: TypedContainer<&str> = TypedContainer::new([(Key::Index(i64::MAX), "a")]);
        words.unset(i64::MAX);

        assert_eq!(words.append("b"), Some(Key::Index(i64::MAX)));
        assert_eq!(words.append("c"), None);
        assert_eq!(words.to_values(), vec!["b"]);
    }

    #[test]
    fn iteration_is_restartable() {
        let words = sample();

        let first: Vec<_> = words.iter().map(|(_, v)| *v).collect();
        let second: Vec<_> = words.iter().map(|(_, v)| *v).collect();
        assert_eq!(first, second);
        assert_eq!(first, vec!["lorem", "ipsum", "dolor", "sit"]);
    }

    #[test]
    fn iteration_sees_current_state() {
        let mut words = sequential();
        assert_eq!(words.iter().count(), 4);

        words.remove(&"ipsum");
        assert_eq!(words.iter().count(), 3);
        assert_eq!(words.iter().len(), 3);
    }

    #[test]
    fn add_with_and_without_index() {
        let mut words: TypedContainer<&str> = TypedContainer::default();
        words.add("lorem", None::<Key>);
        words.add("ipsum", Some("name"));
        words.add("dolor", None::<Key>);

        assert_eq!(
            words.to_array(),
            vec![
                (Key::Index(0), "lorem"),
                (Key::Name("name".into()), "ipsum"),
                (Key::Index(1), "dolor"),
            ]
        );
    }

    #[test]
    fn add_multiple_without_indexes_reindexes() {
        let mut words = sequential();
        words.add_multiple([(Key::Index(50), "amet"), (Key::from("x"), "elit")], false);

        assert_eq!(words.get(4), Some(&"amet"));
        assert_eq!(words.get(5), Some(&"elit"));
        assert_eq!(words.get(50), None);
    }

    #[test]
    fn add_multiple_with_indexes_round_trips() {
        let elements = vec![
            (Key::Index(3), "lorem"),
            (Key::from("x"), "ipsum"),
            (Key::Index(1), "dolor"),
        ];
        let mut words: TypedContainer<&str> = TypedContainer::default();
        words.add_multiple(elements.clone(), true);

        assert_eq!(words.to_array(), elements);
    }

    #[test]
    fn prepend_renumbers_integer_keys() {
        let mut words = sample();
        words.set(Some("name"), "amet");
        words.prepend("first");

        assert_eq!(
            words.to_array(),
            vec![
                (Key::Index(0), "first"),
                (Key::Index(1), "lorem"),
                (Key::Index(2), "ipsum"),
                (Key::Index(3), "dolor"),
                (Key::Index(4), "sit"),
                (Key::Name("name".into()), "amet"),
            ]
        );

        words.append("last");
        assert_eq!(words.get(5), Some(&"last"));
    }

    #[test]
    fn remove_only_first_match() {
        let mut words: TypedContainer<&str> = TypedContainer::from_values(["a", "b", "a"]);
        words.remove(&"a");

        assert_eq!(words.to_array(), vec![(Key::Index(1), "b"), (Key::Index(2), "a")]);

        words.remove(&"missing");
        assert_eq!(words.count(), 2);
    }

    #[test]
    fn clear_is_idempotent() {
        let mut words = sample();
        words.clear();
        let once = words.clone();
        words.clear();

        assert_eq!(words, once);
        assert!(words.is_empty());

        words.append("again");
        assert_eq!(words.get(0), Some(&"again"));
    }

    #[test]
    fn limit_slices_and_keeps_keys() {
        let words = sequential();
        let limited = words.limit(2, 1);

        assert_eq!(
            limited.to_array(),
            vec![(Key::Index(1), "ipsum"), (Key::Index(2), "dolor")]
        );
        assert_eq!(words.count(), 4);
    }

    #[test]
    fn limit_edges() {
        let words = sequential();

        assert!(words.limit(0, 0).is_empty());
        assert!(words.limit(2, 10).is_empty());
        assert_eq!(words.limit(10, 0).count(), 4);
        assert_eq!(words.limit(10, 3).to_values(), vec!["sit"]);
    }

    #[test]
    fn get_by_index_uses_keys() {
        let words = sample();
        assert_eq!(words.get_by_index(345), Some(&"sit"));
        assert_eq!(words.get_by_index(2), None);
    }

    #[test]
    fn key_of_first_match() {
        let words = sample();
        assert_eq!(words.key_of(&"dolor"), Some(&Key::Index(123)));
        assert_eq!(words.key_of(&"missing"), None);
    }

    #[test]
    fn duplicate_keys_at_construction_overwrite() {
        let words: TypedContainer<&str> =
            TypedContainer::new([(Key::Index(0), "a"), (Key::Index(1), "b"), (Key::Index(0), "c")]);

        assert_eq!(words.to_array(), vec![(Key::Index(0), "c"), (Key::Index(1), "b")]);
    }

    #[test]
    fn collect_and_extend() {
        let mut words: TypedContainer<&str> = ["lorem", "ipsum"].into_iter().collect();
        words.extend(["dolor"]);

        assert_eq!(words.get(2), Some(&"dolor"));

        let owned: Vec<(Key, &str)> = words.into_iter().collect();
        assert_eq!(owned.len(), 3);
    }

    #[test]
    fn get_mut_edits_in_place() {
        let mut numbers: TypedContainer<i32> = TypedContainer::from_values([1, 2, 3]);
        if let Some(n) = numbers.get_mut(1) {
            *n *= 10;
        }
        assert_eq!(numbers.to_values(), vec![1, 20, 3]);
    }

    #[test]
    fn debug_renders_as_map() {
        let words: TypedContainer<&str> = TypedContainer::from_values(["a"]);
        assert_eq!(format!("{:?}", words), r#"{Index(0): "a"}"#);
    }
}
