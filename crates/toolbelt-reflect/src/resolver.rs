//! Property resolution.
//!
//! The [`PropertyResolver`] reads properties of registered objects by name,
//! follows dot-separated property chains, and writes declared fields.

use tracing::{debug, trace};

use toolbelt_collection::TypedContainer;

use crate::config::ResolverConfig;
use crate::error::{ReflectionError, Result};
use crate::info::FieldInfo;
use crate::traits::Reflect;
use crate::value::{object_to_map, PropertyValue};

/// Reads and writes properties of registered objects.
///
/// A simple property name is resolved in this order, stopping at the first
/// success:
///
/// 1. a readable field declared on the object;
/// 2. a readable field declared on an ancestor, nearest first;
/// 3. a public accessor method `get_<name>`, `has_<name>` or `is_<name>`,
///    tried only when `force` is set or the object (or an ancestor)
///    declares a field of that name;
/// 4. otherwise the property reads as [`PropertyValue::Null`].
///
/// A property chain such as `"address.city"` resolves its first segment and
/// continues on the result. A `Null` (or any non-object) intermediate ends
/// the walk with `Null`. List intermediates accept a numeric segment.
///
/// # Example
///
/// ```
/// use toolbelt_reflect::{PropertyResolver, PropertyValue};
/// # use toolbelt_reflect::{FieldInfo, Reflect, Result, ReflectionError, ToPropertyValue, TypeInfo, Visibility};
/// # struct City { name: String }
/// # static CITY_FIELDS: [FieldInfo; 1] = [FieldInfo::new("name", Visibility::Public)];
/// # static CITY: TypeInfo = TypeInfo::new("City", &CITY_FIELDS, &[]);
/// # impl Reflect for City {
/// #     fn type_info(&self) -> &'static TypeInfo { &CITY }
/// #     fn field(&self, name: &str) -> Option<PropertyValue<'_>> {
/// #         (name == "name").then(|| self.name.to_property_value())
/// #     }
/// #     fn set_field(&mut self, name: &str, _: serde_json::Value) -> Result<()> {
/// #         Err(ReflectionError::not_found("City", name))
/// #     }
/// # }
/// # struct Address { city: Option<City> }
/// # static ADDRESS_FIELDS: [FieldInfo; 1] = [FieldInfo::new("city", Visibility::Public)];
/// # static ADDRESS: TypeInfo = TypeInfo::new("Address", &ADDRESS_FIELDS, &[]);
/// # impl Reflect for Address {
/// #     fn type_info(&self) -> &'static TypeInfo { &ADDRESS }
/// #     fn field(&self, name: &str) -> Option<PropertyValue<'_>> {
/// #         (name == "city").then(|| match &self.city {
/// #             Some(city) => PropertyValue::Object(city),
/// #             None => PropertyValue::Null,
/// #         })
/// #     }
/// #     fn set_field(&mut self, name: &str, _: serde_json::Value) -> Result<()> {
/// #         Err(ReflectionError::not_found("Address", name))
/// #     }
/// # }
///
/// let resolver = PropertyResolver::new();
///
/// let address = Address { city: Some(City { name: "Warsaw".into() }) };
/// assert_eq!(resolver.get(&address, "city.name"), PropertyValue::from("Warsaw"));
///
/// let nowhere = Address { city: None };
/// assert!(resolver.get(&nowhere, "city.name").is_null());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PropertyResolver {
    config: ResolverConfig,
}

impl PropertyResolver {
    /// Creates a resolver with the default configuration.
    pub fn new() -> Self {
        PropertyResolver::default()
    }

    /// Creates a resolver with the given configuration.
    pub fn with_config(config: ResolverConfig) -> Self {
        PropertyResolver { config }
    }

    /// Sets the chain separator.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.config.separator = separator.into();
        self
    }

    /// Sets the accessor prefixes, tried in the given order.
    pub fn accessor_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.accessor_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the default `force` flag used by [`get`](Self::get) and
    /// [`get_many`](Self::get_many).
    pub fn force(mut self, force: bool) -> Self {
        self.config.force = force;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }

    // ========================================================================
    // Reading
    // ========================================================================

    /// Resolves `property` on `source` using the configured `force` flag.
    pub fn get<'a>(&self, source: &'a dyn Reflect, property: &str) -> PropertyValue<'a> {
        self.resolve(source, property, self.config.force)
    }

    /// Resolves `property` (a name or a chain) on `source`.
    ///
    /// Never fails: anything that cannot be resolved reads as `Null`.
    pub fn resolve<'a>(
        &self,
        source: &'a dyn Reflect,
        property: &str,
        force: bool,
    ) -> PropertyValue<'a> {
        match self.split_chain(property) {
            Some((head, rest)) => {
                let value = self.resolve(source, head, force);
                self.resolve_in(value, rest, force)
            }
            None => self.resolve_simple(source, property, force),
        }
    }

    fn split_chain<'p>(&self, property: &'p str) -> Option<(&'p str, &'p str)> {
        if self.config.separator.is_empty() {
            return None;
        }
        property.split_once(self.config.separator.as_str())
    }

    fn resolve_in<'a>(&self, value: PropertyValue<'a>, rest: &str, force: bool) -> PropertyValue<'a> {
        match value {
            PropertyValue::Object(object) => self.resolve(object, rest, force),
            PropertyValue::List(items) => {
                let (head, remainder) = match self.split_chain(rest) {
                    Some((head, remainder)) => (head, Some(remainder)),
                    None => (rest, None),
                };
                let item = head
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.into_iter().nth(index));
                match (item, remainder) {
                    (Some(item), Some(remainder)) => self.resolve_in(item, remainder, force),
                    (Some(item), None) => item,
                    (None, _) => PropertyValue::Null,
                }
            }
            other => {
                trace!(kind = other.kind(), rest, "property chain stopped");
                PropertyValue::Null
            }
        }
    }

    fn resolve_simple<'a>(
        &self,
        source: &'a dyn Reflect,
        property: &str,
        force: bool,
    ) -> PropertyValue<'a> {
        let class = source.type_info().name;

        if let Some(value) = source.field(property) {
            trace!(class, property, "resolved from declared field");
            return value;
        }

        if let Some(value) = Self::from_ancestors(source, property) {
            trace!(class, property, "resolved from ancestor field");
            return value;
        }

        if force || Self::declares(source, property) {
            if let Some(value) = self.from_accessors(source, property) {
                return value;
            }
        }

        source.field(property).unwrap_or(PropertyValue::Null)
    }

    fn from_ancestors<'a>(source: &'a dyn Reflect, property: &str) -> Option<PropertyValue<'a>> {
        let mut current = source.parent();
        while let Some(ancestor) = current {
            if let Some(value) = ancestor.field(property) {
                return Some(value);
            }
            current = ancestor.parent();
        }
        None
    }

    fn declares(source: &dyn Reflect, property: &str) -> bool {
        ancestry(source).any(|object| object.type_info().field(property).is_some())
    }

    fn from_accessors<'a>(&self, source: &'a dyn Reflect, property: &str) -> Option<PropertyValue<'a>> {
        for prefix in &self.config.accessor_prefixes {
            let method = if prefix.is_empty() {
                property.to_string()
            } else {
                format!("{}_{}", prefix, property)
            };

            for object in ancestry(source) {
                let Some(info) = object.type_info().method(&method) else {
                    continue;
                };
                if !info.visibility.is_public() {
                    trace!(
                        class = object.type_info().name,
                        method = method.as_str(),
                        visibility = %info.visibility,
                        "skipped non-public accessor"
                    );
                    continue;
                }
                if let Some(value) = object.invoke(&method) {
                    trace!(
                        class = object.type_info().name,
                        method = method.as_str(),
                        "resolved from accessor"
                    );
                    return Some(value);
                }
            }
        }
        None
    }

    /// Resolves `property` on every object, dropping `Null` results.
    ///
    /// The output is therefore not positionally aligned with the input.
    pub fn resolve_many<'a, I, T>(&self, objects: I, property: &str, force: bool) -> Vec<PropertyValue<'a>>
    where
        I: IntoIterator<Item = &'a T>,
        T: Reflect + 'a,
    {
        objects
            .into_iter()
            .map(|object| self.resolve(object, property, force))
            .filter(|value| !value.is_null())
            .collect()
    }

    /// Like [`resolve_many`](Self::resolve_many), using the configured `force`.
    pub fn get_many<'a, I, T>(&self, objects: I, property: &str) -> Vec<PropertyValue<'a>>
    where
        I: IntoIterator<Item = &'a T>,
        T: Reflect + 'a,
    {
        self.resolve_many(objects, property, self.config.force)
    }

    /// Resolves `property` on every element of a container, in key order,
    /// dropping `Null` results.
    pub fn resolve_collection<'a, T, P>(
        &self,
        collection: &'a TypedContainer<T, P>,
        property: &str,
        force: bool,
    ) -> Vec<PropertyValue<'a>>
    where
        T: Reflect + 'a,
    {
        self.resolve_many(collection.values(), property, force)
    }

    // ========================================================================
    // Writing
    // ========================================================================

    /// Writes `value` into the field `property` of `object` or of the
    /// nearest ancestor declaring it.
    ///
    /// # Errors
    ///
    /// Returns [`ReflectionError::PropertyNotFound`] naming the object's
    /// class when no such field is declared, and the errors of
    /// [`Reflect::set_field`] otherwise.
    pub fn set_value(
        &self,
        object: &mut dyn Reflect,
        property: &str,
        value: impl Into<serde_json::Value>,
    ) -> Result<()> {
        let class = object.type_info().name;
        let result = assign(object, property, value.into())
            .unwrap_or_else(|| Err(ReflectionError::not_found(class, property)));

        if let Err(err) = &result {
            debug!(class, property, error = %err, "failed to set property");
        }
        result
    }

    /// Writes every `(property, value)` pair in order.
    ///
    /// Stops at the first failure; earlier assignments stay applied.
    pub fn set_many_values<I, K, V>(&self, object: &mut dyn Reflect, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<serde_json::Value>,
    {
        for (property, value) in values {
            self.set_value(object, property.as_ref(), value)?;
        }
        Ok(())
    }

    // ========================================================================
    // Metadata
    // ========================================================================

    /// Returns the registered name of the object's type.
    pub fn class_name(&self, object: &dyn Reflect) -> &'static str {
        object.type_info().name
    }

    /// Returns `true` if the object or an ancestor declares `property`.
    pub fn has_property(&self, object: &dyn Reflect, property: &str) -> bool {
        Self::declares(object, property)
    }

    /// Returns the declared fields of the object, then of its ancestors.
    pub fn properties(&self, object: &dyn Reflect) -> Vec<&'static FieldInfo> {
        ancestry(object)
            .flat_map(|object| object.type_info().fields.iter())
            .collect()
    }

    /// Returns the names of the object's ancestors, nearest first.
    pub fn parent_class_names(&self, object: &dyn Reflect) -> Vec<&'static str> {
        ancestry(object)
            .skip(1)
            .map(|object| object.type_info().name)
            .collect()
    }

    /// Returns `true` if `class` names one of the object's ancestors.
    pub fn is_child_of(&self, object: &dyn Reflect, class: &str) -> bool {
        ancestry(object)
            .skip(1)
            .any(|object| object.type_info().name == class)
    }

    /// Exports the readable fields of the object and its ancestors.
    pub fn to_map(&self, object: &dyn Reflect) -> serde_json::Map<String, serde_json::Value> {
        object_to_map(object)
    }
}

/// Iterates over `object` followed by its ancestors.
fn ancestry(object: &dyn Reflect) -> impl Iterator<Item = &dyn Reflect> {
    std::iter::successors(Some(object), |object| object.parent())
}

/// Returns `None` when neither `object` nor an ancestor declares `property`.
fn assign(object: &mut dyn Reflect, property: &str, value: serde_json::Value) -> Option<Result<()>> {
    if object.type_info().field(property).is_some() {
        return Some(object.set_field(property, value));
    }
    if !ancestry(object).skip(1).any(|ancestor| ancestor.type_info().field(property).is_some()) {
        return None;
    }
    // A declared ancestor with no mutable path means a shared handle.
    let class = object.type_info().name;
    match object.parent_mut() {
        Some(parent) => assign(parent, property, value),
        None => Some(Err(ReflectionError::SharedInstance { class })),
    }
}

// ============================================================================
// Shorthands
// ============================================================================

/// Resolves `property` on `source` with a default resolver.
pub fn get_property_value<'a>(source: &'a dyn Reflect, property: &str, force: bool) -> PropertyValue<'a> {
    PropertyResolver::new().resolve(source, property, force)
}

/// Resolves `property` on every object with a default resolver, dropping
/// `Null` results.
pub fn get_properties_values<'a, I, T>(objects: I, property: &str, force: bool) -> Vec<PropertyValue<'a>>
where
    I: IntoIterator<Item = &'a T>,
    T: Reflect + 'a,
{
    PropertyResolver::new().resolve_many(objects, property, force)
}

/// Writes a field with a default resolver.
pub fn set_property_value(
    object: &mut dyn Reflect,
    property: &str,
    value: impl Into<serde_json::Value>,
) -> Result<()> {
    PropertyResolver::new().set_value(object, property, value)
}

/// Writes many fields with a default resolver.
pub fn set_properties_values<I, K, V>(object: &mut dyn Reflect, values: I) -> Result<()>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: Into<serde_json::Value>,
{
    PropertyResolver::new().set_many_values(object, values)
}
