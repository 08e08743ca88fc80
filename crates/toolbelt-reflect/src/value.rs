//! Runtime property values.
//!
//! The [`PropertyValue`] enum represents a value read from a registered
//! object. Strings, lists and nested objects borrow from the source object
//! whenever possible.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::traits::Reflect;

/// Runtime value of a resolved property.
///
/// # Example
///
/// ```
/// use toolbelt_reflect::{Number, PropertyValue, ToPropertyValue};
///
/// assert_eq!(42u8.to_property_value(), PropertyValue::Number(Number::U64(42)));
/// assert_eq!(Some("lorem").to_property_value(), PropertyValue::from("lorem"));
/// assert!(None::<i32>.to_property_value().is_null());
/// ```
#[derive(Clone)]
pub enum PropertyValue<'a> {
    /// Nothing resolved, or the value is absent.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(Number),
    /// String value, borrowed when read from a field.
    String(Cow<'a, str>),
    /// Sequence of values.
    List(Vec<PropertyValue<'a>>),
    /// Nested registered object.
    Object(&'a dyn Reflect),
}

impl<'a> PropertyValue<'a> {
    /// Returns `true` if this is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, PropertyValue::Null)
    }

    /// Returns `true` if this is an `Object`.
    pub fn is_object(&self) -> bool {
        matches!(self, PropertyValue::Object(_))
    }

    /// Extracts the string value, if present.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Extracts the boolean value, if present.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Extracts the number value, if present.
    pub fn as_number(&self) -> Option<Number> {
        match self {
            PropertyValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Extracts the number as `i64` when it is an integer that fits.
    pub fn as_i64(&self) -> Option<i64> {
        match self.as_number()? {
            Number::I64(n) => Some(n),
            Number::U64(n) => i64::try_from(n).ok(),
            Number::F64(_) => None,
        }
    }

    /// Extracts the number as `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        self.as_number().map(Number::to_f64)
    }

    /// Extracts the list, if present.
    pub fn as_list(&self) -> Option<&[PropertyValue<'a>]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }

    /// Extracts the nested object, if present.
    pub fn as_object(&self) -> Option<&'a dyn Reflect> {
        match self {
            PropertyValue::Object(object) => Some(*object),
            _ => None,
        }
    }

    /// Returns the display name of this value's kind.
    pub fn kind(&self) -> &'static str {
        match self {
            PropertyValue::Null => "null",
            PropertyValue::Bool(_) => "bool",
            PropertyValue::Number(_) => "number",
            PropertyValue::String(_) => "string",
            PropertyValue::List(_) => "list",
            PropertyValue::Object(_) => "object",
        }
    }

    /// Converts the value to JSON.
    ///
    /// Objects become maps of their readable fields (own fields first, then
    /// ancestors). Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            PropertyValue::Null => serde_json::Value::Null,
            PropertyValue::Bool(b) => serde_json::Value::Bool(*b),
            PropertyValue::Number(n) => n.to_json(),
            PropertyValue::String(s) => serde_json::Value::String(s.to_string()),
            PropertyValue::List(items) => {
                serde_json::Value::Array(items.iter().map(PropertyValue::to_json).collect())
            }
            PropertyValue::Object(object) => serde_json::Value::Object(object_to_map(*object)),
        }
    }
}

/// Collects the readable fields of `object` and its ancestors into a map.
///
/// A field declared on both an object and one of its ancestors is taken
/// from the object.
pub(crate) fn object_to_map(object: &dyn Reflect) -> serde_json::Map<String, serde_json::Value> {
    let mut map = serde_json::Map::new();
    let mut current = Some(object);

    while let Some(object) = current {
        for field in object.type_info().fields {
            if map.contains_key(field.name) || !field.access.is_readable() {
                continue;
            }
            if let Some(value) = object.field(field.name) {
                map.insert(field.name.to_string(), value.to_json());
            }
        }
        current = object.parent();
    }

    map
}

impl fmt::Debug for PropertyValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::Null => write!(f, "Null"),
            PropertyValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            PropertyValue::Number(n) => f.debug_tuple("Number").field(n).finish(),
            PropertyValue::String(s) => f.debug_tuple("String").field(s).finish(),
            PropertyValue::List(items) => f.debug_tuple("List").field(items).finish(),
            PropertyValue::Object(object) => write!(f, "Object({})", object.type_info().name),
        }
    }
}

/// Objects compare by identity; every other kind compares by value.
impl PartialEq for PropertyValue<'_> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PropertyValue::Null, PropertyValue::Null) => true,
            (PropertyValue::Bool(a), PropertyValue::Bool(b)) => a == b,
            (PropertyValue::Number(a), PropertyValue::Number(b)) => {
                a.compare(*b) == Some(Ordering::Equal)
            }
            (PropertyValue::String(a), PropertyValue::String(b)) => a == b,
            (PropertyValue::List(a), PropertyValue::List(b)) => a == b,
            (PropertyValue::Object(a), PropertyValue::Object(b)) => std::ptr::addr_eq(*a, *b),
            _ => false,
        }
    }
}

/// Numeric value supporting all common numeric types.
///
/// Numbers are stored in one of three variants to preserve precision:
/// - `I64` for signed integers
/// - `U64` for unsigned integers
/// - `F64` for floating point
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    /// Signed 64-bit integer.
    I64(i64),
    /// Unsigned 64-bit integer.
    U64(u64),
    /// 64-bit floating point.
    F64(f64),
}

impl Number {
    /// Converts the number to f64.
    pub fn to_f64(self) -> f64 {
        match self {
            Number::I64(n) => n as f64,
            Number::U64(n) => n as f64,
            Number::F64(n) => n,
        }
    }

    /// Compares two numbers, handling mixed types.
    pub fn compare(self, other: Number) -> Option<Ordering> {
        match (self, other) {
            (Number::I64(a), Number::I64(b)) => Some(a.cmp(&b)),
            (Number::U64(a), Number::U64(b)) => Some(a.cmp(&b)),
            (Number::F64(a), Number::F64(b)) => a.partial_cmp(&b),
            (Number::I64(a), Number::U64(b)) => Some(compare_signed_unsigned(a, b)),
            (Number::U64(a), Number::I64(b)) => Some(compare_signed_unsigned(b, a).reverse()),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }

    fn to_json(self) -> serde_json::Value {
        match self {
            Number::I64(n) => serde_json::Value::from(n),
            Number::U64(n) => serde_json::Value::from(n),
            Number::F64(n) => serde_json::Number::from_f64(n)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
        }
    }
}

fn compare_signed_unsigned(a: i64, b: u64) -> Ordering {
    match u64::try_from(a) {
        Ok(a) => a.cmp(&b),
        Err(_) => Ordering::Less,
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(*other)
    }
}

macro_rules! number_from {
    ($variant:ident: $($t:ty),*) => {
        $(
            impl From<$t> for Number {
                fn from(n: $t) -> Self {
                    Number::$variant(n as _)
                }
            }
        )*
    };
}

number_from!(I64: i8, i16, i32, i64, isize);
number_from!(U64: u8, u16, u32, u64, usize);
number_from!(F64: f32, f64);

// ============================================================================
// Conversions
// ============================================================================

/// Reads a value by reference.
///
/// Implemented for primitives, strings, options, sequences, smart pointers
/// and every `#[derive(Reflect)]` type. Field values are read through this
/// trait.
pub trait ToPropertyValue {
    /// Returns the value, borrowing from `self` where possible.
    fn to_property_value(&self) -> PropertyValue<'_>;
}

/// Converts an owned or borrowed value into a [`PropertyValue`].
///
/// Accessor method results are converted through this trait, so accessors
/// may return owned values (`String`, `bool`, `Vec<_>`) as well as
/// references into `self`.
pub trait IntoPropertyValue<'a> {
    /// Performs the conversion.
    fn into_property_value(self) -> PropertyValue<'a>;
}

macro_rules! number_value {
    ($($t:ty),*) => {
        $(
            impl ToPropertyValue for $t {
                fn to_property_value(&self) -> PropertyValue<'_> {
                    PropertyValue::Number(Number::from(*self))
                }
            }

            impl<'a> IntoPropertyValue<'a> for $t {
                fn into_property_value(self) -> PropertyValue<'a> {
                    PropertyValue::Number(Number::from(self))
                }
            }

            impl<'a> From<$t> for PropertyValue<'a> {
                fn from(n: $t) -> Self {
                    PropertyValue::Number(Number::from(n))
                }
            }
        )*
    };
}

number_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl ToPropertyValue for bool {
    fn to_property_value(&self) -> PropertyValue<'_> {
        PropertyValue::Bool(*self)
    }
}

impl<'a> IntoPropertyValue<'a> for bool {
    fn into_property_value(self) -> PropertyValue<'a> {
        PropertyValue::Bool(self)
    }
}

impl ToPropertyValue for char {
    fn to_property_value(&self) -> PropertyValue<'_> {
        PropertyValue::String(Cow::Owned(self.to_string()))
    }
}

impl<'a> IntoPropertyValue<'a> for char {
    fn into_property_value(self) -> PropertyValue<'a> {
        PropertyValue::String(Cow::Owned(self.to_string()))
    }
}

impl ToPropertyValue for () {
    fn to_property_value(&self) -> PropertyValue<'_> {
        PropertyValue::Null
    }
}

impl<'a> IntoPropertyValue<'a> for () {
    fn into_property_value(self) -> PropertyValue<'a> {
        PropertyValue::Null
    }
}

impl ToPropertyValue for str {
    fn to_property_value(&self) -> PropertyValue<'_> {
        PropertyValue::String(Cow::Borrowed(self))
    }
}

impl ToPropertyValue for String {
    fn to_property_value(&self) -> PropertyValue<'_> {
        PropertyValue::String(Cow::Borrowed(self))
    }
}

impl<'a> IntoPropertyValue<'a> for String {
    fn into_property_value(self) -> PropertyValue<'a> {
        PropertyValue::String(Cow::Owned(self))
    }
}

impl<'a> IntoPropertyValue<'a> for Cow<'a, str> {
    fn into_property_value(self) -> PropertyValue<'a> {
        PropertyValue::String(self)
    }
}

impl<T: ToPropertyValue> ToPropertyValue for Option<T> {
    fn to_property_value(&self) -> PropertyValue<'_> {
        match self {
            Some(value) => value.to_property_value(),
            None => PropertyValue::Null,
        }
    }
}

impl<'a, T: IntoPropertyValue<'a>> IntoPropertyValue<'a> for Option<T> {
    fn into_property_value(self) -> PropertyValue<'a> {
        match self {
            Some(value) => value.into_property_value(),
            None => PropertyValue::Null,
        }
    }
}

impl<T: ToPropertyValue> ToPropertyValue for [T] {
    fn to_property_value(&self) -> PropertyValue<'_> {
        PropertyValue::List(self.iter().map(ToPropertyValue::to_property_value).collect())
    }
}

impl<T: ToPropertyValue> ToPropertyValue for Vec<T> {
    fn to_property_value(&self) -> PropertyValue<'_> {
        self.as_slice().to_property_value()
    }
}

impl<'a, T: IntoPropertyValue<'a>> IntoPropertyValue<'a> for Vec<T> {
    fn into_property_value(self) -> PropertyValue<'a> {
        PropertyValue::List(
            self.into_iter()
                .map(IntoPropertyValue::into_property_value)
                .collect(),
        )
    }
}

impl<T: ToPropertyValue + ?Sized> ToPropertyValue for Box<T> {
    fn to_property_value(&self) -> PropertyValue<'_> {
        (**self).to_property_value()
    }
}

impl<T: ToPropertyValue + ?Sized> ToPropertyValue for Rc<T> {
    fn to_property_value(&self) -> PropertyValue<'_> {
        (**self).to_property_value()
    }
}

impl<T: ToPropertyValue + ?Sized> ToPropertyValue for Arc<T> {
    fn to_property_value(&self) -> PropertyValue<'_> {
        (**self).to_property_value()
    }
}

impl<T: ToPropertyValue + ?Sized> ToPropertyValue for &T {
    fn to_property_value(&self) -> PropertyValue<'_> {
        (**self).to_property_value()
    }
}

impl ToPropertyValue for dyn Reflect + '_ {
    fn to_property_value(&self) -> PropertyValue<'_> {
        PropertyValue::Object(self)
    }
}

impl<'a, T: ToPropertyValue + ?Sized> IntoPropertyValue<'a> for &'a T {
    fn into_property_value(self) -> PropertyValue<'a> {
        T::to_property_value(self)
    }
}

impl<'a> IntoPropertyValue<'a> for PropertyValue<'a> {
    fn into_property_value(self) -> PropertyValue<'a> {
        self
    }
}

impl From<bool> for PropertyValue<'_> {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl<'a> From<&'a str> for PropertyValue<'a> {
    fn from(s: &'a str) -> Self {
        PropertyValue::String(Cow::Borrowed(s))
    }
}

impl From<String> for PropertyValue<'_> {
    fn from(s: String) -> Self {
        PropertyValue::String(Cow::Owned(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_checks() {
        assert!(PropertyValue::Null.is_null());
        assert_eq!(PropertyValue::from(true).kind(), "bool");
        assert_eq!(PropertyValue::from(1).kind(), "number");
        assert_eq!(PropertyValue::from("x").kind(), "string");
        assert_eq!(PropertyValue::List(vec![]).kind(), "list");
    }

    #[test]
    fn extractors() {
        assert_eq!(PropertyValue::from("hello").as_str(), Some("hello"));
        assert_eq!(PropertyValue::from(true).as_bool(), Some(true));
        assert_eq!(PropertyValue::from(42u64).as_i64(), Some(42));
        assert_eq!(PropertyValue::from(u64::MAX).as_i64(), None);
        assert_eq!(PropertyValue::from(1.5).as_f64(), Some(1.5));
        assert_eq!(PropertyValue::from(1.5).as_i64(), None);
        assert_eq!(PropertyValue::Null.as_str(), None);
        assert!(PropertyValue::from(1).as_object().is_none());
    }

    #[test]
    fn numbers_compare_across_variants() {
        assert_eq!(PropertyValue::from(123i32), PropertyValue::from(123u64));
        assert_eq!(PropertyValue::from(5i64), PropertyValue::from(5.0));
        assert_ne!(PropertyValue::from(5i64), PropertyValue::from(6u8));
        assert_ne!(PropertyValue::from(5i64), PropertyValue::from("5"));
    }

    #[test]
    fn number_compare_signed_unsigned() {
        assert_eq!(Number::I64(-1).compare(Number::U64(0)), Some(Ordering::Less));
        assert_eq!(Number::U64(u64::MAX).compare(Number::I64(i64::MAX)), Some(Ordering::Greater));
        assert_eq!(Number::F64(f64::NAN).compare(Number::F64(1.0)), None);
    }

    #[test]
    fn conversions_by_reference() {
        let name = String::from("lorem");
        assert_eq!(name.to_property_value(), PropertyValue::from("lorem"));
        assert_eq!(Some(3u8).to_property_value(), PropertyValue::from(3));
        assert_eq!(
            vec![1, 2].to_property_value(),
            PropertyValue::List(vec![PropertyValue::from(1), PropertyValue::from(2)])
        );
        assert_eq!(Box::new(true).to_property_value(), PropertyValue::from(true));
        assert_eq!('x'.to_property_value(), PropertyValue::from("x"));
        assert!(().to_property_value().is_null());
    }

    #[test]
    fn conversions_by_value() {
        assert_eq!(String::from("a").into_property_value(), PropertyValue::from("a"));
        assert_eq!(Some(false).into_property_value(), PropertyValue::from(false));
        assert!(None::<String>.into_property_value().is_null());

        let borrowed = String::from("b");
        assert!(matches!(
            (&borrowed).into_property_value(),
            PropertyValue::String(Cow::Borrowed("b"))
        ));
    }

    #[test]
    fn to_json() {
        let value = PropertyValue::List(vec![
            PropertyValue::from(1),
            PropertyValue::from("two"),
            PropertyValue::Null,
            PropertyValue::from(f64::NAN),
        ]);
        assert_eq!(value.to_json(), serde_json::json!([1, "two", null, null]));
    }

    #[test]
    fn debug_output() {
        assert_eq!(format!("{:?}", PropertyValue::Null), "Null");
        assert_eq!(format!("{:?}", PropertyValue::from(true)), "Bool(true)");
    }
}
