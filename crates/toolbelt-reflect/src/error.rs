//! Error types for the reflect crate.

use thiserror::Error;

/// Errors raised when writing properties.
///
/// Reads never fail: a property that cannot be resolved reads as
/// [`PropertyValue::Null`](crate::PropertyValue::Null).
#[derive(Debug, Error)]
pub enum ReflectionError {
    /// The object and its ancestors declare no field with this name.
    #[error("property '{property}' does not exist in instance of class '{class}'. Did you use proper name of property?")]
    PropertyNotFound {
        class: &'static str,
        property: String,
    },

    /// The field is declared but registered as opaque or read-only.
    #[error("property '{property}' of class '{class}' is not writable")]
    PropertyNotWritable {
        class: &'static str,
        property: String,
    },

    /// The value could not be converted into the field's type.
    #[error("invalid value for property '{property}' of class '{class}': {source}")]
    InvalidPropertyValue {
        class: &'static str,
        property: String,
        #[source]
        source: serde_json::Error,
    },

    /// The object sits behind a shared handle and cannot be borrowed mutably.
    #[error("instance of class '{class}' is shared and cannot be modified")]
    SharedInstance { class: &'static str },
}

impl ReflectionError {
    /// Creates a [`ReflectionError::PropertyNotFound`].
    pub fn not_found(class: &'static str, property: impl Into<String>) -> Self {
        ReflectionError::PropertyNotFound {
            class,
            property: property.into(),
        }
    }

    /// Creates a [`ReflectionError::PropertyNotWritable`].
    pub fn not_writable(class: &'static str, property: impl Into<String>) -> Self {
        ReflectionError::PropertyNotWritable {
            class,
            property: property.into(),
        }
    }

    /// Returns the name of the class the error refers to.
    pub fn class(&self) -> &'static str {
        match self {
            ReflectionError::PropertyNotFound { class, .. }
            | ReflectionError::PropertyNotWritable { class, .. }
            | ReflectionError::InvalidPropertyValue { class, .. }
            | ReflectionError::SharedInstance { class } => class,
        }
    }
}

/// Result type for reflect operations.
pub type Result<T> = std::result::Result<T, ReflectionError>;

/// Deserializes a field value, mapping failures to
/// [`ReflectionError::InvalidPropertyValue`].
///
/// Used by `#[derive(Reflect)]` to implement [`Reflect::set_field`].
///
/// [`Reflect::set_field`]: crate::Reflect::set_field
pub fn decode_field<T>(class: &'static str, property: &str, value: serde_json::Value) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|source| ReflectionError::InvalidPropertyValue {
        class,
        property: property.to_string(),
        source,
    })
}
