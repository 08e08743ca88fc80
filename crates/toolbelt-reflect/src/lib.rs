//! Reflect - registered property access for Rust structs.
//!
//! Reflect reads and writes properties of objects by name without the caller
//! knowing whether a value lives in a field, in a field of an ancestor, or
//! behind an accessor method. It supports:
//!
//! - Declared field reads, including private fields the type registers
//! - Inherited fields through a registered parent object
//! - Accessor methods named `get_*`, `has_*`, `is_*` (public ones only)
//! - Dot-separated property chains with null short-circuiting
//! - Field writes with typed errors
//!
//! Types opt in through the [`Reflect`] trait, usually derived with
//! `#[derive(Reflect)]` from `toolbelt-macros`. Nothing is discovered at
//! runtime: the fields and methods a type exposes form a closed list.
//!
//! # Quick Start
//!
//! ```rust
//! use toolbelt_reflect::{
//!     decode_field, FieldInfo, PropertyResolver, PropertyValue, Reflect, ReflectionError,
//!     Result, ToPropertyValue, TypeInfo, Visibility,
//! };
//!
//! struct Task {
//!     name: String,
//!     priority: u8,
//! }
//!
//! static TASK_FIELDS: [FieldInfo; 2] = [
//!     FieldInfo::new("name", Visibility::Private),
//!     FieldInfo::new("priority", Visibility::Private),
//! ];
//! static TASK: TypeInfo = TypeInfo::new("Task", &TASK_FIELDS, &[]);
//!
//! impl Reflect for Task {
//!     fn type_info(&self) -> &'static TypeInfo {
//!         &TASK
//!     }
//!
//!     fn field(&self, name: &str) -> Option<PropertyValue<'_>> {
//!         match name {
//!             "name" => Some(self.name.to_property_value()),
//!             "priority" => Some(self.priority.to_property_value()),
//!             _ => None,
//!         }
//!     }
//!
//!     fn set_field(&mut self, name: &str, value: serde_json::Value) -> Result<()> {
//!         match name {
//!             "name" => self.name = decode_field("Task", name, value)?,
//!             "priority" => self.priority = decode_field("Task", name, value)?,
//!             _ => return Err(ReflectionError::not_found("Task", name)),
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let resolver = PropertyResolver::new();
//! let mut task = Task { name: "Write docs".into(), priority: 3 };
//!
//! assert_eq!(resolver.get(&task, "priority"), PropertyValue::from(3));
//!
//! resolver.set_value(&mut task, "priority", 5).unwrap();
//! assert_eq!(task.priority, 5);
//!
//! let err = resolver.set_value(&mut task, "notAField", 1).unwrap_err();
//! assert!(matches!(err, ReflectionError::PropertyNotFound { class: "Task", .. }));
//! ```
//!
//! # Resolution Order
//!
//! ```text
//! resolve(object, "a.b")  = resolve(resolve(object, "a"), "b")    (Null stops the walk)
//! resolve(object, "name") = own field
//!                         | ancestor field (nearest first)
//!                         | get_name | has_name | is_name        (public, when forced or declared)
//!                         | Null
//! ```
//!
//! # Failure Semantics
//!
//! Reads never fail. Writes return [`ReflectionError`].

mod config;
mod error;
mod info;
mod resolver;
mod traits;
mod value;

// Re-export public API
pub use config::ResolverConfig;
pub use error::{decode_field, ReflectionError, Result};
pub use info::{FieldAccess, FieldInfo, MethodInfo, TypeInfo, Visibility};
pub use resolver::{
    get_properties_values, get_property_value, set_properties_values, set_property_value,
    PropertyResolver,
};
pub use traits::{Reflect, ReflectMethods};
pub use value::{IntoPropertyValue, Number, PropertyValue, ToPropertyValue};

// Paths used by code generated in `toolbelt-macros`.
#[doc(hidden)]
pub mod __private {
    pub use serde_json::Value;
}
