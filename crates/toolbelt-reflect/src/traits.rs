//! Traits for derive macro support.
//!
//! This module provides the [`Reflect`] trait, which is implemented by the
//! `#[derive(Reflect)]` macro to expose a closed list of fields to generic
//! code, and [`ReflectMethods`], implemented by `#[reflect_methods]` to
//! register accessor methods.

use std::rc::Rc;
use std::sync::Arc;

use crate::error::{ReflectionError, Result};
use crate::info::{MethodInfo, TypeInfo};
use crate::value::PropertyValue;

/// Trait for types whose properties can be read and written by name.
///
/// This trait is typically derived using `#[derive(Reflect)]` from the
/// `toolbelt-macros` crate, but can also be implemented manually.
///
/// # Derive Usage
///
/// ```ignore
/// use toolbelt_macros::{reflect_methods, Reflect};
///
/// #[derive(Reflect)]
/// struct Entity {
///     id: u32,
/// }
///
/// #[derive(Reflect)]
/// #[reflect(methods)]
/// struct Person {
///     #[reflect(parent)]
///     entity: Entity,
///     pub first_name: String,
///     #[reflect(opaque)]
///     password: String,
/// }
///
/// #[reflect_methods]
/// impl Person {
///     pub fn get_password(&self) -> &str {
///         "***"
///     }
/// }
/// ```
///
/// # Manual Implementation
///
/// ```
/// use toolbelt_reflect::{
///     decode_field, FieldInfo, PropertyValue, Reflect, ReflectionError, Result,
///     ToPropertyValue, TypeInfo, Visibility,
/// };
///
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// static POINT_FIELDS: [FieldInfo; 2] = [
///     FieldInfo::new("x", Visibility::Private),
///     FieldInfo::new("y", Visibility::Private),
/// ];
/// static POINT: TypeInfo = TypeInfo::new("Point", &POINT_FIELDS, &[]);
///
/// impl Reflect for Point {
///     fn type_info(&self) -> &'static TypeInfo {
///         &POINT
///     }
///
///     fn field(&self, name: &str) -> Option<PropertyValue<'_>> {
///         match name {
///             "x" => Some(self.x.to_property_value()),
///             "y" => Some(self.y.to_property_value()),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: serde_json::Value) -> Result<()> {
///         match name {
///             "x" => self.x = decode_field("Point", name, value)?,
///             "y" => self.y = decode_field("Point", name, value)?,
///             _ => return Err(ReflectionError::not_found("Point", name)),
///         }
///         Ok(())
///     }
/// }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(point.field("y"), Some(PropertyValue::from(2)));
/// ```
pub trait Reflect {
    /// Returns the registered metadata of the concrete type.
    fn type_info(&self) -> &'static TypeInfo;

    /// Reads a readable field declared directly on this type.
    ///
    /// Returns `None` for unknown and opaque fields. Fields of the parent
    /// object are not consulted.
    fn field(&self, name: &str) -> Option<PropertyValue<'_>>;

    /// Writes a writable field declared directly on this type.
    ///
    /// # Errors
    ///
    /// - [`ReflectionError::PropertyNotFound`] if no such field is declared
    /// - [`ReflectionError::PropertyNotWritable`] for opaque or read-only fields
    /// - [`ReflectionError::InvalidPropertyValue`] if `value` does not fit
    fn set_field(&mut self, name: &str, value: serde_json::Value) -> Result<()>;

    /// Calls a registered accessor method, regardless of its visibility.
    ///
    /// Returns `None` if no method with that name is registered.
    fn invoke(&self, method: &str) -> Option<PropertyValue<'_>> {
        let _ = method;
        None
    }

    /// Returns the parent object whose fields this type inherits.
    fn parent(&self) -> Option<&dyn Reflect> {
        None
    }

    /// Returns the parent object mutably.
    fn parent_mut(&mut self) -> Option<&mut dyn Reflect> {
        None
    }
}

/// Accessor method table of a type.
///
/// Implemented by `#[reflect_methods]` on an inherent `impl` block. Every
/// method taking only `&self` is registered under its own name.
pub trait ReflectMethods {
    /// Registered methods, in declaration order.
    const METHODS: &'static [MethodInfo];

    /// Calls the method named `name`.
    fn invoke_method(&self, name: &str) -> Option<PropertyValue<'_>>;
}

impl<T: Reflect + ?Sized> Reflect for Box<T> {
    fn type_info(&self) -> &'static TypeInfo {
        (**self).type_info()
    }

    fn field(&self, name: &str) -> Option<PropertyValue<'_>> {
        (**self).field(name)
    }

    fn set_field(&mut self, name: &str, value: serde_json::Value) -> Result<()> {
        (**self).set_field(name, value)
    }

    fn invoke(&self, method: &str) -> Option<PropertyValue<'_>> {
        (**self).invoke(method)
    }

    fn parent(&self) -> Option<&dyn Reflect> {
        (**self).parent()
    }

    fn parent_mut(&mut self) -> Option<&mut dyn Reflect> {
        (**self).parent_mut()
    }
}

macro_rules! shared_reflect {
    ($($ptr:ident),*) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $ptr<T> {
                fn type_info(&self) -> &'static TypeInfo {
                    (**self).type_info()
                }

                fn field(&self, name: &str) -> Option<PropertyValue<'_>> {
                    (**self).field(name)
                }

                /// Writes through the handle when it is the only one.
                fn set_field(&mut self, name: &str, value: serde_json::Value) -> Result<()> {
                    let class = self.type_info().name;
                    match $ptr::get_mut(self) {
                        Some(inner) => inner.set_field(name, value),
                        None => Err(ReflectionError::SharedInstance { class }),
                    }
                }

                fn invoke(&self, method: &str) -> Option<PropertyValue<'_>> {
                    (**self).invoke(method)
                }

                fn parent(&self) -> Option<&dyn Reflect> {
                    (**self).parent()
                }

                fn parent_mut(&mut self) -> Option<&mut dyn Reflect> {
                    $ptr::get_mut(self).and_then(|inner| inner.parent_mut())
                }
            }
        )*
    };
}

shared_reflect!(Rc, Arc);
