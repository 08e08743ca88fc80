//! Proc macros for toolbelt.
//!
//! This crate registers struct fields and accessor methods with
//! `toolbelt-reflect`, so that a `PropertyResolver` can read and write them
//! by name.
//!
//! # Available Macros
//!
//! - [`Reflect`] - Derive `Reflect` from struct field annotations
//! - [`reflect_methods`] - Register the accessor methods of an impl block
//!
//! Generated code refers to `::toolbelt_reflect`, so the crate using the
//! macros must depend on `toolbelt-reflect` directly.
//!
//! # Examples
//!
//! For working examples, see `toolbelt/tests/reflect_derive.rs`.

mod reflect;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives the `Reflect` trait for a struct with named fields.
///
/// # Container Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `methods` | Dispatch accessor lookups to the `#[reflect_methods]` block of the type |
/// | `rename = "..."` | Registered class name (default: struct name) |
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | *(none)* | Readable and writable field |
/// | `readonly` | Readable field, writes fail with `PropertyNotWritable` |
/// | `opaque` | Declared field whose value is only reachable through accessors |
/// | `parent` | Holds the parent object whose fields are inherited |
/// | `skip` | Exclude this field |
/// | `rename = "..."` | Use a custom property name |
///
/// Writable fields must implement `serde::Deserialize`; readable fields must
/// implement `ToPropertyValue`. Deriving `Reflect` on a struct also
/// implements `ToPropertyValue` for it, so it can be nested in another
/// reflected struct and traversed with property chains.
///
/// The visibility of each field (`pub`, `pub(crate)`, private) is recorded
/// as metadata. It does not restrict reads.
///
/// # Generated Code
///
/// 1. Property name constants (e.g., `Address::CITY`)
/// 2. Implementation of `Reflect` backed by a static `TypeInfo`
/// 3. Implementation of `ToPropertyValue` returning `PropertyValue::Object`
///
/// # Example
///
/// ```ignore
/// use toolbelt_macros::{reflect_methods, Reflect};
/// use toolbelt_reflect::{PropertyResolver, PropertyValue};
///
/// #[derive(Reflect)]
/// struct Entity {
///     id: u32,
/// }
///
/// #[derive(Reflect)]
/// #[reflect(methods)]
/// struct User {
///     #[reflect(parent)]
///     entity: Entity,
///     pub login: String,
///     #[reflect(opaque)]
///     password: String,
/// }
///
/// #[reflect_methods]
/// impl User {
///     pub fn has_password(&self) -> bool {
///         !self.password.is_empty()
///     }
/// }
///
/// let user = User { entity: Entity { id: 1 }, login: "jo".into(), password: "x".into() };
/// let resolver = PropertyResolver::new();
///
/// assert_eq!(resolver.get(&user, User::LOGIN), PropertyValue::from("jo"));
/// assert_eq!(resolver.get(&user, "id"), PropertyValue::from(1));
/// assert_eq!(resolver.get(&user, "password"), PropertyValue::from(true));
/// ```
///
/// # Limitations
///
/// Generic structs are rejected: the metadata lives in a `static`.
/// Implement `Reflect` manually for those.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn reflect_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    reflect::reflect_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}

/// Registers the accessor methods of an inherent impl block.
///
/// Every method taking only `&self` and returning a value is registered
/// under its own name, with its visibility. Resolution only calls public
/// methods; private ones are recorded so they can be skipped.
///
/// Methods returning `impl Trait` are never registered. Any other
/// registered return type must implement `IntoPropertyValue` (strings,
/// numbers, booleans, options, vectors, and references to reflected structs
/// do); mark methods returning anything else, such as a `Result` or an
/// owned struct, `#[reflect(skip)]`.
///
/// | Method attribute | Effect |
/// |------------------|--------|
/// | `#[reflect(skip)]` | Not registered as an accessor |
///
/// Pair it with `#[reflect(methods)]` on the struct so the derived
/// `Reflect` impl sees the methods.
///
/// ```ignore
/// #[reflect_methods]
/// impl Address {
///     pub fn get_full_street(&self) -> String {
///         format!("{} {}", self.street, self.building_number)
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn reflect_methods(attr: TokenStream, item: TokenStream) -> TokenStream {
    let attr = proc_macro2::TokenStream::from(attr);
    let item = proc_macro2::TokenStream::from(item);
    reflect::reflect_methods_impl(attr, item)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
