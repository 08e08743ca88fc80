//! # Toolbelt - Typed Collections and Property Access
//!
//! Toolbelt bundles a few small building blocks:
//!
//! - [`TypedContainer`]: an ordered, keyed collection that filters its
//!   initial elements through an [`ElementPolicy`] and answers neighbor and
//!   position queries
//! - [`PropertyResolver`]: reads properties of registered structs by name,
//!   through fields, inherited fields, and `get_`/`has_`/`is_` accessors,
//!   including dot-separated chains like `"address.city"`
//! - [`Reflect`] and [`reflect_methods`]: derive and attribute macros
//!   registering fields and accessors
//! - Value objects: [`Template`], [`Templates`], [`Version`], [`Size`],
//!   [`Address`]
//!
//! ## Quick Start
//!
//! ```rust
//! use toolbelt::{Address, PropertyResolver, PropertyValue, Reflect, TypedContainer};
//!
//! #[derive(Reflect)]
//! struct Company {
//!     pub name: String,
//!     pub address: Option<Address>,
//! }
//!
//! let companies: TypedContainer<Company> = TypedContainer::from_values([
//!     Company {
//!         name: "Acme".into(),
//!         address: Some(Address::new("Berlin", "10115", "Invalidenstrasse", "1")),
//!     },
//!     Company { name: "Nowhere Ltd".into(), address: None },
//! ]);
//!
//! let resolver = PropertyResolver::new();
//! let cities = resolver.resolve_collection(&companies, "address.city", false);
//! assert_eq!(cities, vec![PropertyValue::from("Berlin")]);
//!
//! let streets = resolver.resolve_collection(&companies, "address.full_street", true);
//! assert_eq!(streets, vec![PropertyValue::from("Invalidenstrasse 1")]);
//! ```
//!
//! The derive macros emit paths under `::toolbelt_reflect`, so crates
//! deriving [`Reflect`] depend on `toolbelt-reflect` alongside `toolbelt`.

mod address;
mod error;
mod size;
mod template;
mod version;

pub use toolbelt_collection as collection;
pub use toolbelt_reflect as reflect;

pub use toolbelt_collection::{AnyElement, ElementPolicy, FnPolicy, Key, TypedContainer};
pub use toolbelt_reflect::{
    PropertyResolver, PropertyValue, Reflect, ReflectionError, ResolverConfig, ToPropertyValue,
};

// Derive macro (shares its name with the trait, like serde's derives)
pub use toolbelt_macros::{reflect_methods, Reflect};

pub use address::Address;
pub use error::{Result, TemplateError};
pub use size::{Size, DEFAULT_SEPARATOR, DEFAULT_UNIT};
pub use template::{Template, Templates};
pub use version::Version;
