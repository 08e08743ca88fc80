//! Implementation of the `#[derive(Reflect)]` and `#[reflect_methods]` macros.
//!
//! The derive registers fields and wires the `Reflect` trait; the attribute
//! registers accessor methods of an inherent impl block.

mod attrs;
mod derive;
mod methods;

use proc_macro2::TokenStream;
use quote::quote;

pub use derive::reflect_derive_impl;
pub use methods::reflect_methods_impl;

/// Maps a Rust visibility onto `toolbelt_reflect::Visibility`.
fn visibility_tokens(vis: &syn::Visibility) -> TokenStream {
    match vis {
        syn::Visibility::Public(_) => quote! { ::toolbelt_reflect::Visibility::Public },
        syn::Visibility::Restricted(_) => quote! { ::toolbelt_reflect::Visibility::Restricted },
        syn::Visibility::Inherited => quote! { ::toolbelt_reflect::Visibility::Private },
    }
}
