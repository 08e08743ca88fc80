//! `#[reflect_methods]` attribute for inherent impl blocks.
//!
//! Registers every accessor-shaped method of the block: a method taking
//! `&self` and nothing else, returning a value. Other methods are left
//! alone.
//!
//! ```rust,ignore
//! #[reflect_methods]
//! impl Person {
//!     pub fn get_full_name(&self) -> String { ... }
//!     fn get_password(&self) -> &str { ... }        // registered as private
//!     #[reflect(skip)]
//!     pub fn is_dirty(&self) -> bool { ... }        // not registered
//!     pub fn rename(&mut self, name: String) { ... } // not accessor-shaped
//! }
//!
//! // Generates, next to the unchanged block:
//! // impl ReflectMethods for Person {
//! //     const METHODS: &'static [MethodInfo] = &[
//! //         MethodInfo::new("get_full_name", Visibility::Public),
//! //         MethodInfo::new("get_password", Visibility::Private),
//! //     ];
//! //     fn invoke_method(&self, name: &str) -> Option<PropertyValue<'_>> { ... }
//! // }
//! ```

use proc_macro2::{TokenStream, TokenTree};
use quote::{quote, ToTokens};
use syn::{spanned::Spanned, Error, FnArg, ImplItem, ImplItemFn, ItemImpl, Result, ReturnType, Type};

use super::attrs::parse_method_attrs;
use super::visibility_tokens;

/// Main implementation of the `#[reflect_methods]` attribute.
pub fn reflect_methods_impl(attr: TokenStream, item: TokenStream) -> Result<TokenStream> {
    if !attr.is_empty() {
        return Err(Error::new(attr.span(), "reflect_methods takes no arguments"));
    }

    let mut item: ItemImpl = syn::parse2(item)?;

    if let Some((_, path, _)) = &item.trait_ {
        return Err(Error::new(
            path.span(),
            "reflect_methods must be placed on an inherent impl block",
        ));
    }
    if !item.generics.params.is_empty() {
        return Err(Error::new(
            item.generics.span(),
            "reflect_methods cannot be used on generic impl blocks",
        ));
    }

    let mut method_infos: Vec<TokenStream> = Vec::new();
    let mut invoke_arms: Vec<TokenStream> = Vec::new();

    for impl_item in item.items.iter_mut() {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };

        let attrs = parse_method_attrs(&method.attrs)?;
        // The attribute is not registered with the compiler, it must not survive
        method.attrs.retain(|attr| !attr.path().is_ident("reflect"));

        if attrs.skip || !is_accessor_shaped(method) {
            continue;
        }

        let method_ident = &method.sig.ident;
        let method_name = method_ident.to_string();
        let visibility = visibility_tokens(&method.vis);

        method_infos.push(quote! {
            ::toolbelt_reflect::MethodInfo::new(#method_name, #visibility)
        });
        invoke_arms.push(quote! {
            #method_name => ::core::option::Option::Some(
                ::toolbelt_reflect::IntoPropertyValue::into_property_value(self.#method_ident())
            ),
        });
    }

    let self_ty = &item.self_ty;

    Ok(quote! {
        #item

        impl ::toolbelt_reflect::ReflectMethods for #self_ty {
            const METHODS: &'static [::toolbelt_reflect::MethodInfo] = &[#(#method_infos),*];

            fn invoke_method(&self, name: &str) -> ::core::option::Option<::toolbelt_reflect::PropertyValue<'_>> {
                match name {
                    #(#invoke_arms)*
                    _ => ::core::option::Option::None,
                }
            }
        }
    })
}

/// `&self` only, no generics, not async or unsafe, with a named return type.
fn is_accessor_shaped(method: &ImplItemFn) -> bool {
    let sig = &method.sig;

    if sig.asyncness.is_some() || sig.unsafety.is_some() || !sig.generics.params.is_empty() {
        return false;
    }
    match &sig.output {
        ReturnType::Default => return false,
        ReturnType::Type(_, ty) if returns_impl_trait(ty) => return false,
        ReturnType::Type(..) => {}
    }

    let mut inputs = sig.inputs.iter();
    match (inputs.next(), inputs.next()) {
        (Some(FnArg::Receiver(receiver)), None) => {
            receiver.reference.is_some() && receiver.mutability.is_none()
        }
        _ => false,
    }
}

/// `impl Trait` anywhere in the type, including `Option<impl Trait>`.
fn returns_impl_trait(ty: &Type) -> bool {
    ty.to_token_stream()
        .into_iter()
        .any(|token| contains_impl(&token))
}

fn contains_impl(token: &TokenTree) -> bool {
    match token {
        TokenTree::Ident(ident) => ident == "impl",
        TokenTree::Group(group) => group.stream().into_iter().any(|token| contains_impl(&token)),
        _ => false,
    }
}
