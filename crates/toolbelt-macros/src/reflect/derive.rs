//! Implementation of the `#[derive(Reflect)]` macro.
//!
//! This macro generates an implementation of the `Reflect` trait, a
//! `ToPropertyValue` impl exposing the struct as a nested object, and field
//! name constants.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::{parse_container_attrs, parse_field_attrs, Access};
use super::visibility_tokens;

/// Main implementation of the Reflect derive macro.
pub fn reflect_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    // Ensure we have a struct with named fields
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Reflect can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Reflect can only be derived for structs",
            ))
        }
    };

    // The metadata lives in a static, which cannot depend on generic parameters
    if !input.generics.params.is_empty() {
        return Err(Error::new(
            input.generics.span(),
            "Reflect cannot be derived for generic structs, implement it manually",
        ));
    }

    let container = parse_container_attrs(&input.attrs)?;
    let class_name = container
        .rename
        .clone()
        .unwrap_or_else(|| struct_name.to_string());

    let mut field_infos: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut read_arms: Vec<TokenStream> = Vec::new();
    let mut write_arms: Vec<TokenStream> = Vec::new();
    let mut parent = None;

    for field in fields.iter() {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_field_attrs(&field.attrs)?;

        if attrs.skip {
            continue;
        }

        if attrs.parent {
            if parent.is_some() {
                return Err(Error::new(
                    field.span(),
                    "only one field can be marked #[reflect(parent)]",
                ));
            }
            parent = Some(field_name);
            continue;
        }

        let property = attrs.rename.unwrap_or_else(|| field_name.to_string());
        let const_name = format_ident!("{}", to_screaming_snake_case(&property));
        let visibility = visibility_tokens(&field.vis);
        let access = match attrs.access {
            Access::ReadWrite => quote! { ::toolbelt_reflect::FieldAccess::ReadWrite },
            Access::ReadOnly => quote! { ::toolbelt_reflect::FieldAccess::ReadOnly },
            Access::Opaque => quote! { ::toolbelt_reflect::FieldAccess::Opaque },
        };

        field_constants.push(quote! {
            /// Registered property name.
            pub const #const_name: &'static str = #property;
        });

        field_infos.push(quote! {
            ::toolbelt_reflect::FieldInfo::new(#property, #visibility).with_access(#access)
        });

        if attrs.access != Access::Opaque {
            read_arms.push(quote! {
                #property => ::core::option::Option::Some(
                    ::toolbelt_reflect::ToPropertyValue::to_property_value(&self.#field_name)
                ),
            });
        }

        write_arms.push(match attrs.access {
            Access::ReadWrite => quote! {
                #property => {
                    self.#field_name = ::toolbelt_reflect::decode_field(#class_name, name, value)?;
                    ::core::result::Result::Ok(())
                }
            },
            Access::ReadOnly | Access::Opaque => quote! {
                #property => ::core::result::Result::Err(
                    ::toolbelt_reflect::ReflectionError::not_writable(#class_name, name)
                ),
            },
        });
    }

    let field_count = proc_macro2::Literal::usize_unsuffixed(field_infos.len());

    let methods = if container.methods {
        quote! { <#struct_name as ::toolbelt_reflect::ReflectMethods>::METHODS }
    } else {
        quote! { &[] }
    };

    let invoke = container.methods.then(|| {
        quote! {
            fn invoke(&self, method: &str) -> ::core::option::Option<::toolbelt_reflect::PropertyValue<'_>> {
                ::toolbelt_reflect::ReflectMethods::invoke_method(self, method)
            }
        }
    });

    let parent_fns = parent.map(|parent| {
        quote! {
            fn parent(&self) -> ::core::option::Option<&dyn ::toolbelt_reflect::Reflect> {
                ::core::option::Option::Some(&self.#parent)
            }

            fn parent_mut(&mut self) -> ::core::option::Option<&mut dyn ::toolbelt_reflect::Reflect> {
                ::core::option::Option::Some(&mut self.#parent)
            }
        }
    });

    let expanded = quote! {
        impl #struct_name {
            #(#field_constants)*
        }

        impl ::toolbelt_reflect::Reflect for #struct_name {
            fn type_info(&self) -> &'static ::toolbelt_reflect::TypeInfo {
                static FIELDS: [::toolbelt_reflect::FieldInfo; #field_count] = [#(#field_infos),*];
                static INFO: ::toolbelt_reflect::TypeInfo =
                    ::toolbelt_reflect::TypeInfo::new(#class_name, &FIELDS, #methods);
                &INFO
            }

            fn field(&self, name: &str) -> ::core::option::Option<::toolbelt_reflect::PropertyValue<'_>> {
                match name {
                    #(#read_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            #[allow(unused_variables)]
            fn set_field(
                &mut self,
                name: &str,
                value: ::toolbelt_reflect::__private::Value,
            ) -> ::toolbelt_reflect::Result<()> {
                match name {
                    #(#write_arms)*
                    _ => ::core::result::Result::Err(
                        ::toolbelt_reflect::ReflectionError::not_found(#class_name, name)
                    ),
                }
            }

            #invoke

            #parent_fns
        }

        impl ::toolbelt_reflect::ToPropertyValue for #struct_name {
            fn to_property_value(&self) -> ::toolbelt_reflect::PropertyValue<'_> {
                ::toolbelt_reflect::PropertyValue::Object(self)
            }
        }
    };

    Ok(expanded)
}

/// Convert a string to SCREAMING_SNAKE_CASE.
fn to_screaming_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let mut prev_was_lower = false;

    for c in s.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.push(c);
            prev_was_lower = false;
        } else if c == '_' || c == '-' {
            result.push('_');
            prev_was_lower = false;
        } else {
            result.push(c.to_ascii_uppercase());
            prev_was_lower = c.is_alphanumeric();
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_screaming_snake_case() {
        assert_eq!(to_screaming_snake_case("city"), "CITY");
        assert_eq!(to_screaming_snake_case("zip_code"), "ZIP_CODE");
        assert_eq!(to_screaming_snake_case("zipCode"), "ZIP_CODE");
        assert_eq!(to_screaming_snake_case("flat-number"), "FLAT_NUMBER");
        assert_eq!(to_screaming_snake_case("line2"), "LINE2");
    }

    #[test]
    fn test_rejects_enums() {
        let input: DeriveInput = parse_quote! {
            enum Shape { Circle, Square }
        };
        let err = reflect_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("only be derived for structs"));
    }

    #[test]
    fn test_rejects_tuple_structs() {
        let input: DeriveInput = parse_quote! {
            struct Meters(f64);
        };
        let err = reflect_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("named fields"));
    }

    #[test]
    fn test_rejects_generics() {
        let input: DeriveInput = parse_quote! {
            struct Wrapper<T> { inner: T }
        };
        let err = reflect_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("generic"));
    }

    #[test]
    fn test_rejects_two_parents() {
        let input: DeriveInput = parse_quote! {
            struct Child {
                #[reflect(parent)]
                a: Base,
                #[reflect(parent)]
                b: Base,
            }
        };
        let err = reflect_derive_impl(input).unwrap_err();
        assert!(err.to_string().contains("only one field"));
    }

    #[test]
    fn test_generates_registration() {
        let input: DeriveInput = parse_quote! {
            #[reflect(methods, rename = "Customer")]
            struct Client {
                #[reflect(parent)]
                base: Entity,
                pub name: String,
                #[reflect(opaque)]
                secret: String,
                #[reflect(skip)]
                cache: u64,
            }
        };
        let output = reflect_derive_impl(input).unwrap().to_string();

        assert!(output.contains("\"Customer\""));
        assert!(output.contains("pub const NAME"));
        assert!(output.contains("pub const SECRET"));
        assert!(!output.contains("CACHE"));
        assert!(!output.contains("\"base\""));
        assert!(output.contains("ReflectMethods"));
        assert!(output.contains("fn parent"));
        assert!(output.contains("\"name\""));
    }

    #[test]
    fn test_plain_struct_has_no_invoke() {
        let input: DeriveInput = parse_quote! {
            struct Point { x: i32, y: i32 }
        };
        let output = reflect_derive_impl(input).unwrap().to_string();

        assert!(!output.contains("fn invoke"));
        assert!(!output.contains("fn parent"));
        assert!(output.contains("\"Point\""));
    }
}
