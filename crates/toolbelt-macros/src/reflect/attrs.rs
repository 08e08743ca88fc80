//! Attribute parsing for the Reflect macros.
//!
//! This module provides parsers for the `#[reflect(...)]` attributes used on
//! structs, on their fields, and on methods inside `#[reflect_methods]`
//! impl blocks.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Lit, Meta, Result, Token,
};

/// Access mode requested for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadWrite,
    /// `#[reflect(readonly)]`
    ReadOnly,
    /// `#[reflect(opaque)]`
    Opaque,
}

/// Field-level attributes from `#[reflect(...)]`.
#[derive(Debug, Clone)]
pub struct FieldAttr {
    /// Leave the field out of the registered list.
    pub skip: bool,
    /// The field holds the parent object.
    pub parent: bool,
    pub access: Access,
    /// Registered name (default: field name).
    pub rename: Option<String>,
    /// The span for error reporting.
    pub span: Span,
}

impl Default for FieldAttr {
    fn default() -> Self {
        FieldAttr {
            skip: false,
            parent: false,
            access: Access::ReadWrite,
            rename: None,
            span: Span::call_site(),
        }
    }
}

impl Parse for FieldAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = FieldAttr {
            span: input.span(),
            ..FieldAttr::default()
        };

        for meta in Punctuated::<Meta, Token![,]>::parse_terminated(input)? {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::Path(p) if p.is_ident("parent") => attr.parent = true,
                Meta::Path(p) if p.is_ident("readonly") => {
                    attr.set_access(Access::ReadOnly, p.span())?
                }
                Meta::Path(p) if p.is_ident("opaque") => attr.set_access(Access::Opaque, p.span())?,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_value(&nv.value, "rename")?);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown reflect attribute. Expected: skip, parent, readonly, opaque, or rename = \"...\"",
                    ));
                }
            }
        }

        if attr.parent && (attr.skip || attr.rename.is_some() || attr.access != Access::ReadWrite) {
            return Err(Error::new(
                attr.span,
                "reflect(parent) cannot be combined with other field attributes",
            ));
        }

        Ok(attr)
    }
}

impl FieldAttr {
    fn set_access(&mut self, access: Access, span: Span) -> Result<()> {
        if self.access != Access::ReadWrite && self.access != access {
            return Err(Error::new(span, "readonly and opaque are mutually exclusive"));
        }
        self.access = access;
        Ok(())
    }
}

/// Struct-level attributes from `#[reflect(...)]`.
#[derive(Debug, Clone, Default)]
pub struct ContainerAttr {
    /// Dispatch accessor calls to the `ReflectMethods` impl.
    pub methods: bool,
    /// Registered class name (default: struct name).
    pub rename: Option<String>,
}

impl Parse for ContainerAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = ContainerAttr::default();

        for meta in Punctuated::<Meta, Token![,]>::parse_terminated(input)? {
            match &meta {
                Meta::Path(p) if p.is_ident("methods") => attr.methods = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => {
                    attr.rename = Some(string_value(&nv.value, "rename")?);
                }
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown reflect attribute. Expected: methods or rename = \"...\"",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

/// Method-level attributes inside a `#[reflect_methods]` block.
#[derive(Debug, Clone, Default)]
pub struct MethodAttr {
    /// Leave the method out of the registered list.
    pub skip: bool,
}

impl Parse for MethodAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = MethodAttr::default();

        for meta in Punctuated::<Meta, Token![,]>::parse_terminated(input)? {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown reflect attribute on method. Expected: skip",
                    ));
                }
            }
        }

        Ok(attr)
    }
}

fn string_value(expr: &syn::Expr, key: &str) -> Result<String> {
    match expr {
        syn::Expr::Lit(syn::ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        other => Err(Error::new(
            other.span(),
            format!("{} must be a string literal", key),
        )),
    }
}

/// Extract the `#[reflect(...)]` attribute of a field.
pub fn parse_field_attrs(attrs: &[Attribute]) -> Result<FieldAttr> {
    parse_reflect_attr(attrs).map(Option::unwrap_or_default)
}

/// Extract the `#[reflect(...)]` attribute of a struct.
pub fn parse_container_attrs(attrs: &[Attribute]) -> Result<ContainerAttr> {
    parse_reflect_attr(attrs).map(Option::unwrap_or_default)
}

/// Extract the `#[reflect(...)]` attribute of a method.
pub fn parse_method_attrs(attrs: &[Attribute]) -> Result<MethodAttr> {
    parse_reflect_attr(attrs).map(Option::unwrap_or_default)
}

fn parse_reflect_attr<T: Parse>(attrs: &[Attribute]) -> Result<Option<T>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("reflect")) {
        if found.is_some() {
            return Err(Error::new(
                attr.span(),
                "duplicate reflect attribute, combine them as #[reflect(a, b)]",
            ));
        }
        found = Some(attr.parse_args::<T>()?);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_field(tokens: &str) -> Result<FieldAttr> {
        syn::parse_str::<FieldAttr>(tokens)
    }

    #[test]
    fn test_field_defaults() {
        let attr = parse_field("").unwrap();
        assert!(!attr.skip);
        assert!(!attr.parent);
        assert_eq!(attr.access, Access::ReadWrite);
        assert_eq!(attr.rename, None);
    }

    #[test]
    fn test_field_skip() {
        assert!(parse_field("skip").unwrap().skip);
    }

    #[test]
    fn test_field_access_modes() {
        assert_eq!(parse_field("readonly").unwrap().access, Access::ReadOnly);
        assert_eq!(parse_field("opaque").unwrap().access, Access::Opaque);
    }

    #[test]
    fn test_field_rename() {
        let attr = parse_field(r#"readonly, rename = "zipCode""#).unwrap();
        assert_eq!(attr.access, Access::ReadOnly);
        assert_eq!(attr.rename, Some("zipCode".to_string()));
    }

    #[test]
    fn test_field_parent() {
        assert!(parse_field("parent").unwrap().parent);
    }

    #[test]
    fn test_field_parent_is_exclusive() {
        let err = parse_field("parent, opaque").unwrap_err();
        assert!(err.to_string().contains("cannot be combined"));
    }

    #[test]
    fn test_field_conflicting_access() {
        let err = parse_field("readonly, opaque").unwrap_err();
        assert!(err.to_string().contains("mutually exclusive"));
    }

    #[test]
    fn test_field_rename_requires_string() {
        let err = parse_field("rename = 3").unwrap_err();
        assert!(err.to_string().contains("string literal"));
    }

    #[test]
    fn test_field_unknown() {
        let err = parse_field("hidden").unwrap_err();
        assert!(err.to_string().contains("unknown reflect attribute"));
    }

    #[test]
    fn test_container_attrs() {
        let attr = syn::parse_str::<ContainerAttr>(r#"methods, rename = "Person""#).unwrap();
        assert!(attr.methods);
        assert_eq!(attr.rename, Some("Person".to_string()));

        assert!(syn::parse_str::<ContainerAttr>("skip").is_err());
    }

    #[test]
    fn test_method_attrs() {
        assert!(syn::parse_str::<MethodAttr>("skip").unwrap().skip);
        assert!(syn::parse_str::<MethodAttr>("opaque").is_err());
    }

    #[test]
    fn test_duplicate_attribute() {
        let field: syn::Field = syn::parse_quote! {
            #[reflect(skip)]
            #[reflect(opaque)]
            secret: String
        };
        let err = parse_field_attrs(&field.attrs).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_other_attributes_ignored() {
        let field: syn::Field = syn::parse_quote! {
            #[serde(default)]
            name: String
        };
        let attr = parse_field_attrs(&field.attrs).unwrap();
        assert!(!attr.skip);
    }
}
