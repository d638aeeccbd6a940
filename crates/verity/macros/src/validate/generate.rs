//! Code generation for `#[derive(Validate)]`

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{DeriveInput, Field, GenericParam, Generics, Visibility, parse_quote};

use super::parse::FieldAttrs;
use crate::shared::require_named_struct;

/// Generates `impl ::verity::ToValue` producing a `Value::Struct`.
pub(super) fn generate_to_value(input: &DeriveInput) -> syn::Result<TokenStream> {
    let name = &input.ident;
    let type_name = name.unraw().to_string();
    let fields = require_named_struct(input)?;

    let mut entries = Vec::with_capacity(fields.named.len());
    for field in &fields.named {
        let attrs = FieldAttrs::from_attributes(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        entries.push(field_entry(field, &attrs)?);
    }

    let generics = add_trait_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::verity::ToValue for #name #ty_generics #where_clause {
            fn to_value(&self) -> ::verity::Value {
                ::verity::Value::Struct(::verity::StructValue::new(
                    #type_name,
                    ::std::vec![#(#entries),*],
                ))
            }
        }
    })
}

/// One `Field::new(..)` expression.
fn field_entry(field: &Field, attrs: &FieldAttrs) -> syn::Result<TokenStream> {
    let Some(ident) = field.ident.as_ref() else {
        return Err(syn::Error::new_spanned(field, "expected a named field"));
    };
    let path_name = attrs
        .rename
        .as_ref()
        .map_or_else(|| ident.unraw().to_string(), syn::LitStr::value);

    let exported = matches!(field.vis, Visibility::Public(_));
    let value = if exported {
        quote! { ::verity::ToValue::to_value(&self.#ident) }
    } else {
        quote! { ::verity::Value::Null }
    };

    let mut entry = quote! { ::verity::Field::new(#path_name, #value) };
    if let Some(tag) = &attrs.tag {
        entry = quote! { #entry.with_tag(#tag) };
    }
    if !exported {
        entry = quote! { #entry.with_exported(false) };
    }
    Ok(entry)
}

fn add_trait_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(ty) = param {
            ty.bounds.push(parse_quote!(::verity::ToValue));
        }
    }
    generics
}
