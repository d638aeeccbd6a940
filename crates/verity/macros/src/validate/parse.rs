//! Parsing of `#[validate ...]` field attributes

use syn::{Attribute, Expr, ExprLit, Lit, LitStr, Meta};

/// Everything a field's `validate` attributes can say.
#[derive(Debug, Default)]
pub(super) struct FieldAttrs {
    pub tag: Option<LitStr>,
    pub rename: Option<LitStr>,
    pub skip: bool,
}

impl FieldAttrs {
    pub(super) fn from_attributes(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut result = Self::default();

        for attr in attrs.iter().filter(|a| a.path().is_ident("validate")) {
            match &attr.meta {
                Meta::NameValue(nv) => result.set_tag(string_literal(&nv.value)?)?,
                Meta::List(_) => attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("tag") {
                        result.set_tag(meta.value()?.parse()?)
                    } else if meta.path.is_ident("rename") {
                        let name: LitStr = meta.value()?.parse()?;
                        if name.value().is_empty() {
                            return Err(syn::Error::new_spanned(name, "rename must not be empty"));
                        }
                        result.rename = Some(name);
                        Ok(())
                    } else if meta.path.is_ident("skip") {
                        result.skip = true;
                        Ok(())
                    } else {
                        Err(meta.error("expected `tag = \"...\"`, `rename = \"...\"` or `skip`"))
                    }
                })?,
                Meta::Path(path) => {
                    return Err(syn::Error::new_spanned(
                        path,
                        "expected `#[validate = \"...\"]` or `#[validate(...)]`",
                    ));
                }
            }
        }

        Ok(result)
    }

    fn set_tag(&mut self, tag: LitStr) -> syn::Result<()> {
        if self.tag.is_some() {
            return Err(syn::Error::new_spanned(tag, "duplicate rule tag"));
        }
        self.tag = Some(tag);
        Ok(())
    }
}

fn string_literal(expr: &Expr) -> syn::Result<LitStr> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.clone()),
        other => Err(syn::Error::new_spanned(other, "expected a string literal")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn parse(input: syn::DeriveInput) -> syn::Result<FieldAttrs> {
        let syn::Data::Struct(data) = input.data else {
            unreachable!("test inputs are structs")
        };
        let field = data.fields.into_iter().next().unwrap();
        FieldAttrs::from_attributes(&field.attrs)
    }

    #[test]
    fn name_value_form() {
        let attrs = parse(parse_quote! { struct S { #[validate = "string;min=3"] pub name: String } }).unwrap();
        assert_eq!(attrs.tag.unwrap().value(), "string;min=3");
        assert!(attrs.rename.is_none());
    }

    #[test]
    fn list_form() {
        let attrs = parse(parse_quote! {
            struct S {
                #[validate(tag = "int;min=18", rename = "Age")]
                pub age: u32,
            }
        })
        .unwrap();
        assert_eq!(attrs.tag.unwrap().value(), "int;min=18");
        assert_eq!(attrs.rename.unwrap().value(), "Age");
        assert!(!attrs.skip);
    }

    #[test]
    fn skip_flag() {
        let attrs = parse(parse_quote! { struct S { #[validate(skip)] pub cache: u64 } }).unwrap();
        assert!(attrs.skip);
    }

    #[test]
    fn rejects_unknown_keys_and_duplicates() {
        assert!(parse(parse_quote! { struct S { #[validate(min = 3)] pub a: String } }).is_err());
        assert!(
            parse(parse_quote! {
                struct S {
                    #[validate = "string"]
                    #[validate(tag = "string")]
                    pub a: String,
                }
            })
            .is_err()
        );
        assert!(parse(parse_quote! { struct S { #[validate] pub a: String } }).is_err());
    }
}
