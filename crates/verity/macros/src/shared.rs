//! Input checks shared by derive implementations

use syn::{Data, DeriveInput, Fields, FieldsNamed};

/// Returns the named fields of a struct, or a spanned error for any other
/// shape.
pub(crate) fn require_named_struct(input: &DeriveInput) -> syn::Result<&FieldsNamed> {
    match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => Ok(fields),
            Fields::Unnamed(_) => Err(syn::Error::new_spanned(
                input,
                "#[derive(Validate)] requires named fields; tuple structs are not supported",
            )),
            Fields::Unit => Err(syn::Error::new_spanned(
                input,
                "#[derive(Validate)] cannot be applied to unit structs",
            )),
        },
        Data::Enum(_) => Err(syn::Error::new_spanned(
            input,
            "#[derive(Validate)] can only be applied to structs, not enums",
        )),
        Data::Union(_) => Err(syn::Error::new_spanned(
            input,
            "#[derive(Validate)] can only be applied to structs, not unions",
        )),
    }
}
