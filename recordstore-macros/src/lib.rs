//! Procedural macros for the recordstore project.
//!
//! This crate provides compile-time code generation for the recordstore
//! framework, currently the [`Record`](macro@Record) derive that turns a
//! plain struct into a storable record type.

#[allow(unused_extern_crates)]
extern crate self as recordstore_macros;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Error, Fields, LitStr};

/// Derives the `Record` trait for a struct with named fields.
///
/// The stored collection name is the struct's declared name, verbatim, and
/// every named field becomes an entry in the record's field table. Field
/// attributes adjust the table:
///
/// * `#[record(id)]` marks the identity field. At most one field may carry
///   it, the field must be of type `RecordId`, and its stored name must be
///   `_id` (usually via `#[serde(rename = "_id")]`) so the identifier lands
///   in the database's identity slot.
/// * `#[serde(rename = "...")]` changes the stored field name.
/// * `#[serde(rename_all = "...")]` on the struct applies serde's case
///   transform to every field without a field-level rename, keeping the
///   table aligned with the stored keys.
/// * `#[serde(skip)]` and `#[serde(skip_serializing)]` drop the field from
///   the stored document and from the field table alike.
///
/// Generic types are not supported.
///
/// # Example
///
/// ```ignore
/// use recordstore::prelude::*;
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, Serialize, Deserialize, Record)]
/// struct User {
///     #[record(id)]
///     #[serde(rename = "_id")]
///     id: RecordId,
///     name: Option<String>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    expand_record(&input)
        .unwrap_or_else(Error::into_compile_error)
        .into()
}

fn expand_record(input: &DeriveInput) -> syn::Result<TokenStream2> {
    if !input.generics.params.is_empty() {
        return Err(Error::new_spanned(
            &input.generics,
            "Record cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new_spanned(
                    &input.ident,
                    "Record can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(Error::new_spanned(
                &input.ident,
                "Record can only be derived for structs",
            ));
        }
    };

    let mut rename_all = None;

    for attr in &input.attrs {
        if attr.path().is_ident("serde") {
            // Only the container-level rename rule shapes the field table;
            // the rest of the serde grammar passes through untouched.
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("rename_all") {
                    if meta.input.peek(syn::Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        rename_all = Some(RenameRule::from_literal(&value)?);
                    } else if meta.input.peek(syn::token::Paren) {
                        meta.parse_nested_meta(|inner| {
                            let value: LitStr = inner.value()?.parse()?;

                            if inner.path.is_ident("serialize") {
                                rename_all = Some(RenameRule::from_literal(&value)?);
                            }

                            Ok(())
                        })?;
                    }

                    return Ok(());
                }

                if meta.input.peek(syn::Token![=]) {
                    meta.value()?.parse::<syn::Expr>()?;
                } else if meta.input.peek(syn::token::Paren) {
                    let content;
                    syn::parenthesized!(content in meta.input);
                    content.parse::<TokenStream2>()?;
                }

                Ok(())
            })?;
        }
    }

    let mut spec_entries = Vec::new();
    let mut identity: Option<&syn::Ident> = None;

    for field in fields {
        let ident = match &field.ident {
            Some(ident) => ident,
            None => continue,
        };

        let mut stored_name = ident.to_string();
        let mut renamed = false;
        let mut skipped = false;
        let mut is_identity = false;

        for attr in &field.attrs {
            if attr.path().is_ident("record") {
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("id") {
                        is_identity = true;
                        Ok(())
                    } else {
                        Err(meta.error("unsupported record attribute"))
                    }
                })?;
            } else if attr.path().is_ident("serde") {
                // Tolerates the full serde attribute grammar; only renames
                // and skips change the field table.
                attr.parse_nested_meta(|meta| {
                    if meta.path.is_ident("rename") && meta.input.peek(syn::Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        stored_name = value.value();
                        renamed = true;
                        return Ok(());
                    }

                    // rename(serialize = "...", deserialize = "..."); stored
                    // keys follow the serialize name.
                    if meta.path.is_ident("rename") && meta.input.peek(syn::token::Paren) {
                        meta.parse_nested_meta(|inner| {
                            let value: LitStr = inner.value()?.parse()?;

                            if inner.path.is_ident("serialize") {
                                stored_name = value.value();
                                renamed = true;
                            }

                            Ok(())
                        })?;

                        return Ok(());
                    }

                    if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
                        skipped = true;
                        return Ok(());
                    }

                    if meta.input.peek(syn::Token![=]) {
                        meta.value()?.parse::<syn::Expr>()?;
                    } else if meta.input.peek(syn::token::Paren) {
                        let content;
                        syn::parenthesized!(content in meta.input);
                        content.parse::<TokenStream2>()?;
                    }

                    Ok(())
                })?;
            }
        }

        if !renamed {
            if let Some(rule) = rename_all {
                stored_name = rule.apply(&stored_name);
            }
        }

        if is_identity {
            if identity.is_some() {
                return Err(Error::new_spanned(
                    ident,
                    "only one field may be marked #[record(id)]",
                ));
            }

            if skipped {
                return Err(Error::new_spanned(
                    ident,
                    "the identity field cannot be skipped",
                ));
            }

            if stored_name != "_id" {
                return Err(Error::new_spanned(
                    ident,
                    "the identity field must be stored as \"_id\"; add #[serde(rename = \"_id\")]",
                ));
            }

            identity = Some(ident);
        }

        if skipped {
            continue;
        }

        spec_entries.push(quote! {
            ::recordstore::record::FieldSpec {
                name: #stored_name,
                get: |record| ::recordstore::record::field_value(&record.#ident),
            }
        });
    }

    let name = &input.ident;
    let type_name = name.to_string();

    let identity_impl = match identity {
        Some(ident) => quote! {
            fn identity() -> ::std::option::Option<::recordstore::record::IdentitySpec<Self>> {
                ::std::option::Option::Some(::recordstore::record::IdentitySpec {
                    get: |record| record.#ident,
                    set: |record, id| record.#ident = id,
                })
            }
        },
        None => quote! {},
    };

    Ok(quote! {
        #[automatically_derived]
        impl ::recordstore::record::Record for #name {
            fn type_name() -> &'static str {
                #type_name
            }

            fn fields() -> &'static [::recordstore::record::FieldSpec<Self>] {
                const FIELDS: &[::recordstore::record::FieldSpec<#name>] = &[#(#spec_entries),*];

                FIELDS
            }

            #identity_impl
        }
    })
}

/// Container-level `rename_all` case rule, mirroring the set serde accepts.
#[derive(Clone, Copy)]
enum RenameRule {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
    ScreamingKebab,
}

impl RenameRule {
    fn from_literal(literal: &LitStr) -> syn::Result<Self> {
        match literal.value().as_str() {
            "lowercase" => Ok(RenameRule::Lower),
            "UPPERCASE" => Ok(RenameRule::Upper),
            "PascalCase" => Ok(RenameRule::Pascal),
            "camelCase" => Ok(RenameRule::Camel),
            "snake_case" => Ok(RenameRule::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(RenameRule::ScreamingSnake),
            "kebab-case" => Ok(RenameRule::Kebab),
            "SCREAMING-KEBAB-CASE" => Ok(RenameRule::ScreamingKebab),
            unknown => Err(Error::new_spanned(
                literal,
                format!("unknown rename_all value `{unknown}`"),
            )),
        }
    }

    /// Transforms a snake_case field identifier the way serde stores it.
    fn apply(self, field: &str) -> String {
        match self {
            RenameRule::Lower | RenameRule::Snake => field.to_string(),
            RenameRule::Upper | RenameRule::ScreamingSnake => field.to_ascii_uppercase(),
            RenameRule::Pascal => field.split('_').map(capitalize).collect(),
            RenameRule::Camel => {
                let pascal = RenameRule::Pascal.apply(field);

                match pascal.get(..1) {
                    Some(first) => first.to_ascii_lowercase() + &pascal[1..],
                    None => pascal,
                }
            }
            RenameRule::Kebab => field.replace('_', "-"),
            RenameRule::ScreamingKebab => field.to_ascii_uppercase().replace('_', "-"),
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
