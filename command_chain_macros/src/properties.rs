use std::collections::HashSet;

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::{format_ident, quote};
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr};

/// Accessor options parsed from `#[property(...)]`.
#[derive(Default)]
struct FieldOptions {
    skip: bool,
    read_only: bool,
    write_only: bool,
    rename: Option<String>,
}

pub fn derive_properties(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Properties derive does not support generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data_struct) => match &data_struct.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Properties derive only supports structs with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "Properties derive only supports structs",
            ))
        }
    };

    let mut accessors = Vec::new();
    let mut entries = Vec::new();
    let mut seen = HashSet::new();

    for field in fields {
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        let options = parse_field_options(&field.attrs)?;
        if options.skip {
            continue;
        }
        if options.read_only && options.write_only {
            return Err(syn::Error::new_spanned(
                ident,
                "a property cannot be both read_only and write_only",
            ));
        }

        let plain = ident.unraw();
        let property_name = options.rename.unwrap_or_else(|| plain.to_string());
        if !seen.insert(property_name.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!("duplicate property name '{}'", property_name),
            ));
        }
        let getter = format_ident!("__get_{}", plain);
        let setter = format_ident!("__set_{}", plain);

        if !options.write_only {
            accessors.push(quote! {
                #[allow(non_snake_case)]
                fn #getter(this: &#name) -> ::command_chain::__private::Value {
                    ::command_chain::__private::to_value(#property_name, &this.#ident)
                }
            });
        }
        if !options.read_only {
            accessors.push(quote! {
                #[allow(non_snake_case)]
                fn #setter(
                    this: &mut #name,
                    value: ::command_chain::__private::Value,
                ) -> ::core::result::Result<(), ::command_chain::ChainError> {
                    this.#ident = ::command_chain::__private::from_value(#property_name, value)?;
                    ::core::result::Result::Ok(())
                }
            });
        }

        entries.push(if options.read_only {
            quote! { ::command_chain::Property::read_only(#property_name, #getter) }
        } else if options.write_only {
            quote! { ::command_chain::Property::write_only(#property_name, #setter) }
        } else {
            quote! { ::command_chain::Property::read_write(#property_name, #getter, #setter) }
        });
    }

    Ok(quote! {
        impl ::command_chain::Properties for #name {
            fn properties() -> &'static [::command_chain::Property<Self>] {
                #(#accessors)*

                const PROPERTIES: &[::command_chain::Property<#name>] = &[
                    #(#entries),*
                ];
                PROPERTIES
            }
        }
    })
}

fn parse_field_options(attrs: &[syn::Attribute]) -> syn::Result<FieldOptions> {
    let mut options = FieldOptions::default();

    for attr in attrs {
        if !attr.path().is_ident("property") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                options.skip = true;
            } else if meta.path.is_ident("read_only") {
                options.read_only = true;
            } else if meta.path.is_ident("write_only") {
                options.write_only = true;
            } else if meta.path.is_ident("rename") {
                let value: LitStr = meta.value()?.parse()?;
                options.rename = Some(value.value());
            } else {
                return Err(meta.error("unknown property option"));
            }
            Ok(())
        })?;
    }

    Ok(options)
}
