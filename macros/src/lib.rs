use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, parse_quote};

/// Derive `optval::Equatable`
///
/// Enums without any fields become an enumeration and are compared by
/// discriminant. Everything else is structural and compared through the
/// cached comparer, which requires the type to implement `PartialEq`.
///
/// Add `#[equatable(structural)]` to compare a fieldless enum through its
/// `PartialEq` implementation instead.
#[proc_macro_derive(Equatable, attributes(equatable))]
pub fn derive_equatable(item: TokenStream) -> TokenStream {
    let item = parse_macro_input!(item as syn::DeriveInput);

    match generate_equatable(item) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

fn generate_equatable(
    item: syn::DeriveInput,
) -> syn::Result<proc_macro2::TokenStream> {
    let type_name = &item.ident;

    if let Some(lifetime) = item.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "Equatable types must be 'static and cannot have lifetime parameters",
        ));
    }

    let force_structural = structural_attribute(&item.attrs)?;

    let fieldless_enum = match &item.data {
        syn::Data::Enum(e) => e
            .variants
            .iter()
            .all(|v| matches!(v.fields, syn::Fields::Unit)),
        _ => false,
    };

    let mut generics = item.generics.clone();
    for param in generics.type_params_mut() {
        param.bounds.push(parse_quote!('static));
    }

    let body = if fieldless_enum && !force_structural {
        quote!(
            const CATEGORY: optval::Category = optval::Category::Enumeration(
                optval::Width::covering(::std::mem::size_of::<Self>()),
            );

            fn value_equals(x: &Self, y: &Self) -> bool {
                ::std::mem::discriminant(x) == ::std::mem::discriminant(y)
            }
        )
    } else {
        generics
            .make_where_clause()
            .predicates
            .push(parse_quote!(Self: ::std::cmp::PartialEq));
        quote!(
            const CATEGORY: optval::Category = optval::Category::Structural;

            fn value_equals(x: &Self, y: &Self) -> bool {
                optval::equality::comparer::structural_equals(x, y)
            }
        )
    };

    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote!(
        impl #impl_generics optval::equality::Equatable for #type_name #ty_generics
        #where_clause
        {
            #body
        }
    ))
}

fn structural_attribute(attrs: &[syn::Attribute]) -> syn::Result<bool> {
    let mut structural = false;
    for attr in attrs {
        if !attr.path().is_ident("equatable") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("structural") {
                structural = true;
                Ok(())
            } else {
                Err(meta.error("unknown equatable option"))
            }
        })?;
    }
    Ok(structural)
}
