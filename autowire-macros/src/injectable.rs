mod attr;

use crate::injectable::attr::{parse_field_attrs, InjectArgs};

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::{
    ext::IdentExt as _, parse_quote, spanned::Spanned as _, Data, DataStruct, DeriveInput, Error, Field, GenericParam, Index,
    Type, TypePath,
};

fn is_inject_type(ty: &Type) -> bool {
    match ty {
        Type::Path(TypePath { qself: None, path }) => path.segments.last().is_some_and(|segment| segment.ident == "Inject"),
        _ => false,
    }
}

fn expand_field(index: usize, field: &Field) -> syn::Result<TokenStream> {
    let (name, member) = match &field.ident {
        Some(ident) => (ident.unraw().to_string(), quote! { #ident }),
        None => {
            let index = Index::from(index);
            (index.index.to_string(), quote! { #index })
        }
    };

    let auto = match parse_field_attrs(&field.attrs) {
        Some(Ok(InjectArgs { auto })) => auto.is_some(),
        Some(Err(err)) => return Err(err),
        None => false,
    };

    let ty = &field.ty;
    let span = ty.span();

    if is_inject_type(ty) {
        Ok(quote_spanned! { span =>
            ::autowire::Field::inject(#name, &self.#member, #auto)
        })
    } else if auto {
        Err(Error::new_spanned(ty, "#[inject(auto)] can only be used on `Inject<T>` fields"))
    } else {
        Ok(quote_spanned! { span =>
            ::autowire::Field::plain::<#ty>(#name)
        })
    }
}

pub(crate) fn expand(mut input: DeriveInput) -> syn::Result<TokenStream> {
    let Data::Struct(DataStruct { fields, .. }) = &input.data else {
        return Err(Error::new_spanned(&input.ident, "#[derive(Injectable)] can only be used on structs"));
    };

    let field_quotes = fields
        .iter()
        .enumerate()
        .map(|(index, field)| expand_field(index, field))
        .collect::<syn::Result<Vec<_>>>()?;

    let type_params = input
        .generics
        .params
        .iter()
        .filter_map(|param| match param {
            GenericParam::Type(type_param) => Some(type_param.ident.clone()),
            _ => None,
        })
        .collect::<Vec<_>>();
    let where_clause = input.generics.make_where_clause();
    for type_param in type_params.iter() {
        where_clause
            .predicates
            .push(parse_quote! { #type_param: ::autowire::SendSafety + ::autowire::SyncSafety + 'static });
    }

    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::autowire::Injectable for #ident #ty_generics #where_clause {
            fn fields(&self) -> ::autowire::macros_utils::aliases::Vec<::autowire::Field<'_>> {
                ::autowire::macros_utils::aliases::Vec::from([
                    #( #field_quotes, )*
                ])
            }
        }
    })
}
