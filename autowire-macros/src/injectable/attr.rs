use syn::{
    parse::{Parse, ParseStream},
    Attribute, Token,
};

use crate::attr_parsing::{combine_flag, parse_attrs, parse_flag_attribute, Combine};

pub(crate) mod kw {
    syn::custom_keyword!(auto);
}

#[derive(Default)]
pub(crate) struct InjectArgs {
    pub(super) auto: Option<kw::auto>,
}

impl Parse for InjectArgs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut args = Self::default();

        while !input.is_empty() {
            let lh = input.lookahead1();
            if lh.peek(kw::auto) {
                parse_flag_attribute(input, &mut args.auto)?;
            } else {
                return Err(lh.error());
            }

            let _ = input.parse::<Token![,]>();
        }

        Ok(args)
    }
}

impl Combine for InjectArgs {
    fn combine(mut self, other: Self) -> syn::Result<Self> {
        let Self { auto } = other;
        combine_flag(&mut self.auto, auto)?;
        Ok(self)
    }
}

pub(crate) fn parse_field_attrs(attrs: &[Attribute]) -> Option<syn::Result<InjectArgs>> {
    parse_attrs("inject", attrs).map(|result| result.map_err(|(err, attr)| syn::Error::new_spanned(attr, err)))
}
