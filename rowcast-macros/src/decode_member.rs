use convert_case::{Case, Casing};
use proc_macro2::TokenStream;
use quote::{ToTokens, quote};
use syn::{Field, Ident, LitStr, Type, ext::IdentExt, parse::ParseBuffer};

pub(crate) struct MemberMetadata {
    pub(crate) ident: Ident,
    pub(crate) ty: Type,
    pub(crate) name: String,
    /// Type the member is converted `From`.
    pub(crate) from: Option<Type>,
    pub(crate) skip: bool,
}

pub(crate) fn decode_member(field: &Field, rename: Option<Case>) -> MemberMetadata {
    let Some(ident) = field.ident.clone() else {
        panic!("Record can only be derived for structs with named fields");
    };
    let name = ident.unraw().to_string();
    let mut metadata = MemberMetadata {
        name: match rename {
            Some(case) => name.to_case(case),
            None => name,
        },
        ident,
        ty: field.ty.clone(),
        from: None,
        skip: false,
    };
    for attr in &field.attrs {
        let meta = &attr.meta;
        if !meta.path().is_ident("rowcast") {
            continue;
        }
        let Ok(list) = meta.require_list() else {
            panic!("Error while parsing `rowcast`, use it like: `#[rowcast(attribute = value, ...)]`");
        };
        let _ = list.parse_nested_meta(|arg| {
            if arg.path.is_ident("name") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<LitStr>) else {
                    panic!("Error while parsing `name`, use it like: `#[rowcast(name = \"MyColumn\")]`");
                };
                metadata.name = v.value();
            } else if arg.path.is_ident("from") {
                let Ok(v) = arg.value().and_then(ParseBuffer::parse::<Type>) else {
                    panic!("Error while parsing `from`, use it like: `#[rowcast(from = String)]`");
                };
                metadata.from = Some(v);
            } else if arg.path.is_ident("skip") {
                let Err(..) = arg.value() else {
                    // value() is Err for Meta::Path
                    panic!("Error while parsing `skip`, use it like: `#[rowcast(skip)]`");
                };
                metadata.skip = true;
            } else {
                panic!(
                    "Unknown attribute `{}` inside rowcast macro",
                    arg.path.to_token_stream()
                );
            }
            Ok(())
        });
    }
    metadata
}

/// The `Member` expression describing this field.
pub(crate) fn encode_member(metadata: &MemberMetadata) -> TokenStream {
    let MemberMetadata {
        ident, ty, name, ..
    } = metadata;
    match &metadata.from {
        Some(from) => quote! {
            ::rowcast::Member::alternate::<#from, #ty>(
                #name,
                |target: &mut Self, value: ::rowcast::Value| -> ::rowcast::Result<()> {
                    target.#ident = <#ty as ::std::convert::From<#from>>::from(
                        <#from as ::rowcast::AsValue>::try_from_value(value)?,
                    );
                    Ok(())
                },
            )
        },
        None => quote! {
            ::rowcast::Member::new::<#ty>(
                #name,
                |target: &mut Self, value: ::rowcast::Value| -> ::rowcast::Result<()> {
                    target.#ident = <#ty as ::rowcast::AsValue>::try_from_value(value)?;
                    Ok(())
                },
            )
        },
    }
}
