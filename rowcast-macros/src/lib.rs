mod decode_member;
mod rename_rule;

use decode_member::{decode_member, encode_member};
use proc_macro::TokenStream;
use quote::quote;
use rename_rule::rename_rule;
use syn::{ItemStruct, parse_macro_input};

/// Implements `rowcast::Target` for a struct, rows are loaded by member name.
///
/// The struct must implement `Default`, members without a matching column
/// keep their default value.
///
/// Attributes:
/// - `#[rowcast(rename_all = "PascalCase")]` on the struct changes the case
///   of every member name.
/// - `#[rowcast(name = "Column")]` on a field sets the column name.
/// - `#[rowcast(from = Type)]` loads `Type` and converts it with `From`.
/// - `#[rowcast(skip)]` is never loaded.
#[proc_macro_derive(Record, attributes(rowcast))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    let item: ItemStruct = parse_macro_input!(input as ItemStruct);
    let name = &item.ident;
    let rename = rename_rule(&item);
    let members = item
        .fields
        .iter()
        .map(|f| decode_member(f, rename))
        .filter(|m| !m.skip)
        .map(|m| encode_member(&m));
    let (impl_generics, ty_generics, where_clause) = item.generics.split_for_impl();
    quote! {
        impl #impl_generics ::rowcast::Target for #name #ty_generics #where_clause {
            const KIND: ::rowcast::LoaderKind = ::rowcast::LoaderKind::Record;
            fn shape() -> ::rowcast::Shape<Self> {
                ::rowcast::Shape::Record {
                    new: <Self as ::std::default::Default>::default,
                    members: ::std::vec![#(#members),*],
                }
            }
        }
    }
    .into()
}
