use std::borrow::Cow;
use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{Attribute, Data, DataStruct, DeriveInput, Fields, FieldsNamed, FieldsUnnamed, Meta, MetaList};

#[derive(Default)]
struct FieldAttrs<'a> {
	/// Byte count to discard before the field
	skip: Option<&'a TokenStream>,
	vstring: bool,
}

fn parse_field_attrs(attrs: &[Attribute]) -> FieldAttrs {
	let mut parsed = FieldAttrs::default();
	for attr in attrs {
		let Some(ident) = attr.path().get_ident() else { continue };
		match (ident.to_string().as_str(), &attr.meta) {
			("skip", Meta::List(MetaList { tokens, .. })) => parsed.skip = Some(tokens),
			("vstring", Meta::Path(_)) => parsed.vstring = true,
			("skip" | "vstring", _) => panic!("invalid use of helper attribute `{}`", ident),
			_ => {},
		}
	}
	parsed
}

fn read_derive_impl(input: &DeriveInput) -> TokenStream {
	let (fields, tuple) = match &input.data {
		Data::Struct(DataStruct { fields: Fields::Named(FieldsNamed { named, .. }), .. }) => (named, false),
		Data::Struct(DataStruct { fields: Fields::Unnamed(FieldsUnnamed { unnamed, .. }), .. }) => (unnamed, true),
		_ => panic!("only tuple structs or structs with named fields supported"),
	};
	let mut body = quote! {};
	let mut initializer = quote! {};
	for (index, field) in fields.iter().enumerate() {
		let FieldAttrs { skip, vstring } = parse_field_attrs(&field.attrs);
		let mut field_expr = match vstring {
			true => quote! { rfl_reader::read_vstring(reader)? },//u16 length, ascii bytes
			false => quote! { rfl_reader::Readable::read(reader)? },
		};
		if let Some(skip) = skip {
			field_expr = quote! {{
				rfl_reader::skip(reader, #skip)?;
				#field_expr
			}};
		}
		let field_ident = match &field.ident {
			Some(field_ident) => Cow::Borrowed(field_ident),
			None => Cow::Owned(Ident::new(&format!("field{}", index), Span::call_site())),
		};
		body = quote! {
			#body
			let #field_ident = #field_expr;
		};
		initializer = quote! { #initializer #field_ident, };
	}
	initializer = match tuple {
		true => quote! { (#initializer) },
		false => quote! { {#initializer} },
	};
	let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
	let type_name = &input.ident;
	quote! {
		impl #impl_generics rfl_reader::Readable for #type_name #ty_generics #where_clause {
			fn read<R: std::io::Read>(reader: &mut R) -> std::io::Result<Self> {
				#body
				Ok(#type_name #initializer)
			}
		}
	}
}

/// Reads each field in declaration order, little-endian.
#[proc_macro_derive(Readable, attributes(skip, vstring))]
pub fn read_derive(tokens: proc_macro::TokenStream) -> proc_macro::TokenStream {
	read_derive_impl(&syn::parse_macro_input!(tokens)).into()
}
