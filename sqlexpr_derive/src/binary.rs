use darling::{FromDeriveInput, FromVariant, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct BinaryDeriveInput {
    ident: syn::Ident,
    data: ast::Data<BinaryVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(binary))]
struct BinaryVariant {
    ident: syn::Ident,
    token: String,
}

pub fn operator_methods_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let enum_info = match BinaryDeriveInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &enum_info.ident;

    let variants = enum_info
        .data
        .take_enum()
        .expect("only enum is supported for now");

    let arms = variants.iter().map(|var| {
        let var_name = &var.ident;
        let token = &var.token;
        quote! { #enum_name::#var_name => #token }
    });

    let functions = variants.iter().map(|var| {
        let var_name = &var.ident;
        let fn_name = format_ident!("{}", var_name.to_string().to_snake_case());
        let doc = format!("Returns a representation of `lhs {} rhs`.", var.token);

        quote! {
            #[doc = #doc]
            pub fn #fn_name<L, R>(lhs: L, rhs: R) -> crate::BoolExpr
            where
                L: crate::IntoExpr,
                R: crate::IntoExpr,
            {
                crate::BoolExpr::binary(lhs.into_expr(), #enum_name::#var_name, rhs.into_expr())
            }
        }
    });

    let methods = variants
        .iter()
        .map(|var| {
            let var_name = &var.ident;
            let fn_name = format_ident!("{}", var_name.to_string().to_snake_case());
            let doc = format!("Returns a representation of `self {} rhs`.", var.token);

            quote! {
                #[doc = #doc]
                pub fn #fn_name<R>(self, rhs: R) -> crate::BoolExpr
                where
                    R: crate::IntoExpr,
                {
                    crate::BoolExpr::binary(
                        crate::IntoExpr::into_expr(self),
                        #enum_name::#var_name,
                        rhs.into_expr(),
                    )
                }
            }
        })
        .collect::<Vec<_>>();

    quote! {
        impl #enum_name {
            pub const fn token(self) -> &'static str {
                match self {
                    #(#arms,)*
                }
            }
        }

        #(#functions)*

        impl crate::Expr {
            #(#methods)*
        }

        impl crate::BoolExpr {
            #(#methods)*
        }

        impl crate::Column {
            #(#methods)*
        }
    }
    .into()
}
