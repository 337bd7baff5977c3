use darling::{FromDeriveInput, FromVariant, ast};
use heck::ToSnakeCase;
use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{DeriveInput, parse_macro_input};

#[derive(Debug, FromDeriveInput)]
#[darling(supports(enum_unit))]
struct PostfixInput {
    ident: syn::Ident,
    data: ast::Data<PostfixVariant, ()>,
}

#[derive(Debug, FromVariant)]
#[darling(attributes(postfix))]
struct PostfixVariant {
    ident: syn::Ident,
    token: String,
}

pub fn postfix_operator_methods_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let op = match PostfixInput::from_derive_input(&input) {
        Ok(v) => v,
        Err(e) => return e.write_errors().into(),
    };

    let enum_name = &op.ident;
    let variants = op
        .data
        .take_enum()
        .expect("only enum is supported for now");

    let arms = variants.iter().map(|v| {
        let var = &v.ident;
        let token = &v.token;
        quote! { #enum_name::#var => #token }
    });

    let items = variants.iter().map(|v| {
        let var = &v.ident;
        let fn_name = format_ident!("{}", var.to_string().to_snake_case());
        let doc = format!("Returns a representation of `expr {}`.", v.token);

        quote! {
            #[doc = #doc]
            pub fn #fn_name(expr: crate::BoolExpr) -> crate::BoolExpr {
                crate::BoolExpr::postfix(crate::IntoExpr::into_expr(expr), #enum_name::#var)
            }

            impl crate::BoolExpr {
                #[doc = #doc]
                pub fn #fn_name(self) -> crate::BoolExpr {
                    #fn_name(self)
                }
            }
        }
    });

    quote! {
        impl #enum_name {
            pub const fn token(self) -> &'static str {
                match self {
                    #(#arms,)*
                }
            }
        }

        #(#items)*
    }
    .into()
}
