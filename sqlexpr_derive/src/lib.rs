use proc_macro::TokenStream;

mod binary;
mod postfix;

/// Generates a `token` lookup, one free constructor per variant and the
/// matching methods on `Expr`, `BoolExpr` and `Column`.
#[proc_macro_derive(BinaryOperator, attributes(binary))]
pub fn operator_methods(input: TokenStream) -> TokenStream {
    binary::operator_methods_impl(input)
}

#[proc_macro_derive(PostfixOperator, attributes(postfix))]
pub fn postfix_operator_methods(input: TokenStream) -> TokenStream {
    postfix::postfix_operator_methods_impl(input)
}
