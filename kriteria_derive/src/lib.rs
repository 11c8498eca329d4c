use proc_macro::TokenStream;

mod or_variant;

/// Emits the annotated builder method unchanged, followed by an `OR` mirror
/// whose body joins with `Joiner::Or` / `Joiner::OrNot` instead of
/// `Joiner::And` / `Joiner::AndNot`.
///
/// The mirror is named by inserting `or` after the first segment of the
/// method name (`where_not` becomes `where_or_not`, `on` becomes `on_or`),
/// or explicitly with `#[or_variant(name)]`.
#[proc_macro_attribute]
pub fn or_variant(attr: TokenStream, item: TokenStream) -> TokenStream {
    or_variant::or_variant_impl(attr.into(), item.into())
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
