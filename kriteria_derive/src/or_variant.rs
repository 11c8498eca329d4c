use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    Ident, ItemFn, Path,
    visit_mut::{self, VisitMut},
};

struct OrJoiner;

impl VisitMut for OrJoiner {
    fn visit_path_mut(&mut self, path: &mut Path) {
        let len = path.segments.len();
        if len >= 2 && path.segments[len - 2].ident == "Joiner" {
            let last = &mut path.segments[len - 1];
            let span = last.ident.span();
            if last.ident == "And" {
                last.ident = format_ident!("Or", span = span);
            } else if last.ident == "AndNot" {
                last.ident = format_ident!("OrNot", span = span);
            }
        }
        visit_mut::visit_path_mut(self, path);
    }
}

fn or_name(name: &str) -> String {
    let trimmed = name.trim_end_matches('_');
    match trimmed.split_once('_') {
        Some((prefix, rest)) => format!("{prefix}_or_{rest}"),
        None => format!("{trimmed}_or"),
    }
}

pub fn or_variant_impl(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let original: ItemFn = syn::parse2(item)?;
    let name = if attr.is_empty() {
        let ident = &original.sig.ident;
        format_ident!("{}", or_name(&ident.to_string()), span = ident.span())
    } else {
        syn::parse2::<Ident>(attr)?
    };

    let mut mirror = original.clone();
    mirror.sig.ident = name;
    mirror.attrs.retain(|attr| !attr.path().is_ident("doc"));
    OrJoiner.visit_block_mut(mirror.block.as_mut());

    let doc = format!(" Same as [`Self::{}`], joined with `OR`.", original.sig.ident);

    Ok(quote! {
        #original

        #[doc = #doc]
        #mirror
    })
}
