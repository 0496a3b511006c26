// SPDX-License-Identifier: MIT OR Apache-2.0
use proc_macro::{Delimiter, Group, TokenStream, TokenTree};

fn compile_error(message: &str) -> TokenStream {
    format!("compile_error!({message:?});").parse().unwrap()
}

/// Implementation of the `#[scoped]` attribute macro.
///
/// Prefixes the function body with a depth frame guard. The body's own tokens are kept as they
/// are, so `line!()` and friends inside it still point at the original source.
pub fn scoped_attr_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return compile_error("#[scoped] takes no arguments");
    }

    let mut tokens: Vec<TokenTree> = item.into_iter().collect();

    // qualifiers up to `fn`; the signature after it is not inspected
    let mut saw_fn = false;
    for token in &tokens {
        if let TokenTree::Ident(ident) = token {
            match ident.to_string().as_str() {
                "fn" => {
                    saw_fn = true;
                    break;
                }
                "async" => {
                    return compile_error(
                        "#[scoped] cannot be applied to async functions: depth frames are per-thread",
                    );
                }
                _ => {}
            }
        }
    }

    if !saw_fn {
        return compile_error("#[scoped] can only be applied to functions");
    }

    // the body is always the last token tree of a function item; brace groups inside the
    // signature (const blocks in return types or where clauses) come before it
    let body = match tokens.last() {
        Some(TokenTree::Group(g)) if g.delimiter() == Delimiter::Brace => g.clone(),
        _ => return compile_error("#[scoped] requires a function with a body"),
    };

    let mut original = Group::new(Delimiter::Brace, body.stream());
    original.set_span(body.span());

    let mut stream: TokenStream = "let _scopelog_frame = ::scopelog::depth::enter();"
        .parse()
        .unwrap();
    stream.extend([TokenTree::Group(original)]);

    let mut wrapped = Group::new(Delimiter::Brace, stream);
    wrapped.set_span(body.span());

    if let Some(last) = tokens.last_mut() {
        *last = TokenTree::Group(wrapped);
    }
    tokens.into_iter().collect()
}
