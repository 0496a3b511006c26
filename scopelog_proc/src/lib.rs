//SPDX-License-Identifier: MIT OR Apache-2.0

//! # scopelog procedural macros
//!
//! This crate provides the `#[scoped]` attribute for the scopelog logging library.
//!
//! Scopelog filters and decorates messages by *call depth*. Rust offers no portable way to ask
//! "how deep is the stack right now", so the default depth provider counts explicit scope
//! frames instead. `#[scoped]` opens one such frame for the duration of a function body.
//!
//! ## Usage Example
//!
//! ```rust
//! use scopelog::scoped;
//!
//! #[scoped]
//! fn parse() {
//!     // Messages logged here are one frame deeper than the caller's.
//!     scopelog::warning!("input is suspiciously short");
//! }
//! # parse();
//! ```
//!
//! ## Expansion
//!
//! ```ignore
//! fn parse() {
//!     let _scopelog_frame = ::scopelog::depth::enter();
//!     { /* original body */ }
//! }
//! ```

use proc_macro::TokenStream;

mod scoped_attr;

/// Opens a depth frame for the whole body of the annotated function.
///
/// The frame is released when the body returns or unwinds. The body's tokens are kept
/// unchanged, so call sites inside it report their own lines.
///
/// Frames are counted per thread. An `async fn` would hold its frame across `.await` points,
/// and tasks interleaved on the same thread would then see each other's frames, so async
/// functions are rejected:
///
/// ```compile_fail
/// #[scopelog::scoped]
/// async fn fetch() {}
/// ```
///
/// A brace group inside the signature is not mistaken for the body:
///
/// ```rust
/// #[scopelog::scoped]
/// fn triple() -> [u8; { 1 + 2 }] {
///     [0; 3]
/// }
/// assert_eq!(triple().len(), 3);
/// ```
#[proc_macro_attribute]
pub fn scoped(attr: TokenStream, item: TokenStream) -> TokenStream {
    scoped_attr::scoped_attr_impl(attr, item)
}
