extern crate proc_macro;

macro_rules! bail {
    ($item:expr, $fmt:literal $($tts:tt)*) => {
        return Err(Error::new_spanned(
            &$item,
            format!(concat!("recompute: ", $fmt) $($tts)*)
        ))
    }
}

mod computed;

use proc_macro::TokenStream;
use quote::quote;
use syn::{Error, Result};

/// Declare the compute functions of a record type.
///
/// Every associated function without a receiver whose name starts with
/// `compute` is enumerated for the runtime, which keeps those named
/// `compute<Field>Attribute` (or `compute_<field>_attribute`). The parameter
/// names are the fields the function depends on, in order.
///
/// ```ignore
/// #[computed]
/// impl Article {
///     fn compute_excerpt_attribute(text: String) -> String {
///         text.chars().take(5).collect()
///     }
///
///     fn compute_word_count_attribute(text: String) -> Result<Value, Invalid> {
///         Value::count(&text)
///     }
/// }
/// ```
#[proc_macro_attribute]
pub fn computed(_: TokenStream, stream: TokenStream) -> TokenStream {
    let block = syn::parse_macro_input!(stream as syn::ItemImpl);
    computed::expand(&block)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
