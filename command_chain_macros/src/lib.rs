mod properties;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Properties)]
// ============================================================================

/// Derive macro that builds a `Properties` table from a struct's named
/// fields, so a `ContextBase<T>` exposes each field as a map entry.
///
/// Field values are converted with serde, so every property field must
/// implement `Serialize` (to be readable) and `DeserializeOwned` (to be
/// writable).
///
/// # Usage
///
/// ```ignore
/// #[derive(Default, Properties)]
/// struct Request {
///     path: String,                     // read/write under "path"
///     #[property(rename = "user-id")]
///     user_id: Option<String>,          // read/write under "user-id"
///     #[property(read_only)]
///     attempts: u32,                    // put() fails
///     #[property(write_only)]
///     password: String,                 // get() returns None
///     #[property(skip)]
///     scratch: Vec<u8>,                 // not a property
/// }
/// ```
///
/// Generic structs are not supported.
#[proc_macro_derive(Properties, attributes(property))]
pub fn derive_properties(input: TokenStream) -> TokenStream {
    properties::derive_properties(input)
}
