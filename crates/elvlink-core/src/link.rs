//! Deeplink and store URL construction.
//!
//! Everything here is pure string work. The dispatcher composes these helpers
//! with the host capabilities in [`crate::platform`].

use url::form_urlencoded;

/// Custom scheme every Media Wallet deeplink starts with.
pub const WALLET_SCHEME: &str = "elvwallet://";

/// Package identifier of the Media Wallet app.
pub const WALLET_PACKAGE: &str = "app.eluvio.wallet";

/// Package identifier of the Google Play Store app.
pub const PLAY_STORE_PACKAGE: &str = "com.android.vending";

/// Package identifier of the Amazon Appstore app.
pub const AMAZON_STORE_PACKAGE: &str = "com.amazon.venezia";

/// Query parameter carrying the optional authorization token.
pub const JWT_QUERY_PARAM: &str = "jwt";

/// Creates a deeplink to a specific SKU in Media Wallet.
///
/// Segments are inserted verbatim. A marketplace or SKU containing `/`, `?`
/// or `#` yields a link the wallet will not route correctly; callers own
/// producing URL-safe identifiers.
///
/// # Example
/// ```
/// use elvlink_core::link::create_sku_deeplink;
///
/// assert_eq!(
///     create_sku_deeplink("iq__market", "sku123"),
///     "elvwallet://items/iq__market/ictr/sku123"
/// );
/// ```
pub fn create_sku_deeplink(marketplace: &str, sku: &str) -> String {
    format!("{}items/{}/ictr/{}", WALLET_SCHEME, marketplace, sku)
}

/// Whether the link targets the Media Wallet scheme.
pub fn is_link_supported(url: &str) -> bool {
    url.starts_with(WALLET_SCHEME)
}

/// Append `jwt=<token>` to the URL's query string.
///
/// Existing query parameters are kept and the token becomes one more pair,
/// placed before any fragment. Nothing else in the input is touched, so the
/// scheme check downstream sees the caller's bytes.
pub fn append_jwt(url: &str, jwt: &str) -> String {
    let (head, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };
    let separator = match head.find('?') {
        None => "?",
        Some(idx) if idx + 1 == head.len() => "",
        Some(_) => "&",
    };
    format!(
        "{head}{separator}{}={}{fragment}",
        JWT_QUERY_PARAM,
        encode_query_value(jwt)
    )
}

/// Percent-encode a query value, leaving `A-Za-z0-9_-!.~'()*` literal.
fn encode_query_value(value: &str) -> String {
    let form: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    // form encoding turns spaces into `+` (a literal `+` is already `%2B`)
    // and escapes a few characters URI components keep
    form.replace('+', "%20")
        .replace("%7E", "~")
        .replace("%21", "!")
        .replace("%27", "'")
        .replace("%28", "(")
        .replace("%29", ")")
}

/// Form-urlencode the whole string as one opaque value.
pub fn percent_encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Play Store listing for the wallet, forwarding `target` as install referrer.
///
/// The referrer is `url=<target>`, with `=` already escaped as `%3D` and the
/// target encoded exactly once.
pub fn play_store_url(target: &str) -> String {
    format!(
        "market://details?id={}&referrer=url%3D{}",
        WALLET_PACKAGE,
        percent_encode(target)
    )
}

/// Amazon Appstore listing for the wallet. Amazon has no install referrer.
pub fn amazon_store_url() -> String {
    format!("amzn://apps/android?p={}", WALLET_PACKAGE)
}
