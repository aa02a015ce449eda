//! Session credentials carried in the page's URL fragment.
//!
//! An identity provider redirects back to the widget with
//! `#id_token=...&access_token=...`. The fragment is read once at mount time;
//! the identity token becomes the `Authorization` header value on every
//! exchange.
//!
//! TRADE-OFFS
//! ==========
//! Reading `window.location` is browser-only; SSR and native tests get `None`
//! and the widget runs unauthenticated.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

const ID_TOKEN_KEY: &str = "id_token";
const ACCESS_TOKEN_KEY: &str = "access_token";

/// Identity and access tokens for the current page session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub id_token: String,
    pub access_token: Option<String>,
}

impl Credentials {
    /// Value sent as the `Authorization` header.
    pub fn authorization(&self) -> &str {
        &self.id_token
    }
}

/// Parse a URL fragment (leading `#` optional) as a query string.
///
/// Returns `None` unless a non-empty `id_token` is present. Later duplicate
/// keys override earlier ones.
pub fn parse_fragment(fragment: &str) -> Option<Credentials> {
    let raw = fragment.strip_prefix('#').unwrap_or(fragment);

    let mut id_token = None;
    let mut access_token = None;
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        match key.as_ref() {
            ID_TOKEN_KEY => id_token = Some(value.into_owned()),
            ACCESS_TOKEN_KEY => access_token = Some(value.into_owned()),
            _ => {}
        }
    }

    let id_token = id_token.filter(|t| !t.is_empty())?;
    let access_token = access_token.filter(|t| !t.is_empty());
    Some(Credentials { id_token, access_token })
}

/// Read credentials from `window.location.hash`.
pub fn read_from_location() -> Option<Credentials> {
    #[cfg(feature = "hydrate")]
    {
        let hash = web_sys::window()?.location().hash().ok()?;
        parse_fragment(&hash)
    }
    #[cfg(not(feature = "hydrate"))]
    {
        None
    }
}
