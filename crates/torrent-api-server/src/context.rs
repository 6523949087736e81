//! Request parameters.

use url::form_urlencoded;

use torrent_api_types::Credentials;

/// Parameters of one request, taken from the form-encoded body when it has any, otherwise from
/// the query string.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    params: Vec<(String, String)>,
}

impl RequestContext {
    /// Builds the context from the raw body and query string.
    pub fn parse(body: &[u8], query: Option<&str>) -> Self {
        let mut params: Vec<(String, String)> = form_urlencoded::parse(body).into_owned().collect();
        if params.is_empty() {
            params = query
                .map(|query| form_urlencoded::parse(query.as_bytes()).into_owned().collect())
                .unwrap_or_default();
        }
        Self { params }
    }

    /// The last value of `name`. Empty values and `0` count as missing.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
            .filter(|value| !value.is_empty() && *value != "0")
    }

    /// Whether `name` is numerically one, so `1`, `01` and `1.0` all set the flag.
    pub fn flag(&self, name: &str) -> bool {
        self.param(name)
            .and_then(|value| value.trim().parse::<f64>().ok())
            .is_some_and(|value| value == 1.0)
    }

    /// The daemon credentials, if both are present.
    pub fn credentials(&self) -> Option<Credentials> {
        Credentials::new(self.param("username"), self.param("password"))
    }
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<&str> = self.params.iter().map(|(key, _)| key.as_str()).collect();
        f.debug_struct("RequestContext")
            .field("keys", &keys)
            .finish()
    }
}
