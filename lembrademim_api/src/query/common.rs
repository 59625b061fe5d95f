//! Shared query infrastructure: the [`Query`] trait and query-string encoding.

use url::form_urlencoded;

/// Trait implemented by all query builders. A query knows the route it
/// targets and the parameters it appends to it.
pub trait Query {
    /// Route the query is sent to, without a query string.
    fn route(&self) -> &'static str;

    /// Parameters in the order they are sent. Unset filters are omitted.
    fn pairs(&self) -> Vec<(&'static str, String)>;

    /// Route plus the url-encoded query string, ready to be appended to a
    /// candidate base URL.
    fn to_path(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return self.route().to_string();
        }
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        for (key, value) in &pairs {
            serializer.append_pair(key, value);
        }
        format!("{}?{}", self.route(), serializer.finish())
    }
}
