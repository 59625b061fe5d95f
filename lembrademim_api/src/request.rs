//! Description of one logical request, independent of which candidate
//! endpoint ends up serving it.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

/// Method, path suffix, optional JSON body and extra headers for a call.
///
/// Requests are authenticated unless [`RequestDescriptor::public`] is used.
#[derive(Clone, Debug)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path appended to each candidate base URL, query string included.
    pub path: String,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
    pub requires_auth: bool,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            headers: Vec::new(),
            requires_auth: true,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Method::PATCH, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attaches a JSON body. A value that cannot be represented as JSON
    /// leaves the body empty.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => self.body = Some(value),
            Err(e) => tracing::error!("Failed to serialize request body: {}", e),
        }
        self
    }

    /// Adds a header. `Content-Type` is always sent as JSON and
    /// `Authorization` is owned by the client; both are ignored here.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Sends the request without a bearer token.
    pub fn public(mut self) -> Self {
        self.requires_auth = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_to_authenticated() {
        let req = RequestDescriptor::get("/folder");
        assert_eq!(req.method, Method::GET);
        assert!(req.requires_auth);
        assert!(req.body.is_none());
    }

    #[test]
    fn public_post_with_body() {
        let req = RequestDescriptor::post("/auth/login")
            .json(&json!({"email": "a@b.c", "password": "secret"}))
            .public();
        assert!(!req.requires_auth);
        assert_eq!(req.body.unwrap()["email"], "a@b.c");
    }

    #[test]
    fn headers_accumulate() {
        let req = RequestDescriptor::delete("/biography/1")
            .header("X-Request-Source", "cli")
            .header("Accept-Language", "pt-BR");
        assert_eq!(req.headers.len(), 2);
        assert_eq!(req.headers[1].0, "Accept-Language");
    }
}
