use crate::error::ServerError;
use std::collections::HashMap;
use std::time::SystemTime;

#[derive(Debug)]
pub struct Response {
    pub status: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
}

impl Response {
    pub fn new(status: u16) -> Response {
        Response {
            status,
            headers: HashMap::new(),
            body: String::new(),
        }
    }

    // Generic body setter
    pub fn body<T: AsRef<str>>(&mut self, body: T) -> &mut Self {
        self.body = body.as_ref().to_string();
        self
    }

    // Generic header setter
    pub fn header<K: AsRef<str>, V: AsRef<str>>(&mut self, name: K, value: V) -> &mut Self {
        self.headers
            .insert(name.as_ref().to_string(), value.as_ref().to_string());
        self
    }

    pub fn text<T: AsRef<str>>(content: T) -> Response {
        let mut response = Response::new(200);
        response.header("Content-Type", "text/plain").body(content);
        response
    }

    /// Builds the JSON error response for a failed request.
    pub fn error(err: ServerError) -> Response {
        let status = err.status_code();
        let body = serde_json::json!({
            "error": {
                "message": err.to_string(),
                "status": status
            }
        })
        .to_string();
        let mut response = Response::new(status);
        response.header("Content-Type", "application/json").body(body);
        response
    }

    /// Serializes the response to wire form. `Date` and `Content-Length` are
    /// appended here so every response carries them exactly once.
    pub(crate) fn serialize(&self) -> String {
        let mut out = format!("HTTP/1.1 {}\r\n", self.status);
        self.headers.iter().for_each(|(name, value)| {
            out += &format!("{}: {}\r\n", name, value);
        });
        out += &format!("Date: {}\r\n", httpdate::fmt_http_date(SystemTime::now()));
        out += &format!("Content-Length: {}\r\n\r\n{}", self.body.len(), self.body);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_response_defaults() {
        let response = Response::text("hi");
        assert_eq!(response.status, 200);
        assert_eq!(response.body, "hi");
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("text/plain")
        );
    }

    #[test]
    fn serialized_form_declares_byte_length() {
        let wire = Response::text("Hello, Jenkins CI/CD World!").serialize();
        assert!(wire.starts_with("HTTP/1.1 200\r\n"));
        assert!(wire.contains("Content-Length: 27\r\n"));
        assert!(wire.contains("Date: "));
        assert!(wire.ends_with("\r\n\r\nHello, Jenkins CI/CD World!"));
    }

    #[test]
    fn error_response_is_json() {
        let response = Response::error(ServerError::InvalidRequest("no target".into()));
        assert_eq!(response.status, 400);
        assert_eq!(
            response.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
        let value: serde_json::Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(value["error"]["status"], 400);
    }
}
