use std::collections::HashMap;

#[derive(Eq, Hash, PartialEq, Copy, Clone, Debug)]
pub enum Method {
    GET,
    POST,
    PUT,
    DELETE,
    HEAD,
    CONNECT,
    OPTIONS,
    TRACE,
    PATCH,
}

impl Method {
    pub fn from_string(s: &str) -> Method {
        match s {
            "GET" => Method::GET,
            "POST" => Method::POST,
            "PUT" => Method::PUT,
            "DELETE" => Method::DELETE,
            "HEAD" => Method::HEAD,
            "CONNECT" => Method::CONNECT,
            "OPTIONS" => Method::OPTIONS,
            "TRACE" => Method::TRACE,
            "PATCH" => Method::PATCH,
            _ => Method::GET,
        }
    }
}

/// A parsed HTTP/1.1 request.
///
/// The greeter never looks past the framing, but the fields are populated so
/// a handler can.
#[derive(Debug)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

/// Splits a request target into a normalized path and its query pairs.
pub(crate) fn split_target(target: &str) -> (String, HashMap<String, String>) {
    let mut parts = target.splitn(2, '?');
    let path = normalize_path(parts.next().unwrap_or("/"));
    let query = parts.next().map(parse_query).unwrap_or_default();
    (path, query)
}

fn normalize_path(path: &str) -> String {
    let path = path.trim_end_matches('/');
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|s| !s.is_empty())
        .filter_map(|pair| {
            let mut parts = pair.split('=');
            Some((
                parts.next()?.to_string(),
                parts.next().unwrap_or("").to_string(),
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_tokens() {
        assert_eq!(Method::from_string("GET"), Method::GET);
        assert_eq!(Method::from_string("DELETE"), Method::DELETE);
        // Unknown tokens fall back to GET rather than failing the request.
        assert_eq!(Method::from_string("BREW"), Method::GET);
    }

    #[test]
    fn target_without_query() {
        let (path, query) = split_target("/any/other/path");
        assert_eq!(path, "/any/other/path");
        assert!(query.is_empty());
    }

    #[test]
    fn target_with_query() {
        let (path, query) = split_target("/?a=1&b=2&empty");
        assert_eq!(path, "/");
        assert_eq!(query.get("a").map(String::as_str), Some("1"));
        assert_eq!(query.get("b").map(String::as_str), Some("2"));
        assert_eq!(query.get("empty").map(String::as_str), Some(""));
    }

    #[test]
    fn trailing_slashes_are_normalized() {
        assert_eq!(split_target("/foo/").0, "/foo");
        assert_eq!(split_target("/").0, "/");
        assert_eq!(split_target("///").0, "/");
    }
}
