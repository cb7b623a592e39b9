use crate::handler::HandlerResponse;
use crate::http::{Request, Response};

/// The payload every request receives, byte for byte.
pub const GREETING: &str = "Hello, Jenkins CI/CD World!";

/// Catch-all handler: the request is ignored and the fixed greeting comes
/// back with status 200.
pub async fn greet(_req: Request) -> HandlerResponse {
    Ok(Response::text(GREETING))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::Method;
    use std::collections::HashMap;

    fn request(method: Method, path: &str) -> Request {
        Request {
            method,
            path: path.to_string(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    #[test]
    fn payload_is_fixed() {
        assert_eq!(GREETING, "Hello, Jenkins CI/CD World!");
        assert_eq!(GREETING.len(), 27);
    }

    #[tokio::test]
    async fn greets_regardless_of_method_and_path() {
        for (method, path) in [
            (Method::GET, "/"),
            (Method::POST, "/any/other/path"),
            (Method::DELETE, "/deeply/nested/target"),
        ] {
            let response = greet(request(method, path)).await.unwrap();
            assert_eq!(response.status, 200);
            assert_eq!(response.body, GREETING);
        }
    }
}
