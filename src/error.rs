use std::fmt;
use std::io;

#[derive(Debug)]
pub enum ServerError {
    /// The listening port could not be acquired. Fatal at startup.
    Bind { addr: String, source: io::Error },
    Io(io::Error),
    InvalidRequest(String),
    Panic(String),
}

impl ServerError {
    pub fn status_code(&self) -> u16 {
        match self {
            ServerError::InvalidRequest(_) => 400,
            ServerError::Bind { .. } | ServerError::Io(_) | ServerError::Panic(_) => 500,
        }
    }
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { addr, source } => write!(f, "Failed to bind {}: {}", addr, source),
            ServerError::Io(err) => write!(f, "IO error: {}", err),
            ServerError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            ServerError::Panic(msg) => write!(f, "Panic: {}", msg),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ServerError {
    fn from(err: io::Error) -> Self {
        ServerError::Io(err)
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ServerError::InvalidRequest("bad".into()).status_code(), 400);
        assert_eq!(ServerError::Panic("boom".into()).status_code(), 500);
        let bind = ServerError::Bind {
            addr: "0.0.0.0:8080".into(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(bind.status_code(), 500);
    }

    #[test]
    fn bind_failure_names_the_address() {
        let err = ServerError::Bind {
            addr: "0.0.0.0:8080".into(),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        let msg = err.to_string();
        assert!(msg.contains("0.0.0.0:8080"));
        assert!(msg.contains("in use"));
    }
}
