//! The serve loop.
//!
//! [`Server`] owns the config and the single catch-all handler. `run` binds
//! the listener, announces readiness through the configured sink, and then
//! accepts connections forever; there is no shutdown path, the process runs
//! until it is killed.

use crate::config::GreeterConfig;
use crate::error::{ServerError, ServerResult};
use crate::handler::{Handler, IntoResponse};
use crate::http::request::split_target;
use crate::http::{Method, Request, Response};
use crate::log::LogSink;
use futures::FutureExt;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::panic::AssertUnwindSafe;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;
use tokio::time::timeout;

pub struct Server {
    config: GreeterConfig,
    handler: Box<dyn Handler>,
}

impl Server {
    /// Creates a server that answers every request with `handler`, no matter
    /// the method or path.
    pub fn new<F, R>(config: GreeterConfig, handler: F) -> Self
    where
        F: Fn(Request) -> R + Send + Sync + Clone + 'static,
        R: IntoResponse + 'static,
    {
        Self {
            config,
            handler: Box::new(handler),
        }
    }

    /// Binds the listener and serves until the process is killed. Builds its
    /// own runtime so `main` stays synchronous.
    ///
    /// Returns `Err` only for the one fatal path: the port cannot be bound.
    pub fn run(self) -> ServerResult<()> {
        let runtime = Runtime::new()?;
        runtime.block_on(async {
            let bound = self.bind().await?;
            bound.serve().await
        })
    }

    /// Acquires the listening socket without starting the serve loop.
    pub async fn bind(self) -> ServerResult<BoundServer> {
        let addr = format!("0.0.0.0:{}", self.config.port);
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind { addr, source })?;
        Ok(BoundServer {
            listener,
            config: self.config,
            handler: self.handler,
        })
    }
}

/// A server that holds its listening socket. The readiness log line is only
/// emitted from here, so it can never precede a completed bind.
pub struct BoundServer {
    listener: TcpListener,
    config: GreeterConfig,
    handler: Box<dyn Handler>,
}

impl BoundServer {
    pub fn local_addr(&self) -> ServerResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub async fn serve(self) -> ServerResult<()> {
        let port = self.local_addr()?.port();
        self.config.sink.server_started(port);

        let connections = Arc::new(AtomicUsize::new(0));
        loop {
            match self.listener.accept().await {
                Ok((stream, _)) => {
                    if connections.load(Ordering::Relaxed) >= self.config.max_connections {
                        self.config.sink.connection_refused();
                        continue;
                    }
                    connections.fetch_add(1, Ordering::Relaxed);

                    let conn = Connection {
                        handler: self.handler.clone(),
                        keep_alive: self.config.keep_alive,
                        sink: self.config.sink,
                    };
                    let counter = Arc::clone(&connections);
                    tokio::spawn(async move {
                        if let Err(err) = conn.handle(stream).await {
                            conn.sink.connection_error(&err);
                        }
                        counter.fetch_sub(1, Ordering::Relaxed);
                    });
                }
                Err(err) => self.config.sink.connection_error(&err),
            }
        }
    }
}

struct Connection {
    handler: Box<dyn Handler>,
    keep_alive: Duration,
    sink: LogSink,
}

impl Connection {
    /// Serves requests on one connection until the peer closes it, asks for
    /// `Connection: close`, or the keep-alive window expires.
    async fn handle<S>(&self, stream: S) -> ServerResult<()>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        // One reader for the lifetime of the connection: bytes buffered past
        // the current request are pipelined requests and must survive to the
        // next iteration. Responses go out through the underlying stream.
        let mut reader = BufReader::new(stream);
        loop {
            let outcome = match timeout(self.keep_alive, read_request(&mut reader)).await {
                // Idle window expired.
                Err(_) => return Ok(()),
                Ok(outcome) => outcome,
            };

            match outcome {
                Ok(None) => return Ok(()),
                Ok(Some(req)) => {
                    let close = req
                        .headers
                        .get("connection")
                        .map(|v| v.eq_ignore_ascii_case("close"))
                        .unwrap_or(false);
                    let response = self.dispatch(req).await;
                    reader
                        .get_mut()
                        .write_all(response.serialize().as_bytes())
                        .await?;
                    if close {
                        return Ok(());
                    }
                }
                Err(err @ ServerError::InvalidRequest(_)) => {
                    let response = Response::error(err);
                    reader
                        .get_mut()
                        .write_all(response.serialize().as_bytes())
                        .await?;
                    return Ok(());
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Runs the handler, converting errors and panics into responses so a
    /// single request can never take the process down.
    async fn dispatch(&self, req: Request) -> Response {
        let outcome = AssertUnwindSafe(self.handler.handle(req)).catch_unwind().await;
        match outcome {
            Ok(Ok(response)) => response,
            Ok(Err(err)) => Response::error(err),
            Err(panic) => {
                let msg = if let Some(msg) = panic.downcast_ref::<&str>() {
                    msg.to_string()
                } else if let Some(msg) = panic.downcast_ref::<String>() {
                    msg.clone()
                } else {
                    "Unknown panic".to_string()
                };
                self.sink.handler_panic(&msg);
                Response::error(ServerError::Panic(msg))
            }
        }
    }
}

/// Reads one request off the wire. `Ok(None)` means the peer closed the
/// connection between requests.
async fn read_request<S>(reader: &mut BufReader<S>) -> ServerResult<Option<Request>>
where
    S: AsyncRead + Unpin,
{
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).await? == 0 {
        return Ok(None);
    }
    if request_line.trim().is_empty() {
        return Ok(None);
    }

    let mut parts = request_line.trim().split_whitespace();
    let method = parts
        .next()
        .ok_or_else(|| ServerError::InvalidRequest("empty request line".to_string()))?;
    let target = parts
        .next()
        .ok_or_else(|| ServerError::InvalidRequest("missing request target".to_string()))?;
    let (path, query) = split_target(target);

    let mut headers = HashMap::new();
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).await? == 0 {
            break;
        }
        if line.trim().is_empty() {
            break;
        }
        if let Some((key, value)) = line.trim().split_once(':') {
            headers.insert(key.trim().to_lowercase(), value.trim().to_string());
        }
    }

    // Drain the body so keep-alive connections stay framed.
    let mut body = Vec::new();
    if let Some(length) = headers
        .get("content-length")
        .and_then(|value| value.parse::<usize>().ok())
    {
        body.reserve(length);
        let mut limited = (&mut *reader).take(length as u64);
        limited.read_to_end(&mut body).await?;
    }

    Ok(Some(Request {
        method: Method::from_string(method),
        path,
        query,
        headers,
        body,
    }))
}
