use crate::error::ServerResult;
use crate::http::{Request, Response};
use futures::future::BoxFuture;
use std::future::Future;

pub type HandlerResponse = ServerResult<Response>;

pub trait IntoResponse {
    fn into_response_future(self) -> BoxFuture<'static, HandlerResponse>;
}

impl<F: Future<Output = HandlerResponse> + Send + 'static> IntoResponse for F {
    fn into_response_future(self) -> BoxFuture<'static, HandlerResponse> {
        Box::pin(self)
    }
}

/// An async request handler. Plain `Fn(Request) -> impl Future` closures and
/// `async fn`s implement it, so the greeting handler stays an ordinary
/// function.
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: Request) -> BoxFuture<'static, HandlerResponse>;

    fn dyn_clone<'s>(&self) -> Box<dyn Handler + 's>
    where
        Self: 's;
}

impl Clone for Box<dyn Handler> {
    fn clone(&self) -> Box<dyn Handler> {
        self.dyn_clone()
    }
}

impl<F, R> Handler for F
where
    F: Fn(Request) -> R + Send + Sync + Clone + 'static,
    R: IntoResponse,
{
    fn handle(&self, req: Request) -> BoxFuture<'static, HandlerResponse> {
        (self)(req).into_response_future()
    }

    fn dyn_clone<'s>(&self) -> Box<dyn Handler + 's>
    where
        Self: 's,
    {
        Box::new((*self).clone())
    }
}
