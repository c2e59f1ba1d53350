//! Tower service that turns a PathMap into redirects, delegating misses to a fallback.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use tower::Service;

use crate::error::ParseError;
use crate::urlshort::{PathMap, RouteSource};

/// Redirects requests whose path is in the map with `302 Found`; everything
/// else goes to `fallback` and its response is returned as is.
#[derive(Debug, Clone)]
pub struct RedirectService<S> {
    routes: Arc<PathMap>,
    fallback: S,
}

impl<S> RedirectService<S> {
    pub fn new(routes: PathMap, fallback: S) -> Self {
        Self {
            routes: Arc::new(routes),
            fallback,
        }
    }

    pub fn routes(&self) -> &PathMap {
        &self.routes
    }
}

/// Builds a redirector straight from a path to URL map.
pub fn map_handler<S>(routes: HashMap<String, String>, fallback: S) -> RedirectService<S> {
    RedirectService::new(PathMap::from(routes), fallback)
}

/// Builds a redirector from a YAML list of `{path, url}` records.
pub fn yaml_handler<S>(document: &[u8], fallback: S) -> Result<RedirectService<S>, ParseError> {
    let routes = PathMap::build(RouteSource::Yaml(document))?;
    Ok(RedirectService::new(routes, fallback))
}

/// Builds a redirector from a JSON array of `{path, url}` records.
pub fn json_handler<S>(document: &[u8], fallback: S) -> Result<RedirectService<S>, ParseError> {
    let routes = PathMap::build(RouteSource::Json(document))?;
    Ok(RedirectService::new(routes, fallback))
}

impl<S, B> Service<Request<B>> for RedirectService<S>
where
    S: Service<Request<B>> + 'static,
    S::Response: IntoResponse,
    S::Error: Send + 'static,
    S::Future: Send + 'static,
    B: 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Response, S::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.fallback.poll_ready(cx)
    }

    fn call(&mut self, request: Request<B>) -> Self::Future {
        if let Some(url) = self.routes.lookup(request.uri().path()) {
            log::debug!("Redirecting {} to {}", request.uri().path(), url);
            let response = found(url);
            return Box::pin(std::future::ready(Ok(response)));
        }

        let pending = self.fallback.call(request);
        Box::pin(async move { pending.await.map(IntoResponse::into_response) })
    }
}

fn found(url: &str) -> Response {
    match HeaderValue::from_str(url) {
        Ok(location) => (StatusCode::FOUND, [(header::LOCATION, location)]).into_response(),
        Err(err) => {
            log::error!("Cannot redirect to {:?}: {}", url, err);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
