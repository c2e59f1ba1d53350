pub mod handler;

use std::collections::HashMap;

use crate::error::ParseError;

pub use handler::{json_handler, map_handler, yaml_handler, RedirectService};

/// One redirect rule as it appears in a route document.
///
/// ```yaml
/// - path: /some-path
///   url: https://www.some-url.com/demo
/// ```
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathRoute {
    pub path: String,
    pub url: String,
}

/// The inputs a [`PathMap`] can be built from.
#[derive(Debug, Clone)]
pub enum RouteSource<'a> {
    Map(HashMap<String, String>),
    Routes(Vec<PathRoute>),
    Yaml(&'a [u8]),
    Json(&'a [u8]),
}

/// Exact request path to destination URL. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathMap {
    routes: HashMap<String, String>,
}

impl PathMap {
    /// Normalises any [`RouteSource`] into a map. Later records win over earlier
    /// ones with the same path.
    pub fn build(source: RouteSource<'_>) -> Result<Self, ParseError> {
        let routes = match source {
            RouteSource::Map(routes) => return Ok(Self { routes }),
            RouteSource::Routes(routes) => routes,
            RouteSource::Yaml(document) => serde_yaml::from_slice(document)?,
            RouteSource::Json(document) => serde_json::from_slice(document)?,
        };
        Ok(Self::from_routes(routes))
    }

    pub fn from_routes(routes: impl IntoIterator<Item = PathRoute>) -> Self {
        let routes = routes
            .into_iter()
            .map(|route| (route.path, route.url))
            .collect();
        Self { routes }
    }

    pub fn from_yaml(document: &[u8]) -> Result<Self, ParseError> {
        Self::build(RouteSource::Yaml(document))
    }

    pub fn from_json(document: &[u8]) -> Result<Self, ParseError> {
        Self::build(RouteSource::Json(document))
    }

    /// Case-sensitive, no normalisation of trailing slashes.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.routes.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl From<HashMap<String, String>> for PathMap {
    fn from(routes: HashMap<String, String>) -> Self {
        Self { routes }
    }
}
