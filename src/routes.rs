//! Screen routing
//!
//! Maps location paths to the app's screens and back. Parsing is total:
//! any path that matches no screen becomes [`Route::NotFound`], which keeps
//! the attempted path for display. Trailing slashes are ignored.

use std::fmt;

/// A screen of the app, addressed by its location path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// The restaurant catalog at `/`.
    Catalog,

    /// A restaurant's detail and menu at `/restaurant/:id`.
    Restaurant(String),

    /// The checkout wizard at `/checkout`.
    Checkout,

    /// Order tracking at `/order-tracking/:id`.
    OrderTracking(String),

    /// The profile page at `/profile`.
    Profile,

    /// Any path that matches no screen; holds the attempted path.
    NotFound(String),
}

impl Route {
    /// Resolve a location path to a screen.
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        match normalized(path) {
            "/" => Route::Catalog,
            "/checkout" => Route::Checkout,
            "/profile" => Route::Profile,
            trimmed => {
                if let Some(id) = param_after(trimmed, "/restaurant/") {
                    Route::Restaurant(id.to_string())
                } else if let Some(id) = param_after(trimmed, "/order-tracking/") {
                    Route::OrderTracking(id.to_string())
                } else {
                    Route::NotFound(path.to_string())
                }
            }
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Catalog => f.write_str("/"),
            Route::Restaurant(id) => write!(f, "/restaurant/{id}"),
            Route::Checkout => f.write_str("/checkout"),
            Route::OrderTracking(id) => write!(f, "/order-tracking/{id}"),
            Route::Profile => f.write_str("/profile"),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}

fn normalized(path: &str) -> &str {
    let trimmed = path.trim_end_matches('/');

    if trimmed.is_empty() { "/" } else { trimmed }
}

fn param_after<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let rest = path.strip_prefix(prefix)?;

    (!rest.is_empty() && !rest.contains('/')).then_some(rest)
}
