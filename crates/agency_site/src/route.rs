//! Routes and navigation history

use std::fmt;

/// A resolved location
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Portfolio,
    Contact,
    /// Unmatched path, kept in its normalized form
    NotFound(String),
}

impl Route {
    /// Resolve a location. Case, a trailing slash, the query string and
    /// the fragment are ignored.
    pub fn resolve(location: &str) -> Self {
        let path = normalize(location);
        match path.as_str() {
            "/" => Route::Home,
            "/portfolio" => Route::Portfolio,
            "/contact" => Route::Contact,
            _ => Route::NotFound(path),
        }
    }

    /// Normalized path; also the page presence key
    pub fn path(&self) -> &str {
        match self {
            Route::Home => "/",
            Route::Portfolio => "/portfolio",
            Route::Contact => "/contact",
            Route::NotFound(path) => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Route::NotFound(_))
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Strip query and fragment, lowercase, ensure a leading slash and drop
/// trailing ones
pub fn normalize(location: &str) -> String {
    let end = location.find(|c: char| c == '?' || c == '#').unwrap_or(location.len());
    let trimmed = location[..end].trim().trim_end_matches('/');
    let lower = trimmed.to_lowercase();
    if lower.starts_with('/') {
        lower
    } else {
        format!("/{lower}")
    }
}

/// Browser-style back/forward stack
#[derive(Clone, Debug)]
pub struct History {
    entries: Vec<Route>,
    cursor: usize,
}

impl History {
    pub fn new(start: Route) -> Self {
        Self {
            entries: vec![start],
            cursor: 0,
        }
    }

    pub fn current(&self) -> &Route {
        &self.entries[self.cursor]
    }

    /// Push `route`, dropping any forward entries. Pushing the current
    /// route does nothing and returns false.
    pub fn push(&mut self, route: Route) -> bool {
        if *self.current() == route {
            return false;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(route);
        self.cursor += 1;
        true
    }

    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn back(&mut self) -> Option<&Route> {
        if !self.can_go_back() {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    pub fn forward(&mut self) -> Option<&Route> {
        if !self.can_go_forward() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
