// src/routes.rs
//! Screens of the UI and how controllers ask to move between them.

use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/`, first page of the sample list.
    List,
    /// `/?page=N`
    ListPage(i64),
    Create,
    Edit(i64),
    Detail(i64),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::ListPage(page) if *page <= 1 => "/".to_string(),
            Route::ListPage(page) => format!("/?page={}", page),
            Route::Create => "/create".to_string(),
            Route::Edit(id) => format!("/edit/{}", id),
            Route::Detail(id) => format!("/biosample/{}", id),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// A controller's request to leave the current screen, optionally after a
/// pause so a success message can be read first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Navigation {
    pub route: Route,
    pub delay: Option<Duration>,
}

impl Navigation {
    pub fn to(route: Route) -> Self {
        Self { route, delay: None }
    }

    pub fn after(route: Route, delay: Duration) -> Self {
        Self {
            route,
            delay: Some(delay),
        }
    }
}
