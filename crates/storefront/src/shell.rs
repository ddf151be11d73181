//! Admin panel shell commands.
//!
//! Sidebar navigation and logout are plain values dispatched against a
//! [`ShellActions`] implementation supplied by the host (UI, CLI, test fake).

use serde::{Deserialize, Serialize};

use shopfront_core::{CategoryId, ProductId};

/// Admin sections reachable from the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdminSection {
    Dashboard,
    Products,
    Categories,
    Orders,
    Customers,
}

impl AdminSection {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminSection::Dashboard => "dashboard",
            AdminSection::Products => "products",
            AdminSection::Categories => "categories",
            AdminSection::Orders => "orders",
            AdminSection::Customers => "customers",
        }
    }
}

/// A storefront or admin location.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "route", content = "param", rename_all = "lowercase")]
pub enum Route {
    Home,
    Products,
    Category(CategoryId),
    Product(ProductId),
    Search(String),
    Cart,
    Orders,
    Login,
    Admin(AdminSection),
}

impl Route {
    /// Path for this route; search text is percent-encoded into the query string.
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Products => "/products".to_string(),
            Route::Category(id) => format!("/categories/{id}"),
            Route::Product(id) => format!("/products/{id}"),
            Route::Search(q) => format!("/search?q={}", urlencoding::encode(q)),
            Route::Cart => "/cart".to_string(),
            Route::Orders => "/orders".to_string(),
            Route::Login => "/login".to_string(),
            Route::Admin(AdminSection::Dashboard) => "/admin".to_string(),
            Route::Admin(section) => format!("/admin/{}", section.as_str()),
        }
    }
}

impl core::fmt::Display for Route {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.path())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShellCommand {
    Navigate(Route),
    Logout,
}

/// Prompt shown before ending an admin session.
pub const LOGOUT_PROMPT: &str = "Log out of the admin panel?";

/// Host-side effects the shell needs.
pub trait ShellActions {
    /// Ask the user a yes/no question.
    fn confirm(&mut self, prompt: &str) -> bool;
    fn navigate(&mut self, route: Route);
    /// Drop credentials and any session state.
    fn end_session(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellOutcome {
    Navigated(Route),
    LoggedOut,
    /// The user declined the confirmation; nothing changed.
    Cancelled,
}

/// Admin panel frame: tracks the active route and runs shell commands.
#[derive(Debug)]
pub struct AdminShell<A> {
    actions: A,
    active: Route,
}

impl<A: ShellActions> AdminShell<A> {
    pub fn new(actions: A) -> Self {
        Self {
            actions,
            active: Route::Admin(AdminSection::Dashboard),
        }
    }

    pub fn active(&self) -> &Route {
        &self.active
    }

    pub fn dispatch(&mut self, command: ShellCommand) -> ShellOutcome {
        match command {
            ShellCommand::Navigate(route) => {
                tracing::debug!(route = %route, "admin navigation");
                self.active = route.clone();
                self.actions.navigate(route.clone());
                ShellOutcome::Navigated(route)
            }
            ShellCommand::Logout => {
                if !self.actions.confirm(LOGOUT_PROMPT) {
                    return ShellOutcome::Cancelled;
                }
                self.actions.end_session();
                self.active = Route::Login;
                self.actions.navigate(Route::Login);
                tracing::info!("admin session ended");
                ShellOutcome::LoggedOut
            }
        }
    }

    pub fn into_actions(self) -> A {
        self.actions
    }
}
