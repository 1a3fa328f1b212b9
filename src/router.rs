//! Route table, access guards and navigation state

use std::sync::RwLock;

use crate::models::SessionUser;

/// Who may open a route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    /// Only for visitors who are not logged in (login, register)
    GuestOnly,
    /// Any authenticated user
    Member,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Catalog,
    BookDetails(i64),
    Login,
    Register,
    Dashboard,
    BorrowHistory,
    Notifications,
    Profile,
    AdminDashboard,
    AdminBooks,
    AdminMembers,
    AdminLibraries,
    AdminBookInstances,
    AdminAdministrators,
    AdminNotifications,
    NotFound,
}

impl Route {
    /// Map a URL path to a route; query strings and trailing slashes are ignored
    pub fn parse(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let trimmed = if trimmed.is_empty() { "/" } else { trimmed };

        match trimmed {
            "/" => Route::Home,
            "/books" => Route::Catalog,
            "/login" => Route::Login,
            "/register" => Route::Register,
            "/dashboard" => Route::Dashboard,
            "/borrow-history" => Route::BorrowHistory,
            "/notifications" => Route::Notifications,
            "/profile" => Route::Profile,
            "/admin/dashboard" => Route::AdminDashboard,
            "/admin/books" => Route::AdminBooks,
            "/admin/members" => Route::AdminMembers,
            "/admin/libraries" => Route::AdminLibraries,
            "/admin/book-instances" => Route::AdminBookInstances,
            "/admin/administrators" => Route::AdminAdministrators,
            "/admin/notifications" => Route::AdminNotifications,
            other => other
                .strip_prefix("/books/")
                .and_then(|id| id.parse::<i64>().ok())
                .map(Route::BookDetails)
                .unwrap_or(Route::NotFound),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Catalog => "/books".to_string(),
            Route::BookDetails(id) => format!("/books/{}", id),
            Route::Login => "/login".to_string(),
            Route::Register => "/register".to_string(),
            Route::Dashboard => "/dashboard".to_string(),
            Route::BorrowHistory => "/borrow-history".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::Profile => "/profile".to_string(),
            Route::AdminDashboard => "/admin/dashboard".to_string(),
            Route::AdminBooks => "/admin/books".to_string(),
            Route::AdminMembers => "/admin/members".to_string(),
            Route::AdminLibraries => "/admin/libraries".to_string(),
            Route::AdminBookInstances => "/admin/book-instances".to_string(),
            Route::AdminAdministrators => "/admin/administrators".to_string(),
            Route::AdminNotifications => "/admin/notifications".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }

    pub fn access(&self) -> Access {
        match self {
            Route::Home | Route::Catalog | Route::BookDetails(_) | Route::NotFound => Access::Public,
            Route::Login | Route::Register => Access::GuestOnly,
            Route::Dashboard | Route::BorrowHistory | Route::Notifications | Route::Profile => {
                Access::Member
            }
            Route::AdminDashboard
            | Route::AdminBooks
            | Route::AdminMembers
            | Route::AdminLibraries
            | Route::AdminBookInstances
            | Route::AdminAdministrators
            | Route::AdminNotifications => Access::Admin,
        }
    }
}

/// Outcome of resolving a path for the current user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Render(Route),
    Redirect(String),
}

/// Home page for a logged-in user
pub fn landing_path(user: &SessionUser) -> &'static str {
    if user.is_admin() {
        "/admin/dashboard"
    } else {
        "/dashboard"
    }
}

/// Apply the access guard of `path` for `user` (`None` when logged out)
pub fn resolve(path: &str, user: Option<&SessionUser>) -> Resolution {
    let route = Route::parse(path);

    match (route.access(), user) {
        (Access::Member | Access::Admin, None) => Resolution::Redirect("/login".to_string()),
        (Access::Admin, Some(u)) if !u.is_admin() => Resolution::Redirect("/dashboard".to_string()),
        (Access::GuestOnly, Some(u)) => Resolution::Redirect(landing_path(u).to_string()),
        _ => Resolution::Render(route),
    }
}

/// Current location, shared between pages and the HTTP client
#[derive(Debug)]
pub struct Navigator {
    location: RwLock<String>,
}

impl Navigator {
    pub fn new(initial: &str) -> Self {
        Self {
            location: RwLock::new(initial.to_string()),
        }
    }

    pub fn current(&self) -> String {
        self.location.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn redirect(&self, path: &str) {
        tracing::debug!("Navigating to {}", path);
        *self.location.write().unwrap_or_else(|e| e.into_inner()) = path.to_string();
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new("/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserType;

    fn user(user_type: UserType) -> SessionUser {
        SessionUser {
            id: 1,
            username: "u".to_string(),
            full_name: None,
            user_type,
        }
    }

    #[test]
    fn test_parse_paths() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/books/"), Route::Catalog);
        assert_eq!(Route::parse("/books/42"), Route::BookDetails(42));
        assert_eq!(Route::parse("/books/abc"), Route::NotFound);
        assert_eq!(Route::parse("/admin/book-instances?x=1"), Route::AdminBookInstances);
        assert_eq!(Route::parse("/nowhere"), Route::NotFound);
    }

    #[test]
    fn test_protected_routes_redirect_guests_to_login() {
        assert_eq!(resolve("/dashboard", None), Resolution::Redirect("/login".to_string()));
        assert_eq!(resolve("/admin/books", None), Resolution::Redirect("/login".to_string()));
        assert_eq!(resolve("/books", None), Resolution::Render(Route::Catalog));
    }

    #[test]
    fn test_admin_routes_reject_members() {
        let member = user(UserType::Member);
        assert_eq!(
            resolve("/admin/members", Some(&member)),
            Resolution::Redirect("/dashboard".to_string())
        );
        assert_eq!(resolve("/profile", Some(&member)), Resolution::Render(Route::Profile));
    }

    #[test]
    fn test_guest_only_routes_send_users_home() {
        let admin = user(UserType::Admin);
        let member = user(UserType::Member);
        assert_eq!(
            resolve("/login", Some(&admin)),
            Resolution::Redirect("/admin/dashboard".to_string())
        );
        assert_eq!(
            resolve("/register", Some(&member)),
            Resolution::Redirect("/dashboard".to_string())
        );
        assert_eq!(resolve("/login", None), Resolution::Render(Route::Login));
    }

    #[test]
    fn test_unknown_path_renders_not_found() {
        assert_eq!(resolve("/missing", None), Resolution::Render(Route::NotFound));
    }

    #[test]
    fn test_navigator_tracks_location() {
        let nav = Navigator::default();
        assert_eq!(nav.current(), "/");
        nav.redirect("/login");
        assert_eq!(nav.current(), "/login");
    }
}
