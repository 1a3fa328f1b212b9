//! Navigation links for the current session

use crate::models::SessionUser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub path: &'static str,
}

const fn link(label: &'static str, path: &'static str) -> NavLink {
    NavLink { label, path }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navbar {
    pub brand: &'static str,
    pub links: Vec<NavLink>,
    /// Admin "Manage" menu
    pub manage: Vec<NavLink>,
    /// Name shown on the account menu, when logged in
    pub account: Option<String>,
    pub account_links: Vec<NavLink>,
}

impl Navbar {
    pub fn for_user(user: Option<&SessionUser>) -> Self {
        let mut links = vec![link("Home", "/"), link("Books", "/books")];
        let mut manage = Vec::new();
        let mut account_links = Vec::new();

        match user {
            None => {
                links.push(link("Login", "/login"));
                links.push(link("Register", "/register"));
            }
            Some(user) => {
                if user.is_member() {
                    links.push(link("Dashboard", "/dashboard"));
                    links.push(link("My Books", "/borrow-history"));
                    links.push(link("Notifications", "/notifications"));
                }
                if user.is_admin() {
                    links.push(link("Admin Dashboard", "/admin/dashboard"));
                    manage = vec![
                        link("Books", "/admin/books"),
                        link("Members", "/admin/members"),
                        link("Libraries", "/admin/libraries"),
                        link("Book Instances", "/admin/book-instances"),
                        link("Administrators", "/admin/administrators"),
                        link("Notifications", "/admin/notifications"),
                    ];
                }
                account_links.push(link("Profile", "/profile"));
                account_links.push(link("Logout", "/logout"));
            }
        }

        Self {
            brand: "Library Management",
            links,
            manage,
            account: user.map(|u| u.display_name().to_string()),
            account_links,
        }
    }

    /// Every reachable path, in menu order
    pub fn paths(&self) -> Vec<&'static str> {
        self.links
            .iter()
            .chain(&self.manage)
            .chain(&self.account_links)
            .map(|l| l.path)
            .collect()
    }

    pub fn render(&self) -> String {
        let mut out = format!("{} |", self.brand);
        for l in &self.links {
            out.push_str(&format!(" {} |", l.label));
        }
        if !self.manage.is_empty() {
            let items: Vec<&str> = self.manage.iter().map(|l| l.label).collect();
            out.push_str(&format!(" Manage [{}] |", items.join(", ")));
        }
        if let Some(account) = &self.account {
            out.push_str(&format!(" {}", account));
        }
        out
    }
}
