//! Fallback for unknown paths

use async_trait::async_trait;

use crate::{error::AppResult, router::landing_path, ui::NavLink};

use super::{Page, PageContext};

pub struct NotFoundPage {
    ctx: PageContext,
}

impl NotFoundPage {
    pub fn new(ctx: PageContext) -> Self {
        Self { ctx }
    }

    /// Ways out of the 404 page
    pub fn links(&self) -> Vec<NavLink> {
        let third = match self.ctx.auth.user() {
            Some(user) => NavLink {
                label: "Dashboard",
                path: landing_path(&user),
            },
            None => NavLink {
                label: "Login",
                path: "/login",
            },
        };
        vec![
            NavLink {
                label: "Go Home",
                path: "/",
            },
            NavLink {
                label: "Browse Books",
                path: "/books",
            },
            third,
        ]
    }
}

#[async_trait]
impl Page for NotFoundPage {
    async fn load(&mut self) -> AppResult<()> {
        Ok(())
    }

    fn render(&self) -> String {
        let mut out = String::from(
            "404\nPage Not Found\n\nThe page you're looking for doesn't exist or has been moved.\n\n",
        );
        for link in self.links() {
            out.push_str(&format!("  {} ({})\n", link.label, link.path));
        }
        out
    }
}
