// src/handlers/layout.rs
use std::sync::Arc;

use log::{error, info};

use crate::middleware::navigator::Navigator;
use crate::middleware::session::{Session, SessionError};

pub const BRAND: &str = "Biodata Karyawan";
pub const BIODATA_PATH: &str = "/biodata";
pub const ADMIN_PATH: &str = "/admin";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
}

/// Where `/` sends a visitor.
pub fn landing_route<'a>(session: &dyn Session, login_path: &'a str) -> &'a str {
    if !session.is_authenticated() {
        login_path
    } else if session.is_admin() {
        ADMIN_PATH
    } else {
        BIODATA_PATH
    }
}

/// Navigation chrome shared by every signed-in page.
pub struct Layout {
    session: Arc<dyn Session>,
    navigator: Arc<dyn Navigator>,
    login_path: String,
}

impl Layout {
    pub fn new(session: Arc<dyn Session>, navigator: Arc<dyn Navigator>, login_path: &str) -> Self {
        Self {
            session,
            navigator,
            login_path: login_path.to_string(),
        }
    }

    pub fn brand(&self) -> &'static str {
        BRAND
    }

    /// Empty when signed out; the admin entry only shows for admins.
    pub fn nav_items(&self) -> Vec<NavItem> {
        if !self.session.is_authenticated() {
            return Vec::new();
        }
        let mut items = vec![NavItem {
            label: "My Biodata",
            path: BIODATA_PATH,
        }];
        if self.session.is_admin() {
            items.push(NavItem {
                label: "Admin Panel",
                path: ADMIN_PATH,
            });
        }
        items
    }

    pub fn show_logout(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn landing(&self) -> &str {
        landing_route(self.session.as_ref(), &self.login_path)
    }

    /// Forgets the session and goes to the login page.
    pub fn logout(&self) -> Result<(), SessionError> {
        if let Err(e) = self.session.clear() {
            error!("Logout could not clear the session: {}", e);
            return Err(e);
        }
        info!("Logged out");
        self.navigator.navigate(&self.login_path);
        Ok(())
    }
}
