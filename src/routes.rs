//! Route table and the single capability guard.

use crate::session::Capabilities;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Public,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Articles,
    Login,
    Register,
    AdminDashboard,
    AdminArticles,
    AdminUsers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub path: &'static str,
    pub title: &'static str,
    pub view: View,
    pub capability: Capability,
}

pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        title: "Accueil",
        view: View::Home,
        capability: Capability::Public,
    },
    Route {
        path: "/articles",
        title: "Articles",
        view: View::Articles,
        capability: Capability::Public,
    },
    Route {
        path: "/login",
        title: "Connexion",
        view: View::Login,
        capability: Capability::Public,
    },
    Route {
        path: "/register",
        title: "Inscription",
        view: View::Register,
        capability: Capability::Public,
    },
    Route {
        path: "/admin",
        title: "Dashboard",
        view: View::AdminDashboard,
        capability: Capability::Admin,
    },
    Route {
        path: "/admin/articles",
        title: "Articles (admin)",
        view: View::AdminArticles,
        capability: Capability::Admin,
    },
    Route {
        path: "/admin/users",
        title: "Utilisateurs",
        view: View::AdminUsers,
        capability: Capability::Admin,
    },
];

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";

/// Look up a route by path; a trailing slash is ignored
pub fn resolve(path: &str) -> Option<&'static Route> {
    let trimmed = path.trim();
    let normalized = if trimmed.len() > 1 {
        trimmed.trim_end_matches('/')
    } else {
        trimmed
    };
    ROUTES.iter().find(|r| r.path == normalized)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Redirect(&'static str),
}

/// Admin routes need authenticated AND admin. Anonymous visitors are sent
/// to the login page, signed-in non-admins to the home page.
pub fn guard(route: &Route, caps: Capabilities) -> Access {
    match route.capability {
        Capability::Public => Access::Granted,
        Capability::Admin if caps.authenticated && caps.admin => Access::Granted,
        Capability::Admin if !caps.authenticated => Access::Redirect(LOGIN),
        Capability::Admin => Access::Redirect(HOME),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ANON: Capabilities = Capabilities {
        authenticated: false,
        admin: false,
    };
    const USER: Capabilities = Capabilities {
        authenticated: true,
        admin: false,
    };
    const ADMIN: Capabilities = Capabilities {
        authenticated: true,
        admin: true,
    };

    #[test]
    fn test_resolve() {
        assert_eq!(resolve("/").unwrap().view, View::Home);
        assert_eq!(resolve("/admin/users/").unwrap().view, View::AdminUsers);
        assert_eq!(resolve(" /articles ").unwrap().view, View::Articles);
        assert!(resolve("/nope").is_none());
    }

    #[test]
    fn test_public_routes_always_granted() {
        for route in ROUTES.iter().filter(|r| r.capability == Capability::Public) {
            for caps in [ANON, USER, ADMIN] {
                assert_eq!(guard(route, caps), Access::Granted, "{}", route.path);
            }
        }
    }

    #[test]
    fn test_admin_routes_require_admin() {
        for route in ROUTES.iter().filter(|r| r.capability == Capability::Admin) {
            assert_eq!(guard(route, ANON), Access::Redirect("/login"));
            assert_eq!(guard(route, USER), Access::Redirect("/"));
            assert_eq!(guard(route, ADMIN), Access::Granted);
        }
    }

    #[test]
    fn test_admin_flag_without_session_is_not_enough() {
        let odd = Capabilities {
            authenticated: false,
            admin: true,
        };
        assert_eq!(
            guard(resolve("/admin").unwrap(), odd),
            Access::Redirect("/login")
        );
    }

    #[test]
    fn test_paths_are_unique() {
        for (i, a) in ROUTES.iter().enumerate() {
            for b in &ROUTES[i + 1..] {
                assert_ne!(a.path, b.path);
            }
        }
    }
}
