//! Operator identity and capability checks.
//!
//! A [`Session`] is established once `GET /api/v1/auth/me` succeeds and lives for
//! the duration of the console run. Role gating is centralized in
//! [`can_manage`]; individual sections never inspect the role string themselves.

use crate::sections::Resource;
use serde::Deserialize;

/// The identity payload returned by the auth endpoints.
///
/// `fio` and `role` are optional on the wire; missing values render as empty
/// strings rather than failing the whole bootstrap.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserIdentity {
    /// Unique login of the operator.
    pub login: String,
    /// Full name, used for the header greeting when present.
    #[serde(default)]
    pub fio: String,
    /// Role string (`agent`, `admin`, `expeditor`, `stockman`, `paymaster`).
    #[serde(default)]
    pub role: String,
}

/// An authenticated console session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Identity of the logged-in operator.
    pub user: UserIdentity,
}

impl Session {
    /// Creates a session for the given identity.
    #[must_use]
    pub const fn new(user: UserIdentity) -> Self {
        Self { user }
    }

    /// Whether the operator holds the admin role.
    ///
    /// The comparison is case-insensitive; backends have historically returned
    /// both `admin` and `Admin`.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user.role.to_lowercase() == "admin"
    }

    /// Header greeting: full name when available, login otherwise, with the
    /// role in parentheses.
    #[must_use]
    pub fn display_name(&self) -> String {
        let name = if self.user.fio.is_empty() {
            &self.user.login
        } else {
            &self.user.fio
        };
        format!("{} ({})", name, self.user.role)
    }
}

/// Whether the current session may mutate the given resource.
///
/// Reference dictionaries and inventory operations are admin-only; customers
/// and orders are open to any authenticated operator; stock is read-only for
/// everyone. Without a session nothing is writable.
#[must_use]
pub fn can_manage(session: Option<&Session>, resource: Resource) -> bool {
    let Some(session) = session else {
        return false;
    };

    match resource {
        Resource::Users | Resource::Products | Resource::Warehouses | Resource::Operations => {
            session.is_admin()
        }
        Resource::Customers | Resource::Orders => true,
        Resource::Stock => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(role: &str) -> Session {
        Session::new(UserIdentity {
            login: "ivanov".to_string(),
            fio: "Иванов И.И.".to_string(),
            role: role.to_string(),
        })
    }

    #[test]
    fn admin_check_is_case_insensitive() {
        assert!(session("admin").is_admin());
        assert!(session("Admin").is_admin());
        assert!(session("ADMIN").is_admin());
        assert!(!session("agent").is_admin());
        assert!(!session("").is_admin());
    }

    #[test]
    fn display_name_prefers_fio() {
        assert_eq!(session("agent").display_name(), "Иванов И.И. (agent)");

        let bare = Session::new(UserIdentity {
            login: "ivanov".to_string(),
            fio: String::new(),
            role: "agent".to_string(),
        });
        assert_eq!(bare.display_name(), "ivanov (agent)");
    }

    #[test]
    fn admin_gated_resources_require_admin() {
        let admin = session("admin");
        let agent = session("agent");

        for resource in [
            Resource::Users,
            Resource::Products,
            Resource::Warehouses,
            Resource::Operations,
        ] {
            assert!(can_manage(Some(&admin), resource));
            assert!(!can_manage(Some(&agent), resource));
        }
    }

    #[test]
    fn customers_and_orders_are_open_to_any_role() {
        let agent = session("agent");
        assert!(can_manage(Some(&agent), Resource::Customers));
        assert!(can_manage(Some(&agent), Resource::Orders));
    }

    #[test]
    fn stock_is_never_writable() {
        let admin = session("admin");
        assert!(!can_manage(Some(&admin), Resource::Stock));
        assert!(!can_manage(None, Resource::Stock));
    }

    #[test]
    fn no_session_means_no_access() {
        assert!(!can_manage(None, Resource::Customers));
        assert!(!can_manage(None, Resource::Users));
    }
}
