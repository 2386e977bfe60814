//! Per-account capabilities.
//!
//! A handful of office accounts are view/create only. The original client
//! hardcoded their emails at every call site; here the deny-list lives in
//! the config file as a map from email to a capability set, and unknown
//! accounts default to full capabilities.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::user::{Role, User};

/// What an account may do to events it can see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    pub can_edit: bool,
    pub can_delete: bool,
    pub can_drag: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Capabilities {
            can_edit: true,
            can_delete: true,
            can_drag: true,
        }
    }
}

impl Capabilities {
    /// View/create only.
    pub fn read_only() -> Self {
        Capabilities {
            can_edit: false,
            can_delete: false,
            can_drag: false,
        }
    }
}

/// Email-keyed capability lookup. Keys are matched case-insensitively.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CapabilityMap(HashMap<String, Capabilities>);

impl CapabilityMap {
    pub fn new(entries: HashMap<String, Capabilities>) -> Self {
        CapabilityMap(
            entries
                .into_iter()
                .map(|(email, caps)| (email.to_lowercase(), caps))
                .collect(),
        )
    }

    /// Build a map that marks the given emails as read-only offices.
    pub fn read_only_offices<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        CapabilityMap(
            emails
                .into_iter()
                .map(|e| (e.as_ref().to_lowercase(), Capabilities::read_only()))
                .collect(),
        )
    }

    /// Capabilities for an account. Unlisted accounts get the full set.
    pub fn for_email(&self, email: &str) -> Capabilities {
        self.0
            .get(&email.to_lowercase())
            .copied()
            .unwrap_or_default()
    }

    /// Whether this account may edit a particular event: needs the edit
    /// capability and must be an admin or the event's creator.
    pub fn can_modify(&self, user: &User, created_by: i64) -> bool {
        self.for_email(&user.email).can_edit
            && (user.role == Role::Admin || user.id == created_by)
    }

    /// Whether this account may delete a particular event.
    pub fn can_delete(&self, user: &User, created_by: i64) -> bool {
        self.for_email(&user.email).can_delete
            && (user.role == Role::Admin || user.id == created_by)
    }

    /// Whether this account may drag/resize events at all.
    pub fn can_drag(&self, user: &User) -> bool {
        self.for_email(&user.email).can_drag
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, email: &str, role: Role) -> User {
        User {
            id,
            name: "Office".into(),
            email: email.into(),
            role,
            color: None,
        }
    }

    #[test]
    fn unknown_accounts_get_full_capabilities() {
        let map = CapabilityMap::default();
        let caps = map.for_email("someone@example.gov");
        assert!(caps.can_edit && caps.can_delete && caps.can_drag);
    }

    #[test]
    fn read_only_offices_are_denied_regardless_of_ownership() {
        let map = CapabilityMap::read_only_offices(["romo@example.gov"]);
        let owner = user(7, "ROMO@example.gov", Role::User);
        assert!(!map.can_modify(&owner, 7));
        assert!(!map.can_delete(&owner, 7));
        assert!(!map.can_drag(&owner));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let map = CapabilityMap::read_only_offices(["Romo@Example.Gov"]);
        assert!(!map.for_email("romo@example.gov").can_edit);
    }

    #[test]
    fn admin_may_modify_others_events() {
        let map = CapabilityMap::default();
        let admin = user(1, "admin@example.gov", Role::Admin);
        assert!(map.can_modify(&admin, 99));
    }

    #[test]
    fn ordinary_user_may_only_modify_own_events() {
        let map = CapabilityMap::default();
        let u = user(7, "unit@example.gov", Role::User);
        assert!(map.can_modify(&u, 7));
        assert!(!map.can_modify(&u, 8));
    }
}
