//! Authorization capability checked before any mutating call.

use std::fmt;

use async_trait::async_trait;

/// Mutating action guarded by an [`Authorization`] check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Modify an existing entity.
    Update,
    /// Remove an entity.
    Delete,
    /// Open an editor / create a new entity.
    Edit,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verb = match self {
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Edit => "edit",
        };
        f.write_str(verb)
    }
}

/// Capability checks resolved before a mutating request is issued.
///
/// A `false` answer must short-circuit into
/// [`crate::error::ConsoleError::PermissionDenied`] without a network call.
#[async_trait]
pub trait Authorization: Send + Sync + fmt::Debug {
    /// May the current user update entities?
    async fn can_update(&self) -> bool;
    /// May the current user delete entities?
    async fn can_delete(&self) -> bool;
    /// May the current user open editors and create entities?
    async fn can_edit(&self) -> bool;

    /// Dispatches to the check matching `action`.
    async fn allows(&self, action: Action) -> bool {
        match action {
            Action::Update => self.can_update().await,
            Action::Delete => self.can_delete().await,
            Action::Edit => self.can_edit().await,
        }
    }
}

/// Fixed answers, mostly useful for tests and scripts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticAuthorization {
    /// Answer for [`Authorization::can_update`].
    pub update: bool,
    /// Answer for [`Authorization::can_delete`].
    pub delete: bool,
    /// Answer for [`Authorization::can_edit`].
    pub edit: bool,
}

impl StaticAuthorization {
    /// Grants every action.
    #[must_use]
    pub const fn allow_all() -> Self {
        Self {
            update: true,
            delete: true,
            edit: true,
        }
    }

    /// Denies every action.
    #[must_use]
    pub const fn deny_all() -> Self {
        Self {
            update: false,
            delete: false,
            edit: false,
        }
    }
}

#[async_trait]
impl Authorization for StaticAuthorization {
    async fn can_update(&self) -> bool {
        self.update
    }

    async fn can_delete(&self) -> bool {
        self.delete
    }

    async fn can_edit(&self) -> bool {
        self.edit
    }
}

/// Role-based answers for the admin console.
///
/// `admin` may do everything, `manager` may edit and update but not
/// delete, any other role is read-only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleAuthorization {
    role: String,
}

impl RoleAuthorization {
    /// Creates a checker for the given role name (case-insensitive).
    #[must_use]
    pub fn new(role: &str) -> Self {
        Self {
            role: role.trim().to_ascii_lowercase(),
        }
    }

    fn is_admin(&self) -> bool {
        self.role == "admin"
    }

    fn is_manager(&self) -> bool {
        self.is_admin() || self.role == "manager"
    }
}

#[async_trait]
impl Authorization for RoleAuthorization {
    async fn can_update(&self) -> bool {
        self.is_manager()
    }

    async fn can_delete(&self) -> bool {
        self.is_admin()
    }

    async fn can_edit(&self) -> bool {
        self.is_manager()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn admin_can_do_everything() {
        let auth = RoleAuthorization::new("Admin");
        assert!(auth.allows(Action::Update).await);
        assert!(auth.allows(Action::Delete).await);
        assert!(auth.allows(Action::Edit).await);
    }

    #[tokio::test]
    async fn manager_cannot_delete() {
        let auth = RoleAuthorization::new("manager");
        assert!(auth.can_update().await);
        assert!(auth.can_edit().await);
        assert!(!auth.can_delete().await);
    }

    #[tokio::test]
    async fn unknown_role_is_read_only() {
        let auth = RoleAuthorization::new("customer");
        assert!(!auth.can_update().await);
        assert!(!auth.can_delete().await);
        assert!(!auth.can_edit().await);
    }

    #[tokio::test]
    async fn static_deny_all() {
        let auth = StaticAuthorization::deny_all();
        assert!(!auth.allows(Action::Delete).await);
    }
}
