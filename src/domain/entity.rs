//! Behaviour shared by every entity shown in an admin list.

use std::fmt;

use super::EntityId;

/// An entity that can be listed, named in notifications and deleted.
pub trait ListEntity: Clone + Send + Sync + fmt::Debug + 'static {
    /// Singular label used in messages (e.g. `"customer"`).
    const LABEL: &'static str;
    /// Plural label used in messages (e.g. `"customers"`).
    const PLURAL_LABEL: &'static str;

    /// Backend identifier.
    fn id(&self) -> &EntityId;

    /// Name shown to the user.
    fn display_name(&self) -> &str;

    /// Id of an owning aggregate this entity is linked to. A linked entity
    /// must not be deleted on its own.
    fn linked_aggregate(&self) -> Option<&EntityId> {
        None
    }
}
