//! Domain layer: entities, identifiers, paging types and notifications.
//!
//! Everything here is backend-agnostic. Backend payloads are turned into
//! these types by [`crate::normalize`] before any view sees them.

pub mod customer;
pub mod entity;
pub mod entity_id;
pub mod notification;
pub mod notification_bus;
pub mod order_status;
pub mod page;
pub mod payment_method;
pub mod validation;

pub use customer::{Customer, CustomerUpdate};
pub use entity::ListEntity;
pub use entity_id::EntityId;
pub use notification::{Notification, NotificationLevel};
pub use notification_bus::NotificationBus;
pub use order_status::{OrderStatus, OrderStatusDraft};
pub use page::{PageRequest, PageResult, slice_locally, total_pages};
pub use payment_method::{PaymentMethod, PaymentMethodDraft};
