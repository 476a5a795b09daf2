//! # storefront-admin
//!
//! Admin console core for a storefront REST backend: paginated list
//! controllers for customers, order statuses and payment methods, and the
//! normalizers that turn inconsistent backend payloads into one canonical
//! shape per entity.
//!
//! Rendering is not part of this crate. Views own a [`ListController`],
//! render its [`ListState`] snapshots and subscribe to the
//! [`NotificationBus`] for toasts.
//!
//! ## Architecture
//!
//! ```text
//! View
//!     │
//!     ├── ListController (controller/)
//!     │       ├── Authorization, ConfirmationSurface (ports/)
//!     │       └── NotificationSink ── NotificationBus (domain/)
//!     │
//!     ├── CustomerService, OrderStatusService,
//!     │   PaymentMethodService (service/)
//!     │       ├── ReadErrorPolicy + fallback datasets
//!     │       └── normalizers (normalize/)
//!     │
//!     └── Transport ── HttpTransport (transport/)
//!             └── CredentialsProvider (ports/)
//! ```
//!
//! [`ListController`]: controller::ListController
//! [`ListState`]: controller::ListState
//! [`NotificationBus`]: domain::NotificationBus

pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod normalize;
pub mod ports;
pub mod service;
pub mod transport;
