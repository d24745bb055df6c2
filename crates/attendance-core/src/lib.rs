//! `attendance-core`: the admin-console workflow for the attendance system.
//!
//! Every admin action (remove a teacher, block a student's attendance, list
//! teachers without a Bluetooth device id, ...) is the same four steps: read
//! form fields, call the REST API, branch on the HTTP status, then update the
//! view or show a notification. This crate implements that workflow once.
//!
//! ```text
//! ActionKind ──► ActionDescriptor (static table)
//!                     │
//!                     ▼
//! FormValues ──► FormActionController ──► ApiClient (reqwest)
//!                     │        │
//!                     │        └──► FormSurface::apply(Effect)  (ConsoleView)
//!                     ▼
//!                UiState { BusyIndicator, NotificationChannel }
//! ```

pub mod action;
pub mod client;
pub mod config;
pub mod confirm;
pub mod console;
pub mod controller;
pub mod error;
pub mod form;
pub mod notification;
pub mod records;
pub mod roster;
pub mod ui_state;
pub mod view;

pub use action::{ActionDescriptor, ActionKind, Effect, HttpMethod};
pub use client::ApiClient;
pub use config::ConsoleConfig;
pub use confirm::{AssumeYes, Confirm, FixedAnswer};
pub use console::AdminConsole;
pub use controller::{FormActionController, FormSurface, Outcome, SuccessPayload};
pub use error::{ActionError, ConsoleError, Result};
pub use form::FormValues;
pub use notification::{NotificationChannel, NotificationEvent, Severity};
pub use ui_state::{BusyGuard, BusyIndicator, UiState};
pub use view::ConsoleView;
