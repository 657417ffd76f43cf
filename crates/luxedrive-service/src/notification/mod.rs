//! New-booking fan-out, admin recipient resolution, and in-app
//! notification management.

pub mod dispatcher;
pub mod recipient;
pub mod service;
pub mod template;

pub use dispatcher::{DispatchOutcome, NotificationDispatcher};
pub use recipient::AdminResolver;
pub use service::{NotificationList, NotificationService};
