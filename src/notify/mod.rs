//! Notification composition and delivery.
//!
//! [`compose_monthly`] and [`compose_daily`] turn selections into
//! addressed [`EmailMessage`]s; a [`Dispatcher`] hands them to whatever
//! [`Mailer`] the caller plugs in.

mod compose;
mod dispatch;
mod message;
mod notification;
pub mod template;

pub use compose::{compose_daily, compose_monthly};
pub use dispatch::{DispatchReport, Dispatcher, Environment, Mailer, NullMailer};
pub use message::EmailMessage;
pub use notification::Notification;
