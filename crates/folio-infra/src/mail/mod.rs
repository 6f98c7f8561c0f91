//! Contact form relays.

mod log;
mod sendgrid;

pub use log::LogMailer;
pub use sendgrid::{SendGridConfig, SendGridMailer};
