pub mod auth;
pub mod contact_dialog;
pub mod contact_select;
pub mod error_handler;
pub mod layout;
pub mod multi_step;
pub mod schedule_calendar;
pub mod toast;

pub use auth::*;
