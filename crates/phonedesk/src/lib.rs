//! `phonedesk` - User records keyed by phone number
//!
//! This library provides a three-field user form whose four buttons insert,
//! update, delete, and view records in a document store.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod logging;
pub mod record;
pub mod screen;
pub mod shell;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use form::{PhoneRule, UserForm};
pub use logging::init_logging;
pub use record::UserRecord;
pub use screen::{Alert, AlertKind, Button, Screen};
pub use store::{open_store, DocumentStore};
