//! Contact form inbox with admin triage.

pub mod domain;
pub mod router;
pub mod service;

pub use domain::{ContactForm, ContactMessage, ContactReceipt, ContactStatus};
pub use router::contact_router;
pub use service::ContactService;
