//! Outbound contact: message templates, the mail handoff and the contact
//! form overlay.

mod compose;
mod handoff;
mod modal;

pub use compose::*;
pub use handoff::*;
pub use modal::*;
