// Form handling
//
// Client-side validation, submission through a collaborator endpoint, and
// the message center that surfaces results to the user.

pub mod controller;
pub mod messages;
pub mod validate;

pub use controller::{FormController, FORM_CLASS};
pub use messages::MessageCenter;
pub use validate::{validate, FieldError, FieldKind};
