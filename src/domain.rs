pub mod contact;
pub mod coordinator;
pub mod form;

use crate::errors::AppError;

pub use contact::{Contact, ContactPatch};
pub use coordinator::{SeedOutcome, SyncCoordinator, SyncState, WritePolicy};
pub use form::{FormField, FormFieldSource, FormSchema, JsonFormFields};
