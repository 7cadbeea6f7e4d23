pub use crate::cli::{command, run_app};
pub use crate::domain::{
    Contact, ContactPatch, FormField, FormFieldSource, FormSchema, JsonFormFields, SeedOutcome,
    SyncCoordinator, SyncState, WritePolicy,
    contact::{self, ValidationReq},
};
pub use crate::errors::AppError;
pub use crate::remote::{HttpRemote, RandomApiSeed, RemoteContacts, SEED_FIELDS, SeedProvider};
pub use crate::store::{self, CacheStore, ContactEvent, ContactStore, JsonStore, MemStore};
