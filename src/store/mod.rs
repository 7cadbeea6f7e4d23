pub mod json;
pub mod memory;

use crate::domain::contact::Contact;
use crate::errors::AppError;
use std::fs;
use std::path::Path;
use tokio::sync::broadcast;
use tracing::{debug, warn};

pub use json::JsonStore;
pub use memory::MemStore;

const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Backing medium for the contact snapshot. Implementations hold one blob and
/// overwrite it wholesale on every save.
pub trait ContactStore: Send + Sync {
    fn load(&self) -> Result<Vec<Contact>, AppError>;

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}

/// Change notifications for views. Receivers should re-read the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    Added,
    Updated,
}

/// Durable local snapshot of contacts. Never talks to the network.
///
/// `replace` is the only mutation and is not internally serialized; the store
/// expects a single writer.
pub struct CacheStore {
    backend: Box<dyn ContactStore>,
    events: broadcast::Sender<ContactEvent>,
}

impl CacheStore {
    pub fn new(backend: Box<dyn ContactStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { backend, events }
    }

    /// Returns the persisted snapshot, or an empty list when nothing is stored
    /// or the stored blob is not a contact sequence.
    pub fn load(&self) -> Vec<Contact> {
        match self.backend.load() {
            Ok(contacts) => contacts,
            Err(e) => {
                warn!(
                    medium = self.backend.get_medium(),
                    error = %e,
                    "cached snapshot unreadable, treating as empty"
                );
                Vec::new()
            }
        }
    }

    /// Overwrites the snapshot in one write and notifies subscribers.
    pub fn replace(&self, contacts: &[Contact]) -> Result<(), AppError> {
        self.backend.save(contacts)?;
        debug!(count = contacts.len(), "cache snapshot replaced");
        self.notify(ContactEvent::Updated);
        Ok(())
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<Contact>
    where
        P: Fn(&Contact) -> bool,
    {
        self.load().into_iter().filter(|c| predicate(c)).collect()
    }

    pub fn find_by_id(&self, id: &str) -> Option<Contact> {
        self.filter(|c| c.id.as_deref() == Some(id)).into_iter().next()
    }

    pub fn find_by_name(&self, name: &str) -> Vec<Contact> {
        let name = name.trim().to_lowercase();
        self.filter(|c| c.full_name.to_lowercase().contains(&name))
    }

    pub fn is_empty(&self) -> bool {
        self.load().is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContactEvent> {
        self.events.subscribe()
    }

    pub fn notify(&self, event: ContactEvent) {
        // No subscribers is not an error
        let _ = self.events.send(event);
    }

    pub fn medium(&self) -> &str {
        self.backend.get_medium()
    }
}

pub fn create_file_parent(path: &Path) -> Result<(), AppError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}
