use super::*;

use std::sync::Mutex;

/// In-process snapshot, lost when the process exits.
#[derive(Default)]
pub struct MemStore {
    data: Mutex<Vec<Contact>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contacts(contacts: Vec<Contact>) -> Self {
        Self {
            data: Mutex::new(contacts),
        }
    }
}

impl ContactStore for MemStore {
    fn load(&self) -> Result<Vec<Contact>, AppError> {
        let data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        Ok(data.clone())
    }

    fn save(&self, contacts: &[Contact]) -> Result<(), AppError> {
        let mut data = self.data.lock().unwrap_or_else(|e| e.into_inner());
        *data = contacts.to_vec();
        Ok(())
    }

    fn get_medium(&self) -> &str {
        "mem"
    }
}
