#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use rolodex_sync::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteCall {
    Create(String),
    Update(String, ContactPatch),
    Delete(String),
    Clear,
    Count,
}

/// In-process stand-in for the contact service. Records every call and can be
/// told to fail specific operations.
#[derive(Default)]
pub struct FakeRemote {
    calls: Mutex<Vec<RemoteCall>>,
    failing_names: Mutex<HashSet<String>>,
    fixed_id: Mutex<Option<String>>,
    pub fail_create: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_clear: AtomicBool,
    pub fail_count: AtomicBool,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_create_for(&self, full_name: &str) {
        self.failing_names
            .lock()
            .unwrap()
            .insert(full_name.to_string());
    }

    /// Makes every successful create answer with the same id.
    pub fn assign_same_id(&self, id: &str) {
        *self.fixed_id.lock().unwrap() = Some(id.to_string());
    }

    pub fn calls(&self) -> Vec<RemoteCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_calls(&self, pred: impl Fn(&RemoteCall) -> bool) -> usize {
        self.calls().iter().filter(|c| pred(c)).count()
    }

    fn record(&self, call: RemoteCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl RemoteContacts for FakeRemote {
    async fn create(&self, contact: &Contact) -> Result<String, AppError> {
        self.record(RemoteCall::Create(contact.full_name.clone()));

        let name_fails = self
            .failing_names
            .lock()
            .unwrap()
            .contains(&contact.full_name);
        if self.fail_create.load(Ordering::SeqCst) || name_fails {
            return Err(AppError::Remote("create rejected".to_string()));
        }
        let fixed = self.fixed_id.lock().unwrap().clone();
        Ok(fixed.unwrap_or_else(|| Uuid::new_v4().to_string()))
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<(), AppError> {
        self.record(RemoteCall::Update(id.to_string(), patch.clone()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Remote("update rejected".to_string()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        self.record(RemoteCall::Delete(id.to_string()));
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::Remote("delete rejected".to_string()));
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), AppError> {
        self.record(RemoteCall::Clear);
        if self.fail_clear.load(Ordering::SeqCst) {
            return Err(AppError::Remote("clear rejected".to_string()));
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, AppError> {
        self.record(RemoteCall::Count);
        if self.fail_count.load(Ordering::SeqCst) {
            return Err(AppError::Remote("count unavailable".to_string()));
        }
        Ok(3)
    }
}

/// Seed provider returning a fixed batch.
pub struct FakeSeed {
    batch: Vec<Contact>,
    fetches: AtomicUsize,
}

impl FakeSeed {
    pub fn new(batch: Vec<Contact>) -> Arc<Self> {
        Arc::new(Self {
            batch,
            fetches: AtomicUsize::new(0),
        })
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SeedProvider for FakeSeed {
    async fn fetch(&self, count: usize, _fields: &[&str]) -> Vec<Contact> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.batch.iter().take(count).cloned().collect()
    }
}

pub fn seed_contact(name: &str, age: u32) -> Contact {
    Contact {
        id: None,
        full_name: name.to_string(),
        full_address: format!("{} Broad Street", age),
        phone: "0806680924".to_string(),
        cell: "0806487919".to_string(),
        registration_date: "2019-07-04T09:12:44Z".to_string(),
        age,
        email: String::new(),
        image: Some(format!("https://example.com/{}.png", age)),
    }
}

pub fn form_contact(name: &str) -> Contact {
    Contact {
        id: None,
        full_name: name.to_string(),
        full_address: "12 Marina Road, Lagos".to_string(),
        phone: "0801234567".to_string(),
        cell: "0907654321".to_string(),
        registration_date: "2024-03-01".to_string(),
        age: 28,
        email: "someone@example.com".to_string(),
        image: None,
    }
}

pub fn cached_contact(id: &str, name: &str, age: u32) -> Contact {
    Contact {
        id: Some(id.to_string()),
        full_name: name.to_string(),
        full_address: "7 Allen Avenue".to_string(),
        phone: "0701234567".to_string(),
        cell: "0811234567".to_string(),
        registration_date: "2022-11-30".to_string(),
        age,
        email: "x@example.com".to_string(),
        image: None,
    }
}

pub fn coordinator(
    cached: Vec<Contact>,
    remote: &Arc<FakeRemote>,
    seed: &Arc<FakeSeed>,
) -> SyncCoordinator {
    let cache = CacheStore::new(Box::new(MemStore::with_contacts(cached)));
    SyncCoordinator::new(cache, remote.clone(), seed.clone())
}

pub fn drain_events(rx: &mut tokio::sync::broadcast::Receiver<ContactEvent>) -> Vec<ContactEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
