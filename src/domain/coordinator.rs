use super::*;

use crate::remote::{RemoteContacts, SEED_FIELDS, SeedProvider};
use crate::store::{CacheStore, ContactEvent};
use futures::future::join_all;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

pub const DEFAULT_SEED_COUNT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncState {
    Uninitialized,
    Seeding,
    Ready,
}

/// When update and delete touch the cache relative to the remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    /// Cache first, remote second, no rollback on remote failure.
    #[default]
    Optimistic,
    /// Cache only after the remote acknowledges.
    Confirmed,
}

impl WritePolicy {
    pub fn parse(str: &str) -> Result<Self, AppError> {
        match str.trim().to_lowercase().as_str() {
            "optimistic" => Ok(WritePolicy::Optimistic),
            "confirmed" => Ok(WritePolicy::Confirmed),
            _ => Err(AppError::Validation(
                "Write policy must be `optimistic` or `confirmed`".to_string(),
            )),
        }
    }

    pub fn is_which(&self) -> &str {
        match self {
            WritePolicy::Optimistic => "optimistic",
            WritePolicy::Confirmed => "confirmed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Cache already held contacts, nothing was fetched.
    AlreadyInitialized,
    /// Another bootstrap is running on this coordinator.
    InProgress,
    /// The seed provider returned nothing; the cache stays empty.
    EmptyBatch,
    Seeded { created: usize, attempted: usize },
}

/// Keeps the local cache consistent with the remote contact service.
///
/// Remote failures never escape: they are logged and turned into `None`.
/// `Err` is reserved for input rejected before any network call.
///
/// Mutations are not serialized against each other. Callers must not run
/// overlapping mutations on the same contact.
pub struct SyncCoordinator {
    cache: CacheStore,
    remote: Arc<dyn RemoteContacts>,
    seeds: Arc<dyn SeedProvider>,
    policy: WritePolicy,
    seed_count: usize,
    state: Mutex<SyncState>,
}

impl SyncCoordinator {
    pub fn new(
        cache: CacheStore,
        remote: Arc<dyn RemoteContacts>,
        seeds: Arc<dyn SeedProvider>,
    ) -> Self {
        Self {
            cache,
            remote,
            seeds,
            policy: WritePolicy::default(),
            seed_count: DEFAULT_SEED_COUNT,
            state: Mutex::new(SyncState::Uninitialized),
        }
    }

    pub fn with_policy(mut self, policy: WritePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_seed_count(mut self, seed_count: usize) -> Self {
        self.seed_count = seed_count;
        self
    }

    pub fn state(&self) -> SyncState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn set_state(&self, state: SyncState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = state;
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ContactEvent> {
        self.cache.subscribe()
    }

    pub fn get_contacts(&self) -> Vec<Contact> {
        self.cache.load()
    }

    /// Replaces the whole cache from outside the sync flow.
    pub fn set_contacts(&self, contacts: &[Contact]) -> Result<(), AppError> {
        self.cache.replace(contacts)
    }

    /// Seeds an empty cache from the seed provider. A non-empty cache is left
    /// alone and no remote call is made.
    pub async fn ensure_seeded(&self) -> SeedOutcome {
        {
            let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
            match *state {
                SyncState::Seeding => return SeedOutcome::InProgress,
                SyncState::Ready => return SeedOutcome::AlreadyInitialized,
                SyncState::Uninitialized => {}
            }

            if !self.cache.is_empty() {
                info!("local cache already initialized with data");
                *state = SyncState::Ready;
                return SeedOutcome::AlreadyInitialized;
            }
            *state = SyncState::Seeding;
        }

        info!("local cache is empty, seeding from the remote");
        let outcome = self.seed().await;

        // An empty or fully failed seed leaves the cache empty; allow a retry
        let next = match outcome {
            SeedOutcome::Seeded { created, .. } if created > 0 => SyncState::Ready,
            _ => SyncState::Uninitialized,
        };
        self.set_state(next);
        outcome
    }

    async fn seed(&self) -> SeedOutcome {
        let (cleared, batch) = tokio::join!(
            self.remote.clear(),
            self.seeds.fetch(self.seed_count, &SEED_FIELDS)
        );

        match cleared {
            Ok(()) => debug!("remote contacts collection cleared"),
            Err(e) => warn!(error = %e, "error clearing remote contacts collection"),
        }

        if batch.is_empty() {
            warn!("seed batch is empty, nothing to seed");
            return SeedOutcome::EmptyBatch;
        }

        let unique = unique_by_full_name(batch);
        let attempted = unique.len();
        debug!(attempted, "creating unique seed contacts");

        let remote = &self.remote;
        let results = join_all(unique.into_iter().map(|contact| async move {
            let res = remote.create(&contact).await;
            (contact, res)
        }))
        .await;

        let mut created = Vec::with_capacity(attempted);
        for (mut contact, res) in results {
            match res {
                Ok(id) => {
                    contact.id = Some(id);
                    created.push(contact);
                }
                Err(e) => warn!(
                    full_name = %contact.full_name,
                    error = %e,
                    "error creating seed contact"
                ),
            }
        }

        if !created.is_empty() {
            let mut snapshot = self.cache.load();
            merge_by_full_name(&mut snapshot, &created);
            self.commit(&snapshot);
        }

        info!(created = created.len(), attempted, "seed batch committed");
        SeedOutcome::Seeded {
            created: created.len(),
            attempted,
        }
    }

    /// Creates the contact remotely and caches it once the service assigns an
    /// id. Returns the cached contact, or `None` when the remote create failed
    /// and nothing was cached.
    pub async fn add_contact(&self, mut contact: Contact) -> Result<Option<Contact>, AppError> {
        contact.validate()?;
        contact.id = None;

        let id = match self.remote.create(&contact).await {
            Ok(id) => id,
            Err(e) => {
                error!(full_name = %contact.full_name, error = %e, "error adding contact");
                return Ok(None);
            }
        };
        contact.id = Some(id);

        let mut snapshot = self.cache.load();
        match snapshot.iter_mut().find(|c| c.id == contact.id) {
            Some(existing) => *existing = contact.clone(),
            None => snapshot.push(contact.clone()),
        }
        self.commit(&snapshot);
        self.cache.notify(ContactEvent::Added);

        info!(id = ?contact.id, "contact added");
        Ok(Some(contact))
    }

    /// Shallow-merges `patch` onto the cached contact and sends it to the
    /// remote. Returns the id when the remote acknowledged the update.
    pub async fn update_contact(
        &self,
        id: &str,
        patch: &ContactPatch,
    ) -> Result<Option<String>, AppError> {
        let id = require_id(id)?;
        patch.validate()?;

        if self.policy == WritePolicy::Optimistic {
            self.apply_patch(id, patch);
        }

        if let Err(e) = self.remote.update(id, patch).await {
            error!(%id, error = %e, "error updating contact");
            return Ok(None);
        }

        if self.policy == WritePolicy::Confirmed {
            self.apply_patch(id, patch);
        }
        info!(%id, "contact updated");
        Ok(Some(id.to_string()))
    }

    fn apply_patch(&self, id: &str, patch: &ContactPatch) {
        let mut snapshot = self.cache.load();
        match snapshot.iter_mut().find(|c| c.id.as_deref() == Some(id)) {
            Some(contact) => {
                contact.apply(patch);
                self.commit(&snapshot);
            }
            None => debug!(%id, "contact not cached, only the remote is updated"),
        }
    }

    /// Removes the contact from the cache and the remote. Returns the id when
    /// the remote acknowledged the delete.
    pub async fn delete_contact(&self, id: &str) -> Result<Option<String>, AppError> {
        let id = match require_id(id) {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "invalid contact id");
                return Err(e);
            }
        };

        if self.policy == WritePolicy::Optimistic {
            self.remove_cached(id);
        }

        if let Err(e) = self.remote.delete(id).await {
            error!(%id, error = %e, "error deleting contact from the server");
            return Ok(None);
        }

        if self.policy == WritePolicy::Confirmed {
            self.remove_cached(id);
        }
        info!(%id, "contact deleted");
        Ok(Some(id.to_string()))
    }

    fn remove_cached(&self, id: &str) {
        let snapshot: Vec<Contact> = self
            .cache
            .load()
            .into_iter()
            .filter(|c| c.id.as_deref() != Some(id))
            .collect();
        self.commit(&snapshot);
    }

    /// Number of contacts the remote holds, or zero when it cannot be asked.
    pub async fn remote_count(&self) -> u64 {
        match self.remote.count().await {
            Ok(count) => count,
            Err(e) => {
                error!(error = %e, "error getting contact count");
                0
            }
        }
    }

    fn commit(&self, contacts: &[Contact]) {
        if let Err(e) = self.cache.replace(contacts) {
            error!(
                medium = self.cache.medium(),
                error = %e,
                "error writing contact cache"
            );
        }
    }
}

fn require_id(id: &str) -> Result<&str, AppError> {
    let id = id.trim();
    if id.is_empty() {
        return Err(AppError::Validation("Contact id is required".to_string()));
    }
    Ok(id)
}

/// Collapses contacts sharing a `full_name`. The last record for a name wins
/// and takes the position where that name first appeared.
pub fn unique_by_full_name(contacts: Vec<Contact>) -> Vec<Contact> {
    let mut positions: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<Contact> = Vec::with_capacity(contacts.len());

    for contact in contacts {
        match positions.get(&contact.full_name) {
            Some(&idx) => unique[idx] = contact,
            None => {
                positions.insert(contact.full_name.clone(), unique.len());
                unique.push(contact);
            }
        }
    }
    unique
}

/// Gives cached records their remote id by matching on `full_name`, appending
/// the ones the cache has not seen. A record whose id is already cached
/// replaces the holder of that id, so ids stay unique.
pub fn merge_by_full_name(snapshot: &mut Vec<Contact>, created: &[Contact]) {
    for contact in created {
        if contact.has_id()
            && let Some(existing) = snapshot.iter_mut().find(|c| c.id == contact.id)
        {
            if existing.full_name != contact.full_name {
                warn!(
                    id = ?contact.id,
                    replaced = %existing.full_name,
                    full_name = %contact.full_name,
                    "remote reused an id, keeping the later contact"
                );
            }
            *existing = contact.clone();
            continue;
        }

        match snapshot
            .iter_mut()
            .find(|c| c.full_name == contact.full_name)
        {
            Some(existing) => existing.id = contact.id.clone(),
            None => snapshot.push(contact.clone()),
        }
    }
}
