use crate::{
    cli::{display_contact, display_form_field},
    config::Config,
    logging,
    prelude::{
        AppError, Contact, ContactPatch, FormFieldSource, HttpRemote, JsonFormFields, JsonStore,
        RandomApiSeed, SeedOutcome, SyncCoordinator, WritePolicy,
        command::{Cli, Commands},
        store::{CacheStore, ContactEvent},
    },
};
use clap::Parser;
use dotenv::dotenv;
use std::sync::Arc;
use tracing::{debug, info};

pub fn build_coordinator(config: &Config) -> Result<SyncCoordinator, AppError> {
    let cache = CacheStore::new(Box::new(JsonStore::new(&config.cache_path)));
    let remote = HttpRemote::new(&config.contacts_api_url, config.request_timeout)?;
    let seeds = RandomApiSeed::new(&config.seed_api_url, config.request_timeout)?;

    Ok(SyncCoordinator::new(cache, Arc::new(remote), Arc::new(seeds))
        .with_policy(config.write_policy)
        .with_seed_count(config.seed_count))
}

pub async fn run_app() -> Result<(), AppError> {
    dotenv().ok();
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging(cli.verbose) {
        eprintln!("{e}");
    }

    let config = Config::from_cli(&cli)?;
    let coordinator = build_coordinator(&config)?;
    let mut events = coordinator.subscribe();

    match cli.command {
        Commands::Seed => match coordinator.ensure_seeded().await {
            SeedOutcome::AlreadyInitialized => {
                println!("Local cache already initialized with data");
            }
            SeedOutcome::InProgress => println!("Seeding already in progress"),
            SeedOutcome::EmptyBatch => println!("Seed source returned no contacts"),
            SeedOutcome::Seeded { created, attempted } => {
                println!("Seeded {} of {} contacts", created, attempted);
            }
        },

        Commands::List { name } => {
            // An empty cache is seeded on first use
            let outcome = coordinator.ensure_seeded().await;
            debug!(?outcome, "bootstrap before listing");

            let contacts = match name {
                Some(name) => coordinator.cache().find_by_name(&name),
                None => coordinator.get_contacts(),
            };

            if contacts.is_empty() {
                println!("No contact yet");
            }
            for (i, c) in contacts.iter().enumerate() {
                println!("{}", display_contact(i + 1, c));
            }
        }

        Commands::Add {
            full_name,
            full_address,
            phone,
            cell,
            registration_date,
            age,
            email,
        } => {
            let new_contact = Contact {
                id: None,
                full_name,
                full_address,
                phone,
                cell,
                registration_date,
                age,
                email,
                image: None,
            };

            match coordinator.add_contact(new_contact).await? {
                Some(contact) => println!(
                    "Contact added successfully with id {}",
                    contact.id.unwrap_or_default()
                ),
                None => eprintln!("Contact was not saved: the remote service did not accept it"),
            }
        }

        Commands::Update {
            id,
            full_name,
            full_address,
            phone,
            cell,
            registration_date,
            age,
            email,
        } => {
            let patch = ContactPatch {
                full_name,
                full_address,
                phone,
                cell,
                registration_date,
                age,
                email,
            };
            if patch.is_empty() {
                return Err(AppError::Validation(
                    "Provide at least one field to update".to_string(),
                ));
            }

            match coordinator.update_contact(&id, &patch).await? {
                Some(_) => println!("Contact updated successfully"),
                None => eprintln!("{}", remote_failure_note("update", coordinator.policy())),
            }
        }

        Commands::Delete { id } => match coordinator.delete_contact(&id).await? {
            Some(_) => println!("Contact deleted successfully"),
            None => eprintln!("{}", remote_failure_note("delete", coordinator.policy())),
        },

        Commands::Fields => {
            let schema = JsonFormFields::new(&config.form_fields_path).fetch()?;
            for field in &schema.form_fields {
                println!("{}", display_form_field(field));
            }
        }

        Commands::Count => println!("{}", coordinator.remote_count().await),
    }

    while let Ok(event) = events.try_recv() {
        info!(?event, "contact cache changed");
        println!("{}", event_note(event));
    }
    Ok(())
}

fn event_note(event: ContactEvent) -> &'static str {
    match event {
        ContactEvent::Added => "Notification: contact added",
        ContactEvent::Updated => "Notification: contacts updated",
    }
}

fn remote_failure_note(action: &str, policy: WritePolicy) -> String {
    let cache = match policy {
        WritePolicy::Optimistic => "the local cache keeps the change",
        WritePolicy::Confirmed => "the local cache was left unchanged",
    };
    format!(
        "Remote {} failed under the {} write policy; {}",
        action,
        policy.is_which(),
        cache
    )
}
