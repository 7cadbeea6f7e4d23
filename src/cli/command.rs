use crate::domain::coordinator::DEFAULT_SEED_COUNT;
use crate::remote::http::DEFAULT_CONTACTS_API_URL;
use crate::remote::seed::DEFAULT_SEED_API_URL;
use crate::store::json::STORAGE_PATH;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

pub const FORM_FIELDS_PATH: &str = "./assets/contact_form.json";

#[derive(Parser, Debug)]
#[command(
    name = "rolodex-sync",
    version,
    about = "Contact book kept in sync with a remote contact service"
)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Base URL of the remote contact service
    #[arg(long, env = "CONTACTS_API_URL", default_value = DEFAULT_CONTACTS_API_URL)]
    pub api_url: String,

    /// Seed provider URL used when the local cache is empty
    #[arg(long, env = "SEED_API_URL", default_value = DEFAULT_SEED_API_URL)]
    pub seed_url: String,

    /// Number of sample contacts requested when seeding
    #[arg(long, env = "SEED_COUNT", default_value_t = DEFAULT_SEED_COUNT)]
    pub seed_count: usize,

    /// Location of the local contact cache
    #[arg(long, env = "CACHE_PATH", default_value = STORAGE_PATH)]
    pub cache_path: PathBuf,

    /// Location of the contact form schema
    #[arg(long, env = "FORM_FIELDS_PATH", default_value = FORM_FIELDS_PATH)]
    pub form_fields_path: PathBuf,

    /// When updates and deletes reach the cache (optimistic, confirmed)
    #[arg(long, env = "WRITE_POLICY", default_value_t = String::from("optimistic"))]
    pub write_policy: String,

    /// Timeout for every remote request, in seconds
    #[arg(long = "timeout", env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Seed the local cache from the seed provider if it is empty
    Seed,

    /// List cached contacts
    List {
        /// Only list contacts whose name contains this text
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a new contact
    Add {
        #[arg(long)]
        full_name: String,

        #[arg(long)]
        full_address: String,

        /// Ten digit phone number
        #[arg(long)]
        phone: String,

        /// Ten digit cell number
        #[arg(long)]
        cell: String,

        /// YYYY-MM-DD or RFC 3339
        #[arg(long)]
        registration_date: String,

        #[arg(long)]
        age: u32,

        #[arg(long)]
        email: String,
    },

    /// Update fields of an existing contact
    /// Provide the contact id followed by as many fields as you wish to update
    Update {
        #[arg(long)]
        id: String,

        #[arg(long)]
        full_name: Option<String>,

        #[arg(long)]
        full_address: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        cell: Option<String>,

        #[arg(long)]
        registration_date: Option<String>,

        #[arg(long)]
        age: Option<u32>,

        #[arg(long)]
        email: Option<String>,
    },

    /// Delete a contact by id
    Delete {
        #[arg(long)]
        id: String,
    },

    /// Print the contact form schema
    Fields,

    /// Print how many contacts the remote service holds
    Count,
}
