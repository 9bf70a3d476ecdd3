use std::path::PathBuf;

use merchant_sync_core::types::MerchantAccountInput;

#[derive(clap::Parser, Debug)]
#[clap(name = "merchant-sync", version, about = "Manage Merchant Sync settings and merchant accounts")]
pub struct Cli {
    /// SQLite database file
    #[clap(long, env = "MERCHANT_SYNC_DB", global = true)]
    pub db_path: Option<PathBuf>,
    /// Password used to seal client_secret and sync_secret at rest
    #[clap(long, env = "MERCHANT_SYNC_ENCRYPTION_KEY", global = true, hide_env_values = true)]
    pub encryption_key: Option<String>,
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Run the startup checks and print the report
    Status,
    /// Read and write settings
    Config {
        #[clap(subcommand)]
        command: ConfigCommands,
    },
    /// Manage the synchronisation secret
    Secret {
        #[clap(subcommand)]
        command: SecretCommands,
    },
    /// Manage merchant accounts
    Account {
        #[clap(subcommand)]
        command: AccountCommands,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print one setting (empty when unset)
    Get { key: String },
    /// Write one setting
    Set { key: String, value: String },
    /// Print every setting, secrets masked
    Show,
    /// Show or save the API credentials
    Api {
        #[clap(subcommand)]
        command: Option<ApiCommands>,
    },
    /// Show or save the attribute mapping options
    Misc {
        #[clap(subcommand)]
        command: Option<MiscCommands>,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum ApiCommands {
    /// Save all three API fields at once
    Set {
        #[clap(long)]
        client_id: String,
        #[clap(long)]
        client_secret: String,
        #[clap(long)]
        application_name: String,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum MiscCommands {
    /// Save the attribute mapping options
    Set {
        /// Skip products without a valid GTIN
        #[clap(long)]
        check_gtin: bool,
        /// Colour attribute ids (comma separated)
        #[clap(long, value_delimiter = ',')]
        attribute_color: Vec<i64>,
        /// Size attribute ids (comma separated)
        #[clap(long, value_delimiter = ',')]
        attribute_size: Vec<i64>,
    },
}

#[derive(clap::Subcommand, Debug)]
pub enum SecretCommands {
    /// Print the secret, generating one if absent
    Ensure,
    /// Replace the secret and print the new one
    Rotate,
    /// Check a candidate against the stored secret
    Verify { candidate: String },
}

#[derive(clap::Subcommand, Debug)]
pub enum AccountCommands {
    /// List all accounts, oldest first
    List,
    /// Show one account
    Get { id: String },
    /// Add an account
    Add {
        #[clap(flatten)]
        fields: AccountFields,
    },
    /// Replace every field of an existing account
    Update {
        id: String,
        #[clap(flatten)]
        fields: AccountFields,
    },
    /// Delete an account (missing ids are ignored)
    Delete { id: String },
    /// Show the default account
    Default,
    /// List accounts enabled for synchronisation
    SyncTargets,
    /// Remove the default flag from every account
    ClearDefault,
}

#[derive(clap::Args, Debug, Clone)]
pub struct AccountFields {
    /// Display title
    #[clap(long)]
    pub title: String,
    /// Merchant Center id
    #[clap(long)]
    pub merchant_id: String,
    #[clap(long)]
    pub language_id: i64,
    #[clap(long)]
    pub country_id: i64,
    #[clap(long)]
    pub currency_id: i64,
    /// Make this the default account
    #[clap(long = "default")]
    pub is_default: bool,
    /// Push products to this account
    #[clap(long = "sync")]
    pub sync_enabled: bool,
}

impl From<AccountFields> for MerchantAccountInput {
    fn from(fields: AccountFields) -> Self {
        Self {
            title: fields.title,
            merchant_id: fields.merchant_id,
            language_id: fields.language_id,
            country_id: fields.country_id,
            currency_id: fields.currency_id,
            is_default: fields.is_default,
            sync_enabled: fields.sync_enabled,
        }
    }
}
