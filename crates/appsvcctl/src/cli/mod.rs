//! CLI structure and command definitions
//!
//! Defines the command-line interface using clap with two layers:
//! 1. Resource commands (`webapp`, `plan`, `group`, `subscription`)
//! 2. Profile management (`profile`)

use clap::{Parser, Subcommand};

use appsvcctl_core::Runtime;

/// Azure App Service provisioning CLI
#[derive(Parser, Debug)]
#[command(name = "appsvcctl")]
#[command(
    version,
    about = "App Service management CLI for provisioning and inspecting web apps"
)]
#[command(long_about = "
App Service management CLI for provisioning and inspecting web apps

EXAMPLES:
    # Set up a profile (token read from the environment at run time)
    appsvcctl profile set work --subscription-id <id> --access-token '${AZURE_ACCESS_TOKEN}'

    # Provision a web app interactively
    appsvcctl webapp create

    # Provision without prompts
    appsvcctl webapp create --name my-app --location westeurope \\
        --new-resource-group my-rg --new-plan my-plan --sku B1 --runtime node

    # Get JSON output for scripting
    appsvcctl webapp list -o json

    # Wait for a web app to come back after a restart
    appsvcctl webapp wait-state my-app --group my-rg --state Running

For more help on a specific command, run:
    appsvcctl <command> --help
")]
pub struct Cli {
    /// Profile to use for this command
    #[arg(long, short, global = true, env = "APPSVCCTL_PROFILE")]
    pub profile: Option<String>,

    /// Path to alternate configuration file
    #[arg(long, global = true, env = "APPSVCCTL_CONFIG_FILE")]
    pub config_file: Option<String>,

    /// Output format
    #[arg(long, short = 'o', global = true, value_enum, default_value = "auto")]
    pub output: OutputFormat,

    /// Enable verbose logging
    #[arg(long, short, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format options
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Automatically choose format based on command and context
    Auto,
    /// JSON output
    Json,
    /// YAML output
    Yaml,
    /// Human-readable table format
    Table,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Web app operations
    #[command(subcommand, visible_alias = "app")]
    Webapp(WebappCommands),

    /// App Service plan operations
    #[command(subcommand)]
    Plan(PlanCommands),

    /// Resource group operations
    #[command(subcommand, visible_alias = "rg")]
    Group(GroupCommands),

    /// Subscription operations
    #[command(subcommand, visible_alias = "sub")]
    Subscription(SubscriptionCommands),

    /// Profile management
    #[command(subcommand, visible_alias = "prof")]
    Profile(ProfileCommands),

    /// Version information
    #[command(visible_alias = "ver")]
    Version,
}

/// Web app operations
#[derive(Subcommand, Debug)]
pub enum WebappCommands {
    /// Create a web app and wait until it is running.
    /// Prompts for anything not given on the command line.
    #[command(after_help = "EXAMPLES:
    # Fully interactive
    appsvcctl webapp create

    # Non-interactive, reusing an existing group and plan
    appsvcctl webapp create --name my-app --location westeurope \\
        --resource-group my-rg --plan my-plan --runtime node --yes

    # Non-interactive, creating everything
    appsvcctl webapp create --name my-app --location westeurope \\
        --new-resource-group my-rg --new-plan my-plan --sku B1 --runtime node
")]
    Create {
        /// Globally unique site name (becomes <name>.azurewebsites.net)
        #[arg(long)]
        name: Option<String>,

        /// Azure location, e.g. westeurope
        #[arg(long)]
        location: Option<String>,

        /// Existing resource group to place the site in
        #[arg(long, conflicts_with = "new_resource_group")]
        resource_group: Option<String>,

        /// Create a new resource group with this name
        #[arg(long)]
        new_resource_group: Option<String>,

        /// Existing App Service plan to host the site on
        #[arg(long, conflicts_with = "new_plan")]
        plan: Option<String>,

        /// Create a new Linux plan with this name
        #[arg(long)]
        new_plan: Option<String>,

        /// SKU for a newly created plan
        #[arg(long, default_value = "B1")]
        sku: String,

        /// Runtime stack
        #[arg(long, value_enum)]
        runtime: Option<Runtime>,

        /// Never prompt; fail if anything required is missing
        #[arg(long, short = 'y')]
        yes: bool,

        /// Write a .deployment marker into this directory after creation
        #[arg(long, value_name = "DIR")]
        deploy_marker: Option<std::path::PathBuf>,

        /// Seconds between state checks while waiting for the site
        #[arg(long, default_value_t = 5)]
        wait_interval: u64,

        /// Total seconds to wait for the site to reach Running
        #[arg(long, default_value_t = 60)]
        wait_timeout: u64,
    },

    /// List web apps in the subscription (or one resource group)
    List {
        /// Limit to a resource group
        #[arg(long, short = 'g')]
        group: Option<String>,
    },

    /// Show one web app
    Show {
        /// Site name
        name: String,

        /// Resource group the site lives in
        #[arg(long, short = 'g')]
        group: String,
    },

    /// Fetch publishing (SCM) credentials for a web app
    Credentials {
        /// Site name, or parent/slot for a deployment slot
        name: String,

        /// Resource group the site lives in
        #[arg(long, short = 'g')]
        group: String,
    },

    /// Poll a web app until it reaches a target state
    WaitState {
        /// Site name, or parent/slot for a deployment slot
        name: String,

        /// Resource group the site lives in
        #[arg(long, short = 'g')]
        group: String,

        /// Target state, compared case-insensitively
        #[arg(long, default_value = "Running")]
        state: String,

        /// Seconds between state checks
        #[arg(long, default_value_t = 5)]
        interval: u64,

        /// Total seconds to wait
        #[arg(long, default_value_t = 60)]
        timeout: u64,
    },
}

/// App Service plan operations
#[derive(Subcommand, Debug)]
pub enum PlanCommands {
    /// List all App Service plans in the subscription
    List,

    /// Show one plan
    Show {
        /// Plan name
        name: String,

        /// Resource group the plan lives in
        #[arg(long, short = 'g')]
        group: String,
    },
}

/// Resource group operations
#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// List all resource groups in the subscription
    List,

    /// Create a resource group
    Create {
        /// Group name
        name: String,

        /// Azure location, e.g. westeurope
        #[arg(long)]
        location: String,
    },
}

/// Subscription operations
#[derive(Subcommand, Debug)]
pub enum SubscriptionCommands {
    /// List subscriptions visible to the current credentials
    List,
}

/// Profile management
#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// List all profiles
    List,

    /// Show the config file path
    Path,

    /// Show profile details
    Show {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,

        /// Azure subscription id
        #[arg(long)]
        subscription_id: Option<String>,

        /// Bearer token, usually '${AZURE_ACCESS_TOKEN}' so it is read
        /// from the environment instead of being stored
        #[arg(long)]
        access_token: Option<String>,

        /// ARM endpoint override for sovereign clouds
        #[arg(long)]
        api_url: Option<String>,

        /// Make this the default profile
        #[arg(long)]
        default: bool,
    },

    /// Remove a profile
    Remove {
        /// Profile name
        name: String,
    },

    /// Set the default profile
    Default {
        /// Profile name
        name: String,
    },
}
