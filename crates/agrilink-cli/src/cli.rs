use std::path::PathBuf;

use agrilink_core::models::{PresenceStatus, ReportStatus, Role};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "agrilink")]
#[command(about = "Report crop issues and triage them from the command line")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// CLI profile name (selects API URL and stored session)
    #[arg(long, global = true, value_name = "NAME")]
    pub profile: Option<String>,

    /// Override the backend API base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configure CLI profiles
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
    /// Sign in, sign up and manage the stored session
    Auth {
        #[command(subcommand)]
        command: AuthCommands,
    },
    /// Show the navigation menu for the signed-in role
    Menu {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Crop-issue reports
    Reports {
        #[command(subcommand)]
        command: ReportCommands,
    },
    /// Notifications for the signed-in user
    Notifications {
        #[command(subcommand)]
        command: NotificationCommands,
    },
    /// Employee locations
    Locations {
        #[command(subcommand)]
        command: LocationCommands,
    },
    /// Product catalog (admin)
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },
    /// Region and employee statistics (admin)
    Stats {
        #[command(subcommand)]
        command: StatsCommands,
    },
    /// Ask the AI assistant a question (admin)
    Ask {
        /// Question for the assistant
        message: Vec<String>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Initialize or update a profile
    Init {
        /// Profile name to initialize
        #[arg(long, value_name = "NAME")]
        profile: Option<String>,
        /// Backend API base URL (e.g. <http://localhost:5000/api>)
        #[arg(long, value_name = "URL")]
        api_base_url: Option<String>,
        /// Keep current active profile instead of activating this one
        #[arg(long)]
        no_activate: bool,
    },
    /// Show the resolved configuration
    Show,
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Sign in with email and password
    Login {
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
    /// Create an account
    Signup {
        #[arg(long)]
        username: String,
        #[arg(long, value_name = "EMAIL")]
        email: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
        #[arg(long, value_parser = parse_role, default_value = "farmer")]
        role: Role,
        #[arg(long)]
        region: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    /// Show who is signed in
    Status,
    /// Forget the stored session
    Logout,
    /// Request a password reset email
    ForgotPassword {
        #[arg(long, value_name = "EMAIL")]
        email: String,
    },
    /// Set a new password with the token from the reset email
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long, value_name = "PASSWORD")]
        password: String,
    },
}

#[derive(Subcommand)]
pub enum ReportCommands {
    /// List reports visible to the signed-in role
    List {
        /// Case-insensitive search across crop, description, region and farmer
        #[arg(short, long)]
        search: Option<String>,
        /// Only show reports with this status
        #[arg(long, value_parser = parse_report_status)]
        status: Option<ReportStatus>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one report
    Show {
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Submit a new report (farmer, or employee on behalf of a farmer)
    New {
        #[arg(long)]
        crop: String,
        #[arg(long)]
        description: String,
        #[arg(long, default_value = "")]
        region: String,
        #[arg(long)]
        urgent: bool,
        #[arg(long, allow_hyphen_values = true)]
        lat: Option<f64>,
        #[arg(long, allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Farmer id (employees only)
        #[arg(long, value_name = "ID")]
        farmer: Option<String>,
        /// Image files to attach
        #[arg(long = "image", value_name = "PATH")]
        images: Vec<PathBuf>,
    },
    /// Change a report's status (employee)
    Status {
        id: String,
        #[arg(value_parser = parse_report_status)]
        status: ReportStatus,
    },
    /// Escalate a report to the admins (employee)
    Escalate { id: String },
    /// Record a diagnosis (admin)
    Diagnose {
        id: String,
        #[arg(long)]
        diagnosis: String,
        #[arg(long)]
        solution: String,
        /// Recommended product id (repeatable)
        #[arg(long = "product", value_name = "ID")]
        products: Vec<String>,
    },
    /// Delete a report (admin)
    Delete { id: String },
    /// Run the AI analysis for a report (admin)
    Analyze { id: String },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum ReadState {
    All,
    Unread,
    Read,
}

#[derive(Subcommand)]
pub enum NotificationCommands {
    /// List one page of notifications
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "10")]
        limit: u32,
        #[arg(long, value_enum, default_value_t = ReadState::All)]
        state: ReadState,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark one notification as read
    Read { id: String },
    /// Mark every notification as read (farmer, employee)
    ReadAll,
}

#[derive(Subcommand)]
pub enum LocationCommands {
    /// List employee locations (admin)
    List {
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(short, long, default_value = "10")]
        limit: u32,
        #[arg(long, value_parser = parse_presence_status)]
        status: Option<PresenceStatus>,
        #[arg(short, long)]
        search: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Find employees near a point (admin)
    Nearby {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long, default_value_t = agrilink_core::api::DEFAULT_NEARBY_RADIUS_KM)]
        radius: f64,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report your own position (employee)
    Update {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        #[arg(long)]
        accuracy: Option<f64>,
        #[arg(long)]
        address: Option<String>,
        #[arg(long, value_parser = parse_presence_status, default_value = "online")]
        status: PresenceStatus,
    },
}

#[derive(clap::Args, Debug, Clone)]
pub struct ProductFields {
    #[arg(long)]
    pub name: String,
    #[arg(long, default_value = "")]
    pub description: String,
    #[arg(long, default_value = "")]
    pub category: String,
    #[arg(long, default_value_t = 0.0)]
    pub price: f64,
    #[arg(long, default_value = "")]
    pub manufacturer: String,
}

#[derive(Subcommand)]
pub enum ProductCommands {
    /// List the catalog
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Replace a product's fields
    Update {
        id: String,
        #[command(flatten)]
        fields: ProductFields,
    },
    /// Remove a product
    Delete { id: String },
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Report counts per region
    Regions {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Per-employee handling statistics
    Performance {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn parse_role(value: &str) -> Result<Role, String> {
    value.parse()
}

fn parse_report_status(value: &str) -> Result<ReportStatus, String> {
    value.parse()
}

fn parse_presence_status(value: &str) -> Result<PresenceStatus, String> {
    value.parse()
}
