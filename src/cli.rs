// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Every flag has an environment variable fallback for container deployments.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "redeploy-operator")]
#[command(about = "Scheduled redeployment of Azure DevOps release environments")]
#[command(version)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(long, env = "CONFIG")]
    pub config: PathBuf,

    /// Log write operations instead of performing them
    #[arg(long, env = "DRY_RUN")]
    pub dry_run: bool,

    /// Verbose logging
    #[arg(short, long, env = "VERBOSE")]
    pub verbose: bool,

    /// Debug logging with source locations
    #[arg(long, env = "DEBUG")]
    pub debug: bool,

    /// Log as JSON lines
    #[arg(long, env = "LOG_JSON")]
    pub log_json: bool,

    /// Organization URL, e.g. https://dev.azure.com/myorg
    #[arg(
        long,
        env = "AZUREDEVOPS_ORGANIZATIONURL",
        required_unless_present = "check_config"
    )]
    pub azuredevops_organization_url: Option<String>,

    /// Personal access token
    #[arg(
        long,
        env = "AZUREDEVOPS_ACCESSTOKEN",
        hide_env_values = true,
        required_unless_present = "check_config"
    )]
    pub azuredevops_access_token: Option<String>,

    /// Notification template; the first %s or %v is replaced by the message
    #[arg(long, env = "NOTIFICATION_TEMPLATE", default_value = "%v")]
    pub notification_template: String,

    /// Notification endpoint URL (repeatable)
    #[arg(long = "notification", env = "NOTIFICATION", value_delimiter = ' ')]
    pub notifications: Vec<String>,

    /// Address of the health and metrics endpoint
    #[arg(long, env = "SERVER_BIND", default_value = ":8080")]
    pub bind: String,

    /// Validate the configuration and exit
    #[arg(long)]
    pub check_config: bool,
}
