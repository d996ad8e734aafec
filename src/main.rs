// ABOUTME: Entry point for the redeploy-operator daemon.
// ABOUTME: Wires config, release client, metrics, notifications, scheduler, and HTTP endpoint.

mod cli;

use clap::Parser;
use cli::Cli;
use prometheus::Registry;
use redeploy_operator::config::Config;
use redeploy_operator::devops::{AzureDevOpsClient, DryRun, ReleaseOps};
use redeploy_operator::error::{Error, Result};
use redeploy_operator::metrics::PrometheusMetrics;
use redeploy_operator::notify::{Endpoint, NotificationTemplate, Notifications, WebhookNotifier};
use redeploy_operator::redeploy::{DeploymentObserver, RedeploymentOrchestrator};
use redeploy_operator::schedule::Scheduler;
use redeploy_operator::server;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(e) = run(cli).await {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let level = if cli.debug {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(cli.debug)
        .with_line_number(cli.debug);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load(&cli.config)?;
    for endpoint in &cli.notifications {
        Endpoint::parse(endpoint)
            .map_err(|e| Error::InvalidConfig(format!("notification endpoint: {e}")))?;
    }

    if cli.check_config {
        println!(
            "configuration ok: {} trigger(s), settle delay {:?}",
            config.releases.len(),
            config.settle_delay
        );
        return Ok(());
    }

    let organization_url = cli
        .azuredevops_organization_url
        .ok_or(Error::MissingCredential("--azuredevops-organization-url"))?;
    let access_token = cli
        .azuredevops_access_token
        .ok_or(Error::MissingCredential("--azuredevops-access-token"))?;
    let bind = server::parse_bind(&cli.bind)?;

    let client = AzureDevOpsClient::new(&organization_url, access_token)?;
    let client: Arc<dyn ReleaseOps> = if cli.dry_run {
        tracing::warn!("dry run enabled, no release will be modified");
        Arc::new(DryRun::new(client))
    } else {
        Arc::new(client)
    };

    let registry = Registry::new();
    let metrics = Arc::new(PrometheusMetrics::new(&registry)?);
    let notifications = Notifications::new(
        NotificationTemplate::new(cli.notification_template),
        cli.notifications,
        Arc::new(WebhookNotifier::new()),
    );
    let orchestrator = Arc::new(RedeploymentOrchestrator::new(
        client,
        DeploymentObserver::new(metrics, notifications),
        config.settle_delay,
    ));

    let mut scheduler = Scheduler::new();
    for trigger in config.releases {
        tracing::info!(
            project = %trigger.project,
            crontab = %trigger.crontab,
            trigger = %trigger.trigger,
            "registering release trigger"
        );
        let label = format!("{} ({})", trigger.project, trigger.crontab);
        let crontab = trigger.crontab.clone();
        let orchestrator = orchestrator.clone();
        let trigger = Arc::new(trigger);
        scheduler.add(label, crontab, move || {
            let orchestrator = orchestrator.clone();
            let trigger = trigger.clone();
            async move { orchestrator.fire(&trigger).await }
        });
    }

    tokio::select! {
        result = server::serve(bind, registry) => result,
        _ = scheduler.run() => Ok(()),
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("shutting down");
            Ok(())
        }
    }
}
