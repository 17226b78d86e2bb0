use clap::Parser;
use sentinel_dns_api::{AppState, RuleUseCases};
use sentinel_dns_domain::CliOverrides;
use sentinel_dns_infrastructure::dns::DnsServerHandler;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "sentinel-dns")]
#[command(version)]
#[command(about = "Sentinel DNS - per-user DNS blocking over DNS and DNS-over-HTTPS")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Web (DoH + management) server port
    #[arg(short = 'w', long)]
    web_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Database path
    #[arg(long)]
    database: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        web_port: cli.web_port,
        bind_address: cli.bind.clone(),
        database_path: cli.database.clone(),
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Sentinel DNS v{}", env!("CARGO_PKG_VERSION"));

    let pool = bootstrap::init_database(&config.database).await?;

    let repos = di::Repositories::new(pool);
    let dns_services = di::DnsServices::new(&config, &repos)?;
    let use_cases = di::UseCases::new(&repos);

    let app_state = AppState {
        rules: RuleUseCases {
            add_rule: use_cases.add_rule,
            remove_rule: use_cases.remove_rule,
            get_rules: use_cases.get_rules,
        },
        dns: dns_services.handle_query.clone(),
    };

    let dns_addr = config.dns_addr()?;
    let dns_handler = DnsServerHandler::new(dns_services.handle_query, dns_services.identities);

    tokio::spawn(async move {
        if let Err(e) = server::start_dns_server(dns_addr, dns_handler).await {
            error!(error = %e, "DNS server error");
        }
    });

    let web_addr = config.web_addr()?;

    let tls = match &config.server.tls {
        Some(tls) => Some(bootstrap::load_tls_config(tls)?),
        None => None,
    };

    server::start_web_server(web_addr, app_state, tls).await?;

    info!("Server shutdown complete");
    Ok(())
}
