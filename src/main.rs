// ==========================================================
//  tvscout - smart TV discovery for the local network
// ==========================================================

use clap::Parser;
use std::net::Ipv4Addr;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use tvscout::net::interface;
use tvscout::{table, DiscoveryError, ScanConfig, Subnet, TvDiscovery};

#[derive(Parser, Debug)]
#[command(
    name = "tvscout",
    version,
    about = "Find smart TVs and streaming devices on the local network"
)]
struct Cli {
    /// Scan the /24 of this interface instead of the default route
    #[arg(long, conflicts_with = "subnet")]
    interface: Option<String>,

    /// Scan the /24 containing this address
    #[arg(long)]
    subnet: Option<Ipv4Addr>,

    /// List available network interfaces and exit
    #[arg(long)]
    list: bool,

    /// Concurrent host probes per scanner
    #[arg(short, long)]
    jobs: Option<usize>,

    /// Connect and request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the detailed view as JSON
    #[arg(long)]
    json: bool,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn list_interfaces() -> Result<(), DiscoveryError> {
    println!("Available network interfaces:");
    for entry in interface::list_network_interfaces()? {
        println!("  {:<12} IPv4: {:<15} -> Network: {}", entry.name, entry.ip, entry.subnet);
    }
    Ok(())
}

/// Subnet pinned on the command line, if any
fn pinned_subnet(cli: &Cli) -> Result<Option<Subnet>, DiscoveryError> {
    if let Some(name) = &cli.interface {
        return Ok(Some(Subnet::from_host(interface::interface_ipv4(name)?)));
    }
    Ok(cli.subnet.map(Subnet::from_host))
}

#[tokio::main]
async fn main() -> Result<(), DiscoveryError> {
    init_logging();
    let cli = Cli::parse();

    if cli.list {
        return list_interfaces();
    }

    let mut config = ScanConfig::default();
    if let Some(jobs) = cli.jobs {
        config.set_concurrency(jobs);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config.request_timeout_ms = timeout_ms;
    }

    let discovery = match pinned_subnet(&cli)? {
        Some(subnet) => TvDiscovery::for_subnet(config, subnet)?,
        None => TvDiscovery::new(config)?,
    };
    let subnet = discovery.subnet();

    eprintln!("Scanning network: {}", subnet);
    let started = Instant::now();
    let devices = discovery.discover_devices().await;

    if cli.json {
        let detailed = tvscout::aggregate::detailed_map(&devices);
        println!("{}", serde_json::to_string_pretty(&detailed)?);
        return Ok(());
    }

    if devices.is_empty() {
        println!("No smart TVs found on {}.", subnet);
        println!("Try:");
        println!("  1. Ensure TVs are powered on and connected to the network");
        println!("  2. Check that this machine is on the same subnet");
        println!("  3. Raise --timeout-ms or pin --interface");
        return Ok(());
    }

    println!("{}", table::device_table(&devices));
    println!(
        "Found {} device(s) in {:.2} seconds",
        devices.len(),
        started.elapsed().as_secs_f64()
    );
    Ok(())
}
