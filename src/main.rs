use anyhow::Result;
use clap::Parser;

use nodescope_k8s::KubeClient;
use nodescope_report::Report;
use nodescope_types::{ClusterSnapshot, DisplayOptions};

/// Nodescope - a one-shot report of cluster node and machine state
#[derive(Parser, Debug)]
#[command(name = "nodescope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Node name to report on instead of the whole cluster
    #[arg(value_name = "NODE")]
    node: Option<String>,

    /// Show node resource usage
    #[arg(
        short = 'u',
        long = "show-usage",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    show_usage: bool,

    /// Show cluster version data
    #[arg(
        short = 'v',
        long = "show-version",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    show_version: bool,

    /// Show cluster operator data
    #[arg(
        short = 'o',
        long = "show-operators",
        default_value_t = true,
        action = clap::ArgAction::Set
    )]
    show_operators: bool,

    /// Show symbol keys
    #[arg(short = 'k', long = "keys")]
    show_keys: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing for debugging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(args).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let options = DisplayOptions {
        show_usage: args.show_usage,
        show_keys: args.show_keys,
        show_version: args.show_version,
        show_operators: args.show_operators,
    };

    let client = KubeClient::new().await?;

    // Nodes first: node-sourced fields stay authoritative through the merge.
    let mut snapshot = ClusterSnapshot::new();
    for record in client.list_nodes(args.node.as_deref()).await? {
        snapshot.insert(record)?;
    }

    // Machines second: bound machines contribute their phase, unbound
    // ones become standalone rows.
    for record in client.list_machines().await? {
        snapshot.merge_machine(record)?;
    }

    if options.show_usage {
        for sample in client.list_node_metrics().await? {
            snapshot.apply_usage(&sample.node_name, sample.cpu_millis, sample.memory_bytes);
        }
    }

    let mut report = Report::new(snapshot, options);
    if options.show_version {
        report = report.with_version(client.get_cluster_version().await?);
    }
    if options.show_operators {
        report = report.with_operators(client.list_cluster_operators().await?);
    }

    print!("{}", report.render());
    Ok(())
}
