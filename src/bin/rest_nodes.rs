//! rest-nodes — run Ocilion / Odoo REST nodes from the command line
//!
//! Usage:
//!   rest-nodes run <config> [--items <file>]   Execute a node over input items
//!   rest-nodes describe <node>                 Show the node description
//!   rest-nodes schema <node>                   Show the parameter JSON Schema
//!   rest-nodes list                            List available nodes

use anyhow::{bail, Context};
use rest_nodes::config::{load_items, ConfigLoader};
use rest_nodes::{Item, NodeKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "run" => cmd_run(&args[2..]).await,
        "describe" => cmd_describe(&args[2..]),
        "schema" => cmd_schema(&args[2..]),
        "list" => cmd_list(),
        "version" | "--version" | "-V" => {
            println!("rest-nodes {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage() {
    println!(
        r#"rest-nodes — Ocilion and Odoo REST workflow nodes

USAGE:
    rest-nodes <COMMAND> [OPTIONS]

COMMANDS:
    run <config> [--items <file>]   Execute the configured node; prints output items as JSON
    describe <node>                 Show node description (resources, operations)
    schema <node>                   Show the parameter JSON Schema
    list                            List available nodes
    version                         Show version information
    help                            Show this help message

ENVIRONMENT:
    RUST_LOG                        Log filter (default: info)
    REST_NODES_HTTP_TIMEOUT_SECS    Override the HTTP timeout
    REST_NODES_PROXY_URL            Route requests through a proxy
    OCILION_PASSWORD                Ocilion password fallback
    ODOO_REST_API_KEY               Odoo REST API key fallback"#
    );
}

async fn cmd_run(args: &[String]) -> anyhow::Result<()> {
    let Some(config_path) = args.first() else {
        bail!("run requires a configuration file");
    };

    let items = match flag_value(args, "--items") {
        Some(path) => load_items(path)
            .await
            .with_context(|| format!("loading items from {}", path))?,
        // A node always runs at least once, like a manually triggered workflow.
        None => vec![Item::default()],
    };

    let config = ConfigLoader::load(config_path)
        .await
        .with_context(|| format!("loading {}", config_path))?;
    let node = config.build_node()?;
    let output = node.execute(&items).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn cmd_describe(args: &[String]) -> anyhow::Result<()> {
    let kind = parse_kind(args)?;
    println!("{}", serde_json::to_string_pretty(&kind.description())?);
    Ok(())
}

fn cmd_schema(args: &[String]) -> anyhow::Result<()> {
    let kind = parse_kind(args)?;
    println!("{}", serde_json::to_string_pretty(&kind.parameter_schema())?);
    Ok(())
}

fn cmd_list() -> anyhow::Result<()> {
    for kind in NodeKind::ALL {
        let desc = kind.description();
        println!("{:<12} {} (v{})", kind.name(), desc.display_name, desc.version);
    }
    Ok(())
}

fn parse_kind(args: &[String]) -> anyhow::Result<NodeKind> {
    let Some(name) = args.first() else {
        bail!("expected a node name (ocilion, odoo_rest)");
    };
    name.parse::<NodeKind>().map_err(anyhow::Error::msg)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}
