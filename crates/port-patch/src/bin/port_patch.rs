//! `port-patch` — update TCP/NodePort overlay patches in a kustomization
//! document.
//!
//! Usage:
//!   port-patch tcp <HOST_PORT> <NAMESPACE> <SERVICE> <CONTAINER_PORT> [options]
//!   port-patch nodeport <NODE_PORT> <CONTAINER_PORT> [options]
//!
//! Exit codes:
//!   0  success
//!   1  invalid arguments or write failure
//!   2  document not found or not loadable
//!   3  merge conflict (exclusive policy collision)

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::{Args, Parser, Subcommand};

use port_patch::family::{nodeport_target, tcp_target};
use port_patch::hostname::is_valid_hostname;
use port_patch::{document, merge, DocumentError, MergeError, PathFamily, PortMapping};

#[derive(Debug, Parser)]
#[command(
    name = "port-patch",
    version,
    about = "Update TCP/NodePort port patches in a kustomization document"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Merge a host-port forward into /spec/values/tcp (overwrites on collision).
    Tcp {
        /// External host port.
        host_port: u32,
        /// Namespace of the target service.
        namespace: String,
        /// Name of the target service.
        service: String,
        /// Container port of the target service.
        container_port: u32,
        #[command(flatten)]
        common: Common,
    },
    /// Allocate a node port under /spec/values/controller/service/nodePorts/tcp
    /// (refuses to reassign an already-bound port).
    Nodeport {
        /// Node port to allocate.
        node_port: u32,
        /// Container port it maps to.
        container_port: u32,
        #[command(flatten)]
        common: Common,
    },
}

#[derive(Debug, Args)]
struct Common {
    /// Kustomization document to update.
    #[arg(long, default_value = "kustomization.yaml")]
    file: PathBuf,

    /// Second KEY CONTAINER_PORT pair, merged atomically with the primary.
    #[arg(long, num_args = 2, value_names = ["KEY", "PORT"])]
    second: Option<Vec<u32>>,

    /// Perform the full merge in memory and print the result without writing.
    #[arg(long)]
    dry_run: bool,

    /// Print the merge report as JSON instead of the one-line summary.
    #[arg(long)]
    json: bool,
}

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    // clap's own `parse` would exit 2 on a usage error, colliding with the
    // document-not-found code above.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            if is_info_request(err.kind()) {
                err.exit(); // prints help/version, exits 0
            }
            let _ = err.print();
            return 1;
        }
    };
    let (family, incoming, common) = match build_request(cli.command) {
        Ok(request) => request,
        Err(message) => {
            eprintln!("{message}");
            return 1;
        }
    };

    let mut doc = match document::load(&common.file) {
        Ok(doc) => doc,
        Err(err) => {
            eprintln!("{err}");
            return document_exit_code(&err);
        }
    };

    let report = match merge(&mut doc, family.path(), &incoming, family.policy()) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("{err}");
            return merge_exit_code(&err);
        }
    };

    if common.dry_run {
        match document::render(&doc) {
            Ok(text) => print!("{text}"),
            Err(err) => {
                eprintln!("{err}");
                return 1;
            }
        }
    } else if let Err(err) = document::save(&common.file, &doc) {
        eprintln!("{err}");
        return 1;
    }

    if common.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("failed to serialize report: {err}");
                return 1;
            }
        }
    } else {
        println!("{}", report.render());
    }
    0
}

/// Turn the parsed subcommand into a merge request: family, combined pair
/// set (primary plus optional `--second`), and the shared flags.
fn build_request(command: Command) -> Result<(PathFamily, PortMapping, Common), String> {
    match command {
        Command::Tcp {
            host_port,
            namespace,
            service,
            container_port,
            common,
        } => {
            for name in [&namespace, &service] {
                if !is_valid_hostname(name) {
                    return Err(format!("invalid name: {name:?} (RFC 1123 hostname syntax)"));
                }
            }
            let mut incoming = PortMapping::new();
            incoming.insert(host_port, tcp_target(&namespace, &service, container_port));
            if let Some((key, port)) = second_pair(&common) {
                incoming.insert(key, tcp_target(&namespace, &service, port));
            }
            Ok((PathFamily::Tcp, incoming, common))
        }
        Command::Nodeport {
            node_port,
            container_port,
            common,
        } => {
            let mut incoming = PortMapping::new();
            incoming.insert(node_port, nodeport_target(container_port));
            if let Some((key, port)) = second_pair(&common) {
                incoming.insert(key, nodeport_target(port));
            }
            Ok((PathFamily::NodePort, incoming, common))
        }
    }
}

/// clap enforces the arity of `--second` via `num_args = 2`, so the flag is
/// either absent or exactly one KEY PORT pair.
fn second_pair(common: &Common) -> Option<(u32, u32)> {
    match common.second.as_deref() {
        Some(&[key, port]) => Some((key, port)),
        _ => None,
    }
}

/// Help and version requests surface as parse errors but are not failures.
fn is_info_request(kind: ErrorKind) -> bool {
    matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion)
}

fn merge_exit_code(err: &MergeError) -> i32 {
    match err {
        MergeError::Conflict { .. } => 3,
        MergeError::PatchesNotASequence => 1,
    }
}

fn document_exit_code(err: &DocumentError) -> i32 {
    match err {
        DocumentError::NotFound(_)
        | DocumentError::Read { .. }
        | DocumentError::Parse { .. }
        | DocumentError::NotAMapping(_) => 2,
        _ => 1,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
