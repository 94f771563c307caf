//! # Example: shell
//!
//! Line-oriented terminal front end for the fast-boot manager.
//!
//! Shows how to:
//! - Build a [`Manager`] with a printing [`LogSink`] and the [`LogWriter`] subscriber
//! - Drive `boot`/`shutdown` from user input and forward every other line to `dispatch`
//! - Render the status stream (boot time label, service lines) next to the log
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► Manager::builder(cfg).with_sink(println).build()
//!   └─► loop (select):
//!         ├─ stdin line
//!         │    ├─ "boot"      → mgr.boot()      → print labels
//!         │    ├─ "shutdown"  → mgr.shutdown()  → print labels
//!         │    └─ other       → mgr.dispatch()  → Text | ClearLog | Exit
//!         └─ Ctrl-C           → shutdown if running, leave
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=fastboot=debug cargo run --example shell
//! ```

use std::sync::Arc;

use fastboot::{Config, LogSink, Manager, ManagerStatus, Response, Subscribe};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    // 1. Log lines go straight to the terminal.
    let sink: Arc<dyn LogSink> = Arc::new(|line: &str| println!("  | {line}"));

    // 2. Optional event subscriber (requires "logging" feature).
    #[cfg(feature = "logging")]
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(fastboot::LogWriter::new())];
    #[cfg(not(feature = "logging"))]
    let subs: Vec<Arc<dyn Subscribe>> = Vec::new();

    let mgr = Manager::builder(Config::default())
        .with_sink(sink)
        .with_subscribers(subs)
        .build();

    let cfg = mgr.config();
    println!("=== {} v{} ===", cfg.name, cfg.version);
    println!("type `boot`, `shutdown`, or `help` for commands\n");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                break;
            }
            line = lines.next_line() => match line? {
                Some(line) => line,
                None => break,
            },
        };

        match line.trim().to_lowercase().as_str() {
            "" => continue,
            "boot" => {
                if let Err(e) = mgr.boot().await {
                    println!("boot refused: {e}");
                }
                print_labels(&mgr);
            }
            "shutdown" => {
                if let Err(e) = mgr.shutdown().await {
                    println!("shutdown refused: {e}");
                }
                print_labels(&mgr);
            }
            _ => match mgr.dispatch(&line).await {
                Response::Text(text) => println!("{text}"),
                Response::ClearLog => print!("\x1b[2J\x1b[H"),
                Response::Exit(text) => {
                    println!("{text}");
                    return Ok(());
                }
            },
        }
    }

    if mgr.status() == ManagerStatus::Running {
        mgr.shutdown().await?;
    }
    Ok(())
}

fn print_labels(mgr: &Manager) {
    println!("{} | OS Status: {}", mgr.boot_time_label(), mgr.status().capitalized());
    for line in mgr.service_lines() {
        println!("    {line}");
    }
}
