use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::sync::Arc;

mod cli;
mod commands;
mod embedded;
mod registry;
mod stdio;

use cli::Cli;
use registry::CategoryRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging (stderr; stdout carries the MCP transport)
    env_logger::init();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Handle list-tools flag
    if cli.list_tools {
        return commands::write_stdout(|out| {
            writeln!(out, "Available tools:")?;
            for tool in cli::available_tools() {
                writeln!(out, "  - {tool}")?;
            }
            Ok(())
        });
    }

    // Handle list-toolsets flag
    if cli.list_toolsets {
        return commands::write_stdout(|out| {
            writeln!(out, "Available bundled toolsets:")?;
            for toolset in embedded::list_toolsets() {
                writeln!(out, "  - {toolset}")?;
            }
            Ok(())
        });
    }

    // Get enabled tools from CLI (--tool/--tools/--toolset)
    let enabled_tools = cli.enabled_tools().await?;

    // VALIDATE IMMEDIATELY - before loading anything
    if let Some(ref tools) = enabled_tools {
        let invalid = cli::unknown_tools(tools);

        if !invalid.is_empty() {
            eprintln!("Error: Invalid tool names specified:");
            for tool in &invalid {
                eprintln!("  - {tool}");
            }
            eprintln!();
            eprintln!("Available tools:");
            for tool in cli::available_tools() {
                eprintln!("  - {tool}");
            }
            eprintln!();
            eprintln!("Tip: Use --list-tools to see all available tools");
            eprintln!("Tip: Use --list-toolsets to see bundled toolsets");
            return Err(anyhow::anyhow!("Invalid tool names specified"));
        }
    }

    // Load the category set once; a malformed file aborts startup
    let registry =
        CategoryRegistry::load(&cli.categories_path()).context("Failed to load categories")?;
    if registry.is_empty() {
        log::warn!("No categories loaded; every lookup will report the category as missing");
    }

    if cli.list_categories {
        return commands::write_stdout(|out| {
            for category in registry.iter() {
                writeln!(out, "{category}")?;
            }
            Ok(())
        });
    }

    // Local queries answer without starting the server
    if let Some(ref command) = cli.command {
        return commands::handle_query(&registry, command);
    }

    // Cancellation token for graceful shutdown on interrupt
    let shutdown_token = tokio_util::sync::CancellationToken::new();

    // Spawn cross-platform signal handler
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        wait_for_interrupt().await;
        log::debug!("Received interrupt signal, shutting down");
        signal_token.cancel();
    });

    let server = stdio::CategoryServer::new(Arc::new(registry), enabled_tools);
    server.serve_stdio(shutdown_token).await?;

    Ok(())
}

/// Wait for interrupt signal (cross-platform)
#[cfg(unix)]
async fn wait_for_interrupt() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm_result = signal(SignalKind::terminate());
    let mut sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result.as_mut(), sigint_result.as_mut()) {
        (Ok(sigterm), Ok(sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {}
                _ = sigint.recv() => {}
            }
        }
        (Ok(sigterm), Err(_)) => {
            let _ = sigterm.recv().await;
        }
        (Err(_), Ok(sigint)) => {
            let _ = sigint.recv().await;
        }
        (Err(_), Err(_)) => {
            // Signals unavailable; rely on the client closing stdin
            let () = std::future::pending().await;
        }
    }
}

/// Wait for interrupt signal (cross-platform)
#[cfg(windows)]
async fn wait_for_interrupt() {
    match tokio::signal::windows::ctrl_c() {
        Ok(mut ctrl_c) => {
            let _ = ctrl_c.recv().await;
        }
        Err(_) => {
            let () = std::future::pending().await;
        }
    }
}
