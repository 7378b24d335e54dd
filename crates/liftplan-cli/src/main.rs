//! liftplan CLI application
//!
//! Command-line interface over the liftplan core library, plus an MCP stdio
//! server for the plan generator.

mod args;
mod cli;
mod mcp;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use liftplan_core::PlannerBuilder;
use log::info;
use mcp::{LiftplanMcpServer, run_stdio_server};
use renderer::TerminalRenderer;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        no_color,
        command,
    } = Args::parse();

    let planner = PlannerBuilder::new()
        .with_database_path(database_file)
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("liftplan started");

    match command {
        Some(Commands::Plan { command }) => {
            Cli::new(planner, renderer)
                .handle_plan_command(command)
                .await
        }
        Some(Commands::Catalog { command }) => {
            Cli::new(planner, renderer)
                .handle_catalog_command(command)
                .await
        }
        Some(Commands::Lift { command }) => {
            Cli::new(planner, renderer)
                .handle_lift_command(command)
                .await
        }
        Some(Commands::Serve) => {
            info!("Starting liftplan MCP server");
            run_stdio_server(LiftplanMcpServer::new(planner))
                .await
                .context("MCP server failed")
        }
        None => Cli::new(planner, renderer).list_plans().await,
    }
}
