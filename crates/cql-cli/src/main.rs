//! CQL statement renderer CLI
//!
//! Builds options from flags, prints the rendered statement and optionally
//! executes it against the configured cluster.

mod args;
mod output;

use anyhow::Result;
use clap::Parser;
use cql_template::{cql, connect, Config, CqlOperations, CqlTemplate};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::{delete_options, insert_options, parse_pairs, update_options, Cli, Command};
use crate::output::print_statement;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let log_level = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)))
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Select { common } => {
            let table = common.table()?;
            let filter = common.filter()?;
            let options = common.query_options()?;
            let statement = cql::select(&table, &filter, &options)?;
            print_statement(&statement, &options, cli.json);

            if cli.execute {
                let template = connect_from_env().await?;
                let rows = template.select(&table, &filter, &options).await?;
                info!(rows = rows.len(), "Select executed");
                println!("{} row(s)", rows.len());
            }
        }

        Command::Insert {
            common,
            write,
            columns,
            if_not_exists,
            insert_nulls,
        } => {
            let table = common.table()?;
            let columns = parse_pairs(columns)?;
            let options = insert_options(common, write, *if_not_exists, *insert_nulls)?;
            let statement = cql::insert(&table, &columns, &options)?;
            print_statement(&statement, &options, cli.json);

            if cli.execute {
                let template = connect_from_env().await?;
                let result = template.insert(&table, &columns, &options).await?;
                println!("applied: {}", result.applied);
            }
        }

        Command::Update {
            common,
            write,
            condition,
            assignments,
        } => {
            let table = common.table()?;
            let filter = common.filter()?;
            let assignments = parse_pairs(assignments)?;
            let options = update_options(common, write, condition)?;
            let statement = cql::update(&table, &assignments, &filter, &options)?;
            print_statement(&statement, &options, cli.json);

            if cli.execute {
                let template = connect_from_env().await?;
                let result = template.update(&table, &assignments, &filter, &options).await?;
                println!("applied: {}", result.applied);
            }
        }

        Command::Delete {
            common,
            write,
            condition,
        } => {
            let table = common.table()?;
            let filter = common.filter()?;
            let options = delete_options(common, write, condition)?;
            let statement = cql::delete(&table, &filter, &options)?;
            print_statement(&statement, &options, cli.json);

            if cli.execute {
                let template = connect_from_env().await?;
                let result = template.delete(&table, &filter, &options).await?;
                println!("applied: {}", result.applied);
            }
        }
    }

    Ok(())
}

/// Cluster settings are only read when a statement is executed.
async fn connect_from_env() -> Result<CqlTemplate> {
    let config = Config::from_env()?;
    Ok(connect(&config).await?)
}
