//! SmartSave CLI
//!
//! Command-line front end for projections, TFSA/RRSP simulations and the
//! local vault of saved simulations

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use smartsave::accounts::catalog;
use smartsave::export::{self, ChartData, BALANCE_COLOR, COMPARISON_COLOR};
use smartsave::projection::{
    whole_years, ProjectionEngine, ProjectionInput, ProjectionResult, Recommendation,
};
use smartsave::vault::{DeleteOutcome, FileStorage, RecordId, VaultRecord, VaultStore, VAULT_KEY};
use smartsave::{DualProjection, ScenarioRunner};

#[derive(Parser)]
#[command(name = "smartsave", version, about = "Savings projections for TFSA and RRSP planning")]
struct Cli {
    /// Vault file for saved simulations
    #[arg(long = "vault", global = true, default_value_t = default_vault_path())]
    vault_path: String,

    #[command(subcommand)]
    command: Command,
}

fn default_vault_path() -> String {
    format!("{}.json", VAULT_KEY)
}

#[derive(Subcommand)]
enum Command {
    /// Project a single savings account
    Project {
        #[command(flatten)]
        input: InputArgs,

        /// Write the yearly breakdown to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Print JSON (table, summary, chart) instead of text
        #[arg(long)]
        json: bool,
    },

    /// Compare two projections side by side
    Compare {
        #[arg(long, default_value_t = 200.0)]
        monthly: f64,
        #[arg(long, default_value_t = 5.0)]
        rate: f64,
        #[arg(long, default_value_t = 5.0)]
        years: f64,
        #[arg(long, default_value_t = 300.0)]
        monthly2: f64,
        #[arg(long, default_value_t = 6.0)]
        rate2: f64,
        #[arg(long, default_value_t = 5.0)]
        years2: f64,

        #[arg(long)]
        json: bool,
    },

    /// Simulate TFSA vs RRSP growth for an income level
    Simulate {
        #[arg(long, default_value_t = 60_000.0)]
        income: f64,
        #[arg(long, default_value_t = 500.0)]
        monthly: f64,
        #[arg(long, default_value_t = 10.0)]
        years: f64,

        /// Save the result to the vault
        #[arg(long)]
        save: bool,

        /// Title for the saved simulation
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        json: bool,
    },

    /// Manage saved simulations
    #[command(subcommand)]
    Vault(VaultCommand),

    /// List registered account types
    Accounts,
}

#[derive(Args)]
struct InputArgs {
    /// Monthly contribution ($)
    #[arg(long, default_value_t = 200.0)]
    monthly: f64,

    /// Annual interest rate (%)
    #[arg(long, default_value_t = 5.0)]
    rate: f64,

    /// Duration (years)
    #[arg(long, default_value_t = 5.0)]
    years: f64,
}

impl InputArgs {
    fn to_input(&self) -> ProjectionInput {
        ProjectionInput::from_raw(self.monthly, self.rate, self.years)
    }
}

#[derive(Subcommand)]
enum VaultCommand {
    /// List saved simulations
    List,

    /// Show the stored chart series of one simulation
    Show {
        id: i64,
        #[arg(long)]
        json: bool,
    },

    /// Delete a simulation
    Delete {
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Export the stored series of one simulation as CSV
    Export {
        id: i64,
        #[arg(long)]
        csv: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionOutput<'a> {
    summary: smartsave::projection::ProjectionSummary,
    table: Vec<export::TableRow>,
    chart: ChartData,
    recommendation: &'a str,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let engine = ProjectionEngine::default();

    match cli.command {
        Command::Project { input, csv, json } => {
            let input = input.to_input();
            let result = engine.project(&input);
            let tip = input.recommendation();

            if json {
                let output = ProjectionOutput {
                    summary: result.summary(),
                    table: export::table_rows(&result.series),
                    chart: ChartData::balance(&result, "Balance Over Time", BALANCE_COLOR),
                    recommendation: tip.message(),
                };
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                print_projection(&result, tip);
            }

            if let Some(path) = csv {
                let file = File::create(&path)
                    .with_context(|| format!("Unable to create {}", path.display()))?;
                export::write_csv(file, &result.series)?;
                println!("\nBreakdown written to: {}", path.display());
            }
        }

        Command::Compare { monthly, rate, years, monthly2, rate2, years2, json } => {
            let runner = ScenarioRunner::with_config(engine.config().clone());
            let first = ProjectionInput::from_raw(monthly, rate, years);
            let second = ProjectionInput::from_raw(monthly2, rate2, years2);
            let comparison = runner.compare(&first, &second);

            if json {
                let charts = [
                    ChartData::balance(&comparison.first, "Balance Over Time", BALANCE_COLOR),
                    ChartData::balance(&comparison.second, "Balance Over Time", COMPARISON_COLOR),
                ];
                println!("{}", serde_json::to_string_pretty(&(&comparison, &charts))?);
            } else {
                println!("Scenario 1");
                print_projection(&comparison.first, first.recommendation());
                println!("\nScenario 2");
                print_projection(&comparison.second, second.recommendation());
                println!("\nDifference in final balance: ${:.2}", comparison.final_balance_gap());
            }
        }

        Command::Simulate { income, monthly, years, save, title, json } => {
            let dual = engine.simulate_dual(income, monthly, whole_years(years));

            if json {
                println!("{}", serde_json::to_string_pretty(&(&dual, ChartData::from_dual(&dual)))?);
            } else {
                print_dual(&dual);
            }

            if save {
                let mut store = VaultStore::new(FileStorage::new(&cli.vault_path));
                let today = Local::now().date_naive();
                match store.save_projection(title, &dual, today) {
                    Ok(record) => println!("\nSaved to vault as #{}: {}", record.id, record.title),
                    Err(e) => notice(&format!("Simulation was not saved: {}", e)),
                }
            }
        }

        Command::Vault(command) => run_vault(command, &cli.vault_path)?,

        Command::Accounts => {
            for account in catalog() {
                println!("{}", account.title);
                println!("  {}", account.description);
                println!("  {}\n", account.url);
            }
        }
    }

    Ok(())
}

fn run_vault(command: VaultCommand, path: &str) -> Result<()> {
    let mut store = VaultStore::new(FileStorage::new(path));

    match command {
        VaultCommand::List => {
            let records = store.load_all();
            if records.is_empty() {
                println!("No simulations saved yet.");
            }
            for record in &records {
                println!("#{} {}", record.id, record.title);
                println!("  Created: {}", record.created_date);
                println!(
                    "  Income: ${:.0}  Monthly: ${:.2}  Years: {}",
                    record.income, record.monthly_contribution, record.years
                );
                println!(
                    "  Final TFSA: ${:.2}  Final RRSP: ${:.2}",
                    record.final_tfsa(),
                    record.final_rrsp()
                );
            }
        }

        VaultCommand::Show { id, json } => {
            let record = find_record(&store, id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&record.chart())?);
            } else {
                println!("{}", record.title);
                println!("{:>8} {:>14} {:>14}", "Year", "TFSA", "RRSP");
                for ((label, tfsa), rrsp) in record
                    .year_labels
                    .iter()
                    .zip(&record.tfsa_series)
                    .zip(&record.rrsp_series)
                {
                    println!("{:>8} {:>14.2} {:>14.2}", label, tfsa, rrsp);
                }
            }
        }

        VaultCommand::Delete { id, yes } => {
            let outcome = store.delete_confirmed(RecordId(id), |record| yes || confirm_delete(record));
            match outcome {
                Ok(DeleteOutcome::Deleted) => println!("Deleted #{}", id),
                Ok(DeleteOutcome::Declined) => println!("Kept #{}", id),
                Ok(DeleteOutcome::NotFound) => println!("No simulation #{}", id),
                Err(e) => notice(&format!("Simulation was not deleted: {}", e)),
            }
        }

        VaultCommand::Export { id, csv } => {
            let record = find_record(&store, id)?;
            let file = File::create(&csv)
                .with_context(|| format!("Unable to create {}", csv.display()))?;
            export::write_dual_csv(file, &record.year_labels, &record.tfsa_series, &record.rrsp_series)?;
            println!("Simulation #{} written to: {}", id, csv.display());
        }
    }

    Ok(())
}

fn find_record(store: &VaultStore<FileStorage>, id: i64) -> Result<VaultRecord> {
    store
        .get(RecordId(id))
        .with_context(|| format!("No simulation #{} in the vault", id))
}

fn confirm_delete(record: &VaultRecord) -> bool {
    print!("Are you sure you want to delete \"{}\"? [y/N] ", record.title);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    matches!(answer.trim(), "y" | "Y" | "yes")
}

/// Report a failed save/delete without aborting
fn notice(message: &str) {
    log::warn!("{}", message);
    eprintln!("Notice: {}", message);
}

fn print_projection(result: &ProjectionResult, tip: Recommendation) {
    println!("{:>5} {:>14} {:>16} {:>14}", "Year", "Total Deposit", "Interest Earned", "Balance");
    println!("{}", "-".repeat(52));
    for point in &result.series {
        println!(
            "{:>5} {:>14.2} {:>16.2} {:>14.2}",
            point.year, point.cumulative_deposit, point.interest_earned, point.balance
        );
    }

    let summary = result.summary();
    println!("\nSummary:");
    println!("  Total Deposit: ${:.2}", summary.total_deposit);
    println!("  Interest:      ${:.2}", summary.total_interest);
    println!("  Final Balance: ${:.2}", summary.final_balance);
    println!("\nTip: {}", tip.message());
}

fn print_dual(dual: &DualProjection) {
    println!(
        "TFSA ${:.2}/month vs RRSP ${:.2}/month (multiplier {:.2}) at {}%",
        dual.monthly_contribution,
        dual.rrsp_contribution,
        dual.contribution_multiplier,
        dual.annual_rate_percent
    );
    println!("{:>8} {:>14} {:>14}", "Year", "TFSA", "RRSP");
    for (label, (tfsa, rrsp)) in dual.labels().iter().zip(dual.tfsa.iter().zip(&dual.rrsp)) {
        println!("{:>8} {:>14.2} {:>14.2}", label, tfsa.balance, rrsp.balance);
    }
    println!("\nRRSP advantage after {} years: ${:.2}", dual.years, dual.final_gap());
}
