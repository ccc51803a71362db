//! Command-line front end
//!
//! Every command loads the scenario book from the data directory, applies its
//! change, validates the touched scenario and writes the book back.

use std::io::Write;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use color_eyre::eyre::{Result, eyre};
use moneysim_core::{
    Bill, BillId, InputsBuilder, ScenarioComparison, Subscription, SubscriptionId, WhatIf,
    simulate,
};

use crate::data::{DataDirectory, Scenario, ScenarioBook};
use crate::report::Report;

#[derive(Parser, Debug)]
#[command(name = "moneysim")]
#[command(about = "Simulate day-by-day cash flow for the next few months")]
pub struct Cli {
    /// Path to the data directory (default: ~/.moneysim/)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info", global = true)]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate a scenario (the current one by default)
    Run {
        scenario: Option<String>,
        #[command(flatten)]
        what_if: WhatIfArgs,
        /// Number of cash-flow events to list
        #[arg(long, default_value_t = 10)]
        events: usize,
    },
    /// List saved scenarios
    List,
    /// Create a scenario; the first one becomes the baseline
    New {
        name: String,
        #[arg(long)]
        income: f64,
        #[arg(long, default_value_t = 0.0)]
        cash: f64,
        #[arg(long, default_value_t = 0.0)]
        flex: f64,
        #[arg(long, default_value_t = 3)]
        months: u32,
    },
    /// Copy a scenario under a new name and switch to it
    Duplicate { from: String, name: String },
    Delete { id: String },
    /// Make a scenario current
    Use { id: String },
    /// Make a scenario the baseline for comparisons
    Baseline { id: String },
    Bill {
        #[command(subcommand)]
        action: BillCommand,
    },
    Sub {
        #[command(subcommand)]
        action: SubCommand,
    },
    /// Replace the book with a JSON export
    Import { path: PathBuf },
    /// Write the book as JSON
    Export { path: PathBuf },
}

#[derive(Subcommand, Debug)]
pub enum BillCommand {
    Add {
        name: String,
        amount: f64,
        /// Day of month the bill is due (1-28)
        #[arg(long)]
        day: u32,
        #[arg(long)]
        scenario: Option<String>,
    },
    Remove {
        id: String,
        #[arg(long)]
        scenario: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubCommand {
    Add {
        name: String,
        amount: f64,
        /// Day of month the charge lands (1-28)
        #[arg(long)]
        day: u32,
        #[arg(long)]
        scenario: Option<String>,
    },
    Remove {
        id: String,
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Stop charging from the second simulated month
    Cancel {
        id: String,
        #[arg(long)]
        scenario: Option<String>,
    },
    /// Skip the charge in one month (1-based)
    Pause {
        id: String,
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=6))]
        month: u32,
        #[arg(long)]
        scenario: Option<String>,
    },
}

/// Temporary adjustments applied to a run, never saved
#[derive(Args, Debug, Default)]
pub struct WhatIfArgs {
    /// Change income by this percent
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub income_pct: f64,
    /// Add this amount to starting cash
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub cash_delta: f64,
    /// Change flexible spending by this percent
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub flex_pct: f64,
    /// Change a bill amount, as ID=DELTA
    #[arg(long = "bill", value_parser = parse_delta)]
    pub bill_deltas: Vec<(String, f64)>,
    /// Change a subscription amount, as ID=DELTA
    #[arg(long = "sub", value_parser = parse_delta)]
    pub subscription_deltas: Vec<(String, f64)>,
}

impl WhatIfArgs {
    pub fn to_what_if(&self) -> WhatIf {
        let mut what_if = WhatIf::new()
            .income_pct(self.income_pct)
            .starting_cash_delta(self.cash_delta)
            .flex_spend_pct(self.flex_pct);
        for (id, delta) in &self.bill_deltas {
            what_if = what_if.bill_delta(BillId::new(id.as_str()), *delta);
        }
        for (id, delta) in &self.subscription_deltas {
            what_if = what_if.subscription_delta(SubscriptionId::new(id.as_str()), *delta);
        }
        what_if
    }
}

fn parse_delta(s: &str) -> std::result::Result<(String, f64), String> {
    let (id, delta) = s
        .split_once('=')
        .ok_or_else(|| format!("expected ID=DELTA, got {s:?}"))?;
    let delta: f64 = delta
        .trim()
        .parse()
        .map_err(|e| format!("invalid delta {delta:?}: {e}"))?;
    Ok((id.trim().to_string(), delta))
}

/// Scenario named by `id`, or the current one
fn resolve<'a>(book: &'a ScenarioBook, id: Option<&str>) -> Result<&'a Scenario> {
    match id {
        Some(id) => book
            .get(id)
            .ok_or_else(|| eyre!("No scenario with id {id:?}")),
        None => book
            .current()
            .ok_or_else(|| eyre!("No scenario selected; create one with `moneysim new`")),
    }
}

fn resolve_id(book: &ScenarioBook, id: Option<&str>) -> Result<String> {
    resolve(book, id).map(|s| s.id.clone())
}

/// Validate the edited scenario and persist the book
fn commit(data: &DataDirectory, book: &ScenarioBook, scenario_id: &str) -> Result<()> {
    if let Some(scenario) = book.get(scenario_id) {
        scenario.inputs.validate()?;
    }
    data.save(book)?;
    Ok(())
}

/// Run one command against the data directory, writing output to `out`.
pub fn execute(command: Command, data: &DataDirectory, out: &mut impl Write) -> Result<()> {
    let mut book = data.load()?;

    match command {
        Command::Run {
            scenario,
            what_if,
            events,
        } => {
            let scenario = resolve(&book, scenario.as_deref())?;
            scenario.inputs.validate().map_err(|errors| {
                eyre!("Scenario {:?} has invalid inputs: {errors}", scenario.id)
            })?;
            let adjustment = what_if.to_what_if();
            let inputs = adjustment.apply(&scenario.inputs);
            if let Err(errors) = inputs.validate() {
                tracing::warn!(scenario = %scenario.id, %errors, "Simulating invalid inputs");
            }

            let result = simulate(&inputs);
            let mut report = Report::new(&scenario.name, &result).max_events(events);
            if let Some(baseline) = book.baseline()
                && (baseline.id != scenario.id || !adjustment.is_identity())
            {
                let base = simulate(&baseline.inputs);
                report = report.with_comparison(ScenarioComparison::between(&result, &base));
            }
            writeln!(out, "{report}")?;
        }
        Command::List => {
            if book.is_empty() {
                writeln!(out, "No scenarios yet; create one with `moneysim new`")?;
            }
            for scenario in &book.scenarios {
                let current = book.current_id.as_deref() == Some(scenario.id.as_str());
                let baseline = book.baseline_id.as_deref() == Some(scenario.id.as_str());
                writeln!(
                    out,
                    "{}{} {:<28}{:<20}{}",
                    if current { "*" } else { " " },
                    if baseline { "b" } else { " " },
                    scenario.id,
                    scenario.name,
                    scenario.created_at.strftime("%Y-%m-%d")
                )?;
            }
        }
        Command::New {
            name,
            income,
            cash,
            flex,
            months,
        } => {
            let inputs = InputsBuilder::new()
                .income(income)
                .starting_cash(cash)
                .flex_spend(flex)
                .months(months)
                .build();
            inputs.validate()?;

            let id = if book.is_empty() {
                book.create_baseline(inputs);
                let id = resolve_id(&book, None)?;
                book.rename(&id, name)?;
                id
            } else {
                book.add(name, inputs)
            };
            commit(data, &book, &id)?;
            tracing::info!(scenario = %id, "Created scenario");
            writeln!(out, "Created scenario {id}")?;
        }
        Command::Duplicate { from, name } => {
            let id = book.duplicate(&from, name)?;
            commit(data, &book, &id)?;
            writeln!(out, "Created scenario {id} from {from}")?;
        }
        Command::Delete { id } => {
            book.delete(&id)?;
            data.save(&book)?;
            tracing::info!(scenario = %id, "Deleted scenario");
            writeln!(out, "Deleted scenario {id}")?;
        }
        Command::Use { id } => {
            book.set_current(&id)?;
            data.save(&book)?;
            writeln!(out, "Current scenario is now {id}")?;
        }
        Command::Baseline { id } => {
            book.set_baseline(&id)?;
            data.save(&book)?;
            writeln!(out, "Baseline is now {id}")?;
        }
        Command::Bill { action } => match action {
            BillCommand::Add {
                name,
                amount,
                day,
                scenario,
            } => {
                let scenario_id = resolve_id(&book, scenario.as_deref())?;
                let id = resolve(&book, Some(scenario_id.as_str()))?.inputs.next_bill_id();
                book.add_bill(
                    &scenario_id,
                    Bill {
                        id: id.clone(),
                        name,
                        amount,
                        due_day: day,
                    },
                )?;
                commit(data, &book, &scenario_id)?;
                writeln!(out, "Added bill {id} to {scenario_id}")?;
            }
            BillCommand::Remove { id, scenario } => {
                let scenario_id = resolve_id(&book, scenario.as_deref())?;
                let removed = book.remove_bill(&scenario_id, &BillId::new(id))?;
                commit(data, &book, &scenario_id)?;
                writeln!(out, "Removed bill {} ({})", removed.id, removed.name)?;
            }
        },
        Command::Sub { action } => match action {
            SubCommand::Add {
                name,
                amount,
                day,
                scenario,
            } => {
                let scenario_id = resolve_id(&book, scenario.as_deref())?;
                let id = resolve(&book, Some(scenario_id.as_str()))?
                    .inputs
                    .next_subscription_id();
                book.add_subscription(
                    &scenario_id,
                    Subscription {
                        id: id.clone(),
                        name,
                        amount,
                        charge_day: day,
                        cancelled: false,
                        paused_months: Default::default(),
                    },
                )?;
                commit(data, &book, &scenario_id)?;
                writeln!(out, "Added subscription {id} to {scenario_id}")?;
            }
            SubCommand::Remove { id, scenario } => {
                let scenario_id = resolve_id(&book, scenario.as_deref())?;
                let removed = book.remove_subscription(&scenario_id, &SubscriptionId::new(id))?;
                commit(data, &book, &scenario_id)?;
                writeln!(out, "Removed subscription {} ({})", removed.id, removed.name)?;
            }
            SubCommand::Cancel { id, scenario } => {
                let scenario_id = resolve_id(&book, scenario.as_deref())?;
                book.cancel_subscription(&scenario_id, &SubscriptionId::new(id.as_str()))?;
                commit(data, &book, &scenario_id)?;
                writeln!(out, "Cancelled {id} from month 2 onward")?;
            }
            SubCommand::Pause {
                id,
                month,
                scenario,
            } => {
                let scenario_id = resolve_id(&book, scenario.as_deref())?;
                book.pause_subscription(
                    &scenario_id,
                    &SubscriptionId::new(id.as_str()),
                    month - 1,
                )?;
                commit(data, &book, &scenario_id)?;
                writeln!(out, "Paused {id} in month {month}")?;
            }
        },
        Command::Import { path } => {
            let imported = data.import_json(&path)?;
            for scenario in &imported.scenarios {
                if let Err(errors) = scenario.inputs.validate() {
                    tracing::warn!(scenario = %scenario.id, %errors, "Imported invalid inputs");
                    writeln!(out, "Warning: {}: {errors}", scenario.id)?;
                }
            }
            data.save(&imported)?;
            writeln!(out, "Imported {} scenarios", imported.scenarios.len())?;
        }
        Command::Export { path } => {
            data.export_json(&book, &path)?;
            writeln!(out, "Exported {} scenarios to {}", book.scenarios.len(), path.display())?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run(data: &DataDirectory, args: &[&str]) -> Result<String> {
        let mut argv = vec!["moneysim"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv)?;
        let mut out = Vec::new();
        execute(cli.command, data, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    fn setup() -> (TempDir, DataDirectory) {
        let dir = TempDir::new().unwrap();
        let data = DataDirectory::new(dir.path().to_path_buf());
        let args = ["new", "Today", "--income", "1000", "--flex", "600", "--months", "2"];
        run(&data, &args).unwrap();
        run(&data, &["bill", "add", "Rent", "800", "--day", "1"]).unwrap();
        (dir, data)
    }

    #[test]
    fn test_first_scenario_is_baseline() {
        let (_dir, data) = setup();
        let book = data.load().unwrap();

        assert_eq!(book.baseline_id.as_deref(), Some("baseline"));
        assert_eq!(book.current().unwrap().name, "Today");
        assert_eq!(book.current().unwrap().inputs.bills.len(), 1);
    }

    #[test]
    fn test_run_prints_report() {
        let (_dir, data) = setup();
        let text = run(&data, &["run"]).unwrap();

        assert!(text.contains("== Today =="));
        assert!(text.contains("Risk:            high"));
        // the baseline run needs no comparison against itself
        assert!(!text.contains("Compared to baseline"));
    }

    #[test]
    fn test_run_with_what_if_compares() {
        let (_dir, data) = setup();
        let text = run(&data, &["run", "--income-pct", "50", "--bill", "bill-1=-100"]).unwrap();

        assert!(text.contains("Compared to baseline"));
        assert!(text.contains("Ending balance  +$1,200.00"));
    }

    #[test]
    fn test_duplicate_and_subscription_edits() {
        let (_dir, data) = setup();
        run(&data, &["duplicate", "baseline", "Lean"]).unwrap();
        run(&data, &["sub", "add", "Gym", "60", "--day", "3"]).unwrap();
        run(&data, &["sub", "pause", "sub-1", "--month", "2"]).unwrap();
        run(&data, &["sub", "cancel", "sub-1"]).unwrap();

        let book = data.load().unwrap();
        let lean = book.current().unwrap();
        assert_eq!(lean.name, "Lean");
        let sub = &lean.inputs.subscriptions[0];
        assert!(sub.cancelled);
        assert!(sub.is_paused_in(1));
        assert!(book.baseline().unwrap().inputs.subscriptions.is_empty());

        let listing = run(&data, &["list"]).unwrap();
        assert_eq!(listing.lines().count(), 2);
        assert!(listing.lines().any(|l| l.starts_with(" b baseline")));
    }

    #[test]
    fn test_invalid_edit_is_not_saved() {
        let (_dir, data) = setup();
        assert!(run(&data, &["bill", "add", "Odd", "10", "--day", "31"]).is_err());
        assert_eq!(data.load().unwrap().current().unwrap().inputs.bills.len(), 1);
    }

    #[test]
    fn test_delete_baseline_refused() {
        let (_dir, data) = setup();
        run(&data, &["duplicate", "baseline", "Copy"]).unwrap();
        assert!(run(&data, &["delete", "baseline"]).is_err());
    }

    #[test]
    fn test_export_then_import() {
        let (dir, data) = setup();
        let path = dir.path().join("book.json");
        let path_arg = path.to_string_lossy().to_string();
        run(&data, &["export", &path_arg]).unwrap();

        let other_dir = TempDir::new().unwrap();
        let other = DataDirectory::new(other_dir.path().to_path_buf());
        let text = run(&other, &["import", &path_arg]).unwrap();

        assert_eq!(text, "Imported 1 scenarios\n");
        assert_eq!(other.load().unwrap(), data.load().unwrap());
    }

    #[test]
    fn test_run_refuses_imported_invalid_scenario() {
        let (dir, data) = setup();
        let mut book = data.load().unwrap();
        let mut inputs = book.baseline().unwrap().inputs.clone();
        inputs.months = 200_000_000;
        book.update("baseline", inputs).unwrap();
        let path = dir.path().join("book.json");
        data.export_json(&book, &path).unwrap();

        let other_dir = TempDir::new().unwrap();
        let other = DataDirectory::new(other_dir.path().to_path_buf());
        run(&other, &["import", &path.to_string_lossy()]).unwrap();

        let err = run(&other, &["run"]).unwrap_err();
        assert!(err.to_string().contains("invalid inputs"));
    }

    #[test]
    fn test_parse_delta() {
        assert_eq!(parse_delta("bill-1=-100"), Ok(("bill-1".to_string(), -100.0)));
        assert!(parse_delta("bill-1").is_err());
        assert!(parse_delta("bill-1=abc").is_err());
    }

    #[test]
    fn test_run_without_scenarios() {
        let dir = TempDir::new().unwrap();
        let data = DataDirectory::new(dir.path().to_path_buf());
        assert!(run(&data, &["run"]).is_err());
    }
}
