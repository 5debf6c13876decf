use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{Datelike, NaiveDate};
use clap::{Parser, Subcommand};
use tracing::info;

use moment_scheduler::calendar::{
    CalendarMonth, WEEKDAY_LABELS, build_month_grid, format_display_date,
};
use moment_scheduler::config::Config;
use moment_scheduler::moment::{FormOutcome, MomentDraft};
use moment_scheduler::time_slot::build_time_slots;
use moment_scheduler::{Result, app, logging};

#[derive(Parser)]
#[command(name = "moment-scheduler")]
#[command(about = "Schedule a moment: pick a category, a date and a time slot", long_about = None)]
struct Cli {
    /// YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Use this date as today (YYYY-MM-DD)
    #[arg(long, global = true, value_parser = parse_date)]
    today: Option<NaiveDate>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Fill in the create-moment form
    Create,
    /// List the selectable time slots
    Slots,
    /// Print a month grid; the month is zero-based and may overflow
    Month {
        #[arg(allow_hyphen_values = true)]
        year: i32,
        #[arg(allow_hyphen_values = true)]
        month: i32,
    },
    /// Enter a verification code
    Verify { destination: String },
}

impl Command {
    /// Full-screen commands; only these write the log file.
    fn is_interactive(&self) -> bool {
        matches!(self, Command::Create | Command::Verify { .. })
    }
}

fn parse_date(value: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|err| format!("{value}: {err}"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load_or_default(cli.config.as_deref())?;
    let command = cli.command.unwrap_or(Command::Create);

    let today = cli
        .today
        .unwrap_or_else(|| chrono::Local::now().date_naive());
    if command.is_interactive() {
        logging::init(&config)?;
        info!(%today, "moment-scheduler started");
    }

    match command {
        Command::Create => match app::run_moment_form(&config, today)? {
            FormOutcome::Submitted(draft) => print_draft(&draft, cli.json),
            FormOutcome::Cancelled => {
                if !cli.json {
                    println!("Cancelled.");
                }
                Ok(())
            }
        },
        Command::Slots => {
            let slots = build_time_slots();
            if cli.json {
                println!("{}", serde_json::to_string(&slots)?);
            } else {
                for slot in slots {
                    println!("{slot}");
                }
            }
            Ok(())
        }
        Command::Month { year, month } => print_month(year, month, cli.json),
        Command::Verify { destination } => {
            match app::run_otp(&destination, config.resend_seconds)? {
                Some(code) if cli.json => println!("{}", serde_json::json!({ "code": code })),
                Some(code) => println!("Code entered: {code}"),
                None => println!("Cancelled."),
            }
            Ok(())
        }
    }
}

fn print_draft(draft: &MomentDraft, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(draft)?);
        return Ok(());
    }
    let sub_category = if draft.sub_category.is_empty() {
        "-"
    } else {
        draft.sub_category.as_str()
    };
    println!("Category:     {} / {}", draft.category, sub_category);
    println!("Description:  {}", draft.description);
    println!(
        "When:         {} {} - {} {}",
        format_display_date(draft.start_date),
        draft.time_range.start,
        draft.time_range.end,
        draft.time_range.duration_label()
    );
    for issue in draft.issues() {
        println!("Note:         {issue}");
    }
    Ok(())
}

fn print_month(year: i32, month: i32, json: bool) -> Result<()> {
    let displayed = CalendarMonth::new(year, month)?;
    let cells = build_month_grid(year, month);

    if json {
        let days: Vec<Option<String>> = cells
            .iter()
            .map(|cell| cell.date.map(|date| date.to_string()))
            .collect();
        let body = serde_json::json!({
            "title": displayed.title(),
            "first_weekday_offset": displayed.first_weekday_offset(),
            "day_count": displayed.day_count(),
            "cells": days,
        });
        println!("{}", serde_json::to_string_pretty(&body)?);
        return Ok(());
    }

    println!("{:^27}", displayed.title());
    println!("{}", WEEKDAY_LABELS.join("  "));
    for week in cells.chunks(7) {
        let row: Vec<String> = week
            .iter()
            .map(|cell| match cell.date {
                Some(date) => format!("{:>2}", date.day()),
                None => "  ".to_string(),
            })
            .collect();
        println!("{}", row.join("  ").trim_end());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_screen_commands_open_the_log() {
        assert!(Command::Create.is_interactive());
        assert!(Command::Verify { destination: "a@b.c".to_string() }.is_interactive());
        assert!(!Command::Slots.is_interactive());
        assert!(!Command::Month { year: 2025, month: 2 }.is_interactive());
    }

    #[test]
    fn no_subcommand_means_create() {
        let cli = Cli::try_parse_from(["moment-scheduler", "--json"]).expect("parse");
        assert!(cli.command.unwrap_or(Command::Create).is_interactive());
        let cli = Cli::try_parse_from(["moment-scheduler", "slots"]).expect("parse");
        assert!(!cli.command.unwrap_or(Command::Create).is_interactive());
    }
}
