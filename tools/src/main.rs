//! register-cli: headless risk register and burndown report runner.
//!
//! Usage:
//!   register-cli --user upper_manager --date 15-Mar-24
//!   register-cli --import risks.json --db register.db
//!   register-cli --seed 12345 --count 200
//!   register-cli --user tech_manager --ipc-mode

use anyhow::Result;
use burndown_core::{
    config::RegisterConfig,
    engine::{BurndownEngine, BurndownReport},
    generator::generate_register,
    normalize::normalize_json,
    session::RegisterSession,
    store::RegisterStore,
    types::{format_register_date, parse_register_date},
};
use chrono::NaiveDate;
use std::env;
use std::io;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let data_dir = string_arg(&args, "--data-dir").unwrap_or("./data");
    let config = RegisterConfig::load(data_dir)?;

    let db = string_arg(&args, "--db").unwrap_or(&config.register_db).to_string();
    let user = string_arg(&args, "--user").unwrap_or("upper_manager");
    let role = config.role_for_user(user)?;
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let date = match string_arg(&args, "--date") {
        Some(raw) => Some(
            parse_register_date(raw)
                .ok_or_else(|| anyhow::anyhow!("--date {raw}: expected DD-Mon-YY"))?,
        ),
        None => None,
    };

    if !ipc_mode {
        println!("Risk Burndown: register-cli");
        println!("  user:      {user} ({})", role.as_str());
        println!("  db:        {db}");
        println!("  data_dir:  {data_dir}");
        println!();
    }

    let store = RegisterStore::open(&db)?;
    store.migrate()?;

    if let Some(path) = string_arg(&args, "--import") {
        import_register(&store, path, ipc_mode)?;
    }
    if let Some(seed) = seed_arg(&args)? {
        let count = parse_arg(&args, "--count", 50usize);
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .ok_or_else(|| anyhow::anyhow!("invalid seed start date"))?;
        let register = generate_register(seed, count, start, &config);
        store.replace_all(&register)?;
    }

    let engine = BurndownEngine::new(config);
    let session = RegisterSession::new(&engine, &store, user, role);
    if ipc_mode {
        session.run(io::stdin().lock(), io::stdout())?;
    } else {
        let records = session.visible_records()?;
        print_summary(engine.report(&records, date).as_ref());
    }

    Ok(())
}

fn import_register(store: &RegisterStore, path: &str, quiet: bool) -> Result<()> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
    let normalized = normalize_json(&content)?;
    store.replace_all(&normalized.records)?;
    log::info!(
        "imported {} risks from {path}, {} rows skipped",
        normalized.records.len(),
        normalized.rejected.len()
    );

    if !quiet {
        println!("Imported {} risks from {path}", normalized.records.len());
        for rejected in &normalized.rejected {
            println!("  skipped row {}: {}", rejected.row, rejected.reason);
        }
    }
    Ok(())
}

fn print_summary(report: Option<&BurndownReport>) {
    let Some(report) = report else {
        println!("No risks available. Add risks or import a register.");
        return;
    };

    let s = &report.summary;
    println!("=== REGISTER SUMMARY ===");
    println!("  total:          {}", s.total);
    println!("  open:           {}", s.open);
    println!("  closed:         {}", s.closed);
    println!("  high priority:  {}", s.high_priority);
    println!(
        "  timeline:       {} .. {} ({} days)",
        format_register_date(report.daily.span.start),
        format_register_date(report.daily.span.end),
        report.daily.points.len()
    );

    println!();
    println!("=== DAILY PEAKS (>= {}% of max {}) ===", report.daily_peaks.threshold_pct, report.daily_peaks.max_actual);
    if report.daily_peaks.is_empty() {
        println!("  (no open risks in range)");
    } else {
        let first = report.daily_peaks.indices[0];
        let last = report.daily_peaks.indices[report.daily_peaks.len() - 1];
        println!(
            "  {} peak days between {} and {}",
            report.daily_peaks.len(),
            format_register_date(report.daily.points[first].date),
            format_register_date(report.daily.points[last].date),
        );
    }
    if let Some(peak) = &report.peak_drilldown {
        println!("  highest: {} open on {}", peak.actual_open, format_register_date(peak.date));
    }

    println!();
    println!(
        "=== MONTHLY (avg {:.2} opened/month) ===",
        report.monthly.average_opened_per_month
    );
    for (i, p) in report.monthly.points.iter().enumerate() {
        let marker = if report.monthly_peaks.contains(i) { " *" } else { "" };
        println!(
            "  {} | opened {:>3} | expected {:>3} | actual {:>3}{marker}",
            p.month, p.opened, p.expected_open, p.actual_open
        );
    }

    println!();
    println!(
        "=== OPEN ON {} ({}) ===",
        format_register_date(report.drilldown.date),
        report.drilldown.rows.len()
    );
    for row in &report.drilldown.rows {
        println!("  {} [{}] {}: {}", row.id, row.priority, row.owner, row.description);
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].as_str())
}

/// `--seed` is optional, but a value that is given must parse.
fn seed_arg(args: &[String]) -> Result<Option<u64>> {
    string_arg(args, "--seed")
        .map(|raw| {
            raw.parse()
                .map_err(|_| anyhow::anyhow!("--seed {raw}: expected an unsigned integer"))
        })
        .transpose()
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
