// Entry point and interactive console flow.
//
// The three exports are loaded and cleaned once at startup. Every menu
// action then renders its report from that read-only dataset:
// - [1] network overview for the monthly or quarterly period,
// - [2]/[3] per-store performance and attainment tables,
// - [4] detail for one selected store,
// - [5] product and consultant rankings,
// - [6] export of every report to the output directory.
mod aggregate;
mod config;
mod error;
mod loader;
mod month;
mod normalize;
mod output;
mod palette;
mod reports;
mod types;
mod util;

use anyhow::Context;
use config::{Settings, DEFAULT_CONFIG_FILE};
use loader::DatasetReport;
use std::io::{self, Write};
use std::path::Path;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use types::{Dataset, Period};

fn init_tracing() {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env)
        .with_writer(io::stderr)
        .init();
}

/// Print `prompt` and read one trimmed line from stdin.
fn read_line(prompt: &str) -> String {
    print!("{}", prompt);
    let _ = io::stdout().flush();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn read_choice() -> String {
    read_line("Enter choice: ")
}

fn print_load_report(data: &Dataset, report: &DatasetReport) {
    for t in &report.tables {
        println!(
            "{}: {} rows loaded, {} skipped, {} of {} numeric cells unreadable",
            t.table,
            util::format_int(t.total_rows - t.parse_errors),
            util::format_int(t.parse_errors),
            util::format_int(t.coerced_cells),
            util::format_int(t.numeric_cells)
        );
    }
    let months = reports::months_covered(data);
    let labels: Vec<&str> = months.iter().map(|m| m.as_str()).collect();
    println!("Months covered: {}\n", labels.join(", "));
    if months.iter().any(|m| m.month().is_none()) {
        warn!(months = ?labels, "unrecognised month labels sort before every calendar month");
    }
}

fn prompt_period() -> Period {
    loop {
        println!("Select period:");
        println!("[1] {}", Period::Monthly.label());
        println!("[2] {}", Period::Quarterly.label());
        match read_choice().as_str() {
            "1" => return Period::Monthly,
            "2" => return Period::Quarterly,
            _ => println!("Invalid choice. Please enter 1 or 2."),
        }
    }
}

fn handle_overview(data: &Dataset, period: Period) {
    let overview = reports::network_overview(data, period);
    output::preview_table(
        "Network Overview",
        &[reports::overview_row(&overview)],
        1,
    );
}

fn handle_performance(data: &Dataset, settings: &Settings) {
    output::preview_table(
        "Quarterly Revenue by Store",
        &reports::quarterly_performance(data),
        settings.preview_rows,
    );
}

fn handle_attainment(data: &Dataset, settings: &Settings) {
    output::preview_table(
        "Attainment % by Store and Month",
        &reports::attainment_by_store(data),
        settings.preview_rows,
    );
}

fn handle_store_detail(data: &Dataset, settings: &Settings) {
    let stores = reports::store_names(data);
    if stores.is_empty() {
        println!("No stores in the sales table.\n");
        return;
    }
    println!("Select a store:");
    for (idx, s) in stores.iter().enumerate() {
        println!("[{}] {}", idx + 1, s);
    }
    let choice = read_choice();
    let Some(store) = choice
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|n| stores.get(n))
    else {
        println!("Invalid store selection.\n");
        return;
    };

    let detail = reports::store_detail(data, store, settings.store_top_n);
    println!("\nStore Detail: {}\n", detail.store);
    if detail.is_empty() {
        println!("(no data for this store)\n");
        return;
    }
    if let Some(ind) = &detail.indicators {
        output::preview_table("Store Indicators (latest month)", std::slice::from_ref(ind), 1);
    }
    output::preview_table("Sales Mix by Category", &detail.mix, settings.preview_rows);
    let n = settings.store_top_n;
    output::preview_table(&format!("Top {} Consultants", n), &detail.top_consultants, n);
    output::preview_table(&format!("Top {} Products", n), &detail.top_products, n);
    output::preview_table(&format!("Top {} Categories", n), &detail.top_categories, n);
}

fn handle_rankings(data: &Dataset, settings: &Settings) {
    println!("Choose ranking(s):");
    println!("[1] Best-selling products");
    println!("[2] Consultant ranking");
    println!("[3] Both");
    let choice = read_choice();
    let (products, consultants) = match choice.as_str() {
        "1" => (true, false),
        "2" => (false, true),
        "3" | "" => (true, true),
        _ => {
            println!("Invalid choice.\n");
            return;
        }
    };
    let n = settings.network_top_n;
    if products {
        output::preview_table("Best-Selling Products", &reports::product_ranking(data, n), n);
    }
    if consultants {
        output::preview_table("Consultant Ranking", &reports::consultant_ranking(data, n), n);
    }
}

fn handle_export(data: &Dataset, settings: &Settings, period: Period) {
    match output::export_snapshot(&settings.output_dir, data, period, settings.network_top_n) {
        Ok(files) => {
            println!("Reports exported:");
            for f in files {
                println!("  {}", f.display());
            }
            println!();
        }
        Err(e) => eprintln!("Export failed: {}\n", e),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let settings = Settings::load(Path::new(DEFAULT_CONFIG_FILE)).context("failed to read settings")?;
    let (data, report) = loader::load_dataset(&settings).context("failed to load dashboard data")?;

    println!("Phone Store Commercial Dashboard\n");
    print_load_report(&data, &report);

    let mut period = Period::Monthly;
    loop {
        println!("[1] Network overview ({})", period.label());
        println!("[2] Quarterly performance by store");
        println!("[3] Attainment by store and month");
        println!("[4] Store detail");
        println!("[5] Rankings");
        println!("[6] Export reports");
        println!("[0] Exit\n");
        match read_choice().as_str() {
            "1" => {
                period = prompt_period();
                println!();
                handle_overview(&data, period);
            }
            "2" => handle_performance(&data, &settings),
            "3" => handle_attainment(&data, &settings),
            "4" => handle_store_detail(&data, &settings),
            "5" => handle_rankings(&data, &settings),
            "6" => handle_export(&data, &settings, period),
            "0" => {
                println!("Exiting the program.");
                break;
            }
            _ => println!("Invalid choice. Please enter a number from the menu.\n"),
        }
    }
    Ok(())
}
