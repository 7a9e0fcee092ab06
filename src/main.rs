//! Bill estimator entry point — CLI wiring for one calculation per run.

use std::path::Path;
use std::process;

use tariff_bill::billing::calculate;
use tariff_bill::billing::types::{ConsumptionPayload, TariffGroup};
use tariff_bill::config::TariffSchedule;
use tariff_bill::io::export::export_csv;

/// Parsed CLI arguments.
struct CliArgs {
    tariffs_path: Option<String>,
    preset: Option<String>,
    group: String,
    high_kwh: Option<f64>,
    low_kwh: Option<f64>,
    total_kwh: Option<f64>,
    demand_kw: Option<f64>,
    reactive_kvarh: Option<f64>,
    export_out: Option<String>,
    #[cfg(feature = "api")]
    serve: bool,
    #[cfg(feature = "api")]
    port: u16,
}

fn print_help() {
    eprintln!("tariff-bill — electricity bill estimator");
    eprintln!();
    eprintln!("Usage: tariff-bill [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tariffs <path>         Load tariff schedule from TOML file");
    eprintln!("  --preset <name>          Use a built-in schedule (proposal_2025)");
    eprintln!("  --group <tag>            Tariff group (default: household_two)");
    eprintln!("  --high <kwh>             High-rate consumption");
    eprintln!("  --low <kwh>              Low-rate consumption");
    eprintln!("  --total <kwh>            Total consumption (single-register groups)");
    eprintln!("  --demand <kw>            Peak demand (group_3 only)");
    eprintln!("  --reactive <kvarh>       Reactive energy (group_3 only)");
    eprintln!("  --export <path>          Write the itemized breakdown to CSV");
    #[cfg(feature = "api")]
    {
        eprintln!("  --serve                  Start the REST API server instead");
        eprintln!("  --port <u16>             API server port (default: 3000)");
    }
    eprintln!("  --help                   Show this help message");
    eprintln!();
    eprintln!("Group tags: {}", TariffGroup::TAGS.join(", "));
}

fn parse_f64_arg(args: &[String], i: usize, flag: &str) -> f64 {
    let Some(raw) = args.get(i) else {
        eprintln!("error: {flag} requires a numeric argument");
        process::exit(1);
    };
    match raw.parse::<f64>() {
        Ok(v) if v >= 0.0 && v.is_finite() => v,
        _ => {
            eprintln!("error: {flag} value \"{raw}\" is not a non-negative number");
            process::exit(1);
        }
    }
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().collect();
    let mut cli = CliArgs {
        tariffs_path: None,
        preset: None,
        group: "household_two".to_string(),
        high_kwh: None,
        low_kwh: None,
        total_kwh: None,
        demand_kw: None,
        reactive_kvarh: None,
        export_out: None,
        #[cfg(feature = "api")]
        serve: false,
        #[cfg(feature = "api")]
        port: 3000,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            "--tariffs" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --tariffs requires a path argument");
                    process::exit(1);
                }
                cli.tariffs_path = Some(args[i].clone());
            }
            "--preset" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --preset requires a name argument");
                    process::exit(1);
                }
                cli.preset = Some(args[i].clone());
            }
            "--group" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --group requires a tag argument");
                    process::exit(1);
                }
                cli.group = args[i].clone();
            }
            "--high" => {
                i += 1;
                cli.high_kwh = Some(parse_f64_arg(&args, i, "--high"));
            }
            "--low" => {
                i += 1;
                cli.low_kwh = Some(parse_f64_arg(&args, i, "--low"));
            }
            "--total" => {
                i += 1;
                cli.total_kwh = Some(parse_f64_arg(&args, i, "--total"));
            }
            "--demand" => {
                i += 1;
                cli.demand_kw = Some(parse_f64_arg(&args, i, "--demand"));
            }
            "--reactive" => {
                i += 1;
                cli.reactive_kvarh = Some(parse_f64_arg(&args, i, "--reactive"));
            }
            "--export" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --export requires a path argument");
                    process::exit(1);
                }
                cli.export_out = Some(args[i].clone());
            }
            #[cfg(feature = "api")]
            "--serve" => {
                cli.serve = true;
            }
            #[cfg(feature = "api")]
            "--port" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("error: --port requires a u16 argument");
                    process::exit(1);
                }
                if let Ok(p) = args[i].parse::<u16>() {
                    cli.port = p;
                } else {
                    eprintln!("error: --port value \"{}\" is not a valid u16", args[i]);
                    process::exit(1);
                }
            }
            other => {
                eprintln!("error: unknown argument \"{other}\"");
                print_help();
                process::exit(1);
            }
        }
        i += 1;
    }

    cli
}

/// Builds the engine payload from the group tag and the consumption flags.
fn build_payload(cli: &CliArgs) -> ConsumptionPayload {
    let Some(group) = TariffGroup::from_tag(&cli.group) else {
        eprintln!(
            "error: unknown group \"{}\", expected one of: {}",
            cli.group,
            TariffGroup::TAGS.join(", ")
        );
        process::exit(1);
    };

    let high = cli.high_kwh.unwrap_or(0.0);
    let low = cli.low_kwh.unwrap_or(0.0);
    let total = cli.total_kwh.unwrap_or(0.0);

    let uses_total = matches!(
        group,
        TariffGroup::HouseholdOne | TariffGroup::Group4 | TariffGroup::Group7 | TariffGroup::Group8
    );
    if uses_total && (cli.high_kwh.is_some() || cli.low_kwh.is_some()) {
        eprintln!("error: group \"{group}\" takes --total, not --high/--low");
        process::exit(1);
    }
    if !uses_total && cli.total_kwh.is_some() {
        eprintln!("error: group \"{group}\" takes --high/--low, not --total");
        process::exit(1);
    }
    if group != TariffGroup::Group3 && (cli.demand_kw.is_some() || cli.reactive_kvarh.is_some()) {
        eprintln!("error: --demand/--reactive apply to group_3 only");
        process::exit(1);
    }

    match group {
        TariffGroup::HouseholdTwo => ConsumptionPayload::HouseholdTwo {
            a1_kwh: high,
            a2_kwh: low,
        },
        TariffGroup::HouseholdOne => ConsumptionPayload::HouseholdOne { total_kwh: total },
        TariffGroup::Group1 => ConsumptionPayload::Group1 {
            high_kwh: high,
            low_kwh: low,
        },
        TariffGroup::Group2 => ConsumptionPayload::Group2 {
            high_kwh: high,
            low_kwh: low,
        },
        TariffGroup::Group3 => ConsumptionPayload::Group3 {
            high_kwh: high,
            low_kwh: low,
            demand_kw: cli.demand_kw.unwrap_or(0.0),
            reactive_kvarh: cli.reactive_kvarh.unwrap_or(0.0),
        },
        TariffGroup::Group4 => ConsumptionPayload::Group4 { total_kwh: total },
        TariffGroup::Group7 => ConsumptionPayload::Group7 { total_kwh: total },
        TariffGroup::Group8 => ConsumptionPayload::Group8 { total_kwh: total },
    }
}

fn main() {
    let cli = parse_args();

    // Load schedule: --tariffs takes priority, then --preset, then the
    // built-in 2025 proposal.
    let schedule = if let Some(ref path) = cli.tariffs_path {
        match TariffSchedule::from_toml_file(Path::new(path)) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else if let Some(ref name) = cli.preset {
        match TariffSchedule::from_preset(name) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("{e}");
                process::exit(1);
            }
        }
    } else {
        TariffSchedule::proposal_2025()
    };

    let errors = schedule.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    // Serve mode hands the schedule to the API and never computes locally.
    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(tariff_bill::api::AppState { schedule });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
            eprintln!("error: failed to create tokio runtime: {e}");
            process::exit(1);
        });
        rt.block_on(tariff_bill::api::serve(state, addr));
        return;
    }

    let payload = build_payload(&cli);
    let invoice = calculate(&schedule, &payload);

    println!("{invoice}");

    if let Some(ref path) = cli.export_out {
        if let Err(e) = export_csv(&invoice, Path::new(path)) {
            eprintln!("error: failed to write CSV: {e}");
            process::exit(1);
        }
        eprintln!("Breakdown written to {path}");
    }
}
