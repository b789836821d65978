//! AutoDoc CLI
//!
//! Command-line front-end for the report pipeline. `generate` runs the
//! full pipeline and prints the structured outcome as JSON; `logs` and
//! `stats` print the dashboard views of the activity log.

use std::process;

use autodoc::{ActivityLog, AutoDocError, PageSize, PipelineBuilder, EXPECTED_HEADERS};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        usage(&args[0]);
        process::exit(1);
    }

    match args[1].as_str() {
        "generate" => run_generate(&args),
        "logs" => run_logs(&args),
        "stats" => run_stats(&args),
        _ => {
            eprintln!("Error: Unknown command: {}", args[1]);
            usage(&args[0]);
            process::exit(1);
        }
    }
}

fn usage(program: &str) {
    eprintln!("Usage: {} <command> [arguments]", program);
    eprintln!("\nCommands:");
    eprintln!("  generate <input.xlsx> <project> [engineer]  Generate a report and log the run");
    eprintln!("  logs                                        Print every activity log entry as JSON");
    eprintln!("  stats                                       Print activity log statistics as JSON");
    eprintln!("\nOptions:");
    eprintln!("  --output-dir <dir>   Report output directory (default: generated_reports)");
    eprintln!("  --log-file <path>    Activity log path (default: report_log.csv)");
    eprintln!("  --page-size <size>   letter or a4 (default: letter)");
    eprintln!("\nExpected input columns (any header set is accepted):");
    eprintln!("  {}", EXPECTED_HEADERS.join(", "));
}

/// Shared option state parsed from the trailing arguments.
struct Options {
    output_dir: Option<String>,
    log_file: Option<String>,
    page_size: Option<PageSize>,
}

fn parse_options(args: &[String], mut i: usize) -> Options {
    let mut options = Options {
        output_dir: None,
        log_file: None,
        page_size: None,
    };

    while i < args.len() {
        match args[i].as_str() {
            "--output-dir" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --output-dir requires a value");
                    process::exit(1);
                }
                options.output_dir = Some(args[i + 1].clone());
                i += 2;
            }
            "--log-file" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --log-file requires a value");
                    process::exit(1);
                }
                options.log_file = Some(args[i + 1].clone());
                i += 2;
            }
            "--page-size" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --page-size requires a value");
                    process::exit(1);
                }
                options.page_size = match args[i + 1].to_lowercase().as_str() {
                    "letter" => Some(PageSize::Letter),
                    "a4" => Some(PageSize::A4),
                    other => {
                        eprintln!("Error: Invalid page size: {}", other);
                        process::exit(1);
                    }
                };
                i += 2;
            }
            other => {
                eprintln!("Error: Unknown option: {}", other);
                process::exit(1);
            }
        }
    }

    options
}

fn run_generate(args: &[String]) {
    if args.len() < 4 {
        eprintln!(
            "Usage: {} generate <input.xlsx> <project> [engineer] [options]",
            args[0]
        );
        process::exit(1);
    }

    let source = &args[2];
    let project = &args[3];
    let (engineer, options_from) = match args.get(4) {
        Some(arg) if !arg.starts_with("--") => (arg.as_str(), 5),
        _ => ("AutoDoc", 4),
    };
    let options = parse_options(args, options_from);

    let mut builder = PipelineBuilder::new();
    if let Some(dir) = options.output_dir {
        builder = builder.with_output_dir(dir);
    }
    if let Some(path) = options.log_file {
        builder = builder.with_log_path(path);
    }
    if let Some(page_size) = options.page_size {
        builder = builder.with_page_size(page_size);
    }

    let pipeline = match builder.build() {
        Ok(pipeline) => pipeline,
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    };

    let outcome = pipeline.run(source, project, engineer);
    print_json(&outcome);

    if !outcome.is_success() {
        process::exit(1);
    }
}

fn run_logs(args: &[String]) {
    let options = parse_options(args, 2);
    let log = activity_log(options);

    match log.entries() {
        Ok(entries) => print_json(&entries),
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn run_stats(args: &[String]) {
    let options = parse_options(args, 2);
    let log = activity_log(options);

    match log.stats() {
        Ok(stats) => print_json(&stats),
        Err(e) => {
            handle_error(e);
            process::exit(1);
        }
    }
}

fn activity_log(options: Options) -> ActivityLog {
    ActivityLog::at(options.log_file.unwrap_or_else(|| "report_log.csv".to_string()))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error: Failed to serialize output: {}", e);
            process::exit(1);
        }
    }
}

fn handle_error(error: AutoDocError) {
    match error {
        AutoDocError::Io(io_err) => {
            eprintln!("I/O Error: {}", io_err);
            eprintln!("Please check that the file exists and you have permission to access it.");
        }
        AutoDocError::Parse(parse_err) => {
            eprintln!("Parse Error: {}", parse_err);
            eprintln!("The file may not be a valid Excel file or may be corrupted.");
        }
        AutoDocError::NoSheets => {
            eprintln!("Parse Error: the workbook contains no sheets.");
        }
        AutoDocError::Render(msg) => {
            eprintln!("Render Error: {}", msg);
            eprintln!("The report document could not be written.");
        }
        AutoDocError::Log(msg) => {
            eprintln!("Log Error: {}", msg);
            eprintln!("The activity log could not be appended.");
        }
        AutoDocError::Config(msg) => {
            eprintln!("Configuration Error: {}", msg);
            eprintln!("Please check the output directory and log path options.");
        }
    }
}
