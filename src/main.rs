//! quizprint – command-line quiz record → paginated document converter.
//!
//! Usage:
//!   quizprint <records.json> [output.json] [--answer] [--capacity N]
//!             [--metrics metrics.json] [--title "Unit 3"] [--summary]
//!   quizprint --sample [output.json] [--answer] [--summary]
//!
//! The input is either a print job object or a bare array of records. If
//! `output.json` is omitted the document is written to stdout.

use std::{env, fs, path::PathBuf, process};

use quiz_print::error::Result;
use quiz_print::metrics::LayoutMetrics;
use quiz_print::pipeline::{paginate_job, PrintJob};
use quiz_print::samples::sample_batch_json;
use quiz_print::section::{Document, Mode};

#[derive(Default)]
struct Options {
    input_path: Option<PathBuf>,
    output_path: Option<PathBuf>,
    answer: bool,
    capacity: Option<f32>,
    metrics_path: Option<PathBuf>,
    title: Option<String>,
    sample: bool,
    summary: bool,
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let options = parse_args(&args);

    if options.input_path.is_none() && !options.sample {
        eprintln!("Error: no input file specified.");
        print_usage(&args[0]);
        process::exit(1);
    }

    let document = match run(&options) {
        Ok(document) => document,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    let json = document.to_json();
    match &options.output_path {
        Some(output) => {
            if let Some(parent) = output.parent() {
                if !parent.as_os_str().is_empty() {
                    if let Err(e) = fs::create_dir_all(parent) {
                        eprintln!("Error creating output directory: {e}");
                        process::exit(1);
                    }
                }
            }
            if let Err(e) = fs::write(output, &json) {
                eprintln!("Error writing '{}': {e}", output.display());
                process::exit(1);
            }
            let pages = document.pages.len();
            eprintln!(
                "Wrote '{}' ({} chunks, {} page{})",
                output.display(),
                document.chunk_count(),
                pages,
                if pages == 1 { "" } else { "s" }
            );
        }
        None => println!("{json}"),
    }

    if options.summary {
        print_summary(&document);
    }
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options::default();
    let mut positional = 0usize;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--answer" | "-a" => options.answer = true,
            "--sample" => options.sample = true,
            "--summary" | "-s" => options.summary = true,
            "--capacity" | "-c" => match iter.next().map(|v| v.parse::<f32>()) {
                Some(Ok(v)) => options.capacity = Some(v),
                _ => {
                    eprintln!("--capacity needs a number");
                    process::exit(1);
                }
            },
            "--metrics" | "-m" => match iter.next() {
                Some(v) => options.metrics_path = Some(PathBuf::from(v)),
                None => {
                    eprintln!("--metrics needs a file path");
                    process::exit(1);
                }
            },
            "--title" | "-t" => match iter.next() {
                Some(v) => options.title = Some(v.clone()),
                None => options.title = Some("worksheet".to_string()),
            },
            "--help" | "-h" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            other if other.starts_with('-') => {
                eprintln!("Unknown flag: {other}");
                print_usage(&args[0]);
                process::exit(1);
            }
            path => {
                // With --sample the only positional is the output.
                let slot = if options.sample { positional + 1 } else { positional };
                match slot {
                    0 => options.input_path = Some(PathBuf::from(path)),
                    1 => options.output_path = Some(PathBuf::from(path)),
                    _ => {
                        eprintln!("Unexpected argument: {path}");
                        print_usage(&args[0]);
                        process::exit(1);
                    }
                }
                positional += 1;
            }
        }
    }
    options
}

fn run(options: &Options) -> Result<Document> {
    let json = match (&options.input_path, options.sample) {
        (Some(input), false) => fs::read_to_string(input)?,
        _ => sample_batch_json(),
    };
    let mut job = PrintJob::from_json(&json)?;

    if let Some(path) = &options.metrics_path {
        job.metrics = LayoutMetrics::from_json(&fs::read_to_string(path)?)?;
    }
    if let Some(capacity) = options.capacity {
        job.metrics.column_capacity = capacity;
    }
    if options.answer {
        job.mode = Mode::Answer;
    }
    if let Some(title) = &options.title {
        job.title = title.clone();
    } else if let Some(stem) = options
        .input_path
        .as_ref()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
    {
        job.title = stem.to_string();
    }
    job.metrics.validate()?;

    Ok(paginate_job(&job))
}

fn print_summary(document: &Document) {
    eprintln!(
        "{} ({:?}, capacity {:.0})",
        document.title, document.mode, document.column_capacity
    );
    for (i, page) in document.pages.iter().enumerate() {
        let describe = |column: usize| {
            page.columns[column]
                .items
                .iter()
                .map(|item| match item.chunk_meta {
                    Some(meta) if meta.total_chunks > 1 => {
                        format!("{}[{}/{}]", item.key, meta.chunk_index + 1, meta.total_chunks)
                    }
                    _ => item.key.clone(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        };
        eprintln!("  page {:>3}  L: {}", i + 1, describe(0));
        eprintln!("            R: {}", describe(1));
    }
}

fn print_usage(prog: &str) {
    eprintln!("quizprint – two-column worksheet paginator (quiz-print)");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  {prog} <records.json> [output.json] [--answer] [--capacity N] [--metrics m.json] [--title \"Unit 3\"]");
    eprintln!("  {prog} --sample [output.json] [--answer]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  <records.json>   Print job object or bare array of question records");
    eprintln!("  [output.json]    Output path (default: stdout)");
    eprintln!();
    eprintln!("Flags:");
    eprintln!("  --answer, -a     Lay out the answer sheet instead of the problem sheet");
    eprintln!("  --capacity, -c   Column capacity in estimator units (default: 1000)");
    eprintln!("  --metrics, -m    JSON file with layout metric overrides");
    eprintln!("  --title, -t      Document title (default: input filename stem)");
    eprintln!("  --sample         Paginate the built-in sample batch");
    eprintln!("  --summary, -s    Print a per-page column overview to stderr");
    eprintln!("  --help           Print this message");
}
