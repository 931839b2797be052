//! Boxmatch: bounding-box overlap metrics for detection annotations.
//!
//! Boxmatch loads per-image bounding-box annotation files (ground truth
//! and model predictions), computes Intersection-over-Union overlap
//! between the two, and reports how well the predictions line up. It also
//! converts between the supported annotation schemas and sanity-checks
//! annotation files.
//!
//! # Modules
//!
//! - [`geom`]: Box model, parameterized construction, IoU computation
//! - [`ann`]: Annotation model and JSON/VOC-XML format support
//! - [`eval`]: Prediction-vs-truth evaluation reports
//! - [`validation`]: Annotation-set validation and error reporting
//! - [`error`]: Error types for boxmatch operations

pub mod ann;
pub mod error;
pub mod eval;
pub mod geom;
pub mod validation;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};

use ann::io_json::{self, BoxSchema};
use ann::AnnotationSet;

pub use error::BoxmatchError;

/// The boxmatch CLI application.
#[derive(Parser)]
#[command(name = "boxmatch")]
#[command(version, author, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Compare a prediction annotation file against ground truth.
    Eval(EvalArgs),
    /// Convert an annotation file to the center+size JSON schema.
    Convert(ConvertArgs),
    /// Summarize an annotation file.
    Inspect(InspectArgs),
    /// Validate an annotation file for errors and warnings.
    Validate(ValidateArgs),
}

/// Arguments for the eval subcommand.
#[derive(clap::Args)]
struct EvalArgs {
    /// Ground-truth annotation file.
    #[arg(long)]
    truth: PathBuf,

    /// Prediction annotation file.
    #[arg(long)]
    predictions: PathBuf,

    /// Box schema of the truth file ('corner-size' or 'center-size').
    #[arg(long, default_value = "center-size")]
    truth_schema: String,

    /// Box schema of the prediction file.
    #[arg(long, default_value = "center-size")]
    pred_schema: String,

    /// IoU threshold for counting a prediction as matched.
    #[arg(long, default_value_t = 0.5)]
    threshold: f64,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Arguments for the convert subcommand.
#[derive(clap::Args)]
struct ConvertArgs {
    /// Input annotation file.
    input: PathBuf,

    /// Output annotation file (center+size schema).
    #[arg(short, long)]
    output: PathBuf,

    /// Box schema of the input file ('corner-size' or 'center-size').
    #[arg(long, default_value = "corner-size")]
    schema: String,
}

/// Arguments for the inspect subcommand.
#[derive(clap::Args)]
struct InspectArgs {
    /// Input annotation file.
    input: PathBuf,

    /// Box schema of the input file ('corner-size' or 'center-size').
    #[arg(long, default_value = "center-size")]
    schema: String,
}

/// Arguments for the validate subcommand.
#[derive(clap::Args)]
struct ValidateArgs {
    /// Input annotation file.
    input: PathBuf,

    /// Box schema of the input file ('corner-size' or 'center-size').
    #[arg(long, default_value = "center-size")]
    schema: String,

    /// Treat warnings as errors (exit non-zero if any warnings).
    #[arg(long)]
    strict: bool,

    /// Output format for the report ('text' or 'json').
    #[arg(long, default_value = "text")]
    output: String,
}

/// Run the boxmatch CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), BoxmatchError> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Eval(args)) => run_eval(args),
        Some(Commands::Convert(args)) => run_convert(args),
        Some(Commands::Inspect(args)) => run_inspect(args),
        Some(Commands::Validate(args)) => run_validate(args),
        None => {
            println!("boxmatch {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Bounding-box overlap metrics for detection annotations.");
            println!();
            println!("Run 'boxmatch --help' for usage information.");
            Ok(())
        }
    }
}

fn load_set(path: &Path, schema: &str) -> Result<AnnotationSet, BoxmatchError> {
    let schema: BoxSchema = schema.parse()?;
    io_json::read_annotation_json(path, schema.mapper())
}

/// Execute the eval subcommand.
fn run_eval(args: EvalArgs) -> Result<(), BoxmatchError> {
    let truth = load_set(&args.truth, &args.truth_schema)?;
    let predictions = load_set(&args.predictions, &args.pred_schema)?;

    let opts = eval::EvalOptions {
        iou_threshold: args.threshold,
    };
    let report = eval::evaluate(&truth, &predictions, &opts)?;

    match args.output.as_str() {
        "json" => {
            let json =
                serde_json::to_string_pretty(&report).expect("serialize evaluation report");
            println!("{json}");
        }
        _ => {
            print!("{report}");
        }
    }

    Ok(())
}

/// Execute the convert subcommand.
fn run_convert(args: ConvertArgs) -> Result<(), BoxmatchError> {
    let set = load_set(&args.input, &args.schema)?;
    io_json::write_annotation_json(&args.output, &set)?;

    println!(
        "Wrote {} image(s) with {} box(es) to {}",
        set.num_images(),
        set.num_boxes(),
        args.output.display()
    );
    Ok(())
}

/// Execute the inspect subcommand.
fn run_inspect(args: InspectArgs) -> Result<(), BoxmatchError> {
    let set = load_set(&args.input, &args.schema)?;

    let mut label_counts: BTreeMap<i64, usize> = BTreeMap::new();
    let mut detections = 0usize;
    for image in &set {
        for bbox in &image.boxes {
            *label_counts.entry(bbox.label()).or_insert(0) += 1;
            if bbox.detect() != 0 {
                detections += 1;
            }
        }
    }

    println!("Images:      {}", set.num_images());
    println!("Boxes:       {}", set.num_boxes());
    println!("Detections:  {}", detections);

    if !label_counts.is_empty() {
        println!();
        println!("Boxes per label:");

        let mut sorted: Vec<(i64, usize)> = label_counts.into_iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        for (label, count) in sorted {
            if label < 0 {
                println!("  <unlabeled>: {count}");
            } else {
                println!("  {label}: {count}");
            }
        }
    }

    Ok(())
}

/// Execute the validate subcommand.
fn run_validate(args: ValidateArgs) -> Result<(), BoxmatchError> {
    let set = load_set(&args.input, &args.schema)?;

    let opts = validation::ValidateOptions {
        strict: args.strict,
    };
    let report = validation::validate_set(&set, &opts);

    match args.output.as_str() {
        "json" => {
            // Simple JSON output for programmatic use
            println!("{{");
            println!("  \"error_count\": {},", report.error_count());
            println!("  \"warning_count\": {},", report.warning_count());
            println!("  \"issues\": [");
            for (i, issue) in report.issues.iter().enumerate() {
                let comma = if i < report.issues.len() - 1 { "," } else { "" };
                println!("    {{");
                println!("      \"severity\": \"{:?}\",", issue.severity);
                println!("      \"code\": \"{:?}\",", issue.code);
                println!(
                    "      \"message\": \"{}\",",
                    issue.message.replace('"', "\\\"")
                );
                println!("      \"context\": \"{}\"", issue.context);
                println!("    }}{}", comma);
            }
            println!("  ]");
            println!("}}");
        }
        _ => {
            // Default text output
            print!("{}", report);
        }
    }

    let has_errors = report.error_count() > 0;
    let has_warnings = report.warning_count() > 0;

    if has_errors || (args.strict && has_warnings) {
        Err(BoxmatchError::ValidationFailed {
            error_count: report.error_count(),
            warning_count: report.warning_count(),
            report,
        })
    } else {
        Ok(())
    }
}
