//! Command-line interface for lux_colors
//!
//! Lists the most probable color names for a color, prints a category's
//! membership parameters, or converts a legacy XML lexicon to JSON.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use lux_colors::constants::DEFAULT_TOP_N;
use lux_colors::{ColorConverter, HsvDatum, Lexicon, LexiconConfig, LexiconError, Result};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "lux_classify", version, about = "Probabilistic color naming")]
struct Cli {
    /// Lexicon file (.json, or legacy .xml)
    #[arg(long, global = true, default_value = "data/lux_sample.json")]
    lexicon: PathBuf,

    /// Output machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank color names for a color
    Classify(ClassifyArgs),
    /// Show a category's prior and per-axis parameters
    Params {
        /// Category label
        label: String,
    },
    /// Convert a legacy XML lexicon to JSON
    Convert {
        input: PathBuf,
        output: PathBuf,
    },
}

#[derive(Args, Debug)]
struct ClassifyArgs {
    /// Color as hex, e.g. "#3366CC"
    #[arg(long, conflicts_with = "hsv", required_unless_present = "hsv")]
    hex: Option<String>,

    /// Color as hue (degrees), saturation (%), value (%)
    #[arg(long, num_args = 3, value_names = ["H", "S", "V"], allow_negative_numbers = true)]
    hsv: Option<Vec<f64>>,

    /// Number of labels to list
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,
}

#[derive(Serialize)]
struct CategoryReport<'a> {
    label: &'a str,
    availability: f64,
    hue_adjust: bool,
    params: [[f64; 6]; 3],
    stdevs: [[f64; 6]; 3],
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("Error: {}", error);
            eprintln!("{}", error.user_message());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        Command::Classify(args) => classify(cli, args),
        Command::Params { label } => params(cli, label),
        Command::Convert { input, output } => {
            let config = LexiconConfig::from_file(input)?;
            config.to_json_file(output)?;
            eprintln!(
                "Converted {} categories from {} to {}",
                config.categories.len(),
                input.display(),
                output.display()
            );
            Ok(())
        }
    }
}

fn classify(cli: &Cli, args: &ClassifyArgs) -> Result<()> {
    let converter = ColorConverter::new();
    let datum = match (&args.hex, &args.hsv) {
        (Some(hex), _) => converter.hex_to_datum(hex)?,
        (None, Some(hsv)) => HsvDatum::new(hsv[0], hsv[1], hsv[2]),
        (None, None) => {
            return Err(LexiconError::InvalidParameter {
                parameter: "color".to_string(),
                value: "none given".to_string(),
            })
        }
    };

    let lexicon = Lexicon::load(&cli.lexicon)?;
    let ranked = lexicon.top_n(&datum, args.top)?;

    if cli.json {
        print_json(&ranked)?;
    } else {
        println!("{} {}", converter.srgb_to_hex(converter.datum_to_srgb(&datum)), datum);
        for prediction in &ranked {
            println!("{} ({:.3})", prediction.label, prediction.probability);
        }
    }
    Ok(())
}

fn params(cli: &Cli, label: &str) -> Result<()> {
    let lexicon = Lexicon::load(&cli.lexicon)?;
    let report = CategoryReport {
        label,
        availability: lexicon.get_availability(label)?,
        hue_adjust: lexicon.get_adj(label)?,
        params: lexicon.get_params(label)?,
        stdevs: lexicon.get_stdevs(label)?,
    };

    if cli.json {
        return print_json(&report);
    }

    println!("{}: availability {:.3}, circular hue {}", report.label, report.availability, report.hue_adjust);
    for (axis, values) in lux_colors::Axis::ALL.iter().zip(report.params.iter()) {
        let [mu_lower, shape_lower, scale_lower, mu_upper, shape_upper, scale_upper] = values;
        println!(
            "  {:<10} typical [{:.2}, {:.2}]  lower Gamma(k={:.2}, θ={:.2})  upper Gamma(k={:.2}, θ={:.2})",
            axis.name(), mu_lower, mu_upper, shape_lower, scale_lower, shape_upper, scale_upper
        );
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| LexiconError::config_parse("serialization failed", e))?;
    println!("{}", json);
    Ok(())
}
