//! Extract command - recover fields from a single policy document.

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use acente_core::document::load_document_text;
use acente_core::models::config::AcenteConfig;
use acente_core::{DocumentFieldExtractor, ExtractedFields, FieldSetParser};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (OCR text or text-layer PDF), or "-" for stdin
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Include provenance, confidence and normalized text (JSON only)
    #[arg(long)]
    details: bool,

    /// Print extraction warnings to stderr
    #[arg(long)]
    show_warnings: bool,

    /// Never use "Müşteri No" as a policy number substitute
    #[arg(long)]
    no_customer_fallback: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ExtractArgs, config: &AcenteConfig) -> anyhow::Result<()> {
    let start = Instant::now();

    let text = if args.input.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        info!("Processing file: {}", args.input.display());
        load_document_text(&args.input)?.text
    };

    let extractor = extractor_for(config, args.no_customer_fallback);
    let result = extractor.parse(&text);

    if args.show_warnings {
        for warning in &result.warnings {
            eprintln!("{} {}", style("!").yellow(), warning);
        }
    }

    let output = if args.details {
        serde_json::to_string_pretty(&result)?
    } else {
        format_fields(&result.fields, args.format)?
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

pub fn extractor_for(config: &AcenteConfig, no_customer_fallback: bool) -> DocumentFieldExtractor {
    let extractor = DocumentFieldExtractor::from_config(&config.extraction);
    if no_customer_fallback {
        extractor.with_customer_number_fallback(false)
    } else {
        extractor
    }
}

pub fn format_fields(fields: &ExtractedFields, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(fields)?),
        OutputFormat::Csv => format_csv(fields),
        OutputFormat::Text => Ok(format_text(fields)),
    }
}

fn format_csv(fields: &ExtractedFields) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(["policy_number", "amount", "customer_name", "plate_number"])?;
    wtr.write_record([
        fields.policy_number.clone().unwrap_or_default(),
        fields.amount.map(|a| a.to_string()).unwrap_or_default(),
        fields.customer_name.clone().unwrap_or_default(),
        fields.plate_number.clone().unwrap_or_default(),
    ])?;

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(fields: &ExtractedFields) -> String {
    let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    let mut output = String::new();
    output.push_str(&format!("Policy number: {}\n", show(fields.policy_number.clone())));
    output.push_str(&format!(
        "Amount:        {}\n",
        show(fields.amount.map(|a| format!("{} TL", a)))
    ));
    output.push_str(&format!("Customer:      {}\n", show(fields.customer_name.clone())));
    output.push_str(&format!("Plate:         {}\n", show(fields.plate_number.clone())));
    output
}
