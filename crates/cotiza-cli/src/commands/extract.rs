//! Extract command - extract quotation data from a single file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use cotiza_core::models::quotation::{display_field, QuotationRecord};
use cotiza_core::quotation::{ExtractionResult, QuotationExtractor, RuleQuotationParser};

use super::config::load_config;

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input quotation (PDF, or text with --from-text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Treat the input as already-extracted text
    #[arg(long)]
    from_text: bool,

    /// Print the raw extracted text instead of the parsed record
    #[arg(long)]
    dump_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per line item
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

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {msg}")?
            .progress_chars("##-"),
    );

    pb.set_message("Extracting quotation...");
    pb.set_position(20);

    let parser = RuleQuotationParser::from_config(&config);
    let result = read_quotation(&args.input, args.from_text, &parser)?;

    pb.finish_with_message("Done");

    let output = if args.dump_text {
        result.raw_text.clone()
    } else {
        print_warnings(&result);
        format_record(&result.record, args.format)?
    };

    write_output(args.output.as_deref(), &output)?;

    debug!(
        "Total processing time: {:?} (pattern: {:?})",
        start.elapsed(),
        result.selected_pattern
    );

    Ok(())
}

/// Extract a quotation from a PDF, or from a text file when `from_text` is set
/// or the file has a `.txt` extension.
pub fn read_quotation(
    path: &Path,
    from_text: bool,
    parser: &RuleQuotationParser,
) -> anyhow::Result<ExtractionResult> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    if from_text || extension == "txt" {
        let text = fs::read_to_string(path)?;
        return Ok(parser.extract_from_text(&text)?);
    }

    match extension.as_str() {
        "pdf" => {
            let data = fs::read(path)?;
            Ok(parser.extract_from_pdf(&data)?)
        }
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    }
}

/// Write to a file, or stdout when no path is given.
pub fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    if let Some(output_path) = path {
        fs::write(output_path, content)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", content);
    }
    Ok(())
}

pub fn print_warnings(result: &ExtractionResult) {
    if result.warnings.is_empty() {
        return;
    }
    eprintln!("{}", style("Extraction warnings:").yellow());
    for warning in &result.warnings {
        eprintln!("  - {}", warning);
    }
}

pub fn format_record(record: &QuotationRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(record),
        OutputFormat::Text => Ok(format_text(record)),
    }
}

fn format_csv(record: &QuotationRecord) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "quotation_number",
        "date",
        "client_name",
        "client_tax_id",
        "salesperson",
        "position",
        "material_code",
        "description",
        "quantity",
        "unit",
        "unit_price_original",
        "unit_price_discounted",
        "line_value_discounted",
        "line_total",
    ])?;

    let header = [
        display_field(&record.quotation_number),
        display_field(&record.date),
        display_field(&record.client_name),
        display_field(&record.client_tax_id),
        display_field(&record.salesperson),
    ];

    if record.line_items.is_empty() {
        let mut row: Vec<&str> = header.to_vec();
        row.extend(["", "", "", "", "", "", "", "", ""]);
        wtr.write_record(&row)?;
    }

    for item in &record.line_items {
        let mut row: Vec<&str> = header.to_vec();
        row.extend([
            item.position.as_str(),
            item.material_code.as_str(),
            item.description.as_str(),
            item.quantity.as_str(),
            item.unit.as_str(),
            item.unit_price_original.as_str(),
            item.unit_price_discounted.as_str(),
            item.line_value_discounted.as_str(),
            item.line_total.as_str(),
        ]);
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(record: &QuotationRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Quotation: {}\n", display_field(&record.quotation_number)));
    output.push_str(&format!("Date: {}\n", display_field(&record.date)));
    output.push_str(&format!("Salesperson: {}\n", display_field(&record.salesperson)));
    output.push('\n');

    output.push_str("Client:\n");
    output.push_str(&format!("  {}\n", display_field(&record.client_name)));
    output.push_str(&format!("  RUT: {}\n", display_field(&record.client_tax_id)));
    output.push_str(&format!("  {}\n", display_field(&record.client_address)));
    output.push_str(&format!("  Comuna: {}\n", display_field(&record.client_commune)));
    output.push('\n');

    output.push_str(&format!("Line items ({}):\n", record.line_items.len()));
    for item in &record.line_items {
        output.push_str(&format!(
            "  {:>4} {:<10} {} | {} {} | {} | {}\n",
            item.position,
            item.material_code,
            item.description,
            item.quantity,
            item.unit,
            item.unit_price_discounted,
            item.line_value_discounted
        ));
    }
    output.push('\n');

    let [affected, discount, subtotal, tax, total] = record.totals_display();
    output.push_str("Totals:\n");
    output.push_str(&format!("  Total afecto: {}\n", affected));
    output.push_str(&format!("  Descuento:    {}\n", discount));
    output.push_str(&format!("  Subtotal:     {}\n", subtotal));
    output.push_str(&format!("  IVA:          {}\n", tax));
    output.push_str(&format!("  Total:        {}\n", total));

    output
}
