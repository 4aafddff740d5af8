//! Order command - build a purchase order from a quotation.

use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::Args;
use tracing::info;

use cotiza_core::order::PurchaseOrder;
use cotiza_core::quotation::RuleQuotationParser;

use super::config::load_config;
use super::extract::{print_warnings, read_quotation, write_output};

/// Arguments for the order command.
#[derive(Args)]
pub struct OrderArgs {
    /// Input quotation (PDF, or text with --from-text)
    #[arg(required = true)]
    input: PathBuf,

    /// Purchase-order number
    #[arg(short, long)]
    number: String,

    /// Key of the purchasing company (see `cotiza companies`)
    #[arg(long)]
    company: String,

    /// Issue date, YYYY-MM-DD (default: today)
    #[arg(long)]
    date: Option<NaiveDate>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OrderFormat,

    /// Treat the input as already-extracted text
    #[arg(long)]
    from_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OrderFormat {
    /// JSON output
    Json,
    /// Plain text layout
    Text,
}

pub async fn run(args: OrderArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let buyer = config.order.company(&args.company)?;

    let parser = RuleQuotationParser::from_config(&config);
    let result = read_quotation(&args.input, args.from_text, &parser)?;
    print_warnings(&result);

    let issue_date = args.date.unwrap_or_else(|| Local::now().date_naive());
    let order = PurchaseOrder::build(&result.record, &args.number, buyer, &config.order, issue_date)?;

    info!(
        "Built {} from quotation {} ({})",
        order.title,
        order.quotation_number,
        order.suggested_file_name()
    );

    let output = match args.format {
        OrderFormat::Json => serde_json::to_string_pretty(&order)?,
        OrderFormat::Text => format_order_text(&order),
    };

    write_output(args.output.as_deref(), &output)
}

fn format_order_text(order: &PurchaseOrder) -> String {
    let mut output = String::new();
    let supplier = &order.supplier;

    output.push_str(&format!("{}\n\n", order.title));
    output.push_str(&format!("{}\n", order.buyer.name.to_uppercase()));
    output.push_str(&format!("RUT: {}\n", order.buyer.tax_id));
    output.push_str(&format!("{}\n", order.buyer_address_line));
    output.push_str(&format!("{}\n", order.issue_date));
    output.push('\n');

    output.push_str("DATOS DEL PROVEEDOR\n");
    output.push_str(&format!(
        "  Razón Social: {:<28} Comuna: {}\n",
        supplier.name, supplier.commune
    ));
    output.push_str(&format!(
        "  Contacto:     {:<28} RUT: {}\n",
        supplier.contact.as_deref().unwrap_or(""),
        supplier.tax_id
    ));
    output.push_str(&format!(
        "  Dirección:    {:<28} Teléfono: {}\n",
        supplier.address,
        supplier.phone.as_deref().unwrap_or("")
    ));
    output.push('\n');

    output.push_str("No. Parte | Descripción | Precio Unitario | Cant | Precio Total\n");
    for row in &order.rows {
        output.push_str(&format!(
            "{} | {} | {} | {} | {}\n",
            row.material_code, row.description, row.unit_price, row.quantity, row.line_total
        ));
    }
    output.push('\n');

    output.push_str(&format!("NETO:  {}\n", order.totals.net));
    output.push_str(&format!("IVA:   {}\n", order.totals.tax));
    output.push_str(&format!("TOTAL: {}\n", order.totals.total));
    output.push('\n');

    output.push_str(&format!("Cotización: {}\n", order.quotation_number));

    output
}
