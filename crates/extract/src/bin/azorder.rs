// ABOUTME: CLI binary for extracting order fields from saved order pages.
// ABOUTME: Applies a field table to a page file and prints field values as JSON.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use azorder_extract::{
    builtin_order_fields, extract_all, extract_field, normalize_amount, normalize_date,
    normalize_date_any, CompiledField, CompiledTable, FieldKind, FieldTable, Locale, XmlDom,
    XpathDom,
};

#[derive(Parser, Debug)]
#[command(name = "azorder")]
#[command(about = "Extract order fields from saved Amazon order pages")]
struct Args {
    /// Saved order page, as well-formed XML or XHTML
    page: PathBuf,

    /// Field table JSON file (default: the builtin order table)
    #[arg(long = "table")]
    table: Option<PathBuf>,

    /// Extract only the named field; repeatable (default: every field)
    #[arg(short = 'f', long = "field")]
    field: Vec<String>,

    /// Locale for date fields that carry no hint of their own (default: try all)
    #[arg(long = "locale")]
    locale: Option<Locale>,

    /// Compact single-line JSON output
    #[arg(long = "compact")]
    compact: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    verbose: u8,
}

fn load_table(path: Option<&Path>) -> anyhow::Result<CompiledTable> {
    match path {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading field table {}", path.display()))?;
            Ok(FieldTable::from_json(&json)?.validate()?)
        }
        None => Ok(builtin_order_fields()),
    }
}

/// Renders one field as JSON: multi fields become arrays of raw values,
/// single fields an object with the raw text plus, for date and amount
/// fields that actually matched, the normalized value or the reason
/// normalization failed.
fn field_json<D: XpathDom>(
    dom: &D,
    root: D::Node,
    field: &CompiledField,
    locale: Option<Locale>,
) -> serde_json::Value {
    if field.multi() {
        return serde_json::Value::from(extract_all(dom, root, field));
    }

    let raw = extract_field(dom, root, field);
    if raw == field.default_value() {
        // Nothing was found; defaults are placeholders, not page text, so
        // they skip normalization.
        return serde_json::json!({ "raw": raw });
    }

    match field.kind() {
        FieldKind::Text => serde_json::json!({ "raw": raw }),
        FieldKind::Date => {
            let normalized = match field.locale().or(locale) {
                Some(locale) => normalize_date(&raw, locale),
                None => normalize_date_any(&raw),
            };
            match normalized {
                Ok(value) => serde_json::json!({ "raw": raw, "value": value }),
                Err(err) => serde_json::json!({ "raw": raw, "error": err.to_string() }),
            }
        }
        FieldKind::Amount => match normalize_amount(&raw) {
            Ok(value) => serde_json::json!({ "raw": raw, "value": value }),
            Err(err) => serde_json::json!({ "raw": raw, "error": err.to_string() }),
        },
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);

    let table = match load_table(args.table.as_deref()) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("error loading field table: {:#}", e);
            return ExitCode::from(1);
        }
    };

    let selected: Vec<&CompiledField> = if args.field.is_empty() {
        table.iter().collect()
    } else {
        let mut chosen = Vec::with_capacity(args.field.len());
        for name in &args.field {
            match table.get(name) {
                Some(field) => chosen.push(field),
                None => {
                    eprintln!("error: unknown field {:?}", name);
                    return ExitCode::from(1);
                }
            }
        }
        chosen
    };

    let page = match fs::read_to_string(&args.page) {
        Ok(page) => page,
        Err(e) => {
            eprintln!("error reading {:?}: {}", args.page, e);
            return ExitCode::from(1);
        }
    };
    let package = match sxd_document::parser::parse(&page) {
        Ok(package) => package,
        Err(e) => {
            eprintln!("error parsing {:?}: {:?}", args.page, e);
            return ExitCode::from(1);
        }
    };

    let dom = XmlDom::new(package.as_document());
    let root = dom.root();

    let mut output = serde_json::Map::new();
    for field in selected {
        output.insert(
            field.name().to_string(),
            field_json(&dom, root, field, args.locale),
        );
    }

    let value = serde_json::Value::Object(output);
    let rendered = if args.compact {
        serde_json::to_string(&value)
    } else {
        serde_json::to_string_pretty(&value)
    };
    match rendered {
        Ok(rendered) => {
            println!("{}", rendered);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error rendering output: {}", e);
            ExitCode::from(1)
        }
    }
}
