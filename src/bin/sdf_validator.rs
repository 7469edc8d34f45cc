//! Validates a document against an element schema and prints the resulting
//! instance tree.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use sdformat::schema::DirResolver;
use sdformat::Element;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sdf-validator", version, about)]
struct Cli {
    /// The schema description file
    schema: PathBuf,

    /// The document to validate
    document: PathBuf,

    /// Base directory for resolving schema includes
    /// (defaults to the schema file's directory)
    #[arg(long)]
    schema_dir: Option<PathBuf>,

    /// Allow a XML Document Type Definition (DTD) to occur
    #[arg(long)]
    allow_dtd: bool,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(instance) => {
            print_instance(&instance, 0);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<Element, Box<dyn std::error::Error>> {
    let base = cli
        .schema_dir
        .clone()
        .or_else(|| cli.schema.parent().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("."));
    let resolver = DirResolver::new(base);

    let options = roxmltree::ParsingOptions {
        allow_dtd: cli.allow_dtd,
        ..Default::default()
    };

    let text = std::fs::read_to_string(&cli.schema)?;
    let doc = roxmltree::Document::parse_with_options(&text, options)?;
    let schema = sdformat::load_schema_doc(&doc, &resolver)?;

    let text = std::fs::read_to_string(&cli.document)?;
    let doc = roxmltree::Document::parse_with_options(&text, options)?;
    let instance = sdformat::read_doc(&doc, &schema)?;
    Ok(instance)
}

fn print_instance(element: &Element, indent: usize) {
    print!("{:indent$}{}", "", element.name());
    for attribute in element.attributes() {
        if attribute.was_set() {
            print!(" {}={:?}", attribute.key(), attribute.value().to_string());
        }
    }
    if let Some(value) = element.value() {
        if value.was_set() {
            print!(" = {}", value.get());
        }
    }
    println!();
    for child in element.children() {
        print_instance(child, indent + 2);
    }
}
