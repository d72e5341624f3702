//! pdfstruct CLI - PDF structure extraction tool

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pdfstruct::{process_dir, process_file, IngestConfig, LayoutBackend, LopdfBackend};

#[derive(Parser)]
#[command(name = "pdfstruct")]
#[command(version)]
#[command(about = "Extract PDF logical structure (sections, tables, figures, references) to JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a directory and write a manifest
    Batch {
        /// Folder containing PDF files
        #[arg(value_name = "INPUT_DIR")]
        input_dir: PathBuf,

        /// Folder to write JSON, tables, and images
        #[arg(value_name = "OUTPUT_DIR")]
        output_dir: PathBuf,

        /// Process files one at a time instead of in parallel
        #[arg(long)]
        sequential: bool,

        /// Do not embed raw table cells in the output JSON
        #[arg(long)]
        no_cell_data: bool,

        /// Heading font-size percentile (0-100)
        #[arg(long, default_value_t = 90.0)]
        heading_percentile: f64,

        /// Fraction of pages a short line must repeat on to be dropped
        #[arg(long, default_value_t = 0.3)]
        repeat_ratio: f64,
    },

    /// Process a single PDF
    File {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "processed")]
        output: PathBuf,

        /// Do not embed raw table cells in the output JSON
        #[arg(long)]
        no_cell_data: bool,
    },

    /// Show document metadata and detected structure without writing output
    Info {
        /// Input PDF file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Batch {
            input_dir,
            output_dir,
            sequential,
            no_cell_data,
            heading_percentile,
            repeat_ratio,
        } => cmd_batch(
            &input_dir,
            &output_dir,
            sequential,
            no_cell_data,
            heading_percentile,
            repeat_ratio,
        ),
        Commands::File {
            input,
            output,
            no_cell_data,
        } => cmd_file(&input, &output, no_cell_data),
        Commands::Info { input } => cmd_info(&input),
        Commands::Version => {
            cmd_version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_batch(
    input_dir: &Path,
    output_dir: &Path,
    sequential: bool,
    no_cell_data: bool,
    heading_percentile: f64,
    repeat_ratio: f64,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = IngestConfig::new()
        .with_heading_percentile(heading_percentile)
        .with_repeat_ratio(repeat_ratio)
        .with_embed_table_cells(!no_cell_data);
    if sequential {
        config = config.sequential();
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(120));
    pb.set_message(format!("Processing PDFs in {}...", input_dir.display()));

    let entries = process_dir(input_dir, output_dir, &config)?;

    pb.finish_and_clear();

    println!(
        "{} {} documents processed",
        "Done!".green().bold(),
        entries.len()
    );
    println!("\n{}", "Output files:".green().bold());
    println!("  {} <stem>.json per document", "├─".dimmed());
    println!("  {} tables/", "├─".dimmed());
    println!("  {} images/", "├─".dimmed());
    println!("  {} {}", "└─".dimmed(), pdfstruct::MANIFEST_FILENAME);

    Ok(())
}

fn cmd_file(
    input: &Path,
    output: &Path,
    no_cell_data: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = IngestConfig::new().with_embed_table_cells(!no_cell_data);

    let doc = process_file(input, output, &config)?;

    println!("{} {}", "Processed".green().bold(), doc.filename);
    println!("{}: {}", "Title".bold(), doc.title);
    println!("{}: {}", "Pages".bold(), doc.metadata.num_pages);
    println!("{}: {}", "Sections".bold(), doc.sections.len());
    println!("{}: {}", "Tables".bold(), doc.tables.len());
    println!("{}: {}", "Figures".bold(), doc.figures.len());
    println!(
        "{}: {}",
        "Needs OCR".bold(),
        if doc.needs_ocr { "yes" } else { "no" }
    );

    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let backend = LopdfBackend::open(input)?;
    let metadata = backend.metadata();
    let config = IngestConfig::default();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Pages".bold(), metadata.num_pages);
    if let Some(ref title) = metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref subject) = metadata.subject {
        println!("{}: {}", "Subject".bold(), subject);
    }
    if let Some(ref producer) = metadata.producer {
        println!("{}: {}", "Producer".bold(), producer);
    }
    if let Some(ref created) = metadata.creation_date {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = metadata.mod_date {
        println!("{}: {}", "Modified".bold(), modified);
    }

    // Run the structure heuristics without writing anything
    let mut pages = pdfstruct::structure::normalize_document(&backend);
    let repeated = pdfstruct::structure::detect_repeated_lines(&pages, &config);
    pdfstruct::structure::remove_repeated_lines(&mut pages, &repeated);
    let sections = pdfstruct::structure::segment_sections(&pages, &config);
    let references = pdfstruct::structure::locate_references(&pages);
    let needs_ocr = pdfstruct::structure::needs_ocr(&backend, &config);

    println!();
    println!("{}", "Detected Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let block_count: usize = pages.iter().map(|p| p.block_count()).sum();
    println!("{}: {}", "Blocks".bold(), block_count);
    println!("{}: {}", "Repeated lines removed".bold(), repeated.len());
    println!("{}: {}", "Sections".bold(), sections.len());
    for section in sections.iter().take(10) {
        println!(
            "  {} {} (p{}-{})",
            "├─".dimmed(),
            section.heading,
            section.start_page,
            section.end_page
        );
    }
    if sections.len() > 10 {
        println!("  {} ... {} more", "└─".dimmed(), sections.len() - 10);
    }
    println!(
        "{}: {} chars",
        "References".bold(),
        references.chars().count()
    );
    println!(
        "{}: {}",
        "Needs OCR".bold(),
        if needs_ocr { "yes" } else { "no" }
    );

    Ok(())
}

fn cmd_version() {
    println!(
        "{} {}",
        "pdfstruct".cyan().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("PDF logical-structure extraction tool");
}
