//! wikigrid CLI
//!
//! Command-line tool for listing, showing, and exporting tables
//! extracted from saved HTML pages.

use clap::{Args, Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::PathBuf;
use wikigrid_core::{Error, ExtractOptions, ExtractReport, Grid};

#[derive(Parser)]
#[command(name = "wikigrid-cli")]
#[command(about = "Extract rectangular tables from HTML pages", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Flags shared by every subcommand: where the HTML comes from and
/// which tables to select
#[derive(Args)]
struct PageArgs {
    /// HTML file to read; reads stdin when omitted
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Only consider tables with this class token
    #[arg(short, long, default_value = wikigrid_core::DEFAULT_TABLE_CLASS)]
    class: String,

    /// Consider every table regardless of class
    #[arg(long, conflicts_with = "class")]
    all_classes: bool,

    /// Restrict to these table positions (comma-separated)
    #[arg(short, long, value_delimiter = ',')]
    tables: Vec<usize>,

    /// Emit raw inner markup per cell instead of normalized text
    #[arg(long)]
    raw: bool,

    /// Do not treat the first row as a header
    #[arg(long)]
    no_header: bool,

    /// Abort on the first table that fails to process
    #[arg(long)]
    strict: bool,
}

impl PageArgs {
    fn options(&self) -> ExtractOptions {
        ExtractOptions {
            by_class: if self.all_classes {
                None
            } else {
                Some(self.class.clone())
            },
            table_indices: if self.tables.is_empty() {
                None
            } else {
                Some(self.tables.clone())
            },
            raw: self.raw,
            header: !self.no_header,
            errors_ignore: !self.strict,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// List the tables that can be extracted from a page
    List {
        #[command(flatten)]
        page: PageArgs,
    },

    /// Print extracted tables
    Show {
        #[command(flatten)]
        page: PageArgs,

        /// Maximum number of rows to display per table
        #[arg(short, long)]
        limit: Option<usize>,

        /// Columns to display (comma-separated names)
        #[arg(long)]
        columns: Option<String>,
    },

    /// Export extracted tables to a file
    Export {
        #[command(flatten)]
        page: PageArgs,

        /// Output format (csv or json)
        #[arg(long, default_value = "csv")]
        format: String,

        /// Output file path; with csv and several tables, the table
        /// position is appended to the file stem
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> wikigrid_core::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::List { page } => cmd_list(&page),
        Commands::Show {
            page,
            limit,
            columns,
        } => cmd_show(&page, limit, columns),
        Commands::Export {
            page,
            format,
            output,
        } => cmd_export(&page, &format, &output),
    }
}

/// Read the page and run extraction with the selection flags applied
fn extract(page: &PageArgs) -> wikigrid_core::Result<ExtractReport> {
    let options = page.options();
    match &page.file {
        Some(path) => wikigrid_core::extract_file(path, &options),
        None => {
            let mut html = String::new();
            std::io::stdin().read_to_string(&mut html)?;
            wikigrid_core::extract_report(&html, &options)
        }
    }
}

fn warn_skipped(report: &ExtractReport) {
    for skipped in &report.skipped {
        eprintln!(
            "Warning: table {} skipped: {}",
            skipped.index, skipped.reason
        );
    }
}

fn cmd_list(page: &PageArgs) -> wikigrid_core::Result<()> {
    let report = extract(page)?;
    warn_skipped(&report);

    println!("Extracted {} table(s):", report.grids.len());
    for grid in &report.grids {
        println!(
            "  table {}: {} rows x {} columns",
            grid.source_index,
            grid.row_count(),
            grid.column_count()
        );
    }
    if !report.skipped.is_empty() {
        println!("Skipped {} table(s).", report.skipped.len());
    }

    Ok(())
}

fn cmd_show(
    page: &PageArgs,
    limit: Option<usize>,
    columns: Option<String>,
) -> wikigrid_core::Result<()> {
    let report = extract(page)?;
    warn_skipped(&report);

    let col_filter: Option<Vec<&str>> = columns.as_ref().map(|c| c.split(',').collect());

    for grid in &report.grids {
        println!("-- table {} --", grid.source_index);

        let display_cols: Vec<&wikigrid_core::Column> = if let Some(ref filter) = col_filter {
            grid.columns
                .iter()
                .filter(|c| filter.contains(&c.name.as_str()))
                .collect()
        } else {
            grid.columns.iter().collect()
        };

        let header: Vec<&str> = display_cols.iter().map(|c| c.name.as_str()).collect();
        println!("{}", header.join("\t"));
        println!("{}", "-".repeat(header.len() * 12));

        let row_limit = limit.unwrap_or(grid.rows.len());
        for row in grid.rows.iter().take(row_limit) {
            let values: Vec<String> = display_cols
                .iter()
                .map(|col| {
                    row.get(col.index)
                        .map(|c| c.to_string_value())
                        .unwrap_or_default()
                })
                .collect();
            println!("{}", values.join("\t"));
        }

        if grid.rows.len() > row_limit {
            println!("... ({} more rows)", grid.rows.len() - row_limit);
        }
        println!();
    }

    Ok(())
}

fn cmd_export(page: &PageArgs, format: &str, output: &PathBuf) -> wikigrid_core::Result<()> {
    let report = extract(page)?;
    warn_skipped(&report);

    match format.to_lowercase().as_str() {
        "csv" => {
            for grid in &report.grids {
                let path = csv_output_path(output, grid, report.grids.len());
                write_csv(grid, &path)?;
                println!(
                    "Exported table {} ({} rows) to {}",
                    grid.source_index,
                    grid.row_count(),
                    path.display()
                );
            }
        }
        "json" => {
            let file = File::create(output)?;
            let mut writer = BufWriter::new(file);
            let json = serde_json::to_string_pretty(&report.grids).map_err(Error::Json)?;
            writeln!(writer, "{}", json)?;
            println!(
                "Exported {} table(s) to {}",
                report.grids.len(),
                output.display()
            );
        }
        _ => {
            eprintln!("Unknown format: {}. Supported formats: csv, json", format);
            std::process::exit(1);
        }
    }

    Ok(())
}

/// With several grids going to CSV, suffix the file stem with the table
/// position so each grid lands in its own file
fn csv_output_path(output: &PathBuf, grid: &Grid, grid_count: usize) -> PathBuf {
    if grid_count <= 1 {
        return output.clone();
    }
    let stem = output
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table");
    let ext = output.extension().and_then(|s| s.to_str()).unwrap_or("csv");
    output.with_file_name(format!("{}_{}.{}", stem, grid.source_index, ext))
}

fn write_csv(grid: &Grid, path: &PathBuf) -> wikigrid_core::Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(Error::Csv)?;

    writer.write_record(grid.columns.iter().map(|c| c.name.as_str()))?;
    for row in &grid.rows {
        writer.write_record(row.iter().map(|c| c.to_string_value()))?;
    }
    writer.flush()?;

    Ok(())
}
