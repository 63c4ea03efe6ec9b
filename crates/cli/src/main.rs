//! notescope CLI
//!
//! Filter, chart and export annotated community notes datasets

mod config;
mod progress;
mod tui;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use notescope_core::{compute_view, Dataset, Page, ViewResult};
use notescope_filters::{CriteriaOverrides, LanguageSelector, Selector};
use notescope_formats::open_dataset;
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use config::ExplorerConfig;
use progress::ProgressReporter;

/// Longest summary shown in the printed page
const SUMMARY_PREVIEW: usize = 60;
/// Width of the longest bar in printed charts
const BAR_WIDTH: usize = 40;

#[derive(Parser)]
#[command(name = "notescope")]
#[command(version, about = "Explore annotated community notes datasets", long_about = None)]
#[command(author = "notescope")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output reports in JSON format
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter a dataset and print the charts and one page of notes
    View {
        /// Dataset file (CSV, optionally gzip-compressed)
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,

        /// Page to print (1-based, 50 rows per page)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Save the effective session to a config file (YAML or TOML)
        #[arg(long, value_name = "CONFIG")]
        save_config: Option<PathBuf>,
    },

    /// Write the filtered notes to a CSV file
    Export {
        /// Dataset file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        /// Output file (defaults to filtered_notes.csv)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Preview the first rows and the detected columns
    Inspect {
        /// Dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Number of records to show
        #[arg(short = 'n', long, default_value = "5")]
        limit: usize,
    },

    /// List the values each filter can take
    Options {
        /// Dataset file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Launch the interactive terminal explorer
    Tui {
        /// Dataset file
        #[arg(value_name = "FILE")]
        input: Option<PathBuf>,

        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Filter flags shared by the dataset subcommands
#[derive(Args, Debug, Default)]
struct FilterArgs {
    /// Config file with saved criteria (YAML or TOML); flags override it
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Language code, `India` for hi+ta+ur+mr, or `All`
    #[arg(short, long)]
    language: Option<LanguageSelector>,

    /// Sentiment category or `All`
    #[arg(short, long)]
    sentiment: Option<Selector<String>>,

    /// Week start date (YYYY-MM-DD) or `All`
    #[arg(short, long)]
    week: Option<Selector<String>>,

    /// Political flag: true, false or All
    #[arg(long)]
    political: Option<Selector<bool>>,

    /// Hateful flag: true, false or All
    #[arg(long)]
    hateful: Option<Selector<bool>>,

    /// Case-insensitive substring searched in summary_en
    #[arg(short, long)]
    keyword: Option<String>,
}

impl FilterArgs {
    fn overrides(&self) -> CriteriaOverrides {
        CriteriaOverrides {
            language: self.language.clone(),
            sentiment: self.sentiment.clone(),
            week: self.week.clone(),
            is_political: self.political.clone(),
            is_hateful: self.hateful.clone(),
            keyword: self.keyword.clone(),
        }
    }

    /// Config file values with the command-line flags layered on top
    fn session(&self) -> Result<ExplorerConfig> {
        let mut session = match &self.config {
            Some(path) => ExplorerConfig::load(path)?,
            None => ExplorerConfig::default(),
        };
        session.criteria = session.criteria.merge(self.overrides());
        Ok(session)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging; the explorer owns the terminal, so it gets none
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let builder = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(!cli.json); // Disable colors if JSON output
    if matches!(cli.command, Commands::Tui { .. }) {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::sink).finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.with_writer(std::io::stderr).finish())?;
    }

    match cli.command {
        Commands::View {
            input,
            filters,
            page,
            save_config,
        } => {
            view(input, filters, page, save_config, cli.json)?;
        }
        Commands::Export {
            input,
            output,
            filters,
        } => {
            export(input, output, filters, cli.json)?;
        }
        Commands::Inspect { input, limit } => {
            inspect_dataset(input, limit, cli.json)?;
        }
        Commands::Options { input } => {
            list_options(input, cli.json)?;
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
        }
        Commands::Tui { input, filters } => {
            let session = filters.session()?;
            let input = resolve_input(input, &session)?;
            let dataset = load_dataset(&input, true)?;
            tui::run_tui(&dataset, &input, session)?;
        }
    }

    Ok(())
}

/// FILE argument, else the config file's `input`
fn resolve_input(arg: Option<PathBuf>, session: &ExplorerConfig) -> Result<PathBuf> {
    arg.or_else(|| session.input.clone())
        .context("No dataset given: pass FILE or set `input` in the config file")
}

/// Load a dataset, drawing a progress bar on stderr unless `show_progress` is false
fn load_dataset(path: &Path, show_progress: bool) -> Result<Dataset> {
    info!("Loading dataset: {:?}", path);

    let reader = open_dataset(path)
        .with_context(|| format!("Failed to open dataset: {}", path.display()))?;

    let progress = show_progress.then(|| match reader.total_bytes() {
        Some(total) => ProgressReporter::new(total),
        None => ProgressReporter::new_spinner(),
    });

    let dataset = Dataset::from_reader_with_progress(reader, |r| {
        if let Some(ref p) = progress {
            p.update(r.bytes_processed(), r.records_processed(), r.rows_skipped());
        }
    })
    .with_context(|| format!("Failed to read dataset: {}", path.display()))?;

    if let Some(p) = progress {
        p.finish();
    }

    let stats = dataset.load_stats();
    info!(
        "Loaded {} rows ({} malformed skipped, {} unparsable timestamps)",
        stats.rows, stats.skipped_rows, stats.invalid_timestamps
    );

    Ok(dataset)
}

fn view(
    input: Option<PathBuf>,
    filters: FilterArgs,
    page: usize,
    save_config: Option<PathBuf>,
    json_output: bool,
) -> Result<()> {
    let mut session = filters.session()?;
    let input = resolve_input(input, &session)?;

    info!("Computing view");
    info!("  Input: {:?}", input);
    info!("  Criteria: {:?}", session.criteria);

    let dataset = load_dataset(&input, !json_output)?;
    let view = compute_view(&dataset, &session.criteria);
    let page = view.page(page);

    if let Some(path) = save_config {
        session.input = Some(input.clone());
        session.save(&path)?;
        info!("Saved session to {:?}", path);
    }

    if json_output {
        let report = json!({
            "input": input.to_string_lossy().to_string(),
            "criteria": session.criteria,
            "unfiltered": session.criteria.is_unfiltered(),
            "load": dataset.load_stats(),
            "summary": view.summary,
            "aggregates": view.aggregates,
            "page": {
                "number": page.number,
                "total_pages": page.total_pages,
                "rows": page_rows_json(&page),
            },
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        if session.criteria.is_unfiltered() {
            println!("No filters active, showing every note");
        }
        print_aggregates(&view);
        print_page(&page);
        progress::print_summary_report(&input, None, &view.summary, dataset.load_stats());
    }

    Ok(())
}

fn export(
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    filters: FilterArgs,
    json_output: bool,
) -> Result<()> {
    let session = filters.session()?;
    let input = resolve_input(input, &session)?;
    let output = output.unwrap_or_else(|| session.output_or_default());

    info!("Exporting filtered notes");
    info!("  Input: {:?}", input);
    info!("  Output: {:?}", output);

    let dataset = load_dataset(&input, !json_output)?;
    let view = compute_view(&dataset, &session.criteria);
    let written = view
        .subset
        .export(&output)
        .with_context(|| format!("Failed to write export: {}", output.display()))?;

    if json_output {
        let report = json!({
            "input": input.to_string_lossy().to_string(),
            "output": output.to_string_lossy().to_string(),
            "rows_written": written,
            "summary": view.summary,
            "retention_rate": view.summary.retention_rate(),
            "filter_rate": view.summary.filter_rate(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        progress::print_summary_report(
            &input,
            Some(&output),
            &view.summary,
            dataset.load_stats(),
        );
    }

    Ok(())
}

fn inspect_dataset(input: PathBuf, limit: usize, json_output: bool) -> Result<()> {
    info!("Inspecting dataset: {:?}", input);

    let mut reader = open_dataset(&input)
        .with_context(|| format!("Failed to open dataset: {}", input.display()))?;
    let headers = reader.headers().to_vec();
    let schema = reader.schema();
    let caps = *schema.capabilities();

    let mut rows = Vec::new();
    for result in reader.by_ref().take(limit) {
        let record = result?;
        let fields: serde_json::Map<String, serde_json::Value> = headers
            .iter()
            .cloned()
            .zip(record.values.into_iter().map(serde_json::Value::String))
            .collect();
        rows.push((record.source_line, fields));
    }

    let identifier = caps.identifier.map(|id| id.name());
    let capabilities = [
        ("week (from createdAtMillis)", caps.week()),
        ("language filter", caps.language),
        ("sentiment filter", caps.sentiment),
        ("political filter", caps.political),
        ("hateful filter", caps.hateful),
        ("keyword search", caps.summary),
        ("keyword chart", caps.keywords),
        ("links", identifier.is_some()),
    ];

    if json_output {
        let report = json!({
            "input": input.to_string_lossy().to_string(),
            "columns": headers,
            "identifier_column": identifier,
            "capabilities": capabilities
                .iter()
                .map(|(name, on)| (name.to_string(), json!(on)))
                .collect::<serde_json::Map<_, _>>(),
            "rows": rows
                .iter()
                .map(|(line, fields)| json!({ "line": line, "fields": fields }))
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Columns ({}): {}", headers.len(), headers.join(", "));
        println!("Capabilities:");
        for (name, on) in capabilities {
            println!("  {:<28} {}", name, if on { "yes" } else { "no" });
        }
        if let Some(id) = identifier {
            println!("  {:<28} {}", "identifier column", id);
        }
        for (line, fields) in &rows {
            println!(
                "Record #{}: {}",
                line,
                serde_json::to_string_pretty(fields)?
            );
        }
    }

    info!(
        "Processed {} records ({} bytes)",
        reader.records_processed(),
        reader.bytes_processed()
    );

    Ok(())
}

fn list_options(input: PathBuf, json_output: bool) -> Result<()> {
    let dataset = load_dataset(&input, !json_output)?;
    let options = dataset.options();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&options)?);
    } else {
        println!("Language:   {}", options.languages.join(", "));
        println!("Sentiment:  {}", options.sentiments.join(", "));
        println!("Week:       {}", options.weeks.join(", "));
        println!("Political:  {}", options.political.join(", "));
        println!("Hateful:    {}", options.hateful.join(", "));
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    generate(shell, &mut cmd, bin_name, &mut std::io::stdout());
}

fn page_rows_json(page: &Page) -> Vec<serde_json::Value> {
    page.rows
        .iter()
        .map(|row| {
            let note = row.note;
            json!({
                "line": note.record.source_line,
                "identifier": note.identifier,
                "link": row.link,
                "language": note.language,
                "sentiment": note.sentiment,
                "week": note.week_label(),
                "is_political": note.is_political,
                "is_hateful": note.is_hateful,
                "summary": note.summary,
            })
        })
        .collect()
}

fn print_aggregates(view: &ViewResult) {
    let aggregates = &view.aggregates;

    if let Some(weeks) = &aggregates.notes_per_week {
        println!("\nNotes per week");
        let peak = weeks.iter().map(|w| w.count).max().unwrap_or(0);
        for w in weeks {
            println!("  {}  {:>7}  {}", w.week, w.count, bar(w.count, peak));
        }
    }

    if let Some(table) = &aggregates.sentiment_per_week {
        println!("\nSentiment per week");
        print!("  {:<10}", "week");
        for s in &table.sentiments {
            print!("  {:>9}", s);
        }
        println!();
        for row in &table.rows {
            print!("  {:<10}", row.week.to_string());
            for c in &row.counts {
                print!("  {:>9}", c);
            }
            println!();
        }
    }

    if let Some(langs) = &aggregates.languages {
        println!("\nLanguages");
        let peak = langs.first().map(|l| l.count).unwrap_or(0);
        for l in langs {
            println!("  {:<8}  {:>7}  {}", l.language, l.count, bar(l.count, peak));
        }
    }

    if let Some(keywords) = &aggregates.top_keywords {
        println!("\nTop political keywords");
        let peak = keywords.first().map(|k| k.count).unwrap_or(0);
        for k in keywords {
            println!("  {:<20}  {:>7}  {}", k.keyword, k.count, bar(k.count, peak));
        }
    }
}

fn print_page(page: &Page) {
    println!(
        "\nNotes · page {} of {} ({} rows)",
        page.number, page.total_pages, page.total_rows
    );

    if page.rows.is_empty() {
        println!("  (no rows on this page)");
        return;
    }

    for row in &page.rows {
        let note = row.note;
        println!(
            "  {:<50} {:<5} {:<9} {:<10} {}",
            row.markdown_link(),
            note.language.as_deref().unwrap_or(""),
            note.sentiment.as_deref().unwrap_or(""),
            note.week_label().unwrap_or_default(),
            preview(note.summary.as_deref().unwrap_or(""), SUMMARY_PREVIEW),
        );
    }

    let (first, last) = page.showing();
    println!("Showing rows {} to {} of {}", first, last, page.total_rows);
}

/// Proportional bar for printed charts
fn bar(count: usize, peak: usize) -> String {
    if peak == 0 {
        return String::new();
    }
    "█".repeat((count * BAR_WIDTH).div_ceil(peak))
}

/// Truncate to `max` characters, marking the cut
fn preview(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut out: String = text.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}
