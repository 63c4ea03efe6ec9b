//! Progress reporting and run summaries for the CLI

use std::path::Path;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use notescope_core::{LoadStats, Summary};

/// Load progress: a byte bar when the size is known, otherwise a spinner
pub struct ProgressReporter {
    _multi: MultiProgress,
    main_bar: ProgressBar,
    stats_bar: ProgressBar,
}

impl ProgressReporter {
    /// Create a reporter tracking bytes read against `total_bytes`
    pub fn new(total_bytes: u64) -> Self {
        let main_bar = ProgressBar::new(total_bytes);
        main_bar.set_style(
            style("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                .progress_chars("█▓▒░-"),
        );
        Self::with_main_bar(main_bar)
    }

    /// Create a reporter for sources of unknown size (gzip)
    pub fn new_spinner() -> Self {
        let main_bar = ProgressBar::new_spinner();
        main_bar.set_style(style("[{elapsed_precise}] {spinner} {bytes} read {msg}"));
        main_bar.enable_steady_tick(Duration::from_millis(100));
        Self::with_main_bar(main_bar)
    }

    fn with_main_bar(main_bar: ProgressBar) -> Self {
        let multi = MultiProgress::new();
        let main_bar = multi.add(main_bar);
        let stats_bar = multi.add(ProgressBar::new(0));
        stats_bar.set_style(style("Rows:  {msg}"));

        Self {
            _multi: multi,
            main_bar,
            stats_bar,
        }
    }

    /// Update with bytes consumed and row counters
    pub fn update(&self, bytes: u64, rows: usize, skipped: usize) {
        self.main_bar.set_position(bytes);
        self.main_bar.set_message("Loading...");

        let stats_msg = if skipped > 0 {
            format!(
                "{} loaded | {} malformed skipped",
                Self::format_number(rows),
                Self::format_number(skipped)
            )
        } else {
            format!("{} loaded", Self::format_number(rows))
        };
        self.stats_bar.set_message(stats_msg);
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        self.main_bar.finish_with_message("Loaded");
        self.stats_bar.finish();
    }

    /// Format large numbers with a K/M suffix
    fn format_number(n: usize) -> String {
        if n >= 1_000_000 {
            format!("{:.1}M", n as f64 / 1_000_000.0)
        } else if n >= 1_000 {
            format!("{:.1}K", n as f64 / 1_000.0)
        } else {
            n.to_string()
        }
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
}

/// Print a formatted summary report
pub fn print_summary_report(
    input: &Path,
    output: Option<&Path>,
    summary: &Summary,
    stats: &LoadStats,
) {
    println!("\n{}", "═".repeat(60));
    println!("Community Notes View");
    println!("{}", "═".repeat(60));
    println!("Input:              {}", input.display());

    if let Some(output_path) = output {
        println!("Output:             {}", output_path.display());
    }

    println!("Total rows:         {}", format_with_commas(summary.total_rows));

    if stats.skipped_rows > 0 {
        println!(
            "Malformed skipped:  {}",
            format_with_commas(stats.skipped_rows)
        );
    }

    if stats.invalid_timestamps > 0 {
        println!(
            "Bad timestamps:     {} (no week)",
            format_with_commas(stats.invalid_timestamps)
        );
    }

    println!(
        "Filtered rows:      {} ({:.1}% kept, {:.1}% filtered out)",
        format_with_commas(summary.filtered_rows),
        summary.retention_rate(),
        summary.filter_rate()
    );

    if let Some(ids) = summary.identifier_count {
        println!("With identifier:    {}", format_with_commas(ids));
    }

    if let Some(india) = summary.india_count {
        println!("India (hi+ta+ur+mr): {}", format_with_commas(india));
    }

    println!("{}", "═".repeat(60));
}

/// Format number with thousand separators
pub fn format_with_commas(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(ProgressReporter::format_number(42), "42");
        assert_eq!(ProgressReporter::format_number(1_234), "1.2K");
        assert_eq!(ProgressReporter::format_number(1_234_567), "1.2M");
    }

    #[test]
    fn test_format_with_commas() {
        assert_eq!(format_with_commas(1234), "1,234");
        assert_eq!(format_with_commas(1234567), "1,234,567");
        assert_eq!(format_with_commas(123456), "123,456");
        assert_eq!(format_with_commas(42), "42");
        assert_eq!(format_with_commas(0), "0");
    }
}
