//! Statistics reporting.

use console::style;

use crate::convert::{ResourceFailure, RunStats};

/// Print totals for the run.
pub fn print_run_stats(stats: &RunStats) {
    println!();
    println!("{}", style("═".repeat(50)).dim());
    println!("{}", style("Run Statistics:").bold());
    println!("  Rows:          {}", stats.rows_processed);
    println!("  Stories:       {}", stats.stories);
    println!("  Videos:        {}", stats.videos);
    println!("  Lesson plans:  {}", stats.lesson_plans);
    println!("  Empty cells:   {}", stats.empty_cells);
    if !stats.failures.is_empty() {
        println!(
            "  Skipped:       {} ({} download/storage)",
            style(stats.failures.len()).red(),
            stats.writer_failures()
        );
    }
    println!("  Total:         {} files", stats.total_files());
    println!("{}", style("═".repeat(50)).dim());
}

/// List every skipped resource with its raw cell.
pub fn print_failures(failures: &[ResourceFailure]) {
    if failures.is_empty() {
        return;
    }

    println!();
    println!("{}", style("Skipped resources:").bold());
    for failure in failures {
        println!("  {} {}", style("-").yellow(), failure);
    }
}
