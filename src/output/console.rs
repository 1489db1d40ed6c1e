//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a success message.
pub fn print_success(message: &str) {
    println!("{} {}", style("DONE").green().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     BWE Souschef                                      ║
║     Better World Ed spreadsheet to channel archive    ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(channel: &str, input: &str, output: &str, row_limit: Option<usize>) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Channel: {}", channel);
    println!("  Input:   {}", input);
    println!("  Output:  {}", output);
    if let Some(limit) = row_limit {
        println!("  Rows:    first {}", limit);
    }
    println!();
}
