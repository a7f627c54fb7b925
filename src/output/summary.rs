//! End-of-run summary of every crawl instance

use crate::crawler::CrawlReport;
use crate::state::CrawlStatus;

/// Formats crawl reports as a plain-text summary
///
/// # Arguments
///
/// * `reports` - One report per crawl instance
///
/// # Returns
///
/// The summary text, ending in a newline
pub fn format_summary(reports: &[CrawlReport]) -> String {
    let mut out = String::from("=== Crawl Summary ===\n\n");

    for report in reports {
        out.push_str(&format_report(report));
    }

    let stored: u64 = reports.iter().map(|r| r.pages_stored).sum();
    let interrupted = reports
        .iter()
        .filter(|r| r.status == CrawlStatus::Interrupted)
        .count();

    out.push_str(&format!(
        "{} crawls, {} pages stored this run, {} interrupted\n",
        reports.len(),
        stored,
        interrupted
    ));

    out
}

fn format_report(report: &CrawlReport) -> String {
    format!(
        "{}\n  Directory: {}\n  Status: {}\n  Pages stored this run: {}\n  \
         Total pages processed: {}\n  URLs visited: {}\n  URLs left in frontier: {}\n  \
         Duration: {} seconds\n\n",
        report.start_url,
        report.directory.display(),
        report.status,
        report.pages_stored,
        report.pages_processed,
        report.visited,
        report.pending,
        report.duration_seconds()
    )
}

/// Prints the summary to stdout
pub fn print_summary(reports: &[CrawlReport]) {
    print!("{}", format_summary(reports));
}
