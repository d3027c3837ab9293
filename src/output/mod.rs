mod progress;
mod styling;
mod summary;
mod tables;

pub use progress::PhaseProgress;
use styling::{brand, label};
pub use summary::print_summary;

/// Prints the `actperf` banner to stderr.
///
/// Displays the tool name, version, and description at the start of execution.
pub fn print_banner() {
    eprintln!(
        r"
{} {}
  {}
",
        brand("⏱️ actperf"),
        label(env!("CARGO_PKG_VERSION")),
        label("GitHub Actions step performance")
    );
}
