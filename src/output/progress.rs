use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

use super::styling::{heading, success, value};

/// Progress tracking for the two collection phases
pub struct PhaseProgress {
    pb: ProgressBar,
}

impl PhaseProgress {
    pub fn start_phase_1(limit: usize) -> Self {
        eprintln!("{}  {}", heading("⚙️"), heading("Phases").underlined());
        let pb = create_spinner(
            value(format!("Phase 1/2: Reading audit log (limit: {limit})")).to_string(),
        );
        Self { pb }
    }

    pub fn finish_phase_1_start_phase_2(self, run_count: usize) -> Self {
        self.pb.finish_with_message(
            success(format!("Phase 1/2: Found {run_count} workflow runs ✓")).to_string(),
        );

        let pb = ProgressBar::new(run_count as u64);
        pb.set_draw_target(ProgressDrawTarget::stderr());
        if let Ok(style) = ProgressStyle::default_bar().template("  {msg} {pos}/{len} {bar:30}")
        {
            pb.set_style(style);
        }
        pb.set_message(value("Phase 2/2: Analyzing workflow runs").to_string());
        Self { pb }
    }

    pub fn inc(&self) {
        self.pb.inc(1);
    }

    pub fn finish_phase_2(self, report_count: usize) {
        self.pb.finish_with_message(
            success(format!(
                "Phase 2/2: Collected timings for {report_count} workflow runs ✓"
            ))
            .to_string(),
        );
        eprintln!("\n");
    }
}

fn create_spinner(message: String) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_draw_target(ProgressDrawTarget::stderr());
    if let Ok(style) = ProgressStyle::default_spinner().template("  {msg} {spinner}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
