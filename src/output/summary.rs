use std::fmt::Write;

use comfy_table::Cell;

use crate::report::{JobReport, PerformanceReport, RunReport};

use super::styling::{failure, heading, highlight, label, success, value};
use super::tables::{color_coded_step_duration_cell, create_table, cyan_header};

/// Prints a human-readable report of action step durations to stdout.
///
/// Displays:
/// - Overview: organization, run counts, collection date
/// - One table per job listing each action and how long its step took,
///   attributed to the workflow file at the revision that ran
/// - Failed runs: one line per run that could not be analyzed
pub fn print_summary(report: &PerformanceReport) {
    println!("{}", render_summary(report));
}

fn add_section_header(output: &mut String, emoji: &str, title: &str) {
    let _ = writeln!(output, "{} {}", heading(emoji), heading(title).underlined());
}

fn render_job(output: &mut String, run: &RunReport, job: &JobReport) {
    let _ = writeln!(
        output,
        "Performance data for job \"{}\" in workflow {}",
        highlight(&job.title),
        label(run.workflow_url())
    );

    let mut table = create_table();
    table.set_header(cyan_header(&["Action", "Duration"]));
    for step in &job.steps {
        table.add_row(vec![
            Cell::new(&step.action),
            color_coded_step_duration_cell(step.duration_seconds),
        ]);
    }

    let _ = writeln!(output, "{table}\n");
}

pub fn render_summary(report: &PerformanceReport) -> String {
    let mut output = String::new();

    add_section_header(&mut output, "📊", "Overview");

    let job_count: usize = report.runs.iter().map(|run| run.jobs.len()).sum();
    let failures = if report.failures.is_empty() {
        success(0)
    } else {
        failure(report.failures.len())
    };

    let _ = writeln!(
        output,
        "  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n  {} {}\n",
        label("Organization:"),
        highlight(&report.organization),
        label("Completed runs:"),
        value(report.total_runs),
        label("Runs without workflow file:"),
        value(report.skipped_runs),
        label("Runs with action timings:"),
        value(report.runs.len()),
        label("Failed runs:"),
        failures,
        label("Analysis date:"),
        label(report.collected_at.format("%Y-%m-%d %H:%M UTC"))
    );

    if report.runs.is_empty() {
        let _ = writeln!(output, "{}\n", value("No action timings found."));
    } else {
        add_section_header(&mut output, "⏱️", &format!("Action Timings ({job_count} jobs)"));
        for run in &report.runs {
            for job in &run.jobs {
                render_job(&mut output, run, job);
            }
        }
    }

    if !report.failures.is_empty() {
        add_section_header(&mut output, "⚠️", "Failed Runs");
        for run_failure in &report.failures {
            let _ = writeln!(output, "  {}", failure(run_failure));
        }
    }

    output
}
