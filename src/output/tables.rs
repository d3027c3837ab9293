use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Color as TableColor, ContentArrangement, Table};

/// Table and cell creation helpers
pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn cyan_header(labels: &[&str]) -> Vec<Cell> {
    labels
        .iter()
        .map(|label| Cell::new(*label).fg(TableColor::Cyan))
        .collect()
}

/// Step durations: green up to 30s, yellow up to 2min, red beyond.
/// Non-positive values point at clock skew and are shown in magenta.
pub fn color_coded_step_duration_cell(seconds: f64) -> Cell {
    let text = format!("{seconds:.1}s");
    if seconds <= 0.0 {
        Cell::new(text).fg(TableColor::Magenta)
    } else if seconds <= 30.0 {
        Cell::new(text).fg(TableColor::Green)
    } else if seconds <= 120.0 {
        Cell::new(text).fg(TableColor::Yellow)
    } else {
        Cell::new(text).fg(TableColor::Red)
    }
}
