//! Tabular output for list commands.

use prettytable::{format, Row, Table};

/// Borderless aligned table, titles in the first row.
pub fn clean_table(titles: Row) -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_CLEAN);
    table.set_titles(titles);
    table
}
