pub mod convert;
pub mod dashboard;
pub mod journal;
pub mod login;
pub mod pairs;

use comfy_table::{presets::UTF8_FULL, Cell, Table};

pub(crate) fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(headers.iter().map(|h| Cell::new(*h)));
    for row in rows {
        table.add_row(row.into_iter().map(Cell::new));
    }
    table
}
