pub mod time_utils;

use prettytable::format::FormatBuilder;
use prettytable::Table;

/// Borderless table with columns separated by a space and padded two spaces
/// left, one right.
pub(crate) fn padded_table() -> Table {
    let mut table = Table::new();
    table.set_format(
        FormatBuilder::new()
            .column_separator(' ')
            .padding(2, 1)
            .build(),
    );
    table
}
