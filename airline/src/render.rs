//! Fixed-width table output.

use airline_core::environment::Console;
use airline_core::error::ConsoleError;
use airline_core::gateway::RowSet;

/// Width every cell is padded to.
pub const CELL_WIDTH: usize = 20;

/// Left-justify each cell in [`CELL_WIDTH`] characters.
#[must_use]
pub fn format_row<S: AsRef<str>>(cells: &[S]) -> String {
    cells
        .iter()
        .map(|cell| format!("{:<CELL_WIDTH$}", cell.as_ref()))
        .collect()
}

/// Print `total row(s): N`, then the header and one line per row.
///
/// The header is only printed when there is at least one row.
///
/// # Errors
///
/// Returns [`ConsoleError`] if the terminal cannot be written.
pub fn print_table<C: Console>(console: &mut C, table: &RowSet) -> Result<(), ConsoleError> {
    console.write_line(&format!("total row(s): {}", table.len()))?;
    if table.is_empty() {
        return Ok(());
    }
    console.write_line(&format_row(&table.columns))?;
    for row in &table.rows {
        console.write_line(&format_row(row))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use airline_testing::ScriptedConsole;
    use proptest::prelude::*;

    #[test]
    fn cells_are_padded_to_twenty() {
        let line = format_row(&["F100", "Los Angeles"]);
        assert_eq!(line.len(), 40);
        assert!(line.starts_with("F100                Los Angeles"));
    }

    #[test]
    fn long_cells_are_not_truncated() {
        let line = format_row(&["a value that is longer than twenty"]);
        assert_eq!(line, "a value that is longer than twenty");
    }

    #[test]
    fn table_prints_count_header_and_rows() {
        let table = RowSet {
            columns: vec!["flightnumber".into(), "departurecity".into()],
            rows: vec![vec!["F100".into(), "Los Angeles".into()]],
        };
        let mut console = ScriptedConsole::default();

        print_table(&mut console, &table).unwrap();

        assert_eq!(console.output().len(), 3);
        assert_eq!(console.output()[0], "total row(s): 1");
        assert!(console.output()[1].starts_with("flightnumber        departurecity"));
    }

    #[test]
    fn empty_table_prints_only_the_count() {
        let mut console = ScriptedConsole::default();
        print_table(&mut console, &RowSet::default()).unwrap();
        assert_eq!(console.output(), ["total row(s): 0"]);
    }

    proptest! {
        #[test]
        fn every_cell_takes_at_least_the_cell_width(cells in prop::collection::vec("[a-zA-Z0-9 ]{0,30}", 0..6)) {
            let expected: usize = cells.iter().map(|cell| cell.len().max(CELL_WIDTH)).sum();
            prop_assert_eq!(format_row(&cells).len(), expected);
        }
    }
}
