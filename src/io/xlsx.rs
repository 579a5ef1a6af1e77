use calamine::{
    open_workbook_auto,
    Data,
    Range,
    Reader,
};

use crate::io::{
    IoError,
    IoErrorType,
    IoResult,
};

/// A worksheet with a header row.
/// Columns are looked up by header name, so their order in the sheet does not matter.
#[derive(Debug)]
pub struct SheetTable {
    /// File the sheet was read from (for error messages).
    pub file: String,
    /// Name of the sheet.
    pub sheet: String,
    /// Trimmed header names, in sheet order.
    pub header: Vec<String>,
    /// Data rows below the header, blank rows removed.
    pub rows: Vec<Vec<Data>>,
}

/// Load a sheet from a spreadsheet (xlsx, xls, xlsb or ods).
/// Uses the external `calamine` crate.
pub fn load_sheet(path: &str, sheet: &str) -> IoResult<SheetTable> {
    let mut workbook = match open_workbook_auto(path) {
        Ok(workbook) => workbook,
        Err(error) => {
            return Err(IoError{file: Some(path.to_string()), cause: IoErrorType::Spreadsheet(error)});
        },
    };

    if !workbook.sheet_names().iter().any(|name| name == sheet) {
        return Err(IoError::with_file(path, &format!(
            "Sheet \"{}\" not found. Available sheets: {:?}", sheet, workbook.sheet_names()
        )));
    }

    let range = match workbook.worksheet_range(sheet) {
        Ok(range) => range,
        Err(error) => {
            return Err(IoError{file: Some(path.to_string()), cause: IoErrorType::Spreadsheet(error)});
        },
    };

    SheetTable::from_range(path, sheet, &range)
}

impl SheetTable {
    /// Build a table from a cell range. The first row is the header.
    pub fn from_range(file: &str, sheet: &str, range: &Range<Data>) -> IoResult<Self> {
        let mut rows = range.rows();
        let header = match rows.next() {
            Some(header_row) => header_row.iter().map(|cell| cell.to_string().trim().to_string()).collect(),
            None => {
                return Err(IoError::with_file(file, &format!("Sheet \"{}\" is empty", sheet)));
            },
        };
        let rows = rows
            .filter(|row| row.iter().any(|cell| !matches!(cell, Data::Empty)))
            .map(|row| row.to_vec())
            .collect();

        Ok(SheetTable{
            file: file.to_string(),
            sheet: sheet.to_string(),
            header,
            rows,
        })
    }

    /// Find the index of a column by its header name.
    pub fn column(&self, name: &str) -> IoResult<usize> {
        match self.header.iter().position(|header| header == name) {
            Some(col) => Ok(col),
            None => Err(IoError::with_file(&self.file, &format!(
                "Sheet \"{}\" has no column \"{}\" (found {:?})", self.sheet, name, self.header
            ))),
        }
    }

    /// Read a numeric cell as a float.
    pub fn float(&self, row: usize, col: usize) -> IoResult<f64> {
        let value = match self.cell(row, col) {
            Data::Int(value) => Some(*value as f64),
            Data::Float(value) => Some(*value),
            Data::String(value) => value.trim().parse::<f64>().ok(),
            _ => None,
        };
        match value {
            Some(value) => Ok(value),
            None => Err(self.cell_error(row, col, "a number")),
        }
    }

    /// Read a numeric cell as a non-negative integer.
    /// Floats are accepted only when they have no fractional part.
    pub fn integer(&self, row: usize, col: usize) -> IoResult<u32> {
        let value = match self.cell(row, col) {
            Data::Int(value) => Some(*value),
            Data::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            Data::String(value) => value.trim().parse::<i64>().ok(),
            _ => None,
        };
        match value.and_then(|value| u32::try_from(value).ok()) {
            Some(value) => Ok(value),
            None => Err(self.cell_error(row, col, "a non-negative integer")),
        }
    }

    fn cell(&self, row: usize, col: usize) -> &Data {
        self.rows[row].get(col).unwrap_or(&Data::Empty)
    }

    fn cell_error(&self, row: usize, col: usize, expected: &str) -> IoError {
        // +2: one for the header row, one for 1-based spreadsheet rows
        IoError::with_file(&self.file, &format!(
            "Sheet \"{}\", row {}, column \"{}\": expected {}, found \"{}\"",
            self.sheet, row + 2, self.header[col], expected, self.cell(row, col)
        ))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Build an in-memory sheet from a header and rows of cells.
    pub(crate) fn range_from(header: &[&str], rows: &[Vec<Data>]) -> Range<Data> {
        let width = header.len() as u32;
        let mut range = Range::new((0, 0), (rows.len() as u32, width - 1));
        for (col, name) in header.iter().enumerate() {
            range.set_value((0, col as u32), Data::String(name.to_string()));
        }
        for (row_n, row) in rows.iter().enumerate() {
            for (col, cell) in row.iter().enumerate() {
                range.set_value((row_n as u32 + 1, col as u32), cell.clone());
            }
        }
        range
    }

    #[test]
    fn columns_are_found_by_name() {
        let range = range_from(&["z", " x ", "elec #"], &[vec![Data::Float(1.0), Data::Float(2.0), Data::Int(1)]]);
        let table = SheetTable::from_range("pos.xlsx", "elec_pos", &range).unwrap();
        assert_eq!(table.column("x").unwrap(), 1);
        assert_eq!(table.column("elec #").unwrap(), 2);
        assert!(table.column("y").unwrap_err().to_string().contains("no column \"y\""));
    }

    #[test]
    fn blank_rows_are_skipped() {
        let range = range_from(&["A"], &[
            vec![Data::Int(1)],
            vec![Data::Empty],
            vec![Data::Int(3)],
        ]);
        let table = SheetTable::from_range("s.xlsx", "ERT_scheme", &range).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.integer(1, 0).unwrap(), 3);
    }

    #[test]
    fn numeric_cells_accept_ints_floats_and_strings() {
        let range = range_from(&["v"], &[
            vec![Data::Int(4)],
            vec![Data::Float(2.5)],
            vec![Data::String(" -1.25 ".to_string())],
        ]);
        let table = SheetTable::from_range("s.xlsx", "t", &range).unwrap();
        assert_eq!(table.float(0, 0).unwrap(), 4.0);
        assert_eq!(table.float(1, 0).unwrap(), 2.5);
        assert_eq!(table.float(2, 0).unwrap(), -1.25);
    }

    #[test]
    fn integers_reject_fractions_and_negatives() {
        let range = range_from(&["id"], &[
            vec![Data::Float(7.0)],
            vec![Data::Float(7.5)],
            vec![Data::Int(-1)],
            vec![Data::String("abc".to_string())],
        ]);
        let table = SheetTable::from_range("s.xlsx", "t", &range).unwrap();
        assert_eq!(table.integer(0, 0).unwrap(), 7);
        let err = table.integer(1, 0).unwrap_err().to_string();
        assert!(err.contains("row 3"), "{}", err);
        assert!(table.integer(2, 0).is_err());
        assert!(table.integer(3, 0).is_err());
    }

    /// Survey workbook with the sheets `elec_pos` (4 electrodes) and `ERT_scheme` (2 measurements).
    pub(crate) const SURVEY_WORKBOOK: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/data/ERT_pos_and_scheme.xlsx");

    #[test]
    fn workbook_sheets_are_read() {
        let table = load_sheet(SURVEY_WORKBOOK, "elec_pos").unwrap();
        assert_eq!(table.header, vec!["elec #", "x", "y", "z"]);
        assert_eq!(table.rows.len(), 4);
        assert_eq!(table.integer(3, 0).unwrap(), 4);
        assert_eq!(table.float(3, 3).unwrap(), 5.1254);

        let table = load_sheet(SURVEY_WORKBOOK, "ERT_scheme").unwrap();
        assert_eq!(table.header, vec!["A", "B", "M", "N"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.integer(1, 3).unwrap(), 1);
    }

    #[test]
    fn missing_sheet_lists_available_sheets() {
        let err = load_sheet(SURVEY_WORKBOOK, "positions").unwrap_err();
        assert_eq!(err.file.as_deref(), Some(SURVEY_WORKBOOK));
        let message = err.to_string();
        assert!(message.contains("Sheet \"positions\" not found"), "{}", message);
        assert!(message.contains("elec_pos") && message.contains("ERT_scheme"), "{}", message);
    }

    #[test]
    fn missing_workbook_is_an_error() {
        let err = load_sheet("no_such_workbook.xlsx", "elec_pos").unwrap_err();
        assert_eq!(err.file.as_deref(), Some("no_such_workbook.xlsx"));
    }
}
