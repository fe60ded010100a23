//! Reference table loading.
//!
//! The reference file is either a spreadsheet (read with calamine) or a CSV.
//! Both are first reduced to a header row plus rows of [`Cell`]s, then
//! projected onto the required columns.

use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};
use tracing::{debug, info};

use super::dms::Dms;
use super::error::LoadError;
use super::index::GazetteerIndex;
use super::row::{GridPoint, ReferenceRow};

/// Header labels of the required columns.
pub mod columns {
    pub const LEVEL1: &str = "1단계";
    pub const LEVEL2: &str = "2단계";
    pub const GRID_X: &str = "격자 X";
    pub const GRID_Y: &str = "격자 Y";
    pub const LON_DEGREES: &str = "경도(시)";
    pub const LON_MINUTES: &str = "경도(분)";
    pub const LON_SECONDS: &str = "경도(초)";
    pub const LAT_DEGREES: &str = "위도(시)";
    pub const LAT_MINUTES: &str = "위도(분)";
    pub const LAT_SECONDS: &str = "위도(초)";

    pub const ALL: [&str; 10] = [
        LEVEL1,
        LEVEL2,
        GRID_X,
        GRID_Y,
        LON_DEGREES,
        LON_MINUTES,
        LON_SECONDS,
        LAT_DEGREES,
        LAT_MINUTES,
        LAT_SECONDS,
    ];
}

const SPREADSHEET_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

/// A raw table cell, independent of the source format.
#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Empty,
    Number(f64),
    Text(String),
}

impl Cell {
    fn from_text(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(s.to_string())
        }
    }

    fn from_data(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Int(i) => Cell::Number(*i as f64),
            Data::Float(f) => Cell::Number(*f),
            Data::String(s) => Cell::from_text(s),
            other => Cell::from_text(&other.to_string()),
        }
    }

    /// The cell as a name. Numbers print without a trailing `.0`.
    fn as_name(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(f) if f.fract() == 0.0 => Some(format!("{}", *f as i64)),
            Cell::Number(f) => Some(f.to_string()),
        }
    }

    fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(f) => Some(*f),
            Cell::Text(s) => s.parse().ok(),
            Cell::Empty => None,
        }
    }

    /// Integral numbers only; spreadsheets store `65` as `65.0`.
    fn as_i32(&self) -> Option<i32> {
        let f = self.as_f64()?;
        if f.fract() == 0.0 && f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX) {
            Some(f as i32)
        } else {
            None
        }
    }

    fn describe(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Number(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// A header row plus data rows.
struct RawTable {
    header: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

/// Load the reference table at `path` and build the index.
///
/// Spreadsheet formats are chosen by extension; anything else is read as CSV.
pub fn load(path: impl AsRef<Path>) -> Result<GazetteerIndex, LoadError> {
    let path = path.as_ref();
    let table = if is_spreadsheet(path) {
        read_spreadsheet(path)?
    } else {
        read_csv(path)?
    };

    let raw_rows = table.rows.len();
    let rows = project(&table)?;
    let index = GazetteerIndex::from_rows(rows);

    info!(
        path = %path.display(),
        raw_rows,
        rows = index.len(),
        regions = index.regions().len(),
        "loaded gazetteer"
    );

    Ok(index)
}

fn is_spreadsheet(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            SPREADSHEET_EXTENSIONS
                .iter()
                .any(|s| s.eq_ignore_ascii_case(ext))
        })
}

fn read_csv(path: &Path) -> Result<RawTable, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let csv_err = |source: csv::Error| LoadError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);
    let header: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
        .collect();

    let mut rows: Vec<Vec<Cell>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_err)?;
        rows.push(record.iter().map(Cell::from_text).collect());
    }

    Ok(RawTable { header, rows })
}

fn read_spreadsheet(path: &Path) -> Result<RawTable, LoadError> {
    if !path.exists() {
        return Err(LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }

    let sheet_err = |message: String| LoadError::Spreadsheet {
        path: path.to_path_buf(),
        message,
    };

    let mut workbook = open_workbook_auto(path).map_err(|e| sheet_err(e.to_string()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| sheet_err("workbook has no worksheets".to_string()))?
        .map_err(|e| sheet_err(e.to_string()))?;

    let mut sheet_rows = range.rows();
    let header: Vec<String> = sheet_rows
        .next()
        .ok_or_else(|| LoadError::MissingHeader {
            path: path.to_path_buf(),
        })?
        .iter()
        .map(|c| Cell::from_data(c).describe())
        .collect();

    let rows: Vec<Vec<Cell>> = sheet_rows
        .map(|r| r.iter().map(Cell::from_data).collect())
        .collect();

    Ok(RawTable { header, rows })
}

/// Column positions of the required fields within the header.
struct ColumnMap {
    positions: [usize; 10],
}

impl ColumnMap {
    fn resolve(header: &[String]) -> Result<Self, LoadError> {
        let mut positions = [0; 10];
        for (slot, column) in positions.iter_mut().zip(columns::ALL) {
            *slot = header
                .iter()
                .position(|h| h == column)
                .ok_or(LoadError::MissingColumn { column })?;
        }
        Ok(Self { positions })
    }

    fn cell<'a>(&self, row: &'a [Cell], column: usize) -> &'a Cell {
        row.get(self.positions[column]).unwrap_or(&EMPTY_CELL)
    }
}

/// Reduce the raw table to reference rows.
fn project(table: &RawTable) -> Result<Vec<ReferenceRow>, LoadError> {
    let map = ColumnMap::resolve(&table.header)?;
    let mut out = Vec::with_capacity(table.rows.len());

    for (i, raw) in table.rows.iter().enumerate() {
        // 1-based, counting data rows only
        let row_number = i + 1;

        let Some(level1) = map.cell(raw, 0).as_name() else {
            debug!(row = row_number, "skipping row without level1 name");
            continue;
        };
        let level2 = map.cell(raw, 1).as_name();

        let int = |column: usize| {
            let cell = map.cell(raw, column);
            cell.as_i32().ok_or_else(|| LoadError::InvalidCell {
                row: row_number,
                column: columns::ALL[column],
                value: cell.describe(),
            })
        };
        let float = |column: usize| {
            let cell = map.cell(raw, column);
            cell.as_f64().ok_or_else(|| LoadError::InvalidCell {
                row: row_number,
                column: columns::ALL[column],
                value: cell.describe(),
            })
        };

        out.push(ReferenceRow {
            level1,
            level2,
            grid: GridPoint {
                x: int(2)?,
                y: int(3)?,
            },
            lon: Dms::new(float(4)?, float(5)?, float(6)?),
            lat: Dms::new(float(7)?, float(8)?, float(9)?),
        });
    }

    Ok(out)
}
