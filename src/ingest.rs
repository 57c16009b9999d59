//! CSV ingestion.
//!
//! Reads an attendance export into [`RawRecord`]s. Header names are trimmed
//! and lower-cased before anything else looks at them, every required column
//! must be present, and blank cells become `None`.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::{DimensionTags, RawRecord};

/// Columns every attendance export must carry, in normalized form.
pub const REQUIRED_COLUMNS: [&str; 13] = [
    "tanggal",
    "employee_id",
    "checkin_date_get",
    "checkin_time_get",
    "checkout_date_get",
    "checkout_time_get",
    "dir_title",
    "type_work_name",
    "pos_grade",
    "komp_title",
    "kategori_jabatan",
    "generasi",
    "jk_keterangan_name",
];

/// Row layout after header normalization.
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    employee_id: Option<String>,
    tanggal: Option<String>,
    checkin_date_get: Option<String>,
    checkin_time_get: Option<String>,
    checkout_date_get: Option<String>,
    checkout_time_get: Option<String>,
    dir_title: Option<String>,
    type_work_name: Option<String>,
    pos_grade: Option<String>,
    komp_title: Option<String>,
    kategori_jabatan: Option<String>,
    generasi: Option<String>,
    jk_keterangan_name: Option<String>,
}

impl From<CsvRow> for RawRecord {
    fn from(row: CsvRow) -> Self {
        RawRecord {
            employee_id: row.employee_id,
            record_date: row.tanggal,
            checkin_date: row.checkin_date_get,
            checkin_time: row.checkin_time_get,
            checkout_date: row.checkout_date_get,
            checkout_time: row.checkout_time_get,
            tags: DimensionTags {
                directorate: row.dir_title,
                work_type: row.type_work_name,
                position_grade: row.pos_grade,
                compartment: row.komp_title,
                job_category: row.kategori_jabatan,
                generation: row.generasi,
                work_description: row.jk_keterangan_name,
            },
        }
    }
}

/// Lower-cases and trims a header name.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Reads attendance rows from any reader producing CSV text.
///
/// # Errors
///
/// - [`EngineError::MissingColumns`] when required columns are absent,
///   naming all of them
/// - [`EngineError::MalformedCsv`] for ragged rows or invalid UTF-8
///
/// # Example
///
/// ```
/// use attendance_engine::ingest::read_records;
///
/// let csv = "\
/// Tanggal, EMPLOYEE_ID ,checkin_date_get,checkin_time_get,checkout_date_get,checkout_time_get,dir_title,type_work_name,pos_grade,komp_title,kategori_jabatan,generasi,jk_keterangan_name
/// 2024-01-01,E1,2024-01-01,08:00:00,2024-01-01,17:00:00,Ops,Office,G1,K1,Staff,Gen Z,Regular
/// ";
/// let records = read_records(csv.as_bytes()).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].employee_id.as_deref(), Some("E1"));
/// ```
pub fn read_records<R: Read>(reader: R) -> EngineResult<Vec<RawRecord>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader.headers().map_err(malformed)?.clone();
    let normalized: StringRecord = headers.iter().map(normalize_column_name).collect();
    check_required_columns(&normalized)?;
    debug!(columns = normalized.len(), "Attendance headers normalized");
    csv_reader.set_headers(normalized);

    let mut records = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        let row = row.map_err(malformed)?;
        records.push(RawRecord::from(row));
    }

    info!(rows = records.len(), "Attendance file read");
    Ok(records)
}

/// Reads attendance rows from a file on disk.
pub fn read_records_from_path<P: AsRef<Path>>(path: P) -> EngineResult<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|_| EngineError::InputNotFound {
        path: path.display().to_string(),
    })?;
    read_records(file)
}

fn check_required_columns(headers: &StringRecord) -> EngineResult<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == **required))
        .map(|required| required.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::MissingColumns { columns: missing })
    }
}

fn malformed(error: csv::Error) -> EngineError {
    let line = error.position().map(|p| p.line()).unwrap_or(0);
    EngineError::MalformedCsv {
        line,
        message: error.to_string(),
    }
}
