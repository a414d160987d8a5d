use std::io;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use thiserror::Error;

use super::model::{CellValue, Column, Dataset, Row};
use super::schema::Schema;

/// Encoding label used when none is configured.
pub const DEFAULT_ENCODING: &str = "latin1";

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("CSV file not found: {}", .0.display())]
    FileNotFound(PathBuf),
    #[error("reading {}: {message}", path.display())]
    Io { path: PathBuf, message: String },
    #[error("unknown text encoding '{0}'")]
    UnknownEncoding(String),
    #[error("malformed CSV at record {record}: {message}")]
    Csv { record: u64, message: String },
    #[error("required column '{0}' is missing")]
    MissingColumn(String),
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a streaming dataset from a comma-delimited file.
///
/// The file is decoded with the encoding named by `encoding` (a WHATWG label
/// such as `latin1` or `utf-8`), validated against [`Schema::streaming`], and
/// the numeric columns are cleaned cell by cell.
pub fn load(path: &Path, encoding: &str) -> Result<Dataset, LoadError> {
    let encoding = Encoding::for_label(encoding.trim().as_bytes())
        .ok_or_else(|| LoadError::UnknownEncoding(encoding.to_string()))?;

    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::FileNotFound(path.to_path_buf()),
        _ => LoadError::Io { path: path.to_path_buf(), message: e.to_string() },
    })?;

    // `decode` sniffs and strips a BOM, switching to UTF-8/16 when it finds one.
    let (text, used, had_errors) = encoding.decode(&bytes);
    if had_errors {
        log::warn!("{}: some bytes were not valid {}", path.display(), used.name());
    }

    parse_csv(&text, &Schema::streaming())
}

/// Parse decoded CSV text into a [`Dataset`].
pub fn parse_csv(text: &str, schema: &Schema) -> Result<Dataset, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(e, 0))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let layout = schema.resolve(&headers)?;

    let columns: Vec<Column> = headers
        .iter()
        .map(|name| Column { name: name.clone(), kind: schema.kind_of(name) })
        .collect();

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| csv_error(e, row_no as u64 + 1))?;

        if record.len() > columns.len() {
            log::warn!(
                "CSV record {}: {} fields for {} columns, extra fields dropped",
                row_no + 1,
                record.len(),
                columns.len()
            );
        }

        let cells = columns
            .iter()
            .enumerate()
            .map(|(col_idx, column)| match record.get(col_idx) {
                Some(raw) => CellValue::parse(raw, column.kind),
                None => CellValue::Absent,
            })
            .collect();

        rows.push(Row { cells });
    }

    Ok(Dataset::from_rows(columns, rows, layout))
}

fn csv_error(err: csv::Error, fallback_record: u64) -> LoadError {
    let record = err
        .position()
        .map(|p| p.record())
        .unwrap_or(fallback_record);
    LoadError::Csv { record, message: err.to_string() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "Track,Album Name,Artist,Spotify Streams,TikTok Views,Track Score\n\
        MILLION DOLLAR BABY,Million Dollar Baby,Tommy Richman,\"390,470,936\",\"5,332,281,936\",725.4\n\
        Not Like Us,Not Like Us,Kendrick Lamar,\"323,703,884\",N/A,545.9\n\
        i like the way you kiss me,I like the way you kiss me,Artemas,\"601,309,283\",\"208,339,025\",538.4\n";

    fn write_fixture(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, bytes).expect("write fixture");
        path
    }

    #[test]
    fn loads_and_cleans_numeric_columns() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_fixture(dir.path(), "songs.csv", SAMPLE.as_bytes());

        let ds = load(&path, DEFAULT_ENCODING).expect("load");
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.track(0), "MILLION DOLLAR BABY");
        assert_eq!(ds.artist(1), "Kendrick Lamar");
        assert_eq!(ds.spotify_streams(0), Some(390_470_936.0));
        assert_eq!(ds.tiktok_views(0), Some(5_332_281_936.0));
        assert_eq!(ds.spotify_streams(2), Some(601_309_283.0));
    }

    #[test]
    fn unparseable_cell_does_not_abort_load() {
        let ds = parse_csv(SAMPLE, &Schema::streaming()).expect("parse");
        assert_eq!(ds.tiktok_views(1), None);
        assert_eq!(ds.rows[1].cells[4], CellValue::Absent);
        // The rest of the row and the following rows are intact.
        assert_eq!(ds.spotify_streams(1), Some(323_703_884.0));
        assert_eq!(ds.tiktok_views(2), Some(208_339_025.0));
    }

    #[test]
    fn numeric_columns_never_hold_text() {
        let ds = parse_csv(SAMPLE, &Schema::streaming()).expect("parse");
        for row in &ds.rows {
            for idx in [3, 4] {
                assert!(matches!(row.cells[idx], CellValue::Float(_) | CellValue::Absent));
            }
        }
    }

    #[test]
    fn other_columns_are_kept_with_inferred_types() {
        let ds = parse_csv(SAMPLE, &Schema::streaming()).expect("parse");
        let names: Vec<&str> = ds.column_names().collect();
        assert_eq!(
            names,
            ["Track", "Album Name", "Artist", "Spotify Streams", "TikTok Views", "Track Score"]
        );
        assert_eq!(ds.rows[0].cells[5], CellValue::Float(725.4));
        assert_eq!(ds.rows[0].cells[1], CellValue::Text("Million Dollar Baby".to_string()));
    }

    #[test]
    fn missing_file_is_file_not_found() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nope.csv");
        assert_eq!(load(&path, DEFAULT_ENCODING), Err(LoadError::FileNotFound(path)));
    }

    #[test]
    fn decodes_windows_1252_bytes() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_fixture(
            dir.path(),
            "latin.csv",
            b"Track,Artist,Spotify Streams,TikTok Views\nDespech\xe1,ROSAL\xcdA,\"1,000\",\"2,000\"\n",
        );

        let ds = load(&path, "latin1").expect("load");
        assert_eq!(ds.track(0), "Despechá");
        assert_eq!(ds.artist(0), "ROSALÍA");
        assert_eq!(ds.artists, vec!["ROSALÍA".to_string()]);
    }

    #[test]
    fn utf8_bom_is_stripped_from_first_header() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = write_fixture(
            dir.path(),
            "bom.csv",
            b"\xEF\xBB\xBFTrack,Artist\nA,B\n",
        );

        let ds = load(&path, "latin1").expect("load");
        assert_eq!(ds.columns[0].name, "Track");
        assert_eq!(ds.track(0), "A");
    }

    #[test]
    fn unknown_encoding_is_rejected() {
        let err = load(Path::new("whatever.csv"), "klingon").unwrap_err();
        assert_eq!(err, LoadError::UnknownEncoding("klingon".to_string()));
    }

    #[test]
    fn short_rows_are_padded_with_absent() {
        let ds = parse_csv(
            "Track,Artist,Spotify Streams,TikTok Views\nSolo,Someone\n",
            &Schema::streaming(),
        )
        .expect("parse");
        assert_eq!(ds.rows[0].cells.len(), 4);
        assert_eq!(ds.spotify_streams(0), None);
        assert_eq!(ds.tiktok_views(0), None);
    }

    #[test]
    fn missing_artist_column_fails_at_load() {
        let err = parse_csv("Track,Spotify Streams\nA,1\n", &Schema::streaming()).unwrap_err();
        assert_eq!(err, LoadError::MissingColumn("Artist".to_string()));
    }

    #[test]
    fn distinct_artists_keep_first_appearance_order() {
        let ds = parse_csv(
            "Track,Artist\nt1,Zed\nt2,Abe\nt3,Zed\nt4,Mia\n",
            &Schema::streaming(),
        )
        .expect("parse");
        assert_eq!(ds.artists, ["Zed", "Abe", "Mia"]);
    }
}
