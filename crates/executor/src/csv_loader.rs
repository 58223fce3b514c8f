use csv::ReaderBuilder;
use serde::Deserialize;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use super::error::Error;
use common::types::RateEdge;

// Helper struct for CSV parsing; columns other than these are ignored.
#[derive(Debug, Deserialize)]
pub struct CsvRecord {
    #[serde(rename = "from")]
    pub from_node: String,

    #[serde(rename = "to")]
    pub to_node: String,

    #[serde(rename = "rate")]
    pub rate_value: f64,
}

/// Reads a `from,to,rate` edge list with a header row.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        CsvLoader {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load(&self) -> Result<Vec<RateEdge<String>>, Error> {
        let file = File::open(&self.path).map_err(|e| {
            error!(path = %self.path.display(), error = %e, "Failed to open edge list.");
            Error::IoError(e)
        })?;

        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let mut edges = Vec::new();
        for result in rdr.deserialize() {
            let record: CsvRecord = result?;
            edges.push((record.from_node, record.to_node, record.rate_value));
        }

        info!(path = %self.path.display(), edges = edges.len(), "Loaded edge list.");
        Ok(edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MOCK_CSV_CONTENT: &str = "\
id,from,to,rate,pool_id,kind
1,USD,EUR,0.92,10001,F
2,EUR,GBP,0.86,10002,F
3,GBP,USD,1.27,10003,F
4,JPY,USD,0.0067,10004,F
";

    fn write_csv(content: &str) -> NamedTempFile {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
        temp_file
            .write_all(content.as_bytes())
            .expect("Failed to write mock content");
        temp_file
    }

    #[test]
    fn test_load_edges_success() {
        let temp_file = write_csv(MOCK_CSV_CONTENT);

        let result = CsvLoader::new(temp_file.path()).load();
        assert!(
            result.is_ok(),
            "Parsing failed with error: {:?}",
            result.err()
        );

        let edges = result.unwrap();
        let expected_edges: Vec<RateEdge<String>> = vec![
            ("USD".into(), "EUR".into(), 0.92),
            ("EUR".into(), "GBP".into(), 0.86),
            ("GBP".into(), "USD".into(), 1.27),
            ("JPY".into(), "USD".into(), 0.0067),
        ];

        assert_eq!(edges, expected_edges, "Parsed edges do not match expected data.");
    }

    #[test]
    fn test_whitespace_around_fields_is_trimmed() {
        let temp_file = write_csv("from, to, rate\n a , b , 1.5\n");

        let edges = CsvLoader::new(temp_file.path()).load().unwrap();
        assert_eq!(edges, vec![("a".to_string(), "b".to_string(), 1.5)]);
    }

    #[test]
    fn test_bad_rate_is_csv_error() {
        let temp_file = write_csv("from,to,rate\na,b,not-a-number\n");

        let result = CsvLoader::new(temp_file.path()).load();
        assert!(matches!(result, Err(Error::CsvError(_))));
    }

    #[test]
    fn test_load_file_not_found() {
        let result = CsvLoader::new("non_existent_file.csv").load();

        if let Err(Error::IoError(e)) = result {
            assert_eq!(e.kind(), std::io::ErrorKind::NotFound);
        } else {
            panic!("Expected IoError, got: {:?}", result);
        }
    }
}
