//! Reading the published sheet's CSV export into [`RawRow`]s.

use crate::error::CatalogError;
use crate::fields::RawRow;

/// Parses CSV text whose first record is the header row.
///
/// Quoted fields may contain commas, newlines and `""`-escaped quotes. Rows
/// shorter than the header are padded with empty cells and extra cells are
/// ignored. Blank lines and rows whose cells are all whitespace are dropped.
/// A record the reader cannot decode is logged and skipped.
///
/// # Errors
///
/// Returns [`CatalogError::Csv`] only if the header row itself is unreadable.
pub fn read_rows(text: &str) -> Result<Vec<RawRow>, CatalogError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CatalogError::Csv {
            context: "header row".to_string(),
            source: e,
        })?
        .iter()
        .enumerate()
        .map(|(idx, header)| {
            let header = if idx == 0 {
                header.trim_start_matches('\u{feff}')
            } else {
                header
            };
            header.trim().to_owned()
        })
        .collect();

    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(error) => {
                tracing::warn!(record = idx + 1, %error, "skipping unreadable CSV record");
                continue;
            }
        };

        if record.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        rows.push(RawRow::from_pairs(headers.iter().enumerate().map(
            |(col, header)| (header.clone(), record.get(col).unwrap_or_default().to_owned()),
        )));
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Field;

    #[test]
    fn reads_header_and_rows() {
        let rows = read_rows("id,name,price\nA1,Dress,499\nA2,Top,299\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].lookup(Field::Id), "A1");
        assert_eq!(rows[1].lookup(Field::Name), "Top");
    }

    #[test]
    fn quoted_fields_keep_commas_and_quotes() {
        let text = "id,name,sizes\nA1,\"Dress, \"\"Festive\"\" edit\",\"S,M,L\"\n";
        let rows = read_rows(text).unwrap();
        assert_eq!(rows[0].lookup(Field::Name), "Dress, \"Festive\" edit");
        assert_eq!(rows[0].lookup(Field::Sizes), "S,M,L");
    }

    #[test]
    fn quoted_fields_may_span_lines() {
        let text = "id,description\nA1,\"Line one\nLine two\"\n";
        let rows = read_rows(text).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lookup(Field::Description), "Line one\nLine two");
    }

    #[test]
    fn blank_and_empty_rows_are_dropped() {
        let text = "id,name\r\n\r\nA1,Dress\r\n,\r\n   \r\nA2,Top\r\n";
        let rows = read_rows(text).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn short_rows_are_padded() {
        let rows = read_rows("id,name,price\nA1\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lookup(Field::Name), "");
        assert_eq!(rows[0].cell("price"), Some(""));
    }

    #[test]
    fn long_rows_ignore_extra_cells() {
        let rows = read_rows("id,name\nA1,Dress,surplus\n").unwrap();
        assert_eq!(rows[0].lookup(Field::Name), "Dress");
    }

    #[test]
    fn headers_are_trimmed_and_bom_stripped() {
        let rows = read_rows("\u{feff}ID , Name \nA1,Dress\n").unwrap();
        assert_eq!(rows[0].lookup(Field::Id), "A1");
        assert_eq!(rows[0].lookup(Field::Name), "Dress");
    }

    #[test]
    fn empty_document_has_no_rows() {
        assert!(read_rows("").unwrap().is_empty());
        assert!(read_rows("id,name\n").unwrap().is_empty());
    }
}
