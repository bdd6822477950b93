use std::path::Path;

use crate::core::metadata::{FrameMetadata, MetadataValue};
use crate::core::pool::CalibrationPool;
use crate::core::types::HEADER_FILENAME;
use crate::parsing::ParseError;
use crate::utils::validation::{check_frame_limit, validate_identifier};

/// Accepted names for the identifier column
const IDENTIFIER_COLUMNS: [&str; 4] = ["filename", "file", "path", "id"];

/// Parse a TSV/CSV frame table: identifier column, then one column per field
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be read, or other parse errors
/// if the content is invalid.
pub fn parse_table_file(path: &Path, delimiter: char) -> Result<CalibrationPool, ParseError> {
    let content = std::fs::read_to_string(path)?;
    parse_table_text(&content, delimiter)
}

/// Parse TSV/CSV text with a header row naming the metadata fields
///
/// Cells are kept as text; empty cells become null.
///
/// # Errors
///
/// Returns `ParseError::InvalidFormat` if the header is missing or does not
/// start with an identifier column, or a row has more cells than the header,
/// `ParseError::DuplicateIdentifier` if an identifier repeats, or
/// `ParseError::TooManyFrames` if the limit is exceeded.
pub fn parse_table_text(text: &str, delimiter: char) -> Result<CalibrationPool, ParseError> {
    let mut rows = text
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty() && !line.trim_start().starts_with('#'));

    // First non-empty/non-comment line is the header
    let Some((_, header)) = rows.next() else {
        return Err(ParseError::InvalidFormat(
            "No header row found in table".to_string(),
        ));
    };
    let columns = parse_header(&split_fields(header, delimiter))?;

    let mut pool = CalibrationPool::new();
    for (i, line) in rows {
        let fields = split_fields(line, delimiter);

        // Line numbers in errors are 1-based for user friendliness
        let line_num = i + 1;

        if fields.len() > columns.len() {
            return Err(ParseError::InvalidFormat(format!(
                "Line {line_num} has {} fields but the header has {}",
                fields.len(),
                columns.len()
            )));
        }

        let id = fields[0];
        validate_identifier(id)
            .map_err(|e| ParseError::InvalidFormat(format!("Line {line_num}: {e}")))?;

        // Short rows leave trailing fields null
        let metadata: FrameMetadata = columns
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, name)| (name.clone(), cell_value(fields.get(col).copied())))
            .collect();

        if check_frame_limit(pool.len()).is_some() {
            return Err(ParseError::TooManyFrames(pool.len()));
        }

        pool.insert(id, metadata)
            .map_err(|dup| ParseError::DuplicateIdentifier(dup.0))?;
    }

    Ok(pool)
}

/// Copy of a table row's metadata with its identifier stored as `filename`
#[must_use]
pub fn with_filename(id: &str, metadata: &FrameMetadata) -> FrameMetadata {
    metadata.clone().with(HEADER_FILENAME, id)
}

fn split_fields(line: &str, delimiter: char) -> Vec<&str> {
    line.split(delimiter).map(str::trim).collect()
}

fn parse_header(fields: &[&str]) -> Result<Vec<String>, ParseError> {
    let first = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
    if !IDENTIFIER_COLUMNS.contains(&first.as_str()) {
        return Err(ParseError::InvalidFormat(format!(
            "First column must be one of {}, found '{first}'",
            IDENTIFIER_COLUMNS.join(", ")
        )));
    }

    // Field names are matched against normalized (lower-case) header keys
    let columns: Vec<String> = fields.iter().map(|f| f.to_lowercase()).collect();
    if let Some(blank) = columns.iter().position(String::is_empty) {
        return Err(ParseError::InvalidFormat(format!(
            "Header column {} has no name",
            blank + 1
        )));
    }

    Ok(columns)
}

fn cell_value(cell: Option<&str>) -> MetadataValue {
    match cell {
        None | Some("") => MetadataValue::Null,
        Some(text) => MetadataValue::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tsv_table() {
        let tsv = "filename\ttype\tcamera\texposureseconds\tsettemp
/cal/dark_300.fits\tDARK\tASI294MC\t300\t-10
/cal/bias.fits\tBIAS\tASI294MC\t\t-10
";
        let pool = parse_table_text(tsv, '\t').unwrap();
        assert_eq!(pool.len(), 2);

        let dark = pool.get("/cal/dark_300.fits").unwrap();
        assert_eq!(dark.get_f64("exposureseconds"), Some(300.0));
        assert_eq!(dark.get_f64("settemp"), Some(-10.0));

        let bias = pool.get("/cal/bias.fits").unwrap();
        assert_eq!(bias.get_f64("exposureseconds"), None);
        assert_eq!(bias.get("exposureseconds"), Some(&MetadataValue::Null));
    }

    #[test]
    fn test_parse_csv_table_keeps_row_order() {
        let csv = "path,type\nc.fits,FLAT\na.fits,FLAT\nb.fits,FLAT\n";
        let pool = parse_table_text(csv, ',').unwrap();
        let ids: Vec<&str> = pool.ids().collect();
        assert_eq!(ids, vec!["c.fits", "a.fits", "b.fits"]);
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let tsv = "# exported by normalizer
# second comment

FILENAME\tType\tFilter
flat_ha.fits\tFLAT\tHa

";
        let pool = parse_table_text(tsv, '\t').unwrap();
        assert_eq!(pool.len(), 1);
        let flat = pool.get("flat_ha.fits").unwrap();
        assert_eq!(flat.get_str("type").as_deref(), Some("FLAT"));
        assert_eq!(flat.get_str("filter").as_deref(), Some("Ha"));
    }

    #[test]
    fn test_short_row_fills_null() {
        let pool = parse_table_text("id,type,filter\nflat.fits,FLAT\n", ',').unwrap();
        let flat = pool.get("flat.fits").unwrap();
        assert_eq!(flat.get("filter"), Some(&MetadataValue::Null));
    }

    #[test]
    fn test_long_row_rejected() {
        let result = parse_table_text("id,type\nflat.fits,FLAT,extra\n", ',');
        assert!(
            matches!(result, Err(ParseError::InvalidFormat(msg)) if msg.contains("Line 2"))
        );
    }

    #[test]
    fn test_missing_identifier_header() {
        let result = parse_table_text("type,camera\nDARK,ASI294MC\n", ',');
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_blank_identifier_rejected() {
        let result = parse_table_text("id,type\n,DARK\n", ',');
        assert!(matches!(result, Err(ParseError::InvalidFormat(_))));
    }

    #[test]
    fn test_duplicate_identifier() {
        let result = parse_table_text("id,type\na.fits,DARK\na.fits,BIAS\n", ',');
        assert!(matches!(result, Err(ParseError::DuplicateIdentifier(_))));
    }

    #[test]
    fn test_empty_text_has_no_header() {
        assert!(matches!(
            parse_table_text("# only a comment\n", '\t'),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_header_only_is_empty_pool() {
        let pool = parse_table_text("filename\ttype\n", '\t').unwrap();
        assert!(pool.is_empty());
    }

    #[test]
    fn test_with_filename() {
        let meta = FrameMetadata::new().with("camera", "ASI294MC");
        let light = with_filename("light_001.fits", &meta);
        assert_eq!(light.get_str("filename").as_deref(), Some("light_001.fits"));
        assert_eq!(light.get_str("camera").as_deref(), Some("ASI294MC"));
    }
}
