use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::{SeekDataset, SeekSample};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a seek dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.json` – `[{ "distance": -12345, "time_s": 0.0041 }, ...]`
/// * anything else – CSV with a header row naming `distance` and `time_s`
///   (the native output of `seekscope measure`, which is often written to an
///   extensionless path such as `sda`)
pub fn load_file(path: &Path) -> Result<SeekDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "json" => load_json(path),
        _ => load_csv(path),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names; at least `distance` (signed
/// bytes) and `time_s` (seconds) must be present.  Extra columns are ignored.
/// A headers-only file is a valid empty dataset.
fn load_csv(path: &Path) -> Result<SeekDataset> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("opening CSV {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let distance_idx = headers
        .iter()
        .position(|h| h == "distance")
        .context("CSV missing 'distance' column")?;
    let time_idx = headers
        .iter()
        .position(|h| h == "time_s")
        .context("CSV missing 'time_s' column")?;

    let mut samples = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let distance = parse_distance(record.get(distance_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}, column 'distance'"))?;
        let time_s = parse_seconds(record.get(time_idx).unwrap_or(""))
            .with_context(|| format!("CSV row {row_no}, column 'time_s'"))?;

        samples.push(SeekSample { distance, time_s });
    }

    Ok(SeekDataset::from_samples(samples))
}

/// Distances are written as integers, but accept float notation too
/// (hand-edited files, other tools) and truncate.
fn parse_distance(s: &str) -> Result<i64> {
    let s = s.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Ok(i);
    }
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f as i64),
        _ => bail!("'{s}' is not a number"),
    }
}

fn parse_seconds(s: &str) -> Result<f64> {
    let s = s.trim();
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(f),
        _ => bail!("'{s}' is not a number"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default
/// `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "distance": 527433728, "time_s": 0.0132 },
///   { "distance": -88104960, "time_s": 0.0087 }
/// ]
/// ```
fn load_json(path: &Path) -> Result<SeekDataset> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading JSON {}", path.display()))?;
    let samples: Vec<SeekSample> =
        serde_json::from_str(&text).context("parsing JSON records")?;
    Ok(SeekDataset::from_samples(samples))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use pretty_assertions::assert_eq;
    use tempfile::NamedTempFile;

    use super::*;

    fn write_temp(contents: &str, suffix: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .expect("create temp file");
        file.write_all(contents.as_bytes()).expect("write temp file");
        file
    }

    #[test]
    fn loads_well_formed_csv() {
        let file = write_temp(
            "distance,time_s\n527433728,0.013200\n-88104960,0.008700\n0,0.000200\n",
            ".csv",
        );
        let ds = load_file(file.path()).expect("load");
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.samples[0].distance, 527433728);
        assert_eq!(ds.samples[1].distance, -88104960);
        assert_eq!(ds.samples[2].time_s, 0.0002);
    }

    #[test]
    fn extensionless_path_is_treated_as_csv() {
        let file = write_temp("distance,time_s\n4096,0.004\n", "");
        let ds = load_file(file.path()).expect("load");
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let file = write_temp(
            "run,distance,time_s,host\n1,4096,0.004,lab-3\n1,-4096,0.009,lab-3\n",
            ".csv",
        );
        let ds = load_file(file.path()).expect("load");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.samples[1].distance, -4096);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = write_temp("distance,elapsed\n4096,0.004\n", ".csv");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("time_s"), "got: {err:#}");

        let file = write_temp("offset,time_s\n4096,0.004\n", ".csv");
        let err = load_file(file.path()).unwrap_err();
        assert!(err.to_string().contains("distance"), "got: {err:#}");
    }

    #[test]
    fn headers_only_csv_is_an_empty_dataset() {
        let file = write_temp("distance,time_s\n", ".csv");
        let ds = load_file(file.path()).expect("load");
        assert!(ds.is_empty());
    }

    #[test]
    fn non_numeric_cell_is_an_error_with_row_context() {
        let file = write_temp("distance,time_s\n4096,fast\n", ".csv");
        let err = load_file(file.path()).unwrap_err();
        let msg = format!("{err:#}");
        assert!(msg.contains("row 0"), "got: {msg}");
        assert!(msg.contains("time_s"), "got: {msg}");
    }

    #[test]
    fn float_formatted_distance_is_truncated() {
        assert_eq!(parse_distance("1.25e3").expect("parse"), 1250);
        assert_eq!(parse_distance(" -4096 ").expect("parse"), -4096);
        assert!(parse_distance("NaN").is_err());
    }

    #[test]
    fn loads_json_records() {
        let file = write_temp(
            r#"[{"distance": 527433728, "time_s": 0.0132},
                {"distance": -88104960, "time_s": 0.0087}]"#,
            ".json",
        );
        let ds = load_file(file.path()).expect("load");
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.samples[0].distance, 527433728);
        assert_eq!(ds.samples[1].time_s, 0.0087);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let file = write_temp(r#"{"distance": 1}"#, ".json");
        assert!(load_file(file.path()).is_err());
    }
}
