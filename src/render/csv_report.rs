use crate::model::AggregateRow;
use crate::Result;
use anyhow::Context;
use std::path::Path;

/// Write aggregated rows to `path` as CSV.
///
/// The header comes from the row field names: `aten_name,diopi_fun,args,count`.
/// An empty row list touches nothing on disk and returns `Ok(false)`.
pub fn write_csv_report(path: &Path, rows: &[AggregateRow]) -> Result<bool> {
    if rows.is_empty() {
        return Ok(false);
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create report file {}", path.display()))?;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("write report row to {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("flush report file {}", path.display()))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn row(op: &str, fun: &str, sig: &str, count: u64) -> AggregateRow {
        AggregateRow {
            operator_name: op.to_string(),
            resolved_function_name: fun.to_string(),
            normalized_signature: sig.to_string(),
            count,
        }
    }

    #[test]
    fn empty_rows_create_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ops.csv");
        assert!(!write_csv_report(&out, &[]).unwrap());
        assert!(!out.exists());
    }

    #[test]
    fn writes_header_then_rows() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ops.csv");
        let rows = vec![
            row("add", "dipu_add", "['self:[ sizes:@[2@, 3]] ']", 3),
            row("aten::foo", "fallback", "no", 1),
        ];
        assert!(write_csv_report(&out, &rows).unwrap());

        let text = fs::read_to_string(&out).unwrap();
        assert_eq!(
            text,
            "aten_name,diopi_fun,args,count\n\
             add,dipu_add,\"['self:[ sizes:@[2@, 3]] ']\",3\n\
             aten::foo,fallback,no,1\n"
        );
    }

    #[test]
    fn overwrites_existing_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("ops.csv");
        fs::write(&out, "stale contents that are longer than the new report\n").unwrap();
        write_csv_report(&out, &[row("relu", "dipu_relu", "[]", 1)]).unwrap();
        assert_eq!(
            fs::read_to_string(&out).unwrap(),
            "aten_name,diopi_fun,args,count\nrelu,dipu_relu,[],1\n"
        );
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("missing").join("ops.csv");
        let err = write_csv_report(&out, &[row("relu", "dipu_relu", "[]", 1)]).unwrap_err();
        assert!(err.to_string().contains("create report file"));
    }
}
