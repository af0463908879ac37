use crate::model::ResolutionCollision;
use crate::Result;
use anyhow::Context;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Dump resolution collisions as a pretty-printed JSON array.
pub fn write_collisions(path: &Path, collisions: &[ResolutionCollision]) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("create collisions file {}", path.display()))?;
    let mut w = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut w, collisions)
        .with_context(|| format!("write collisions to {}", path.display()))?;
    writeln!(w)?;
    w.flush()
        .with_context(|| format!("flush collisions file {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collisions_round_trip_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("collisions.json");
        let collisions = vec![ResolutionCollision {
            operator_name: "copy_".to_string(),
            kept: "dipu_copy_".to_string(),
            conflicting: "dipu_copy_inp".to_string(),
            occurrences: 2,
        }];
        write_collisions(&out, &collisions).unwrap();

        let v: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(
            v,
            serde_json::json!([{
                "operator_name": "copy_",
                "kept": "dipu_copy_",
                "conflicting": "dipu_copy_inp",
                "occurrences": 2
            }])
        );
    }

    #[test]
    fn empty_list_is_still_written() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("collisions.json");
        write_collisions(&out, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "[]\n");
    }
}
