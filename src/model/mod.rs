//! Aggregation model: group invocation records by operator and normalized
//! argument signature, counting occurrences.

pub mod signature;

pub use signature::SignatureNormalizer;

use crate::capture::InvocationRecord;
use crate::Result;
use indexmap::IndexMap;
use serde::Serialize;

/// One report row: a distinct argument shape of one operator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    #[serde(rename = "aten_name")]
    pub operator_name: String,
    #[serde(rename = "diopi_fun")]
    pub resolved_function_name: String,
    #[serde(rename = "args")]
    pub normalized_signature: String,
    pub count: u64,
}

/// An operator whose records disagreed on the resolved function name.
/// The rows keep the first-seen name; these are reported alongside.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolutionCollision {
    pub operator_name: String,
    pub kept: String,
    pub conflicting: String,
    pub occurrences: u64,
}

/// Report rows plus resolution collisions found while grouping.
#[derive(Debug, Clone, Default)]
pub struct Aggregate {
    pub rows: Vec<AggregateRow>,
    pub collisions: Vec<ResolutionCollision>,
}

#[derive(Debug)]
struct OperatorEntry {
    resolved_function_name: String,
    signatures: IndexMap<String, u64>,
    conflicts: IndexMap<String, u64>,
}

/// Deduplicate records. Operators and signatures keep first-seen order.
pub fn aggregate(records: &[InvocationRecord]) -> Result<Aggregate> {
    let normalizer = SignatureNormalizer::new()?;
    let mut operators: IndexMap<String, OperatorEntry> = IndexMap::new();

    for rec in records {
        let signature = normalizer.normalize(&rec.arguments.to_text());
        let entry = operators
            .entry(rec.operator_name.trim().to_string())
            .or_insert_with(|| OperatorEntry {
                resolved_function_name: rec.resolved_function_name.clone(),
                signatures: IndexMap::new(),
                conflicts: IndexMap::new(),
            });

        if entry.resolved_function_name != rec.resolved_function_name {
            *entry
                .conflicts
                .entry(rec.resolved_function_name.clone())
                .or_insert(0) += 1;
        }
        *entry.signatures.entry(signature).or_insert(0) += 1;
    }

    let mut out = Aggregate::default();
    for (name, entry) in operators {
        for (signature, count) in entry.signatures {
            out.rows.push(AggregateRow {
                operator_name: name.clone(),
                resolved_function_name: entry.resolved_function_name.clone(),
                normalized_signature: signature,
                count,
            });
        }
        for (conflicting, occurrences) in entry.conflicts {
            out.collisions.push(ResolutionCollision {
                operator_name: name.clone(),
                kept: entry.resolved_function_name.clone(),
                conflicting,
                occurrences,
            });
        }
    }

    Ok(out)
}
