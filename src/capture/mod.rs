//! Scanning of operator-capture training logs.

pub mod fallback;
pub mod parse;
pub mod record;

pub use fallback::scan_fallbacks;
pub use parse::scan_operators;
pub use record::InvocationRecord;

/// Extract every invocation record from a log: operator blocks in log order,
/// followed by one record per distinct fallback operator.
pub fn capture_records(text: &str) -> anyhow::Result<Vec<InvocationRecord>> {
    let mut records: Vec<InvocationRecord> = scan_operators(text)?.collect();
    records.extend(scan_fallbacks(text)?);
    Ok(records)
}
