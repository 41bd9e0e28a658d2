//! Redundancy filter: drops lines that carry no schema structure.

/// Whether a raw dump line should be dropped before mapping.
///
/// Rules, first match wins:
/// 1. empty or whitespace-only line
/// 2. first space-delimited token is `--` (comment) or `SET` (session setting)
/// 3. mentions `EXTENSION` or `OWNER`
/// 4. `SELECT pg_catalog.set_config(...)` session bookkeeping
pub fn is_redundant(line: &str) -> bool {
    if line.trim().is_empty() {
        return true;
    }

    let first = line.split(' ').next().unwrap_or_default();
    if first == "--" || first == "SET" {
        return true;
    }

    if line.contains("EXTENSION") || line.contains("OWNER") {
        return true;
    }

    line.contains("SELECT pg_catalog.set_config")
}
