//! Statement squasher: one logical statement per line.

/// Merge statements spanning several lines into single lines.
///
/// Lines are appended (trimmed, separated by one space) until the accumulated
/// text ends with `;`. A final statement without a terminator is emitted as
/// it stands.
pub fn squash_statements(lines: Vec<String>) -> Vec<String> {
    let mut statements = Vec::with_capacity(lines.len());
    let mut lines = lines.into_iter();

    while let Some(line) = lines.next() {
        let mut statement = line.trim_end().to_string();
        while !statement.ends_with(';') {
            match lines.next() {
                Some(next) => {
                    statement.push(' ');
                    statement.push_str(next.trim());
                }
                None => break,
            }
        }
        statements.push(statement);
    }

    statements
}
