//! Function extractor: `CREATE FUNCTION` blocks are kept verbatim.
//!
//! Runs on raw lines so that function bodies keep their layout. A block ends
//! at the line closing the body's dollar quote (`$$;` for the usual `$$` tag),
//! or, for bodies without a dollar quote, at the first line ending in `;`.

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::core::identifier::{split_qualifier, strip_qualifier};
use crate::error::{Result, SanitiseError};
use crate::parse::tokens;

static DOLLAR_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$(?:[A-Za-z_][A-Za-z_0-9]*)?\$").expect("valid dollar-tag regex"));

/// Tracks the dollar quote of the function currently being captured.
#[derive(Debug, Default)]
struct Capture {
    tag: Option<String>,
}

impl Capture {
    /// Feed one captured line; returns true when it ends the function.
    fn finishes(&mut self, line: &str) -> bool {
        let line = line.trim();
        match &self.tag {
            Some(tag) => line.ends_with(&format!("{};", tag)),
            None => match DOLLAR_TAG.find(line) {
                Some(found) => {
                    let tag = found.as_str().to_string();
                    let closed_inline =
                        line.matches(tag.as_str()).count() >= 2 && line.ends_with(&format!("{};", tag));
                    self.tag = Some(tag);
                    closed_inline
                }
                None => line.ends_with(';'),
            },
        }
    }
}

pub(crate) fn starts_function(line: &str) -> bool {
    line.contains("CREATE FUNCTION") || line.contains("CREATE OR REPLACE FUNCTION")
}

/// Move every function block into `functions` and return the other lines.
pub fn extract_functions(lines: Vec<String>, functions: &mut Vec<String>) -> Result<Vec<String>> {
    let mut remaining = Vec::with_capacity(lines.len());
    let mut capture: Option<(String, Capture)> = None;

    for line in lines {
        if let Some((_, current)) = capture.as_mut() {
            let done = current.finishes(&line);
            functions.push(line);
            if done {
                capture = None;
            }
            continue;
        }

        if !starts_function(&line) {
            remaining.push(line);
            continue;
        }

        let qualified = tokens::function_name(&line)
            .ok_or_else(|| SanitiseError::parse(line.as_str(), "CREATE FUNCTION without a name"))?;
        let (name, schema) = split_qualifier(qualified);
        let name = name.to_string();
        let definition = strip_qualifier(&line, schema);

        let mut current = Capture::default();
        let done = current.finishes(&definition);
        debug!("Extracting function {}", name);
        functions.push(definition);
        if !done {
            capture = Some((name, current));
        }
    }

    if let Some((name, _)) = capture {
        return Err(SanitiseError::parse(
            format!("CREATE FUNCTION {}", name),
            "function body is not terminated",
        ));
    }

    Ok(remaining)
}
