//! Schema-qualifier handling for object names found in dump statements.
//!
//! `pg_dump` writes every object as `schema.name`. The canonical form drops the
//! qualifier so that dumps taken from different schemas compare equal. Only a
//! single level of qualification is understood: `a.b` splits into schema `a`
//! and name `b`, anything past the second segment is ignored.

/// Split a possibly qualified name into `(name, schema)`.
///
/// # Examples
///
/// ```
/// use pg_dump_sanitiser::core::identifier::split_qualifier;
///
/// assert_eq!(split_qualifier("public.users"), ("users", Some("public")));
/// assert_eq!(split_qualifier("users"), ("users", None));
/// ```
pub fn split_qualifier(name: &str) -> (&str, Option<&str>) {
    let mut parts = name.split('.');
    let first = parts.next().unwrap_or_default();
    match parts.next() {
        Some(second) => (second, Some(first)),
        None => (first, None),
    }
}

/// The unqualified part of a name.
pub fn unqualified(name: &str) -> &str {
    split_qualifier(name).0
}

/// Remove every `schema.` prefix from a statement.
///
/// The replacement is textual, so qualifiers inside string literals
/// (`'public.seq'::regclass`) are stripped too.
pub fn strip_qualifier(statement: &str, schema: Option<&str>) -> String {
    match schema {
        Some(schema) if !schema.is_empty() => statement.replace(&format!("{}.", schema), ""),
        _ => statement.to_string(),
    }
}

/// Owning table of an `OWNED BY` target such as `public.users.id`.
///
/// Targets with more than one `.` carry a schema segment, which is skipped.
pub fn owned_by_table(target: &str) -> &str {
    let segments: Vec<&str> = target.split('.').collect();
    if segments.len() > 2 {
        segments[1]
    } else {
        segments[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_qualifier() {
        assert_eq!(split_qualifier("public.users"), ("users", Some("public")));
        assert_eq!(split_qualifier("users"), ("users", None));
        assert_eq!(split_qualifier("a.b.c"), ("b", Some("a")));
    }

    #[test]
    fn test_strip_qualifier() {
        assert_eq!(
            strip_qualifier("nextval('public.seq'::regclass)", Some("public")),
            "nextval('seq'::regclass)"
        );
        assert_eq!(strip_qualifier("public.t", None), "public.t");
        assert_eq!(strip_qualifier("public.t", Some("")), "public.t");
    }

    #[test]
    fn test_owned_by_table() {
        assert_eq!(owned_by_table("users.id"), "users");
        assert_eq!(owned_by_table("public.users.id"), "users");
        assert_eq!(owned_by_table("users"), "users");
    }
}
