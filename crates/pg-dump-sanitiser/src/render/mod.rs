//! Canonical text rendering of a [`Schema`].
//!
//! Output is made of blocks separated by a single blank line: standalone
//! sequences, one block per table in dependency order, functions, then
//! triggers. Empty blocks are skipped. The whole document is built in memory
//! so nothing is written when an earlier stage failed.

use crate::core::{Schema, Table};

const INDENT: &str = "    ";

/// Render one table with its owned sequences and indices.
///
/// ```text
/// CREATE SEQUENCE users_id_seq;
/// CREATE TABLE users (
///     id integer NOT NULL DEFAULT nextval('users_id_seq'::regclass),
///     email text,
///     CONSTRAINT users_pkey PRIMARY KEY (id)
/// );
/// ALTER SEQUENCE users_id_seq OWNED BY users.id;
/// CREATE UNIQUE INDEX users_email ON users USING btree (email);
/// ```
pub fn render_table(name: &str, table: &Table) -> String {
    let mut lines: Vec<String> = table.sequences.iter().map(|s| s.create.clone()).collect();

    let entries: Vec<String> = table
        .columns_in_print_order()
        .into_iter()
        .map(|(column, definition)| format!("{INDENT}{} {}", column, definition.statement))
        .chain(table.constraints.values().map(|body| format!("{INDENT}{}", body)))
        .collect();

    lines.push(format!("CREATE TABLE {} (", name));
    if !entries.is_empty() {
        lines.push(entries.join(",\n"));
    }
    lines.push(match &table.options {
        Some(options) => format!(") {};", options),
        None => ");".to_string(),
    });

    lines.extend(table.sequences.iter().map(|s| s.relation.clone()));
    lines.extend(table.indices.iter().cloned());
    lines.join("\n")
}

/// Render the schema, printing tables in `order`.
///
/// Names in `order` that are not registered are skipped; the sorter only
/// produces registered names.
pub fn render(schema: &Schema, order: &[String]) -> String {
    let mut blocks = Vec::with_capacity(order.len() + 3);
    blocks.push(schema.sequences.join("\n"));
    for name in order {
        if let Some(table) = schema.tables.get(name) {
            blocks.push(render_table(name, table));
        }
    }
    blocks.push(schema.functions.join("\n"));
    blocks.push(schema.triggers.join("\n"));

    let blocks: Vec<String> = blocks.into_iter().filter(|b| !b.is_empty()).collect();
    if blocks.is_empty() {
        return String::new();
    }
    let mut output = blocks.join("\n\n");
    output.push('\n');
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Sequence;

    #[test]
    fn test_simple_table() {
        let mut table = Table::new();
        table.add_column("id", "integer");
        table.add_column("name", "text");
        let mut schema = Schema::default();
        schema.tables.insert("t", table);

        assert_eq!(
            render(&schema, &["t".to_string()]),
            "CREATE TABLE t (\n    id integer,\n    name text\n);\n"
        );
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(render_table("t", &Table::new()), "CREATE TABLE t (\n);");
    }

    #[test]
    fn test_full_table_layout() {
        let mut table = Table::new();
        table.add_column("name", "text");
        table.add_column("id", "integer NOT NULL");
        table.add_column("a_id", "integer");
        table
            .add_constraint("test", "t_pkey", "CONSTRAINT t_pkey PRIMARY KEY (id)")
            .unwrap();
        table
            .add_constraint("test", "t_a_fkey", "CONSTRAINT t_a_fkey FOREIGN KEY (a_id) REFERENCES a(id)")
            .unwrap();
        table.sequences.push(Sequence {
            create: "CREATE SEQUENCE t_id_seq;".into(),
            relation: "ALTER SEQUENCE t_id_seq OWNED BY t.id;".into(),
        });
        table.indices.push("CREATE INDEX t_name ON t USING btree (name);".into());

        let expected = "\
CREATE SEQUENCE t_id_seq;
CREATE TABLE t (
    id integer NOT NULL,
    a_id integer,
    name text,
    CONSTRAINT t_a_fkey FOREIGN KEY (a_id) REFERENCES a(id),
    CONSTRAINT t_pkey PRIMARY KEY (id)
);
ALTER SEQUENCE t_id_seq OWNED BY t.id;
CREATE INDEX t_name ON t USING btree (name);";
        assert_eq!(render_table("t", &table), expected);
    }

    #[test]
    fn test_blocks_and_order() {
        let mut schema = Schema::default();
        schema.tables.insert("a", Table::new());
        schema.tables.insert("b", Table::new());
        schema.tables.insert("gorp_migrations", Table::new());
        schema.sequences.push("CREATE SEQUENCE counter;".into());
        schema.functions.push("CREATE FUNCTION f() RETURNS integer".into());
        schema.functions.push("    LANGUAGE sql AS $$ SELECT 1 $$;".into());
        schema.triggers.push("CREATE TRIGGER tr BEFORE UPDATE ON a FOR EACH ROW EXECUTE FUNCTION f();".into());

        let output = render(&schema, &["b".to_string(), "a".to_string()]);
        assert_eq!(
            output,
            "CREATE SEQUENCE counter;\n\n\
             CREATE TABLE b (\n);\n\n\
             CREATE TABLE a (\n);\n\n\
             CREATE FUNCTION f() RETURNS integer\n    LANGUAGE sql AS $$ SELECT 1 $$;\n\n\
             CREATE TRIGGER tr BEFORE UPDATE ON a FOR EACH ROW EXECUTE FUNCTION f();\n"
        );
    }

    #[test]
    fn test_table_options_on_closing_line() {
        let mut table = Table::new();
        table.add_column("logdate", "date NOT NULL");
        table.options = Some("PARTITION BY RANGE (logdate)".into());
        assert_eq!(
            render_table("measurement", &table),
            "CREATE TABLE measurement (\n    logdate date NOT NULL\n) PARTITION BY RANGE (logdate);"
        );
    }

    #[test]
    fn test_empty_schema() {
        assert_eq!(render(&Schema::default(), &[]), "");
    }
}
