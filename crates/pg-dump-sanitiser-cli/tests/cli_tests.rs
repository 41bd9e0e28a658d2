//! CLI integration tests for pg-dump-sanitiser.
//!
//! These tests verify command-line argument parsing, help output,
//! stdout contents and exit codes for each error category.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Get a command for the pg-dump-sanitiser binary.
fn cmd() -> Command {
    Command::cargo_bin("pg-dump-sanitiser").unwrap()
}

/// Write `content` to a temporary file that lives as long as the handle.
fn temp_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

const DUMP: &str = "\
--
-- PostgreSQL database dump
--

SET statement_timeout = 0;

CREATE TABLE public.b (
    id integer NOT NULL,
    a_id integer
);

CREATE TABLE public.a (
    id integer NOT NULL
);

CREATE TABLE public.gorp_migrations (
    id text NOT NULL
);

ALTER TABLE ONLY public.b
    ADD CONSTRAINT b_a_id_fkey FOREIGN KEY (a_id) REFERENCES public.a(id);
";

const CANONICAL: &str = "\
CREATE TABLE a (
    id integer NOT NULL
);

CREATE TABLE b (
    a_id integer,
    id integer NOT NULL,
    CONSTRAINT b_a_id_fkey FOREIGN KEY (a_id) REFERENCES a(id)
);
";

// =============================================================================
// Help and Version Tests
// =============================================================================

#[test]
fn test_help_shows_arguments() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("<FILE>"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_version_flag() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("pg-dump-sanitiser"));
}

#[test]
fn test_log_format_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--log-format"))
        .stdout(predicate::str::contains("[default: text]"));
}

#[test]
fn test_verbosity_flag_exists() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbosity"))
        .stdout(predicate::str::contains("[default: warn]"));
}

#[test]
fn test_missing_file_argument_shows_usage() {
    cmd()
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Usage:"));
}

// =============================================================================
// Output Tests
// =============================================================================

#[test]
fn test_canonical_output_on_stdout() {
    let dump = temp_file(DUMP);
    cmd()
        .arg(dump.path())
        .assert()
        .success()
        .stdout(CANONICAL);
}

#[test]
fn test_output_is_a_fixed_point() {
    let canonical = temp_file(CANONICAL);
    cmd()
        .arg(canonical.path())
        .assert()
        .success()
        .stdout(CANONICAL);
}

#[test]
fn test_logs_go_to_stderr() {
    let dump = temp_file(DUMP);
    cmd()
        .args(["--verbosity", "info", "--log-format", "json"])
        .arg(dump.path())
        .assert()
        .success()
        .stdout(CANONICAL)
        .stderr(predicate::str::contains("Sanitised dump"));
}

#[test]
fn test_config_excludes_tables() {
    let dump = temp_file(DUMP);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "excluded_tables: [gorp_migrations, a]").unwrap();

    cmd()
        .arg("-c")
        .arg(config.path())
        .arg(dump.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("CREATE TABLE b ("))
        .stdout(predicate::str::contains("CREATE TABLE a (").not());
}

// =============================================================================
// Exit Code Tests
// =============================================================================

#[test]
fn test_invalid_yaml_exits_with_code_1() {
    let dump = temp_file(DUMP);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "invalid: yaml: content: [").unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg(dump.path())
        .assert()
        .code(1); // EXIT_CONFIG_ERROR
}

#[test]
fn test_unknown_config_field_exits_with_code_1() {
    let dump = temp_file(DUMP);
    let mut config = NamedTempFile::new().unwrap();
    writeln!(config, "source:").unwrap();
    writeln!(config, "  kind: postgres").unwrap();

    cmd()
        .arg("--config")
        .arg(config.path())
        .arg(dump.path())
        .assert()
        .code(1);
}

#[test]
fn test_unknown_verbosity_exits_with_code_1() {
    let dump = temp_file(DUMP);
    cmd()
        .args(["--verbosity", "loud"])
        .arg(dump.path())
        .assert()
        .code(1);
}

#[test]
fn test_missing_constraint_column_exits_with_code_3() {
    let dump = temp_file(
        "CREATE TABLE t (\n    id integer\n);\n\
         ALTER TABLE ONLY t ADD CONSTRAINT t_pkey PRIMARY KEY (uuid);\n",
    );
    cmd()
        .arg(dump.path())
        .assert()
        .code(3) // EXIT_REFERENTIAL_ERROR
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("mapping constraints - column does not exist"));
}

#[test]
fn test_leftover_statement_exits_with_code_4() {
    let dump = temp_file("CREATE SCHEMA app;\n");
    cmd()
        .arg(dump.path())
        .assert()
        .code(4) // EXIT_INCOMPLETE_ERROR
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_foreign_key_cycle_exits_with_code_5() {
    let dump = temp_file(
        "CREATE TABLE a (\n    b_id integer\n);\n\
         CREATE TABLE b (\n    a_id integer\n);\n\
         ALTER TABLE ONLY a ADD CONSTRAINT a_b_fkey FOREIGN KEY (b_id) REFERENCES b(id);\n\
         ALTER TABLE ONLY b ADD CONSTRAINT b_a_fkey FOREIGN KEY (a_id) REFERENCES a(id);\n",
    );
    cmd()
        .arg(dump.path())
        .assert()
        .code(5) // EXIT_CYCLE_ERROR
        .stderr(predicate::str::contains("graph is not a dag"));
}

#[test]
fn test_unterminated_table_exits_with_code_6() {
    let dump = temp_file("CREATE TABLE t (\n    id integer\n");
    cmd().arg(dump.path()).assert().code(6); // EXIT_PARSE_ERROR
}

#[test]
fn test_missing_dump_exits_with_code_7() {
    // Missing file is an IO error (code 7), not config error (code 1)
    cmd()
        .arg("nonexistent_dump_file.sql")
        .assert()
        .code(7); // EXIT_IO_ERROR - file not found
}
