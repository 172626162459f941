//! Canonical report format, asserted byte-for-byte

use pretty_assertions::assert_eq;
use trap_runtime::{ConsoleReporter, Registry, Session, VERSION};

fn run_to_string(registry: Registry) -> String {
    let mut session = Session::with_reporter(registry, ConsoleReporter::new(Vec::new()));
    session.run();
    String::from_utf8(session.into_reporter().into_inner()).unwrap()
}

fn banner() -> String {
    format!(
        "{}\ntrap v{VERSION} host application.\nRun with -? for options\n\n",
        "~".repeat(79)
    )
}

#[test]
fn test_all_passed_report_is_banner_and_summary_only() {
    let mut registry = Registry::new();
    registry.register_entity("My test 1");
    registry
        .register_case("all passed", |t| {
            t.check(true);
            t.require(true);
            t.check_false(false);
        })
        .unwrap();

    let output = run_to_string(registry);
    let expected = format!(
        "{}{}\nAll tests passed (3 assertions in 1 test cases)\n",
        banner(),
        "=".repeat(79)
    );
    assert_eq!(output, expected);
}

#[test]
fn test_failing_case_report_layout() {
    let mut registry = Registry::new();
    registry.register_entity("My test 1");
    registry.register_case("passing", |t| t.check(true)).unwrap();

    registry.register_entity("My test 2");
    // The call must start on the line right after `line!()` so the expected
    // locations below line up with what `#[track_caller]` records.
    let case_line = line!() + 1;
    registry.register_case("My case 2", |t| {
        t.check(false);
        t.require(false);
    }).unwrap();

    let output = run_to_string(registry);
    let file = file!();
    let expected = format!(
        "{banner}\
         {dashes}\nMy test 2\n{dashes}\n\
         {file}:{case_line}\n{dots}\n\n\
         {file}:{check_line}: FAILED:\n  CHECK( false )\n\n\
         {file}:{require_line}: FAILED:\n  REQUIRE( false )\n\n\
         {equals}\n\
         test cases: 2 | 1 passed | 1 failed\n\
         assertions: 3 | 1 passed | 2 failed\n",
        banner = banner(),
        dashes = "-".repeat(79),
        dots = ".".repeat(79),
        equals = "=".repeat(79),
        check_line = case_line + 1,
        require_line = case_line + 2,
    );
    assert_eq!(output, expected);
}

#[test]
fn test_entity_banner_printed_once_for_multiple_failing_cases() {
    let mut registry = Registry::new();
    registry.register_entity("My test 2");
    registry.register_case("first bad", |t| t.check(false)).unwrap();
    registry.register_case("second bad", |t| t.check(false)).unwrap();

    let output = run_to_string(registry);
    assert_eq!(output.matches("My test 2\n").count(), 1);
}

#[test]
fn test_failing_entities_print_in_registration_order() {
    let mut registry = Registry::new();
    registry.register_entity("Entity A");
    registry.register_case("a", |t| t.check(false)).unwrap();
    registry.register_entity("Entity B");
    registry.register_case("b", |t| t.check(false)).unwrap();

    let output = run_to_string(registry);
    let a_at = output.find("Entity A").expect("A's banner missing");
    let b_at = output.find("Entity B").expect("B's banner missing");
    assert!(a_at < b_at);
}

#[test]
fn test_passing_cases_print_nothing_between_banner_and_summary() {
    let mut registry = Registry::new();
    registry.register_entity("quiet");
    registry.register_case("one", |t| t.check(true)).unwrap();
    registry.register_case("two", |t| t.require(true)).unwrap();

    let output = run_to_string(registry);
    assert_eq!(
        output,
        format!(
            "{}{}\nAll tests passed (2 assertions in 2 test cases)\n",
            banner(),
            "=".repeat(79)
        )
    );
}
