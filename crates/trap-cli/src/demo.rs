//! Built-in demo suites exercising every assertion shape
//!
//! The first entity passes everything; the second collects one recoverable
//! failure per shape so the report has something to show.

use std::panic::panic_any;
use trap_runtime::{Registry, RegistryError};

pub fn register(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register_entity("My test 1");
    registry.register_case("all passed", |t| {
        t.check(true);
        t.require(true);
        t.check_false(false);
        t.require_false(false);
        t.check_nothrow(|| {});
        t.require_nothrow(|| {});
        t.check_throws(|| panic_any(5_i32));
        t.require_throws(|| panic_any(5_i32));
        t.check_throws_as::<i32>(|| panic_any(5_i32));
        t.require_throws_as::<i32>(|| panic_any(5_i32));
        t.check_throws_with(|| panic!("aaa"), "aaa");
        t.require_throws_with(|| panic!("aaa"), "aaa");
    })?;

    registry.register_entity("My test 2");
    registry.register_case("all checks failed", |t| {
        t.check(false);
        t.check_false(true);
        t.check_nothrow(|| panic_any(5_i32));
        t.check_nothrow(|| panic!("runtime error message"));
        t.check_throws(|| {});
        t.check_throws_as::<f32>(|| panic_any(5_i32));
        t.check_throws_as::<i32>(|| panic!("runtime error message"));
        t.check_throws_as::<i32>(|| {});
        t.check_throws_with(|| panic!("aaa"), "bbb");
    })?;

    registry.register_case("some passed", |t| {
        t.check(true);
        t.check(true);
        t.check_false(false);
    })?;

    Ok(())
}
