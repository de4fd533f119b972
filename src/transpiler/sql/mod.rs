//! Built-in dialect generators.

pub mod mysql;
pub mod postgis;
pub mod sqlite;
pub mod sqlserver;

/// `NAME(a, b, ...)`.
pub(crate) fn call(name: &str, args: &[String]) -> String {
    format!("{}({})", name, args.join(", "))
}
