//! Compilation tests per dialect, emulation, and dialect profiles.

mod mysql;
mod sqlite;
mod sqlserver;
