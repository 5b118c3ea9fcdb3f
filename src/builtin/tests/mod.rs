//! Unit tests for the built-in commands.

mod cogs_tests;
mod domain_tests;
mod help_tests;
mod misc_tests;
