//! Unit tests for the contest context.

mod domain_tests;
mod service_tests;
