//! Unit tests for response rendering and the inline body rule.

mod body_tests;
