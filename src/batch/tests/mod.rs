//! Unit tests for compound splitting and batch execution.
