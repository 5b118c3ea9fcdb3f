//! Unit tests for guild settings adapters.
