//! Unit tests for gateway types and adapters.
