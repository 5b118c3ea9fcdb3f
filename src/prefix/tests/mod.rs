//! Unit tests for prefix validation, matching and caching.
