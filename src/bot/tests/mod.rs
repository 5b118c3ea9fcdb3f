//! Unit tests for bot assembly, startup and background tasks.
