//! Unit tests for command paths, the registry, cooldowns and dispatch.
