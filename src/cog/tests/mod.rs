//! Unit tests for cog names and lifecycle transitions.
