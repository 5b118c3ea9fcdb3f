//! Contest submissions and ratings.
//!
//! Members submit entries as structured responses; each entry gets a unique
//! six-digit [`domain::SubmissionId`]. Ratings are bounded by the guild's
//! maximum rating, which defaults to [`domain::DEFAULT_MAX_RATING`].

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
