//! Merge algorithms
//!
//! - `split_point`: closest common ancestor of two branch tips
//! - `resolution`: per-file three-way classification and conflict content

pub mod resolution;
pub mod split_point;
