//! # Base types for arraychess
//!
//! This is an auxiliary crate for `arraychess`, which contains the value types and the board
//! geometry. It has no chess rules inside.
//!
//! Normally you don't want to use this crate directly. Use `arraychess` instead.

pub mod geometry;
pub mod types;
