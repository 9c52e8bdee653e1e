//! Shared helpers for the reward farm contracts.
//!
//! This crate provides:
//! - [`fixed_point`]: scaled-integer `mul_div` with a 256-bit intermediate
//!   and explicit floor rounding.
//! - [`ownable`]: single-owner storage with a two-phase handoff.

#![no_std]

pub mod fixed_point;
pub mod ownable;

pub use fixed_point::*;
pub use ownable::*;
