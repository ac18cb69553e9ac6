// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! Per-string match scores come from the matcher. This module folds them into
//! one number per item and orders items by it. Lower is better throughout:
//! 0 is a perfect match, 1 is no match at all.

mod core;
pub mod ranking;

pub use core::*;
