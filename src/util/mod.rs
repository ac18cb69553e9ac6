// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Small helpers shared by the matcher and the index.

pub mod normalize;
