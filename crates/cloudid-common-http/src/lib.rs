// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Shared HTTP utilities for cloudid.
//!
//! This crate provides:
//! - A pre-configured `reqwest` client builder with a consistent User-Agent
//! - Retry with exponential backoff for transient tenant API failures

mod client;
mod retry;

pub use client::{builder, user_agent};
pub use retry::{is_retryable_status, retry, RetryConfig, RetryableError};
