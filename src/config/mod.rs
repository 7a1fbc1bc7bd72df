// ABOUTME: Configuration management module for centralized client settings and parameters
// ABOUTME: Handles environment-driven configuration for the generative endpoint and document store
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//! Configuration module for the Pierre fitness client
//!
//! This module provides centralized configuration management:
//!
//! - **Environment**: Client configuration from environment variables
//!
//! Configuration is always passed to collaborators explicitly. Nothing in
//! this crate reads ambient module state at call time, which keeps the
//! remote call and the metrics engine testable without environment setup.

pub mod environment;

pub use environment::{ClientConfig, GeminiConfig, StoreConfig};
