// Copyright (c) 2025-2026 jenq contributors
//
// SPDX-License-Identifier: Apache-2.0
//!
//! `jenq-tools` — the tool surface of the jenq server.
//!
//! Every tool wraps one façade operation from `jenq-core`, renders its
//! result as plain text, and opens a fresh Jenkins connection per
//! invocation through the injected [`jenq_client::ClientFactory`].
//! The [`ToolRegistry`] dispatches by name and logs each call.

mod registry;
mod tool;

pub mod builtin;

pub use registry::{ToolRegistry, ToolSchema};
pub use tool::{Tool, ToolCall, ToolOutput};
