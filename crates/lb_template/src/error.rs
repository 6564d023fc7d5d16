/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

use lb_core::NodeId;
use thiserror::Error;

/// Errors raised by filters. The traversal that runs them logs and skips
/// them, so they never reach the caller of a filtering pass.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("attribute {name} no longer exists on node {}", .node.index())]
    MissingAttribute { node: NodeId, name: String },

    #[error("filter failed: {0}")]
    Filter(String),
}
