/*
SPDX-License-Identifier: MPL-2.0
SPDX-FileCopyrightText: © 2023-2026 Bruce D'Arcus
*/

/// Outcome of binding data to a value or a subtree.
///
/// Variants are ordered by severity. The status of a subtree is the maximum
/// of the statuses of its parts, and optional sections decide whether to stay
/// hidden, show or go from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Status {
    /// No parameter found.
    #[default]
    NoChange,
    /// Every parameter was replaced.
    Success,
    /// An optional section was removed.
    OptionalNixed,
    /// An optional section was made visible.
    OptionalKept,
    /// Some parameter has no value yet.
    Missing,
    /// Some parameter is explicitly `null`.
    Failed,
}

impl Status {
    pub fn is_failed(self) -> bool {
        self == Status::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_order() {
        let ordered = [
            Status::NoChange,
            Status::Success,
            Status::OptionalNixed,
            Status::OptionalKept,
            Status::Missing,
            Status::Failed,
        ];
        for pair in ordered.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(Status::Success.max(Status::Missing), Status::Missing);
        assert_eq!(Status::default(), Status::NoChange);
    }
}
