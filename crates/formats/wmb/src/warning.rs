use std::fmt;

/// A recoverable problem found while decoding. The offending record is skipped.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// A second environment (INFO) object; only the first one is kept.
    DuplicateEnvironment { offset: usize },
    /// A path edge pointing outside the node list or back at its own node.
    /// Node numbers are the raw 1-based values from the file.
    InvalidPathEdge { path: String, node1: f32, node2: f32 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEnvironment { offset } => {
                write!(f, "multiple environment objects defined; ignoring the one at {offset:#x}")
            }
            Self::InvalidPathEdge { path, node1, node2 } => {
                write!(f, "invalid path edge {node1} -> {node2} in path {path:?}")
            }
        }
    }
}

/// Collects warnings for one decode and forwards them to the `log` facade.
#[derive(Debug, Default)]
pub(crate) struct Diagnostics {
    enabled: bool,
    warnings: Vec<Warning>,
}

impl Diagnostics {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            warnings: Vec::new(),
        }
    }

    pub fn warn(&mut self, warning: Warning) {
        if !self.enabled {
            return;
        }
        log::warn!("[wmb] {warning}");
        self.warnings.push(warning);
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppressed_warnings_are_dropped() {
        let mut diag = Diagnostics::new(false);
        diag.warn(Warning::DuplicateEnvironment { offset: 4 });
        assert!(diag.into_warnings().is_empty());
    }

    #[test]
    fn emitted_warnings_keep_order() {
        let mut diag = Diagnostics::new(true);
        diag.warn(Warning::DuplicateEnvironment { offset: 4 });
        diag.warn(Warning::InvalidPathEdge {
            path: "patrol".into(),
            node1: 0.0,
            node2: 2.0,
        });
        let warnings = diag.into_warnings();
        assert_eq!(warnings.len(), 2);
        assert_eq!(
            warnings[1].to_string(),
            "invalid path edge 0 -> 2 in path \"patrol\""
        );
    }
}
