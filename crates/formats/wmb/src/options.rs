use serde::{Deserialize, Serialize};

/// Axis convention the decoded level is converted into.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateSystem {
    /// Keep the file's own axes.
    #[default]
    Native,
    /// Right-handed, y up. Triangle winding is flipped to keep front faces.
    #[serde(rename = "opengl")]
    OpenGl,
    /// Left-handed, y up.
    #[serde(rename = "directx")]
    DirectX,
}

/// Whether recoverable problems are reported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WarningLevel {
    Suppress,
    #[default]
    Emit,
}

/// Options controlling a single decode.
///
/// All fields have defaults, so a host manifest only needs to name the ones
/// it changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    pub coordinate_system: CoordinateSystem,
    pub warnings: WarningLevel,
}

impl LoadOptions {
    pub fn with_coordinate_system(mut self, coordinate_system: CoordinateSystem) -> Self {
        self.coordinate_system = coordinate_system;
        self
    }

    pub fn with_warnings(mut self, warnings: WarningLevel) -> Self {
        self.warnings = warnings;
        self
    }

    /// Whether warnings are logged and collected.
    pub fn emit_warnings(&self) -> bool {
        self.warnings == WarningLevel::Emit
    }
}
