/// Recoverable problem met while evaluating a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DiagnosticKind {
    /// Visual or audio reference absent or not loadable; rendered blank or silent.
    MissingAsset,
    /// Diagram `type` the library does not know; rendered as a placeholder.
    UnsupportedDiagram,
    /// Known diagram type with an unusable payload; rendered as a placeholder.
    MalformedDiagram,
    /// Frame outside every scene; rendered blank and silent.
    SchedulerGap,
    /// More than one scene covers the frame; the first in list order was used.
    SceneOverlap,
}

/// One recorded problem.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagnostic {
    /// Category.
    pub kind: DiagnosticKind,
    /// Scene the problem belongs to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<String>,
    /// Human-readable detail.
    pub message: String,
}

impl Diagnostic {
    /// Diagnostic attached to `scene`.
    pub fn scene(kind: DiagnosticKind, scene: &str, message: impl Into<String>) -> Self {
        Self {
            kind,
            scene: Some(scene.to_string()),
            message: message.into(),
        }
    }

    /// Diagnostic not tied to a scene.
    pub fn global(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            scene: None,
            message: message.into(),
        }
    }
}
