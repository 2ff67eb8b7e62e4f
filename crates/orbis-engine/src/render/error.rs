use std::fmt;

/// Failures surfaced by the frame compositor.
///
/// Transient conditions (no frame target, empty items, odd frame timing) are
/// absorbed locally and never show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompositorError {
    /// A per-frame operation ran before `configure`.
    NotConfigured,
    /// `configure` ran a second time.
    AlreadyConfigured,
    /// The backend cannot build the line pipelines.
    MissingCapability(String),
    /// The presentation surface cannot recover.
    SurfaceLost,
}

impl fmt::Display for CompositorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompositorError::NotConfigured => {
                f.write_str("frame compositor must be configured before the first frame")
            }
            CompositorError::AlreadyConfigured => {
                f.write_str("frame compositor is already configured")
            }
            CompositorError::MissingCapability(what) => {
                write!(f, "missing GPU capability: {what}")
            }
            CompositorError::SurfaceLost => f.write_str("presentation surface lost"),
        }
    }
}

impl std::error::Error for CompositorError {}
