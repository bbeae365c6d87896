//=========================================================================
// Screen Errors
//=========================================================================
//
// Failures raised by screen lifecycle hooks.
//
// The screen system has no I/O of its own. Errors originate in a screen's
// `load_content` and travel unchanged through `add_screen`, `initialize`
// and `update` to the host loop.
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== ScreenError =========================================================

/// Error returned by a screen's content-load hook.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// A screen could not prepare its content.
    #[error("screen `{screen}` failed to load content: {reason}")]
    Content { screen: String, reason: String },

    /// A named asset the screen depends on is unavailable.
    #[error("missing asset `{0}`")]
    MissingAsset(String),

    /// Any other collaborator failure.
    #[error(transparent)]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ScreenError {
    /// Shorthand for [`ScreenError::Content`].
    pub fn content(screen: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Content {
            screen: screen.into(),
            reason: reason.into(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
