//! EngineMode - Selects how the wire's root endpoint responds.

use serde::Deserialize;

/// How the wire's root endpoint behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineMode {
    /// Each request advances the cursor and returns the new current article.
    #[default]
    Cycling,
    /// Each request returns the full publishable list, no cursor involved.
    Simple,
}
