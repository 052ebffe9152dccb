use serde::{Deserialize, Serialize};

/// Rendering constants for list bullets.
///
/// The engine never stores computed widths; it only carries `kind` and
/// `indent_level` per bullet and derives the width on demand. Callers
/// construct one of these explicitly and pass it where needed -- there is
/// no process-wide style table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Base width reserved for the bullet marker itself.
    pub bullet_width: usize,
    /// Additional width per indent level.
    pub indent_step: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bullet_width: 20,
            indent_step: 16,
        }
    }
}
