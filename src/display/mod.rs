pub mod snapshot;
pub mod terminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Animate in the terminal until quit
    #[default]
    Terminal,
    /// Render the finished diagram to a PNG without animation
    Snapshot,
}
