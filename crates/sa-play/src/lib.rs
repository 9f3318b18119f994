//! Playing and flattening Story Adventure stories.
//!
//! [`PlaySession`] walks a reader through a story one section at a time:
//! entering a section runs its script, renders its text with variables
//! substituted and offers its choices. Sessions can be saved and resumed as
//! [`SaveGame`] files.
//!
//! [`find_path`] searches the section graph for a route between two sections
//! that passes through a set of waypoints, and [`linearize`] turns such a
//! route into a single piece of text.

pub mod config;
pub mod error;
pub mod linearize;
pub mod save;
pub mod scene;
pub mod search;
pub mod session;

pub use config::PlayConfig;
pub use error::{PlayError, PlayResult};
pub use linearize::linearize;
pub use save::SaveGame;
pub use scene::{Scene, SceneChoice};
pub use search::{PathSearch, SearchStats, find_path};
pub use session::{Mode, PlaySession};
