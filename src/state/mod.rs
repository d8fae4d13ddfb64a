pub mod catalog;
pub mod color;
pub mod sections;
pub mod stats;
pub mod visibility;

pub use catalog::{CatalogAction, CatalogState};
pub use color::visibility_color;
pub use sections::{Section, visible_sections};
pub use stats::{DirStats, ProblemTally};
pub use visibility::VisibilityStore;
