//! UI-agnostic application layer for Roamly.
//!
//! Holds the category enumeration and weather presets, the
//! filter/sort/paginate pipeline, the per-session state machine, and the
//! orchestration that ties the catalogue and weather clients into one
//! interaction pass. The hosting surface (CLI, GUI, ...) renders from the
//! values these modules return.

pub mod categories;
pub mod error_mapping;
pub mod explorer;
pub mod pipeline;
pub mod state;

pub use categories::{preset_categories, Category, PRESET_HELP};
pub use explorer::{Explorer, SearchOutcome};
pub use pipeline::{render_page, Page, SortOrder};
pub use state::SessionState;
