//! Presentation layer: ratatui widgets and off-screen rendering.

/// Help pages.
pub mod help;
/// Buffer-to-text rendering.
pub mod render;
/// Reusable widgets.
pub mod widgets;

pub use help::HelpCommandsPage;
pub use render::render_to_string;
pub use widgets::{ForwardPostView, ToastWidget};
