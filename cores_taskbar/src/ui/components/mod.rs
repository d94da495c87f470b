//! UI components module

pub mod bar;
pub mod debug_panel;
pub mod square;

pub use bar::BarPanel;
pub use debug_panel::DebugPanel;
pub use square::{SquareAction, SquareWidget};
