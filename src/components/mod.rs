//! Module comportant les composants

mod misc;
pub use misc::*;
mod slash;
pub use slash::*;
pub mod tags;
pub use tags::Tags;
