//! Data models for the live editor document.
//!
//! Field names serialize in camelCase to match the editor frontend's store shape.

mod component;
mod globals;
mod layout;
mod page;
mod request;
mod tenant;
mod theme;

pub use component::*;
pub use globals::*;
pub use layout::*;
pub use page::*;
pub use request::*;
pub use tenant::*;
pub use theme::*;
