//! Room grids and the persisted layout format for the Egress trainer.
//!
//! A [`Room`] is a dense, bounded grid of [`Cell`](egress_core::Cell)s
//! with bottom-left origin. A [`RoomLayout`] pairs a room with agent
//! start positions and is what the text format round-trips through:
//! [`RoomLayout::parse`] reads the character grid (top line first) and
//! [`RoomLayout::to_text`] writes it back.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod layout;
pub mod room;

pub use error::LayoutError;
pub use layout::RoomLayout;
pub use room::Room;
