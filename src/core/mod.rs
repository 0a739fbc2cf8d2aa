pub mod error;
pub mod types;

pub use error::{ClientError, Result};
pub use types::{
    Boat, BoatData, BoatDraft, BoatId, Selection, SelectionKey, compare_names, sort_boats,
};
