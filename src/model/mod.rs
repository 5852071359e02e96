//! # Spatial Model
//!
//! Plain data shared by every stage of the engine: input coordinates,
//! the sparse neighbor relation, and the dense distance table.
//!
//! Design rule: no progress reporting, no logging, no errors here.
//! This module is pure data — no I/O, no state beyond the values themselves.

pub mod point;
pub mod region;
pub mod matrix;
pub mod neighbors;

pub use point::{GeoPoint, Located};
pub use region::Region;
pub use matrix::DistanceMatrix;
pub use neighbors::{NeighborList, NeighborSet};
