//! Deterministic textual node identifiers.
//!
//! A `NodeId` is derived from a representative [`Coordinate`] as
//! `"{lon},{lat}"`, using Rust's shortest round-trip float formatting.  Two
//! coordinates produce the same id iff they are bit-for-bit the same point
//! (with `-0.0` folded into `0.0`), so ids are reproducible across runs and
//! platforms and never collide for distinct inputs.
//!
//! `Ord` is plain lexicographic order on the text.  Every node table in the
//! workspace iterates in this order, and Dijkstra breaks cost ties by it.

use std::fmt;

use crate::Coordinate;

#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct NodeId(String);

impl NodeId {
    /// Identifier for the node whose representative is `c`.
    pub fn from_coordinate(c: Coordinate) -> Self {
        // Adding +0.0 turns -0.0 into +0.0 and leaves every other value alone.
        let lon = c.lon + 0.0;
        let lat = c.lat + 0.0;
        Self(format!("{lon},{lat}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Coordinate> for NodeId {
    fn from(c: Coordinate) -> Self {
        Self::from_coordinate(c)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// ── Dense indices ─────────────────────────────────────────────────────────────

/// Generate a typed index wrapper around a primitive integer.
macro_rules! typed_index {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid index".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_index! {
    /// Position of a node in a built network.  Indices follow `NodeId` order,
    /// so comparing two `NodeIx` from the same network compares their ids.
    pub struct NodeIx(u32);
}

typed_index! {
    /// Position of a directed adjacency entry in a built network.
    pub struct EdgeIx(u32);
}
