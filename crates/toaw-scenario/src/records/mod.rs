//! Fixed-size record codecs.
//!
//! Every decoder here is a pure function over a byte span. Given a span of at
//! least the record's `SIZE`, decoding cannot fail; a shorter span yields
//! [`toaw_common::Error::UnexpectedEof`]. Callers slice the spans.

mod header;
mod location;
mod team;
mod tile;
mod unit;

pub use header::{Header, MESSAGE_LEN, TITLE_LEN};
pub use location::Location;
pub use team::{Team, TEAM_COUNT};
pub use tile::{Directions, Feature, Route, TileRecord, EMPTY_BYTE, EMPTY_MASK};
pub use unit::{unpack_team, unpack_type, Unit, OFF_MAP};
