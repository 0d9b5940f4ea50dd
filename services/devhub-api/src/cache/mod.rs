//! In-process cache slots for the upstream feeds.
//!
//! Each feed owns exactly one [`CacheSlot`]. A slot is either empty or holds the
//! payload of the last successful fetch together with its timestamp; both are
//! swapped in as one value so readers never observe a torn pair.

mod slot;

pub use slot::{CacheSlot, CachedEntry};
