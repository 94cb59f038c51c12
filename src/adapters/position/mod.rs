//! Session position strategies.
//!
//! `StoredPosition` keeps a level integer per session id and is the
//! default: its compare-and-set is what makes duplicate gateway deliveries
//! harmless. `TrailPosition` derives the level from the resubmitted trail
//! and needs no storage; deployments using it rely on the database guards
//! alone for at-most-once effects.

mod stored;
mod trail;

pub use stored::StoredPosition;
pub use trail::TrailPosition;
