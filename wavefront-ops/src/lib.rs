#![warn(clippy::pedantic)]
//! A representative slice of reactive operators built entirely against
//! `wavefront`'s public node contract (`Node`, `Calm`, `SignalLike`,
//! `EventsLike`, and the handle types) — no privileged access to
//! `wavefront-core` or `wavefront` internals.
//!
//! This isn't the full operator library a production FRP crate would ship;
//! it's enough (`lift`, `fold`, `filter`, `merge`, `flatten`, `transform`,
//! `monitor`, `zip`) to exercise every node archetype and demonstrate the
//! public contract is sufficient to build on.

mod filter;
mod flatten;
mod fold;
mod lift;
mod merge;
mod monitor;
mod transform;
mod zip;

pub use filter::filter;
pub use flatten::flatten;
pub use fold::fold;
pub use lift::{lift1, lift2, lift3};
pub use merge::merge;
pub use monitor::monitor;
pub use transform::transform;
pub use zip::zip;
