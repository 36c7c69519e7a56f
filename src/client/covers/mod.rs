//! Tiered cover-image resolution.
//!
//! Each book card resolves its cover through an ordered fallback sequence:
//! the stored source, then an external metadata lookup, then a generated
//! placeholder card. Lookups are gated behind a page-wide delay and per-card
//! visibility so a freshly mounted view never bursts outbound requests for
//! covers nobody is looking at. Every failure degrades silently to the next
//! tier; no cover failure ever surfaces as an application error.

pub mod carousel;
pub mod gate;
pub mod image;
pub mod pipeline;
pub mod placeholder;
pub mod providers;

pub use carousel::CarouselResolver;
pub use gate::{GateHandle, LoadGate, Visibility, VisibilitySignal};
pub use pipeline::{CardContext, CoverArt, CoverResolver, CoverSubject};
pub use placeholder::{placeholder_card, placeholder_color, Placeholder};
