pub mod chunk;
pub mod consolidate;
pub mod headers;
pub mod segment;
pub mod split;

pub use chunk::chunk_text;
pub use consolidate::consolidate;
pub use headers::CanonicalField;
pub use segment::{segment_document, SegmentOutcome, SegmentStrategy, TextKind};
pub use split::split_experience;
