//! Rotate-and-zoom image transform and the pieces that drive its animation.
//!
//! [`transform::rotate`] is a pure function of an image and an angle: the
//! output keeps the input's size and is zoomed just enough that no empty
//! corners show. [`sequence::AngleSequence`] yields the sweep of angles and
//! [`source::load`] reads the still image.

pub mod error;
pub mod sequence;
pub mod source;
pub mod transform;

pub use error::{SequenceError, SourceError, TransformError, TransformResult};
