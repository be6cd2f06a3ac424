//! Media source adapter. Implements MediaSourcePort.

pub mod local_source;

pub use local_source::LocalMediaSource;
