//! Embassy async tasks
//!
//! Only edge timing runs as its own task; decoding and presentation happen
//! in the main poll loop.

pub mod capture;

pub use capture::capture_task;
