//! Small time tracker. Entries are typed in as `9:00 AM` style start/end times with a tag, and are
//! summed up per day and compared week over week.
//!
//! The calculations live in [tracking] and never touch the disk. [tracker::Tracker] feeds them
//! entries out of [storage], and [cli] is the command line front end.

pub mod cli;
pub mod storage;
pub mod tracker;
pub mod tracking;
pub mod utils;
