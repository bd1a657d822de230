//! Everything that turns raw entries into numbers. Nothing in here touches the disk or the clock,
//! callers hand in the entries they've already selected.
//!
//!  - [clock_time] reads `1:25 PM` style strings.
//!  - [duration] derives entry length, wrapping past midnight.
//!  - [daily] totals a single day per tag.
//!  - [weekly] compares two weeks per tag and labels the trend.
//!  - [tags] builds the list of tags to offer.

pub mod clock_time;
pub mod daily;
pub mod duration;
pub mod tags;
pub mod weekly;
