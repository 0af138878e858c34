//! orgunit-tree: reshape a flat timetable export into an organisational unit tree
//!
//! Export rows (course, part, subject, module, series, event) are folded into a
//! tree rooted at "Timetable" with subject nested above part. The tree is printed
//! as an outline and written as JSON.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
