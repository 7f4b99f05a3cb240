//! Library parts of the `statbank` command line tool.

pub mod ingest;
pub mod logging;
