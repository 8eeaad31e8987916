pub mod dwell_analysis;
pub mod trace_io;
