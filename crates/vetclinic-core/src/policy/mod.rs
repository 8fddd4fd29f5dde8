//! Pure scheduling rules. No I/O, no clocks: callers pass "now" in.

pub mod schedule;
pub mod status;
