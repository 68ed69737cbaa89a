//! Scenario tests spanning the common and core crates.

mod liveness;
mod util;
