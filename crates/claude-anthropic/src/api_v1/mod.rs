mod common;
mod complete;

pub use common::*;
pub use complete::*;
