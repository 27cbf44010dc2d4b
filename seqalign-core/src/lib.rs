#[macro_use]
mod par;

pub mod align;
pub mod error;
pub mod seq;
