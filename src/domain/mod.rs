//! Transport-agnostic domain types.
//!
//! Everything the conversation engine reasons about lives here: user
//! identity and profiles, the configured asset catalog, the accumulating
//! trade draft, and the pure validation rules for addresses and amounts.

pub mod assets;
pub mod trade;
pub mod user;
pub mod validate;
