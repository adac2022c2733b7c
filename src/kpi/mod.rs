//! KPI computation: headline value + delta per metric, and the cards built from them.

pub mod card;
pub mod engine;

pub use card::{KpiCard, build_cards};
pub use engine::summarize;
