pub mod builder;
pub mod resolver;
pub mod types;

pub use builder::{build_ladder, Ladder};
pub use resolver::{parse_step, resolve_range, resolve_range_in, sum_prices, ChargedRange};
pub use types::{Rank, Step, StepKey, Tier};
