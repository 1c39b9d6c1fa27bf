mod rule_set;

pub use rule_set::*;
