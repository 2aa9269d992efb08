// Domain layer - Plain data contracts shared by the engine and its callers
pub mod charts;
pub mod comparison;
pub mod liner;
pub mod setting;
pub mod units;
pub mod validation;
