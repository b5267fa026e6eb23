pub mod composite;

pub use composite::{ComponentScore, CompositeScore, composite_score, dimension_scores};
