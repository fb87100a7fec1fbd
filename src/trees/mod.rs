pub mod classifier;
pub mod heap;
pub mod node;
pub mod params;
pub mod split;
