pub mod normalize;
pub mod report;
pub mod score;
pub mod upstream;
