pub mod likes;
pub mod profile;
pub mod results;
pub mod stats;
