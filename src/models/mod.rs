pub mod results;
pub mod weather;
