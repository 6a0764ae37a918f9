pub mod stat;
pub mod util;
pub mod world;
