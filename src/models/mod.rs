pub mod params;
pub mod video;
