pub mod play;
pub mod roll;
