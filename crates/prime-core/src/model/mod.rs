pub mod hand;
pub mod play;
