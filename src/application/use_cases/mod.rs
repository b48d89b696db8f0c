pub mod moderation;
pub mod token;
pub mod usage;
