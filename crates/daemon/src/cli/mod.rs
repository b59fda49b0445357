pub mod args;
pub mod op;
pub mod ops;

pub use ops::{Daemon, Feed, Health, HelloRequest, Init, Name, Peers, Posts, Version};
