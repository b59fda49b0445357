pub mod daemon;
pub mod feed;
pub mod health;
pub mod hello;
pub mod init;
pub mod name;
pub mod peers;
pub mod posts;
pub mod version;

pub use daemon::Daemon;
pub use feed::Feed;
pub use health::Health;
pub use hello::HelloRequest;
pub use init::Init;
pub use name::Name;
pub use peers::Peers;
pub use posts::Posts;
pub use version::Version;
