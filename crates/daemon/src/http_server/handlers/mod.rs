mod not_found;
mod root;

pub use not_found::not_found_handler;
pub use root::root_handler;
