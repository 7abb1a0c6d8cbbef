pub mod access;
pub mod common;
pub mod init;
pub mod permissions;
pub mod users;
