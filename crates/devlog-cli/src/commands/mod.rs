pub mod digest;
pub mod end;
pub mod init;
pub mod start;
pub mod status;
