pub mod check;
pub mod init;
pub mod npm;
pub mod serve;
