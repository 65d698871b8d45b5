pub mod init;
pub mod serve;
pub mod validate_bank;
