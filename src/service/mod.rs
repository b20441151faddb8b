pub mod check;
pub mod init;
pub mod rank;
pub mod search;
