pub mod accounts;
pub mod jobs;
pub mod prices;
pub mod session;
