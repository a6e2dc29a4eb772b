pub mod amount;
pub mod ports;
pub mod purchase;
pub mod rate;
