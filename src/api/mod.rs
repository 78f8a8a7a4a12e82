pub mod arbitration;
pub mod error;
pub mod health;
