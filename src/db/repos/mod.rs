pub mod board;
pub mod column;
pub mod label;
pub mod session;
pub mod task;
