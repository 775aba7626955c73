pub mod event;
pub mod queue;
pub mod ticket;
