//! Embassy async tasks
//!
//! The receive task runs on its own. The controller loop runs in the main
//! task so its hardware types never need naming.

pub mod controller;
pub mod link_rx;

pub use controller::run_controller;
pub use link_rx::link_rx_task;
