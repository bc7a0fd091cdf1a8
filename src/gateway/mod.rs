//! Gateway layer: the application contract and the top-level dispatcher.

pub mod app;
pub mod dispatcher;

pub use app::{App, RouterApp};
pub use dispatcher::{Dispatcher, dispatch_handler};
