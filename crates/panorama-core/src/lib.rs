pub mod assets;
pub mod catalog;
pub mod config;
pub mod consts;
pub mod error;
pub mod gesture;
pub mod io;
pub mod progress;
pub mod sink;
pub mod switcher;
pub mod viewer;
pub mod viewport;
