pub mod menus;
pub mod output;
pub mod shell;
pub mod ui;

pub use shell::run_cli;
