pub mod command;
pub mod menu;
pub mod report;
