pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::TomlConfig;

pub use app::{command::MenuCommand, menu::Menu, report::ReportGenerator};
pub use crate::core::{packer::BoxPacker, plant::Plant, registry::PieceRegistry, validator::QualityValidator};
pub use domain::model::{Piece, PieceStatus, StorageBox};
pub use utils::error::{FactoryError, Result};
