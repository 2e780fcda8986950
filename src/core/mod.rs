pub mod packer;
pub mod plant;
pub mod registry;
pub mod validator;

pub use crate::domain::model::{Piece, PieceStatus, StorageBox};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
