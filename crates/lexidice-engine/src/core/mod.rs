pub use self::{board::*, board_path::*, catalog::*, die::*};

pub(crate) mod board;
pub(crate) mod board_path;
pub(crate) mod catalog;
pub(crate) mod die;
