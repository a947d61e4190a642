pub use self::{board::*, inventory::*, region::*, shape::*};

pub(crate) mod board;
pub(crate) mod inventory;
pub(crate) mod region;
pub(crate) mod shape;
