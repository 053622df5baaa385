mod cycle;
mod status;

pub mod dtos {
    pub use crate::cycle::dtos::*;
}

pub use crate::cycle::api::*;
pub use crate::status::api::*;
