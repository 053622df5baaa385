pub mod fakes;
pub mod setup;
