pub mod plot;
pub mod process;
