pub mod joypad;
mod script;

pub use script::{InputScript, Press};
