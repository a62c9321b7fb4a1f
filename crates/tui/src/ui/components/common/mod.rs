pub mod chip_flow;
pub mod text_input;

pub use text_input::TextInputState;
