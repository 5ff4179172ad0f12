pub mod panel;
pub mod terminal;
