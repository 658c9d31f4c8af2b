pub mod callout;
pub mod code;
pub mod form;
pub mod terminal;
