pub mod error;
pub mod form;
pub mod logging;
pub mod navigator;
pub mod playback;
pub mod reveal;
pub mod script;
