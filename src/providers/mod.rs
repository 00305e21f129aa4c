pub mod fallback;
pub mod mfapi;
pub mod static_funds;
pub mod util;
