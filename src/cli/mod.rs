pub mod auth;
pub mod funds;
pub mod members;
pub mod nav;
pub mod search;
pub mod setup;
pub mod simulate;
pub mod summary;
pub mod ui;
