#[path = "../fixtures/mod.rs"]
mod fixtures;

mod install_test;
mod remove_test;
mod status_test;
