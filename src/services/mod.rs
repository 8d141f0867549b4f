pub mod catalog;
pub mod normalizer;
pub mod providers;
pub mod ranking;
pub mod recommendations;
