pub mod auth;
pub mod batch;
pub mod catalog;
pub mod item;
pub mod stock;
pub mod track;
pub mod unit;
