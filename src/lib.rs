#[macro_use]
extern crate stump;

pub mod accessor;
pub mod analysis;
pub mod context;
pub mod datasource;
pub mod error;
pub mod filtering;
pub mod frame;
pub mod framemap;
pub mod framerecord;
pub mod interpolation;
pub mod point;
pub mod stats;
