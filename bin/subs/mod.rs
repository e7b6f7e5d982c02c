pub mod info;
pub mod process;
pub mod quality;
pub mod runnable;
