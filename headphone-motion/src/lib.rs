#[macro_use]
extern crate log;

pub mod api;
mod bridge;
mod motion;

pub use headphone_motion_api::*;
pub use motion::HeadphoneMotion;
