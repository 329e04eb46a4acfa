pub mod action;
pub mod config;
pub mod delimiters;
pub mod dispatch;
pub mod geometry;
pub mod position;
pub mod probe;
pub mod scanner;
pub mod selection;
pub mod text;

pub use config::SmartTabConfig;
pub use dispatch::{
  Outcome,
  smart_tab,
};
