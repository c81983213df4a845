pub mod config;
pub mod dtos;
pub mod handlers;
pub mod pptx;
pub mod services;
pub mod startup;
