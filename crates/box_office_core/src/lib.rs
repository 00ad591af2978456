#![forbid(unsafe_code)]

pub mod purchase;
pub mod rules;
pub mod ticket;
