#![allow(dead_code)]

pub mod fixture;
pub mod script_server;
