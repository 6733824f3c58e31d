#![allow(dead_code)]

pub mod proposals;
pub mod synthetic_image;
