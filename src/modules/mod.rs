pub mod access;
pub mod pages;
