//! VPC Builder Core
//!
//! Guided create / inspect / modify / delete workflows for VPC networking
//! resources, written against the `NetworkProvider` trait

pub mod access;
pub mod console;
pub mod create;
pub mod delete;
pub mod error;
pub mod lister;
pub mod modify;
pub mod provider;
pub mod region;
pub mod resource;
pub mod selector;
pub mod session;
pub mod validation;
pub mod wizard;

#[cfg(test)]
pub(crate) mod testing;
