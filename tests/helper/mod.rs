//! Shared test utilities

#![allow(dead_code)]

mod archive;
mod index;

pub use archive::{tar_gz, wheel, zip_sdist};
pub use index::{StaticFetcher, StaticIndex, sdist_file, wheel_file};
