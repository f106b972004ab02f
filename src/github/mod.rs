pub mod client;
pub mod models;

pub use client::{GitHubApi, GitHubClient};
pub use models::{Profile, Repository};
