// Core modules
pub mod cli;
pub mod config;
pub mod github;
pub mod infrastructure;
pub mod lookup;
pub mod state;
pub mod ui;

pub use cli::args;
pub use github::{GitHubApi, GitHubClient, Profile, Repository};
pub use lookup::{open_user_page, ProfileFinder, UserPageView};
pub use state::{PageOrdering, ViewState};
