pub mod controller;
pub mod deep_link;

pub use controller::ProfileFinder;
pub use deep_link::{open_user_page, UserPageView};
