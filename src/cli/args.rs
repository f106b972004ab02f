use clap::Parser;

use crate::state::PageOrdering;
use crate::ui::Theme;

#[derive(Parser, Debug, Default)]
#[command(
    name = "gh-profile",
    version,
    about = "Look up a GitHub user's public profile and repositories",
    long_about = "gh-profile fetches a GitHub user's public profile and pages through their public repositories. Run it without a username to start an interactive prompt."
)]
pub struct Args {
    /// GitHub username to search for; omit to start the interactive prompt
    #[arg(value_name = "USERNAME")]
    pub username: Option<String>,

    /// Repository page to show after the search (1-based)
    #[arg(short = 'p', long, value_name = "N")]
    pub page: Option<u32>,

    /// Only show the user's profile page, without repositories
    #[arg(short = 'u', long = "user-page", default_value_t = false, conflicts_with = "page")]
    pub user_page: bool,

    /// Repositories per page (1-100, default: 10)
    #[arg(short = 's', long = "page-size", value_name = "N")]
    pub page_size: Option<u32>,

    /// GitHub REST API base url (default: https://api.github.com)
    #[arg(long = "api-url", value_name = "URL")]
    pub api_url: Option<String>,

    /// Which response wins when several page requests overlap
    #[arg(long, value_enum, value_name = "ORDERING")]
    pub ordering: Option<PageOrdering>,

    /// Initial color theme
    #[arg(long, value_enum, default_value_t = Theme::Light)]
    pub theme: Theme,

    /// Print the view state as JSON instead of rendered text
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'd', long, default_value_t = false)]
    pub debug: bool,
}
