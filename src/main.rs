use clap::Parser;
use github_profile_finder::cli::args::Args;
use github_profile_finder::config::Config;
use github_profile_finder::infrastructure::{
    setup_logging, LoggingConfig, NetworkConfig, NetworkManager,
};
use github_profile_finder::state::RequestStatus;
use github_profile_finder::ui::{self, PromptCommand, Renderer, PROMPT_HELP};
use github_profile_finder::{open_user_page, GitHubClient, ProfileFinder};
use serde::Serialize;

fn build_client(config: &Config) -> anyhow::Result<GitHubClient> {
    let network = NetworkManager::new(NetworkConfig::default().with_timeout(config.timeout()))?;
    GitHubClient::new(network, &config.api_url)
}

fn print_view<T: Serialize>(json: bool, value: &T, rendered: String) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        print!("{}", rendered);
    }
    Ok(())
}

fn is_failure(status: &RequestStatus) -> bool {
    status.message().map_or(false, |message| message.is_failure())
}

/// 单次模式：查询一个用户后退出，失败时返回非零退出码
async fn run_once(
    args: &Args,
    config: &Config,
    client: GitHubClient,
    renderer: &Renderer,
    username: &str,
) -> anyhow::Result<bool> {
    if args.user_page {
        let view = open_user_page(&client, username).await;
        print_view(args.json, &view, renderer.render_user_page(&view))?;
        return Ok(!is_failure(view.status()));
    }

    let mut finder = ProfileFinder::from_config(client, config);
    if !finder.submit(username).await {
        anyhow::bail!("Username must not be empty");
    }
    if let Some(page) = args.page {
        if let Err(rejection) = finder.request_page(page).await {
            eprintln!("Cannot show page {}: {}", page, rejection);
        }
    }

    let state = finder.state();
    print_view(args.json, state, renderer.render_search(state))?;
    Ok(!is_failure(state.status()))
}

/// 交互模式
async fn run_interactive(
    args: &Args,
    config: &Config,
    client: GitHubClient,
    mut renderer: Renderer,
) -> anyhow::Result<()> {
    let mut finder = ProfileFinder::from_config(client, config);
    println!("GitHub Profile Finder - type a username, or :help for commands");

    while let Some(command) = ui::read_command(renderer.theme())? {
        match command {
            PromptCommand::Search(username) => {
                // 空输入不触发任何请求
                if !finder.submit(&username).await {
                    continue;
                }
            }
            PromptCommand::Page(page) => {
                if let Err(rejection) = finder.request_page(page).await {
                    eprintln!("{}", rejection);
                    continue;
                }
            }
            PromptCommand::Pages(pages) => {
                for rejection in finder.request_pages(&pages).await {
                    eprintln!("{}", rejection);
                }
            }
            PromptCommand::UserPage(username) => {
                let view = open_user_page(finder.api(), &username).await;
                print_view(args.json, &view, renderer.render_user_page(&view))?;
                continue;
            }
            PromptCommand::ToggleTheme => {
                let theme = renderer.toggle_theme();
                println!("Switched theme (next toggle: {})", theme.toggle_label());
            }
            PromptCommand::Help => {
                println!("{}", PROMPT_HELP);
                continue;
            }
            PromptCommand::Quit => break,
            PromptCommand::Invalid(message) => {
                eprintln!("{}", message);
                continue;
            }
        }

        let state = finder.state();
        print_view(args.json, state, renderer.render_search(state))?;
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let mut config = Config::new();

    config.update_from_args(&args);
    config.validate()?;

    let logging = if config.debug {
        LoggingConfig::debug()
    } else {
        LoggingConfig::default()
    };
    setup_logging(logging)?;
    tracing::debug!(
        api_url = %config.api_url,
        page_size = config.page_size,
        ordering = %config.page_ordering,
        "configuration loaded"
    );

    let client = build_client(&config)?;
    let renderer = Renderer::new(args.theme);

    match args.username.as_deref() {
        Some(username) => {
            if !run_once(&args, &config, client, &renderer, username).await? {
                std::process::exit(1);
            }
        }
        None => run_interactive(&args, &config, client, renderer).await?,
    }

    Ok(())
}
