//! 终端渲染与交互提示
//!
//! 只读取状态，不参与数据流。

use colored::{ColoredString, Colorize};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};

use crate::github::models::{Profile, Repository};
use crate::lookup::UserPageView;
use crate::state::{PaginationState, RequestStatus, ViewState};

/// 配色主题，仅影响输出样式，不保存
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// 切换按钮上显示的文字
    pub fn toggle_label(self) -> &'static str {
        match self {
            Theme::Light => "Dark Mode",
            Theme::Dark => "Light Mode",
        }
    }

    fn accent(self, text: &str) -> ColoredString {
        match self {
            Theme::Light => text.blue(),
            Theme::Dark => text.yellow(),
        }
    }

    fn muted(self, text: &str) -> ColoredString {
        match self {
            Theme::Light => text.bright_black(),
            Theme::Dark => text.white(),
        }
    }
}

pub struct Renderer {
    theme: Theme,
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// 渲染搜索视图
    pub fn render_search(&self, state: &ViewState) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", "GitHub Profile Finder".bold());

        let status = state.status();
        if status.is_loading() {
            out.push_str(&self.profile_skeleton());
            out.push_str(&self.repository_skeleton());
            return out;
        }

        if let Some(profile) = state.profile() {
            out.push_str(&self.profile_card(profile));
        }

        if state.repositories().is_empty() {
            if let RequestStatus::Error(message) = status {
                out.push_str(&self.error_box(&message.text()));
            }
        } else {
            out.push_str(&self.repository_list(state.repositories(), state.pagination()));
            // 翻页失败时列表保留，消息附在列表下方
            if let Some(text) = status.error_text() {
                let _ = writeln!(out, "{}", text.red());
            }
        }
        out
    }

    /// 渲染单个用户页面
    pub fn render_user_page(&self, view: &UserPageView) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", view.heading().bold());

        match view.status() {
            RequestStatus::Loading => out.push_str(&self.profile_skeleton()),
            RequestStatus::Error(message) if view.profile().is_none() => {
                out.push_str(&self.error_box(&message.text()));
            }
            _ => {
                if let Some(profile) = view.profile() {
                    out.push_str(&self.profile_card(profile));
                }
            }
        }
        out
    }

    fn profile_card(&self, profile: &Profile) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", self.theme.accent(&profile.login).bold());
        let _ = writeln!(out, "  {}", self.theme.muted(&profile.avatar_url));
        let _ = writeln!(out, "  {}", profile.bio_or_default());
        let _ = writeln!(out, "  {}", profile.location_or_default());
        let _ = writeln!(out, "  Public Repos: {}", profile.public_repo_count);
        out
    }

    fn repository_list(&self, repositories: &[Repository], pagination: &PaginationState) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Repositories".bold());
        for repo in repositories {
            let _ = writeln!(out, "  {}", self.theme.accent(&repo.name));
            let _ = writeln!(out, "    {}", self.theme.muted(&repo.url));
            let _ = writeln!(out, "    {}", repo.description_or_default());
            let _ = writeln!(out, "    ⭐ {} | 🍴 {}", repo.star_count, repo.fork_count);
        }

        if pagination.shows_controls() {
            let _ = writeln!(out, "\n  {}", self.pagination_bar(pagination));
        }
        out
    }

    fn pagination_bar(&self, pagination: &PaginationState) -> String {
        pagination
            .pages()
            .map(|page| {
                if page == pagination.current_page() {
                    self.theme.accent(&format!("[{}]", page)).bold().to_string()
                } else {
                    format!(" {} ", page)
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn error_box(&self, message: &str) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "  {}", "Oops! Something went wrong.".red().bold());
        let _ = writeln!(out, "  {}", message.red());
        out
    }

    fn profile_skeleton(&self) -> String {
        let bar = self.theme.muted("░░░░░░░░░░░░░░░░");
        format!("\n  {}\n  {}\n  {}\n  {}\n", bar, bar, bar, bar)
    }

    fn repository_skeleton(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", "Repositories".bold());
        for _ in 0..5 {
            let _ = writeln!(out, "  {}", self.theme.muted("░░░░░░░░░░░░░░░░░░░░░░░░"));
        }
        out
    }
}

/// 交互模式下的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCommand {
    Search(String),
    Page(u32),
    Pages(Vec<u32>),
    UserPage(String),
    ToggleTheme,
    Help,
    Quit,
    Invalid(String),
}

pub const PROMPT_HELP: &str = "\
  <username>        search for a GitHub user
  :page N  (:p N)   show repository page N
  :pages A B ...    request several pages at once
  :user <username>  open the single profile page
  :theme            toggle light/dark theme
  :help             show this help
  :quit    (:q)     exit";

/// 解析一行输入；不以 `:` 开头的内容都视为搜索
pub fn parse_command(line: &str) -> PromptCommand {
    let trimmed = line.trim();
    let Some(command) = trimmed.strip_prefix(':') else {
        return PromptCommand::Search(trimmed.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default().to_lowercase();
    let rest: Vec<&str> = parts.collect();

    match (name.as_str(), rest.as_slice()) {
        ("q" | "quit" | "exit", []) => PromptCommand::Quit,
        ("theme", []) => PromptCommand::ToggleTheme,
        ("help" | "h" | "?", []) => PromptCommand::Help,
        ("p" | "page", [page]) => match page.parse() {
            Ok(page) => PromptCommand::Page(page),
            Err(_) => PromptCommand::Invalid(format!("not a page number: {}", page)),
        },
        ("pages", pages) if !pages.is_empty() => {
            let parsed: Result<Vec<u32>, _> = pages.iter().map(|p| p.parse::<u32>()).collect();
            match parsed {
                Ok(pages) => PromptCommand::Pages(pages),
                Err(_) => PromptCommand::Invalid(format!("not page numbers: {}", pages.join(" "))),
            }
        }
        ("user", [username]) => PromptCommand::UserPage(username.to_string()),
        _ => PromptCommand::Invalid(format!("unknown command: {}", trimmed)),
    }
}

/// 显示提示符并读取一行；输入结束时返回 None
pub fn read_command(theme: Theme) -> anyhow::Result<Option<PromptCommand>> {
    print!("{} ", theme.accent("gh-profile>"));
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(parse_command(&input)))
}
