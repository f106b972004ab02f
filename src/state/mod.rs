//! 查询视图状态与状态迁移
//!
//! 所有状态变化都经过 [`ViewState::apply`]：输入一个 [`Action`]，返回需要执行的
//! [`Effect`]。网络请求由调用方执行，结果再以 `Action` 的形式送回来。

pub mod pagination;
pub mod status;

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::github::models::{Profile, Repository};
use crate::infrastructure::error::{LookupError, Notice};

pub use pagination::{PageRejection, PaginationState};
pub use status::RequestStatus;

/// 多个分页请求并发时，以哪个响应为准
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum PageOrdering {
    /// 最后返回的响应覆盖显示内容
    #[default]
    LastArrival,
    /// 只接受最近一次发出的请求，旧响应直接丢弃
    LatestRequest,
}

impl PageOrdering {
    pub fn as_str(&self) -> &'static str {
        match self {
            PageOrdering::LastArrival => "last-arrival",
            PageOrdering::LatestRequest => "latest-request",
        }
    }
}

impl fmt::Display for PageOrdering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageOrdering {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "last-arrival" | "last_arrival" => Ok(PageOrdering::LastArrival),
            "latest-request" | "latest_request" => Ok(PageOrdering::LatestRequest),
            other => anyhow::bail!(
                "Unsupported page ordering: {} (expected last-arrival or latest-request)",
                other
            ),
        }
    }
}

/// 一次分页请求的标记：属于哪次搜索、第几个请求、请求的页码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    search: u64,
    seq: u64,
    page: u32,
}

impl PageTicket {
    pub fn page(&self) -> u32 {
        self.page
    }
}

/// 状态迁移输入
#[derive(Debug, Clone)]
pub enum Action {
    /// 用户提交搜索（原始输入）
    SubmitSearch(String),
    /// 用户资料请求结束
    ProfileSettled {
        search: u64,
        result: Result<Profile, LookupError>,
    },
    /// 分页控件请求某一页
    RequestPage(u32),
    /// 分页请求结束
    PageSettled {
        ticket: PageTicket,
        result: Result<Vec<Repository>, LookupError>,
    },
}

/// 状态迁移输出
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchProfile { search: u64, username: String },
    FetchPage { username: String, ticket: PageTicket },
    /// 状态已更新，无需进一步请求
    Render,
    /// 输入被忽略，状态未变
    Ignored(Ignored),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    EmptyQuery,
    PageRejected(PageRejection),
    StaleResponse,
}

/// 搜索视图的全部状态
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    query: Option<String>,
    profile: Option<Profile>,
    repositories: Vec<Repository>,
    pagination: PaginationState,
    status: RequestStatus,
    #[serde(skip)]
    ordering: PageOrdering,
    #[serde(skip)]
    search: u64,
    #[serde(skip)]
    latest_page_seq: u64,
}

impl ViewState {
    pub fn new(page_size: u32, ordering: PageOrdering) -> Self {
        Self {
            query: None,
            profile: None,
            repositories: Vec::new(),
            pagination: PaginationState::new(page_size),
            status: RequestStatus::Idle,
            ordering,
            search: 0,
            latest_page_seq: 0,
        }
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn repositories(&self) -> &[Repository] {
        &self.repositories
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn status(&self) -> &RequestStatus {
        &self.status
    }

    pub fn ordering(&self) -> PageOrdering {
        self.ordering
    }

    pub fn error_text(&self) -> Option<String> {
        self.status.error_text()
    }

    pub fn apply(&mut self, action: Action) -> Effect {
        match action {
            Action::SubmitSearch(raw) => self.submit_search(&raw),
            Action::ProfileSettled { search, result } => self.profile_settled(search, result),
            Action::RequestPage(page) => self.request_page(page),
            Action::PageSettled { ticket, result } => self.page_settled(ticket, result),
        }
    }

    fn submit_search(&mut self, raw: &str) -> Effect {
        let username = raw.trim();
        if username.is_empty() {
            return Effect::Ignored(Ignored::EmptyQuery);
        }

        // 先清空旧数据，避免新请求进行中时仍显示上一次的结果
        self.search += 1;
        self.query = Some(username.to_string());
        self.profile = None;
        self.repositories.clear();
        self.pagination.reset();
        self.status = RequestStatus::Loading;

        tracing::debug!(username, search = self.search, "search submitted");
        Effect::FetchProfile {
            search: self.search,
            username: username.to_string(),
        }
    }

    fn profile_settled(&mut self, search: u64, result: Result<Profile, LookupError>) -> Effect {
        if search != self.search {
            tracing::debug!(search, current = self.search, "discarding profile of an older search");
            return Effect::Ignored(Ignored::StaleResponse);
        }

        match result {
            Ok(profile) => {
                self.pagination.set_public_repo_count(profile.public_repo_count);
                let username = profile.login.clone();
                tracing::debug!(
                    login = %profile.login,
                    public_repos = profile.public_repo_count,
                    total_pages = self.pagination.total_pages(),
                    "profile loaded"
                );
                self.profile = Some(profile);
                // loading 一直保持到第一页仓库也返回
                Effect::FetchPage {
                    username,
                    ticket: self.issue_ticket(1),
                }
            }
            Err(error) => {
                tracing::warn!(error = ?error, "profile fetch failed");
                self.status = RequestStatus::Error(error.into());
                Effect::Render
            }
        }
    }

    fn request_page(&mut self, page: u32) -> Effect {
        let Some(profile) = &self.profile else {
            return Effect::Ignored(Ignored::PageRejected(PageRejection::NoProfile));
        };
        if let Err(rejection) = self.pagination.check(page) {
            tracing::warn!(%rejection, "page request rejected");
            return Effect::Ignored(Ignored::PageRejected(rejection));
        }

        let username = profile.login.clone();
        self.status = RequestStatus::Loading;
        Effect::FetchPage {
            username,
            ticket: self.issue_ticket(page),
        }
    }

    fn page_settled(
        &mut self,
        ticket: PageTicket,
        result: Result<Vec<Repository>, LookupError>,
    ) -> Effect {
        if ticket.search != self.search {
            tracing::debug!(page = ticket.page, "discarding page of an older search");
            return Effect::Ignored(Ignored::StaleResponse);
        }
        if self.ordering == PageOrdering::LatestRequest && ticket.seq != self.latest_page_seq {
            tracing::debug!(
                page = ticket.page,
                seq = ticket.seq,
                latest = self.latest_page_seq,
                "discarding superseded page response"
            );
            return Effect::Ignored(Ignored::StaleResponse);
        }

        match result {
            Ok(repositories) if repositories.is_empty() => {
                self.repositories.clear();
                self.pagination.set_current_page(ticket.page);
                self.status = RequestStatus::Error(Notice::NoPublicRepositories.into());
            }
            Ok(repositories) => {
                tracing::debug!(page = ticket.page, count = repositories.len(), "page loaded");
                self.repositories = repositories;
                self.pagination.set_current_page(ticket.page);
                self.status = RequestStatus::Success;
            }
            Err(error) => {
                // 列表保持原样，这可能是翻页而不是首次加载
                tracing::warn!(page = ticket.page, error = ?error, "repository page fetch failed");
                self.status = RequestStatus::Error(error.into());
            }
        }
        Effect::Render
    }

    fn issue_ticket(&mut self, page: u32) -> PageTicket {
        self.latest_page_seq += 1;
        PageTicket {
            search: self.search,
            seq: self.latest_page_seq,
            page,
        }
    }
}
