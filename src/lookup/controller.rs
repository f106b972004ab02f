use futures_util::stream::{FuturesUnordered, StreamExt};

use crate::config::Config;
use crate::github::client::GitHubApi;
use crate::state::{Action, Effect, Ignored, PageOrdering, PageRejection, ViewState};

/// 搜索控制器 + 资料获取 + 仓库分页
///
/// 独占 [`ViewState`]，界面只通过 `submit` / `request_page` 回调进来。
pub struct ProfileFinder<A: GitHubApi> {
    api: A,
    state: ViewState,
}

impl<A: GitHubApi> ProfileFinder<A> {
    pub fn new(api: A, page_size: u32, ordering: PageOrdering) -> Self {
        Self {
            api,
            state: ViewState::new(page_size, ordering),
        }
    }

    pub fn from_config(api: A, config: &Config) -> Self {
        Self::new(api, config.page_size, config.page_ordering)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 提交搜索。空白输入返回 false，且不发请求
    pub async fn submit(&mut self, raw: &str) -> bool {
        let effect = self.state.apply(Action::SubmitSearch(raw.to_string()));
        if matches!(effect, Effect::Ignored(Ignored::EmptyQuery)) {
            return false;
        }
        self.drive(vec![effect]).await;
        true
    }

    /// 分页控件回调
    pub async fn request_page(&mut self, page: u32) -> Result<(), PageRejection> {
        match self.state.apply(Action::RequestPage(page)) {
            Effect::Ignored(Ignored::PageRejected(rejection)) => Err(rejection),
            effect => {
                self.drive(vec![effect]).await;
                Ok(())
            }
        }
    }

    /// 连续点击多个页码：请求同时发出，响应按到达顺序应用
    pub async fn request_pages(&mut self, pages: &[u32]) -> Vec<PageRejection> {
        let mut effects = Vec::with_capacity(pages.len());
        let mut rejected = Vec::new();
        for &page in pages {
            match self.state.apply(Action::RequestPage(page)) {
                Effect::Ignored(Ignored::PageRejected(rejection)) => rejected.push(rejection),
                effect => effects.push(effect),
            }
        }
        self.drive(effects).await;
        rejected
    }

    async fn drive(&mut self, effects: Vec<Effect>) {
        let api = &self.api;
        let state = &mut self.state;
        let per_page = state.pagination().page_size();

        let mut pending: FuturesUnordered<_> = effects
            .into_iter()
            .map(|effect| run_effect(api, per_page, effect))
            .collect();

        while let Some(action) = pending.next().await {
            if let Some(action) = action {
                let next = state.apply(action);
                pending.push(run_effect(api, per_page, next));
            }
        }
    }
}

/// 执行一个 effect，返回要回送给状态机的 action
async fn run_effect<A: GitHubApi>(api: &A, per_page: u32, effect: Effect) -> Option<Action> {
    match effect {
        Effect::FetchProfile { search, username } => {
            let result = api.fetch_profile(&username).await;
            Some(Action::ProfileSettled { search, result })
        }
        Effect::FetchPage { username, ticket } => {
            let result = api
                .fetch_repositories(&username, ticket.page(), per_page)
                .await;
            Some(Action::PageSettled { ticket, result })
        }
        Effect::Render | Effect::Ignored(_) => None,
    }
}
