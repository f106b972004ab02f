use serde::Serialize;
use std::ops::RangeInclusive;
use thiserror::Error;

/// 分页状态
///
/// 不变量：`current_page <= max(total_pages, 1)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    current_page: u32,
    total_pages: u32,
    page_size: u32,
}

/// 页码请求被拒绝的原因，拒绝时状态不变
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageRejection {
    #[error("no profile is loaded yet")]
    NoProfile,

    #[error("page {page} is out of range (1..={last})")]
    OutOfRange { page: u32, last: u32 },
}

impl PaginationState {
    pub fn new(page_size: u32) -> Self {
        Self {
            current_page: 1,
            total_pages: 0,
            page_size,
        }
    }

    /// `ceil(public_repo_count / page_size)`
    pub fn total_pages_for(public_repo_count: u32, page_size: u32) -> u32 {
        if page_size == 0 {
            return 0;
        }
        public_repo_count.div_ceil(page_size)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// 新搜索开始前重置
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.total_pages = 0;
    }

    pub fn set_public_repo_count(&mut self, count: u32) {
        self.total_pages = Self::total_pages_for(count, self.page_size);
    }

    /// 最后一个可请求的页码，没有任何页时仍允许第 1 页
    pub fn last_page(&self) -> u32 {
        self.total_pages.max(1)
    }

    pub fn check(&self, page: u32) -> Result<(), PageRejection> {
        if page < 1 || page > self.last_page() {
            return Err(PageRejection::OutOfRange {
                page,
                last: self.last_page(),
            });
        }
        Ok(())
    }

    pub(crate) fn set_current_page(&mut self, page: u32) {
        debug_assert!(self.check(page).is_ok());
        self.current_page = page.clamp(1, self.last_page());
    }

    /// 只有超过一页时才显示分页控件
    pub fn shows_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn pages(&self) -> RangeInclusive<u32> {
        1..=self.total_pages
    }
}
