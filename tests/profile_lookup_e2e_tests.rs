//! E2E 测试：搜索 → 资料 → 分页 的完整流程

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use github_profile_finder::infrastructure::{NetworkConfig, NetworkManager};
use github_profile_finder::state::RequestStatus;
use github_profile_finder::{open_user_page, GitHubClient, PageOrdering, ProfileFinder};

const PAGE_SIZE: u32 = 10;

fn client_for(server: &MockServer) -> GitHubClient {
    let network = NetworkManager::new(NetworkConfig::default()).expect("http client");
    GitHubClient::new(network, &server.uri()).expect("github client")
}

fn finder_for(server: &MockServer, ordering: PageOrdering) -> ProfileFinder<GitHubClient> {
    ProfileFinder::new(client_for(server), PAGE_SIZE, ordering)
}

fn profile_json(login: &str, public_repos: u32) -> Value {
    json!({
        "login": login,
        "id": 1,
        "avatar_url": format!("https://avatars.githubusercontent.com/{}", login),
        "bio": null,
        "location": null,
        "public_repos": public_repos
    })
}

fn repos_json(login: &str, page: u32, count: u32) -> Value {
    let repos: Vec<Value> = (0..count)
        .map(|i| {
            json!({
                "id": page * 100 + i,
                "name": format!("{}-p{}-r{}", login, page, i),
                "html_url": format!("https://github.com/{}/p{}-r{}", login, page, i),
                "description": null,
                "stargazers_count": i,
                "forks_count": 0
            })
        })
        .collect();
    Value::Array(repos)
}

async fn mount_profile(server: &MockServer, login: &str, public_repos: u32) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}", login)))
        .respond_with(ResponseTemplate::new(200).set_body_json(profile_json(login, public_repos)))
        .mount(server)
        .await;
}

async fn mount_page(server: &MockServer, login: &str, page: u32, count: u32, delay: Duration) {
    Mock::given(method("GET"))
        .and(path(format!("/users/{}/repos", login)))
        .and(query_param("per_page", PAGE_SIZE.to_string()))
        .and(query_param("page", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(repos_json(login, page, count))
                .set_delay(delay),
        )
        .mount(server)
        .await;
}

fn first_repo_name(finder: &ProfileFinder<GitHubClient>) -> String {
    finder.state().repositories()[0].name.clone()
}

#[tokio::test]
async fn test_scenario_a_single_page_user() {
    let server = MockServer::start().await;
    mount_profile(&server, "octocat", 8).await;
    mount_page(&server, "octocat", 1, 8, Duration::ZERO).await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    assert!(finder.submit("octocat").await);

    let state = finder.state();
    assert_eq!(state.profile().map(|p| p.login.as_str()), Some("octocat"));
    assert_eq!(state.pagination().total_pages(), 1);
    assert!(!state.pagination().shows_controls());
    assert_eq!(state.repositories().len(), 8);
    assert_eq!(*state.status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_scenario_b_unknown_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/doesnotexist123456789"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .expect(1)
        .mount(&server)
        .await;
    // 不应发出仓库请求
    Mock::given(method("GET"))
        .and(path("/users/doesnotexist123456789/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    finder.submit("doesnotexist123456789").await;

    let state = finder.state();
    assert!(state.profile().is_none());
    assert_eq!(
        state.error_text().as_deref(),
        Some("GitHub user not found. Please check the username.")
    );
}

#[tokio::test]
async fn test_scenario_c_rate_limited_first_page() {
    let server = MockServer::start().await;
    mount_profile(&server, "octocat", 8).await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    finder.submit("octocat").await;

    let state = finder.state();
    assert!(state.profile().is_some());
    assert!(state.repositories().is_empty());
    assert_eq!(
        state.error_text().as_deref(),
        Some("GitHub API rate limit exceeded. Please try again later.")
    );
}

#[tokio::test]
async fn test_scenario_d_user_without_repositories() {
    let server = MockServer::start().await;
    mount_profile(&server, "empty-user", 0).await;
    mount_page(&server, "empty-user", 1, 0, Duration::ZERO).await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    finder.submit("empty-user").await;

    let state = finder.state();
    assert_eq!(state.pagination().total_pages(), 0);
    assert!(!state.pagination().shows_controls());
    assert!(state.repositories().is_empty());
    assert_eq!(
        state.error_text().as_deref(),
        Some("This user has no public repositories.")
    );
}

async fn on_page_two_of_three(ordering: PageOrdering, server: &MockServer) -> ProfileFinder<GitHubClient> {
    mount_profile(server, "octocat", 25).await;
    mount_page(server, "octocat", 1, 10, Duration::ZERO).await;
    mount_page(server, "octocat", 2, 10, Duration::ZERO).await;
    // 第 3 页的响应比第 1 页晚到
    mount_page(server, "octocat", 3, 5, Duration::from_millis(500)).await;

    let mut finder = finder_for(server, ordering);
    finder.submit("octocat").await;
    finder.request_page(2).await.unwrap();
    assert_eq!(finder.state().pagination().current_page(), 2);
    assert_eq!(finder.state().pagination().total_pages(), 3);
    finder
}

#[tokio::test]
async fn test_scenario_e_last_arrival_wins() {
    let server = MockServer::start().await;
    let mut finder = on_page_two_of_three(PageOrdering::LastArrival, &server).await;

    let rejected = finder.request_pages(&[3, 1]).await;
    assert!(rejected.is_empty());

    assert_eq!(finder.state().pagination().current_page(), 3);
    assert_eq!(finder.state().repositories().len(), 5);
    assert_eq!(first_repo_name(&finder), "octocat-p3-r0");
}

#[tokio::test]
async fn test_scenario_e_latest_request_discards_late_page() {
    let server = MockServer::start().await;
    let mut finder = on_page_two_of_three(PageOrdering::LatestRequest, &server).await;

    finder.request_pages(&[3, 1]).await;

    assert_eq!(finder.state().pagination().current_page(), 1);
    assert_eq!(finder.state().repositories().len(), 10);
    assert_eq!(first_repo_name(&finder), "octocat-p1-r0");
    assert_eq!(*finder.state().status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_same_page_twice_is_idempotent() {
    let server = MockServer::start().await;
    mount_profile(&server, "octocat", 25).await;
    mount_page(&server, "octocat", 1, 10, Duration::ZERO).await;
    mount_page(&server, "octocat", 2, 10, Duration::ZERO).await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    finder.submit("octocat").await;

    finder.request_page(2).await.unwrap();
    let first = finder.state().repositories().to_vec();
    finder.request_page(2).await.unwrap();
    assert_eq!(finder.state().repositories(), first.as_slice());
    assert_eq!(finder.state().pagination().current_page(), 2);
}

#[tokio::test]
async fn test_out_of_range_pages_do_not_fetch() {
    let server = MockServer::start().await;
    mount_profile(&server, "octocat", 25).await;
    mount_page(&server, "octocat", 1, 10, Duration::ZERO).await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    finder.submit("octocat").await;

    assert!(finder.request_page(0).await.is_err());
    assert!(finder.request_page(4).await.is_err());
    assert_eq!(finder.state().pagination().current_page(), 1);
    assert_eq!(*finder.state().status(), RequestStatus::Success);

    let received = server.received_requests().await.unwrap_or_default();
    assert_eq!(received.len(), 2);
}

#[tokio::test]
async fn test_new_search_replaces_previous_user() {
    let server = MockServer::start().await;
    mount_profile(&server, "alice", 3).await;
    mount_page(&server, "alice", 1, 3, Duration::ZERO).await;
    mount_profile(&server, "bob", 12).await;
    mount_page(&server, "bob", 1, 10, Duration::ZERO).await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    finder.submit("alice").await;
    assert_eq!(finder.state().repositories().len(), 3);

    finder.submit("  bob  ").await;
    let state = finder.state();
    assert_eq!(state.query(), Some("bob"));
    assert_eq!(state.profile().map(|p| p.login.as_str()), Some("bob"));
    assert_eq!(state.pagination().total_pages(), 2);
    assert_eq!(first_repo_name(&finder), "bob-p1-r0");
}

#[tokio::test]
async fn test_blank_search_sends_no_request() {
    let server = MockServer::start().await;

    let mut finder = finder_for(&server, PageOrdering::LastArrival);
    assert!(!finder.submit("").await);
    assert!(!finder.submit(" \t ").await);
    assert_eq!(*finder.state().status(), RequestStatus::Idle);

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty());
}

#[tokio::test]
async fn test_user_page_shows_profile_only() {
    let server = MockServer::start().await;
    mount_profile(&server, "octocat", 8).await;
    Mock::given(method("GET"))
        .and(path("/users/octocat/repos"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let view = open_user_page(&client, "octocat").await;
    assert_eq!(view.heading(), "GitHub Profile for octocat");
    assert_eq!(view.profile().map(|p| p.public_repo_count), Some(8));
    assert_eq!(*view.status(), RequestStatus::Success);
}

#[tokio::test]
async fn test_user_page_errors_use_same_taxonomy() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/ghost"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = client_for(&server);

    let view = open_user_page(&client, "ghost").await;
    assert!(view.profile().is_none());
    assert_eq!(
        view.status().error_text().as_deref(),
        Some("GitHub user not found. Please check the username.")
    );

    let view = open_user_page(&client, "broken").await;
    assert_eq!(
        view.status().error_text().as_deref(),
        Some("Error fetching data from GitHub.")
    );
}
