//! Integration tests for the Octocrab gateway against a mock GitHub API.

use issue_feed::github::gateway::ListIssuesParams;
use issue_feed::github::locator::{IssueNumber, parse_api_base};
use issue_feed::{FetchError, IssueGateway, OctocrabGateway, PersonalAccessToken, RepositoryLocator};
use rstest::{fixture, rstest};
use serde_json::{Value, json};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct GatewayFixture {
    server: MockServer,
    locator: RepositoryLocator,
    gateway: OctocrabGateway,
}

#[fixture]
async fn fixture() -> GatewayFixture {
    let server = MockServer::start().await;
    let api_base = parse_api_base(&server.uri()).expect("mock server URI should parse");
    let locator = RepositoryLocator::with_api_base(api_base.clone(), "buildpacks", "pack")
        .expect("locator should build");
    let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
    let gateway = OctocrabGateway::for_token(&token, &api_base).expect("gateway should build");
    GatewayFixture {
        server,
        locator,
        gateway,
    }
}

fn issue_json(number: u64, pull_request: bool) -> Value {
    let mut issue = json!({
        "number": number,
        "title": format!("Issue {number}"),
        "body": null,
        "user": { "login": "octocat", "avatar_url": "https://avatars.example/octocat" },
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-02T00:00:00Z",
        "html_url": format!("https://github.com/buildpacks/pack/issues/{number}"),
        "reactions": { "total_count": 4, "+1": 3, "-1": 1 }
    });
    if pull_request {
        issue["pull_request"] = json!({ "url": "https://api.github.com/pulls/1" });
    }
    issue
}

fn comment_json(id: u64, created_at: &str) -> Value {
    json!({
        "id": id,
        "body": format!("Comment {id}"),
        "user": { "login": "alice" },
        "html_url": format!("https://github.com/buildpacks/pack/issues/1#issuecomment-{id}"),
        "created_at": created_at
    })
}

fn check_run_json(id: u64, suite: Option<u64>) -> Value {
    let mut run = json!({ "id": id, "status": "completed", "conclusion": "success" });
    if let Some(suite_id) = suite {
        run["check_suite"] = json!({ "id": suite_id });
    }
    run
}

#[rstest]
#[tokio::test]
async fn list_open_issues_requests_most_recently_updated_page(
    #[future] fixture: GatewayFixture,
) {
    let fixture = fixture.await;
    Mock::given(method("GET"))
        .and(path("/repos/buildpacks/pack/issues"))
        .and(query_param("state", "open"))
        .and(query_param("sort", "updated"))
        .and(query_param("direction", "desc"))
        .and(query_param("per_page", "5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([issue_json(9, true), issue_json(4, false)])),
        )
        .expect(1)
        .mount(&fixture.server)
        .await;

    let issues = fixture
        .gateway
        .list_open_issues(&fixture.locator, &ListIssuesParams::most_recently_updated(5))
        .await
        .expect("listing should succeed");

    let numbers: Vec<u64> = issues.iter().map(|issue| issue.number.get()).collect();
    assert_eq!(numbers, vec![9, 4]);
    let first = issues.first().expect("first issue should exist");
    assert!(first.is_pull_request);
    assert_eq!(first.body, "");
    assert_eq!(first.author.login, "octocat");
    assert_eq!(first.reactions.plus_one, 3);
    assert_eq!(first.reactions.minus_one, 1);
    assert!(issues.get(1).is_some_and(|issue| !issue.is_pull_request));
}

#[rstest]
#[tokio::test]
async fn issue_comments_follow_pagination_links(#[future] fixture: GatewayFixture) {
    let fixture = fixture.await;
    let comments_path = "/repos/buildpacks/pack/issues/1/comments";
    let next = format!(
        "<{uri}{comments_path}?per_page=100&page=2>; rel=\"next\"",
        uri = fixture.server.uri()
    );

    Mock::given(method("GET"))
        .and(path(comments_path))
        .and(query_param_is_missing("page"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([comment_json(1, "2025-01-01T00:00:00Z")]))
                .insert_header("Link", next.as_str()),
        )
        .mount(&fixture.server)
        .await;
    Mock::given(method("GET"))
        .and(path(comments_path))
        .and(query_param("page", "2"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!([comment_json(2, "2025-01-03T00:00:00Z")])),
        )
        .mount(&fixture.server)
        .await;

    let comments = fixture
        .gateway
        .list_issue_comments(&fixture.locator, IssueNumber::new(1))
        .await
        .expect("comments should load");

    let ids: Vec<u64> = comments.iter().map(|comment| comment.id).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[rstest]
#[tokio::test]
async fn check_runs_are_read_until_total_count_is_reached(#[future] fixture: GatewayFixture) {
    let fixture = fixture.await;
    let runs_path = "/repos/buildpacks/pack/commits/abc123/check-runs";

    Mock::given(method("GET"))
        .and(path(runs_path))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "check_runs": [check_run_json(1, Some(7)), check_run_json(2, None)]
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;
    Mock::given(method("GET"))
        .and(path(runs_path))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 3,
            "check_runs": [check_run_json(3, Some(7))]
        })))
        .expect(1)
        .mount(&fixture.server)
        .await;

    let runs = fixture
        .gateway
        .list_check_runs(&fixture.locator, "abc123")
        .await
        .expect("check runs should load");

    let pairs: Vec<(u64, u64)> = runs.iter().map(|run| (run.suite_id, run.run_id)).collect();
    assert_eq!(pairs, vec![(7, 1), (0, 2), (7, 3)]);
}

#[rstest]
#[tokio::test]
async fn pull_request_head_reports_draft_and_sha(#[future] fixture: GatewayFixture) {
    let fixture = fixture.await;
    Mock::given(method("GET"))
        .and(path("/repos/buildpacks/pack/pulls/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "number": 42,
            "draft": true,
            "head": { "sha": "abc123", "ref": "feature" }
        })))
        .mount(&fixture.server)
        .await;

    let head = fixture
        .gateway
        .pull_request_head(&fixture.locator, IssueNumber::new(42))
        .await
        .expect("pull request should load");

    assert!(head.draft);
    assert_eq!(head.head_sha, "abc123");
}

#[rstest]
#[tokio::test]
async fn reviews_keep_unsubmitted_entries_for_the_normaliser(#[future] fixture: GatewayFixture) {
    let fixture = fixture.await;
    Mock::given(method("GET"))
        .and(path("/repos/buildpacks/pack/pulls/42/reviews"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "body": "Looks good", "user": { "login": "bob" },
              "html_url": "https://github.com/r/1", "submitted_at": "2025-01-01T00:00:00Z" },
            { "id": 2, "body": "", "user": null, "html_url": null }
        ])))
        .mount(&fixture.server)
        .await;

    let reviews = fixture
        .gateway
        .list_reviews(&fixture.locator, IssueNumber::new(42))
        .await
        .expect("reviews should load");

    assert_eq!(reviews.len(), 2);
    assert!(reviews.first().is_some_and(|review| review.submitted_at.is_some()));
    assert!(
        reviews
            .get(1)
            .is_some_and(|review| review.submitted_at.is_none() && review.author.is_empty())
    );
}

#[rstest]
#[case::unauthorised(401, "Bad credentials", None)]
#[case::missing(404, "Not Found", None)]
#[case::rate_limited(
    403,
    "API rate limit exceeded for user",
    Some("https://docs.github.com/rest/overview/rate-limits-for-the-rest-api")
)]
#[tokio::test]
async fn upstream_failures_map_onto_fetch_errors(
    #[future] fixture: GatewayFixture,
    #[case] status: u16,
    #[case] message: &str,
    #[case] documentation_url: Option<&str>,
) {
    let fixture = fixture.await;
    Mock::given(method("GET"))
        .and(path("/repos/buildpacks/pack/issues"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "message": message,
            "documentation_url": documentation_url
        })))
        .mount(&fixture.server)
        .await;

    let error = fixture
        .gateway
        .list_open_issues(&fixture.locator, &ListIssuesParams::default())
        .await
        .expect_err("listing should fail");

    match status {
        401 => assert!(
            matches!(error, FetchError::Authentication { .. }),
            "expected authentication error, got {error:?}"
        ),
        403 => assert!(
            matches!(error, FetchError::RateLimitExceeded { .. }),
            "expected rate limit error, got {error:?}"
        ),
        _ => assert!(
            matches!(&error, FetchError::Api { message } if message.starts_with("list issues")),
            "expected API error, got {error:?}"
        ),
    }
}

#[rstest]
#[tokio::test]
async fn invalid_page_size_is_rejected_before_any_request(#[future] fixture: GatewayFixture) {
    let fixture = fixture.await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&fixture.server)
        .await;

    let error = fixture
        .gateway
        .list_open_issues(&fixture.locator, &ListIssuesParams::most_recently_updated(0))
        .await
        .expect_err("page size 0 should be rejected");

    assert!(matches!(error, FetchError::InvalidPagination { .. }));
}
