//! End-to-end tests for query-string encoding.
//!
//! The wiremock matchers observe the URL the pipeline actually produced, so
//! these tests pin the on-the-wire encoding rules: omit-if-empty scalars,
//! comma-joined lists, `;`-joined sorted maps, and the present-but-empty
//! override.

use std::collections::BTreeMap;

use sonarapi::projects::CreateProjectOpts;
use sonarapi::{issues, project_tags, projects, rules};
use sonarapi::{Auth, PageParams, SonarClient};
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> SonarClient {
    SonarClient::new(&server.uri(), Auth::token("test-token")).unwrap()
}

#[tokio::test]
async fn test_required_only_options_encode_exactly_the_required_params() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/projects/create"))
        .and(query_param("name", "My Project"))
        .and(query_param("project", "org.example:my-project"))
        .and(query_param_is_missing("visibility"))
        .and(query_param_is_missing("mainBranch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "project": {"key": "org.example:my-project", "name": "My Project"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = CreateProjectOpts {
        name: "My Project".to_string(),
        project: "org.example:my-project".to_string(),
        ..Default::default()
    };
    let project = projects::create(&client_for(&mock_server), &opts)
        .await
        .unwrap();
    assert_eq!(project.key, "org.example:my-project");
}

#[tokio::test]
async fn test_post_carries_parameters_in_query_not_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/issues/assign"))
        .and(query_param("issue", "AX-42"))
        .and(query_param("assignee", "alice"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "issue": {"key": "AX-42", "rule": "squid:S1067", "assignee": "alice"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = issues::AssignIssueOpts {
        issue: "AX-42".to_string(),
        assignee: Some("alice".to_string()),
    };
    let issue = issues::assign(&client_for(&mock_server), &opts)
        .await
        .unwrap();
    assert_eq!(issue.assignee.as_deref(), Some("alice"));
}

#[tokio::test]
async fn test_comma_joined_lists_and_flattened_paging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/issues/search"))
        .and(query_param("severities", "BLOCKER,CRITICAL"))
        .and(query_param("statuses", "OPEN,REOPENED"))
        .and(query_param("p", "3"))
        .and(query_param("ps", "25"))
        .and(query_param_is_missing("tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "paging": {"pageIndex": 3, "pageSize": 25, "total": 0},
            "issues": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = issues::SearchIssuesOpts {
        severities: vec!["BLOCKER".to_string(), "CRITICAL".to_string()],
        statuses: vec!["OPEN".to_string(), "REOPENED".to_string()],
        page: PageParams::for_page(3, 25),
        ..Default::default()
    };
    let page = issues::search(&client_for(&mock_server), &opts)
        .await
        .unwrap();
    assert!(page.is_empty());
    assert!(!page.has_more);
}

#[tokio::test]
async fn test_semicolon_map_is_sorted_by_key() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/rules/create"))
        .and(query_param("params", "message=found;xpathQuery=//call"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "rule": {"key": "my_repo:my_rule", "name": "My Rule"}
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut params = BTreeMap::new();
    // Inserted out of order; encoding sorts by key.
    params.insert("xpathQuery".to_string(), "//call".to_string());
    params.insert("message".to_string(), "found".to_string());

    let opts = rules::CreateRuleOpts {
        custom_key: "my_rule".to_string(),
        template_key: "squid:XPath".to_string(),
        name: "My Rule".to_string(),
        markdown_description: "Finds calls.".to_string(),
        params,
        ..Default::default()
    };
    rules::create(&client_for(&mock_server), &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_clearing_tags_sends_present_but_empty_parameter() {
    let mock_server = MockServer::start().await;

    // `tags=` and an absent `tags` differ server-side; clearing needs the
    // empty-but-present form.
    Mock::given(method("POST"))
        .and(path("/api/project_tags/set"))
        .and(query_param("project", "org.example:app"))
        .and(query_param("tags", ""))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let opts = project_tags::SetProjectTagsOpts {
        project: "org.example:app".to_string(),
        tags: project_tags::TagList::default(),
    };
    project_tags::set(&client_for(&mock_server), &opts)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_empty_options_produce_no_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/projects/search"))
        .and(query_param_is_missing("projects"))
        .and(query_param_is_missing("qualifiers"))
        .and(query_param_is_missing("p"))
        .and(query_param_is_missing("ps"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "paging": {"pageIndex": 1, "pageSize": 100, "total": 0},
            "components": []
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    projects::search(&client_for(&mock_server), &Default::default())
        .await
        .unwrap();
}
