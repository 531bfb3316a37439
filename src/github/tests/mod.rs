//! Unit tests for project URL parsing and owner resolution.

use rstest::rstest;

use super::{
    OwnerKind, PersonalAccessToken, ProjectLocator, TriageError, resolve_query_root,
};

#[rstest]
#[case::organisation(
    "https://github.com/orgs/acme/projects/7",
    OwnerKind::Organization,
    "acme",
    7
)]
#[case::user("https://github.com/users/jane/projects/3", OwnerKind::User, "jane", 3)]
#[case::with_view("https://github.com/orgs/acme/projects/12/views/2", OwnerKind::Organization, "acme", 12)]
fn parses_project_urls(
    #[case] url: &str,
    #[case] kind: OwnerKind,
    #[case] owner: &str,
    #[case] number: u64,
) {
    let locator = ProjectLocator::parse(url).expect("should parse project URL");

    assert_eq!(locator.owner_kind(), kind, "owner kind mismatch");
    assert_eq!(locator.owner().as_str(), owner, "owner mismatch");
    assert_eq!(locator.number().get(), number, "number mismatch");
}

#[rstest]
fn github_com_uses_public_api_base() {
    let locator = ProjectLocator::parse("https://github.com/orgs/acme/projects/7")
        .expect("should parse project URL");
    assert_eq!(
        locator.api_base().as_str(),
        "https://api.github.com/",
        "api base mismatch"
    );
}

#[rstest]
fn enterprise_hosts_use_api_prefix() {
    let locator = ProjectLocator::parse("https://ghe.example.com:8443/users/jane/projects/3")
        .expect("should parse enterprise URL");
    assert_eq!(
        locator.api_base().as_str(),
        "https://ghe.example.com:8443/api",
        "enterprise api base mismatch"
    );
}

#[rstest]
#[case::repository_path("https://github.com/acme/repo")]
#[case::unknown_kind("https://github.com/teams/acme/projects/7")]
#[case::wrong_marker("https://github.com/orgs/acme/boards/7")]
#[case::missing_number("https://github.com/orgs/acme/projects/")]
#[case::missing_owner("https://github.com/orgs//projects/7")]
#[case::truncated("https://github.com/orgs/acme")]
fn rejects_malformed_paths(#[case] url: &str) {
    let result = ProjectLocator::parse(url);
    assert!(
        matches!(result, Err(TriageError::InvalidProjectPath)),
        "expected InvalidProjectPath for {url}, got {result:?}"
    );
}

#[rstest]
#[case::non_numeric("https://github.com/orgs/acme/projects/seven")]
#[case::signed("https://github.com/orgs/acme/projects/+7")]
#[case::zero("https://github.com/orgs/acme/projects/0")]
fn rejects_invalid_project_numbers(#[case] url: &str) {
    let result = ProjectLocator::parse(url);
    assert!(
        matches!(result, Err(TriageError::InvalidProjectNumber)),
        "expected InvalidProjectNumber for {url}, got {result:?}"
    );
}

#[rstest]
fn rejects_unparseable_url() {
    let result = ProjectLocator::parse("orgs/acme/projects/7");
    assert!(
        matches!(result, Err(TriageError::InvalidUrl(_))),
        "expected InvalidUrl, got {result:?}"
    );
}

#[rstest]
#[case::orgs_segment("orgs", "organization")]
#[case::users_segment("users", "user")]
#[case::graphql_root("ORGANIZATION", "organization")]
#[case::graphql_user("User", "user")]
fn resolves_query_roots(#[case] token: &str, #[case] expected: &str) {
    assert_eq!(resolve_query_root(token), Ok(expected), "root mismatch for {token}");
}

#[rstest]
fn rejects_unknown_owner_kind() {
    assert_eq!(
        resolve_query_root("enterprise"),
        Err(TriageError::UnsupportedOwnerKind {
            kind: "enterprise".to_owned()
        })
    );
}

#[rstest]
fn rejects_empty_token() {
    let result = PersonalAccessToken::new("  ");
    assert!(
        matches!(result, Err(TriageError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[rstest]
fn configuration_errors_are_classified() {
    assert!(TriageError::InvalidProjectPath.is_configuration());
    assert!(
        TriageError::ProjectNotFound {
            owner: "acme".to_owned(),
            number: 1
        }
        .is_configuration()
    );
    assert!(
        !TriageError::Network {
            message: "reset".to_owned()
        }
        .is_configuration()
    );
}
