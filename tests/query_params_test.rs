use portfolio_probe::http::{Method, Request};

fn projects_url() -> url::Url {
    url::Url::parse("http://localhost:8001/api/portfolio/projects").unwrap()
}

#[test]
fn test_query_params_storage() {
    let request = Request::new(Method::Get, projects_url())
        .with_query("category", "AI")
        .with_query("page", "1");

    assert_eq!(request.query_params.len(), 2);
    assert_eq!(
        request.query_params[0],
        ("category".to_string(), "AI".to_string())
    );
    assert_eq!(
        request.full_url().as_str(),
        "http://localhost:8001/api/portfolio/projects?category=AI&page=1"
    );
}

#[test]
fn test_query_values_are_encoded() {
    let request =
        Request::new(Method::Get, projects_url()).with_query("category", "Machine Learning & AI");

    assert_eq!(
        request.full_url().query(),
        Some("category=Machine+Learning+%26+AI")
    );
}

#[test]
fn test_empty_query_params() {
    let request = Request::new(Method::Post, projects_url());

    assert!(request.query_params.is_empty());
    assert_eq!(request.full_url(), projects_url());
    assert_eq!(request.full_url().query(), None);
}
