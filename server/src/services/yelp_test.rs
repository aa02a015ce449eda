use super::*;

fn config(search_url: &str) -> DiningConfig {
    DiningConfig {
        api_key: "secret".to_owned(),
        search_url: search_url.to_owned(),
        request_timeout_secs: 1,
        connect_timeout_secs: 1,
    }
}

#[test]
fn describe_results_without_businesses_apologises() {
    assert_eq!(describe_results(&SearchResults::default()), NO_RESULTS);
}

#[test]
fn describe_results_uses_first_business_only() {
    let results = parse_search_results(
        r#"{
            "businesses": [
                {
                    "name": "Joe's Shanghai",
                    "url": "https://www.yelp.com/biz/joes-shanghai",
                    "location": { "address1": "46 Bowery", "city": "New York", "state": "NY", "zip_code": "10013" },
                    "rating": 4.0
                },
                { "name": "Second", "url": "https://example.test", "location": {} }
            ],
            "total": 2
        }"#,
    )
    .unwrap();
    assert_eq!(
        describe_results(&results),
        "We recommend Joe's Shanghai. The address is 46 Bowery, New York, NY. \
         You can view details at https://www.yelp.com/biz/joes-shanghai"
    );
}

#[test]
fn describe_results_tolerates_missing_address_parts() {
    let results = parse_search_results(
        r#"{"businesses":[{"name":"Cart","url":"https://y.test/cart","location":{"address1":null,"city":"New York"}}]}"#,
    )
    .unwrap();
    assert_eq!(
        describe_results(&results),
        "We recommend Cart. The address is , New York, . You can view details at https://y.test/cart"
    );
}

#[test]
fn parse_search_results_treats_missing_list_as_empty() {
    assert_eq!(parse_search_results("{}").unwrap(), SearchResults::default());
}

#[test]
fn parse_search_results_rejects_invalid_json() {
    assert!(matches!(parse_search_results("<html>"), Err(ResponderError::Parse(_))));
}

#[tokio::test]
async fn search_reports_unreachable_endpoint() {
    let search = YelpSearch::new(&config("http://127.0.0.1:9/v3/businesses/search")).unwrap();
    let query = SearchQuery { location: "NYC".to_owned(), term: "japanese".to_owned(), open_at: 1_715_455_800 };
    let err = search.search(&query).await.unwrap_err();
    assert!(matches!(err, ResponderError::Request(_)));
}
