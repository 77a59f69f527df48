use std::time::Duration;

use chrono::Utc;
use coindash::services::news_service::{NewsQuery, NewsService, CATEGORIES};

fn news() -> NewsService {
    NewsService::new(Duration::ZERO)
}

#[tokio::test]
async fn latest_filters_by_category() {
    let res = news().latest(1, 20, Some("market")).await;

    assert_eq!(res.total_results, 2);
    assert!(res.articles.iter().all(|a| a.category == "market"));
    assert!(!res.has_more);
}

#[tokio::test]
async fn all_category_means_no_filter() {
    let res = news().latest(1, 20, Some("all")).await;
    assert_eq!(res.total_results, 8);
}

#[tokio::test]
async fn for_coins_matches_any_listed_coin() {
    let res = news().for_coins(&["binancecoin".to_string(), "solana".to_string()], 1, 10).await;

    let titles: Vec<&str> = res.articles.iter().map(|a| a.title.as_str()).collect();
    assert_eq!(res.total_results, 2);
    assert!(titles.contains(&"Cryptocurrency Market Cap Reaches Historic Milestone"));
    assert!(titles.contains(&"DeFi Protocols Report Strong Q4 Performance"));
}

#[tokio::test]
async fn search_is_case_insensitive_and_covers_category() {
    let svc = news();

    assert_eq!(svc.search("CBDC", 1, 10).await.total_results, 1);
    // "nft" appears only as a category and in the NFT article
    assert_eq!(svc.search("nft", 1, 10).await.total_results, 1);
    assert_eq!(svc.search("no such words", 1, 10).await.total_results, 0);
}

#[test]
fn page_zero_is_treated_as_first_page() {
    let res = news().query_now(&NewsQuery {
        page: 0,
        limit: 2,
        ..Default::default()
    });

    assert_eq!(res.page, 1);
    assert_eq!(res.articles.len(), 2);
    assert!(res.has_more);
}

#[test]
fn articles_are_newest_first_in_known_categories() {
    let now = Utc::now();
    let articles = NewsService::articles_at(now);

    assert_eq!(articles.len(), 8);
    assert_eq!(articles[0].title, "Bitcoin Institutional Adoption Reaches New Heights");
    for pair in articles.windows(2) {
        assert!(pair[0].published_at >= pair[1].published_at);
    }
    assert!(articles.iter().all(|a| CATEGORIES.contains(&a.category.as_str())));
}
