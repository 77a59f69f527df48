use std::time::Duration;

use chrono::{DateTime, Duration as ChronoDuration, SecondsFormat, Utc};

use crate::models::{NewsArticle, NewsResponse, Sentiment};

pub const CATEGORIES: [&str; 7] = ["market", "technology", "defi", "regulation", "nft", "gaming", "cbdc"];

const TRENDING_COUNT: usize = 5;

struct Seed {
    title: &'static str,
    description: &'static str,
    url: &'static str,
    source: &'static str,
    category: &'static str,
    sentiment: Sentiment,
    coins: &'static [&'static str],
    hours_ago: i64,
}

const SEEDS: [Seed; 8] = [
    Seed {
        title: "Bitcoin Institutional Adoption Reaches New Heights",
        description: "Major corporations continue to add Bitcoin to their balance sheets, signaling growing institutional confidence in cryptocurrency.",
        url: "https://example.com/bitcoin-adoption",
        source: "CoinDesk",
        category: "market",
        sentiment: Sentiment::Positive,
        coins: &["bitcoin"],
        hours_ago: 3,
    },
    Seed {
        title: "Ethereum Layer 2 Solutions See Record Growth",
        description: "Layer 2 scaling solutions for Ethereum experience unprecedented adoption as users seek lower fees and faster transactions.",
        url: "https://example.com/ethereum-layer2",
        source: "CoinTelegraph",
        category: "technology",
        sentiment: Sentiment::Positive,
        coins: &["ethereum"],
        hours_ago: 27,
    },
    Seed {
        title: "DeFi Protocols Report Strong Q4 Performance",
        description: "Decentralized Finance platforms show resilient growth with total value locked increasing across major protocols.",
        url: "https://example.com/defi-performance",
        source: "The Block",
        category: "defi",
        sentiment: Sentiment::Positive,
        coins: &["ethereum", "solana", "avalanche"],
        hours_ago: 9,
    },
    Seed {
        title: "Regulatory Framework Updates Provide Market Clarity",
        description: "New cryptocurrency regulations offer clearer guidelines for institutional participation and mainstream adoption.",
        url: "https://example.com/crypto-regulation",
        source: "Crypto News",
        category: "regulation",
        sentiment: Sentiment::Neutral,
        coins: &["bitcoin", "ethereum"],
        hours_ago: 52,
    },
    Seed {
        title: "NFT Market Evolution: Utility-Focused Projects Rise",
        description: "Non-fungible token projects with real-world utility gain traction as the market matures beyond speculative trading.",
        url: "https://example.com/nft-evolution",
        source: "NFT News",
        category: "nft",
        sentiment: Sentiment::Positive,
        coins: &["ethereum"],
        hours_ago: 75,
    },
    Seed {
        title: "Web3 Gaming Tokens Show Strong Market Performance",
        description: "Play-to-earn and blockchain gaming tokens experience significant growth as gaming adoption increases.",
        url: "https://example.com/web3-gaming",
        source: "Gaming Crypto",
        category: "gaming",
        sentiment: Sentiment::Positive,
        coins: &["axie-infinity", "the-sandbox", "decentraland"],
        hours_ago: 110,
    },
    Seed {
        title: "Central Bank Digital Currencies Gain Global Momentum",
        description: "Multiple countries accelerate CBDC development programs as digital currency adoption becomes mainstream.",
        url: "https://example.com/cbdc-momentum",
        source: "Digital Currency Report",
        category: "cbdc",
        sentiment: Sentiment::Neutral,
        coins: &["bitcoin", "ethereum"],
        hours_ago: 140,
    },
    Seed {
        title: "Cryptocurrency Market Cap Reaches Historic Milestone",
        description: "Total cryptocurrency market capitalization hits new record as institutional and retail adoption continues to grow.",
        url: "https://example.com/market-milestone",
        source: "Market Analysis",
        category: "market",
        sentiment: Sentiment::Positive,
        coins: &["bitcoin", "ethereum", "binancecoin"],
        hours_ago: 16,
    },
];

#[derive(Debug, Clone, Default)]
pub struct NewsQuery {
    pub category: Option<String>,
    pub coins: Vec<String>,
    pub q: Option<String>,
    pub page: usize,
    pub limit: usize,
}

/// Serves a fixed set of made-up articles behind the same shape a real
/// news source would have.
#[derive(Clone)]
pub struct NewsService {
    latency: Duration,
}

impl NewsService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    pub fn categories(&self) -> Vec<&'static str> {
        CATEGORIES.to_vec()
    }

    /// All articles, newest first.
    pub fn articles_at(now: DateTime<Utc>) -> Vec<NewsArticle> {
        let mut dated: Vec<(DateTime<Utc>, NewsArticle)> = SEEDS
            .iter()
            .map(|s| {
                let published = now - ChronoDuration::hours(s.hours_ago);
                let article = NewsArticle {
                    title: s.title.to_string(),
                    description: s.description.to_string(),
                    url: s.url.to_string(),
                    source: s.source.to_string(),
                    published_at: published.to_rfc3339_opts(SecondsFormat::Millis, true),
                    image: None,
                    category: s.category.to_string(),
                    sentiment: s.sentiment,
                    coins: s.coins.iter().map(|c| c.to_string()).collect(),
                };
                (published, article)
            })
            .collect();

        dated.sort_by(|a, b| b.0.cmp(&a.0));
        dated.into_iter().map(|(_, a)| a).collect()
    }

    /// Filter, sort and paginate synchronously.
    pub fn query_now(&self, query: &NewsQuery) -> NewsResponse {
        let needle = query
            .q
            .as_deref()
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        let category = query
            .category
            .as_deref()
            .filter(|c| !c.is_empty() && *c != "all");

        let filtered: Vec<NewsArticle> = Self::articles_at(Utc::now())
            .into_iter()
            .filter(|a| category.is_none_or(|c| a.category == c))
            .filter(|a| query.coins.is_empty() || a.coins.iter().any(|c| query.coins.contains(c)))
            .filter(|a| {
                needle.as_deref().is_none_or(|n| {
                    a.title.to_lowercase().contains(n)
                        || a.description.to_lowercase().contains(n)
                        || a.category.to_lowercase().contains(n)
                })
            })
            .collect();

        paginate(filtered, query.page, query.limit)
    }

    pub async fn query(&self, query: &NewsQuery) -> NewsResponse {
        tokio::time::sleep(self.latency).await;
        self.query_now(query)
    }

    pub async fn latest(&self, page: usize, limit: usize, category: Option<&str>) -> NewsResponse {
        self.query(&NewsQuery {
            category: category.map(str::to_string),
            page,
            limit,
            ..Default::default()
        })
        .await
    }

    pub async fn for_coins(&self, coin_ids: &[String], page: usize, limit: usize) -> NewsResponse {
        self.query(&NewsQuery {
            coins: coin_ids.to_vec(),
            page,
            limit,
            ..Default::default()
        })
        .await
    }

    pub async fn search(&self, q: &str, page: usize, limit: usize) -> NewsResponse {
        self.query(&NewsQuery {
            q: Some(q.to_string()),
            page,
            limit,
            ..Default::default()
        })
        .await
    }

    pub async fn trending(&self) -> Vec<NewsArticle> {
        tokio::time::sleep(self.latency).await;
        Self::articles_at(Utc::now())
            .into_iter()
            .take(TRENDING_COUNT)
            .collect()
    }
}

fn paginate(all: Vec<NewsArticle>, page: usize, limit: usize) -> NewsResponse {
    let page = page.max(1);
    let total = all.len();
    let start = (page - 1).saturating_mul(limit);
    let end = start.saturating_add(limit);

    let articles = all.into_iter().skip(start).take(limit).collect();

    NewsResponse {
        articles,
        total_results: total,
        page,
        has_more: end < total,
    }
}
