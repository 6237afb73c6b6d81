use chrono::{DateTime, Duration, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;

use crate::models::{NewsItem, Stock};

/// Headlines generated per stock at startup.
pub const ITEMS_PER_STOCK: usize = 5;
/// Items are dated somewhere in the last week.
const MAX_AGE_DAYS: i64 = 7;

const HEADLINE_TEMPLATES: [&str; 10] = [
    "{company} Reports Strong Quarterly Earnings, Exceeding Analyst Expectations",
    "{company} Announces New Product Line to Launch Next Quarter",
    "{company} CEO Discusses Future Growth Strategy in Interview",
    "{company} Expands Operations to New Markets in Asia",
    "Investors Remain Bullish on {company} Despite Market Uncertainty",
    "{company} Partners with Tech Giant for New Initiative",
    "Analysts Upgrade {company} Stock Rating to 'Buy'",
    "{company} Faces Regulatory Scrutiny Over Recent Business Practices",
    "{company} Announces Stock Split, Shareholders Approve",
    "{company} Invests Heavily in Sustainable Technology",
];

const SOURCES: [&str; 5] = [
    "Bloomberg",
    "Reuters",
    "CNBC",
    "Financial Times",
    "Wall Street Journal",
];

/// Generate the fixed set of news items for one stock.
pub fn generate_news<R: Rng>(rng: &mut R, stock: &Stock, now: DateTime<Utc>) -> Vec<NewsItem> {
    (0..ITEMS_PER_STOCK)
        .map(|i| {
            let age_days = rng.random_range(0..MAX_AGE_DAYS);
            let template = HEADLINE_TEMPLATES
                .choose(rng)
                .copied()
                .unwrap_or(HEADLINE_TEMPLATES[0]);
            let source = SOURCES.choose(rng).copied().unwrap_or(SOURCES[0]);

            NewsItem {
                id: format!("{}-news-{}", stock.symbol, i),
                date: now - Duration::days(age_days),
                headline: template.replace("{company}", &stock.name),
                source: source.to_string(),
                url: format!(
                    "https://example.com/news/{}/{}",
                    stock.symbol.to_lowercase(),
                    i
                ),
                summary: format!(
                    "This article discusses the latest developments at {} and what it means \
                     for investors. Analysis suggests potential impact on stock performance.",
                    stock.name
                ),
            }
        })
        .collect()
}
