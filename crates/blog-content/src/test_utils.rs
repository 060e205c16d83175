//! Fixture builders shared by the unit tests of this crate.

use chrono::{DateTime, TimeZone, Utc};

use crate::model::{Article, DEFAULT_AUTHOR};
use crate::reading_time::estimate_reading_time;

pub fn date(y: i32, m: u32, d: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .expect("valid fixture date")
}

pub fn article(id: &str) -> Article {
    let body = format!("Body of {id}.");
    Article {
        id: id.to_string(),
        title: format!("Title {id}"),
        description: format!("Description {id}"),
        reading_time: estimate_reading_time(&body, 120),
        body,
        tags: Vec::new(),
        category: None,
        author: DEFAULT_AUTHOR.to_string(),
        date: date(2024, 1, 1),
        updated_date: None,
        draft: false,
        featured: false,
    }
}

pub trait ArticleFixture {
    fn titled(self, title: &str) -> Self;
    fn described(self, description: &str) -> Self;
    fn with_body(self, body: &str) -> Self;
    fn tagged(self, tags: &[&str]) -> Self;
    fn in_category(self, category: &str) -> Self;
    fn dated(self, date: DateTime<Utc>) -> Self;
    fn draft(self) -> Self;
    fn featured(self) -> Self;
}

impl ArticleFixture for Article {
    fn titled(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    fn described(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self.reading_time = estimate_reading_time(body, 120);
        self
    }

    fn tagged(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    fn in_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    fn dated(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    fn draft(mut self) -> Self {
        self.draft = true;
        self
    }

    fn featured(mut self) -> Self {
        self.featured = true;
        self
    }
}
