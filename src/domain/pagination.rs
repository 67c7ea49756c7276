use mongodb::bson::{doc, Document};
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECORDS_PER_PAGE: i64 = 10;

// `$slice` only takes 32 bit arguments
const MAX_SLICE_ARGUMENT: i64 = i32::MAX as i64;

/// Raw listing query. Values are kept as strings so that garbage such as
/// `?page=abc` falls back to a default instead of rejecting the request.
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct PageQuery{
    pub record_per_page: Option<String>,
    pub page: Option<String>,
    pub start_index: Option<String>
}

/// Effective slice of a listing: at most `record_per_page` records starting
/// at `start_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow{
    pub record_per_page: i64,
    pub page: i64,
    pub start_index: i64
}

impl PageWindow {
    pub fn new(record_per_page: Option<i64>, page: Option<i64>, start_index: Option<i64>) -> Self {
        let record_per_page = record_per_page
            .filter(|r| *r >= 1)
            .unwrap_or(DEFAULT_RECORDS_PER_PAGE)
            .min(MAX_SLICE_ARGUMENT);
        let page = page
            .filter(|p| *p >= 1)
            .unwrap_or(1);
        let start_index = start_index
            .filter(|s| *s >= 0)
            .unwrap_or_else(|| (page - 1).saturating_mul(record_per_page))
            .min(MAX_SLICE_ARGUMENT);

        Self{ record_per_page, page, start_index }
    }

    pub fn from_query(query: &PageQuery) -> Self {
        fn parse(raw: &Option<String>) -> Option<i64> {
            raw.as_deref().and_then(|v| v.trim().parse::<i64>().ok())
        }

        Self::new(parse(&query.record_per_page), parse(&query.page), parse(&query.start_index))
    }

    // Index range into a collection of `len` records, clamped to its bounds
    pub fn bounds(&self, len: usize) -> std::ops::Range<usize> {
        let start = usize::try_from(self.start_index).unwrap_or(usize::MAX).min(len);
        let end = start
            .saturating_add(usize::try_from(self.record_per_page).unwrap_or(usize::MAX))
            .min(len);
        start..end
    }

    /// Single pass: group every document into one bucket, count it, and
    /// slice the window out of the bucket.
    pub fn pipeline(&self) -> Vec<Document> {
        vec![
            doc! { "$match": {} },
            doc! { "$group": {
                "_id": null,
                "total_count": { "$sum": 1 },
                "data": { "$push": "$$ROOT" }
            }},
            doc! { "$project": {
                "_id": 0,
                "total_count": 1,
                "items": { "$slice": ["$data", self.start_index, self.record_per_page] }
            }},
        ]
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Page<T>{
    pub total_count: u64,
    pub items: Vec<T>
}

impl<T> Page<T> {
    pub fn empty() -> Self {
        Self{ total_count: 0, items: Vec::new() }
    }
}
