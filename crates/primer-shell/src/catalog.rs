//! Generated data sets for the transition and deferred-value panels.

use std::rc::Rc;

pub const CATEGORIES: [&str; 4] = ["Electronics", "Books", "Clothing", "Food"];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Product {
    pub id: usize,
    pub name: String,
    pub category: &'static str,
    /// Whole dollars, 10..=109.
    pub price: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Article {
    pub id: usize,
    pub title: String,
    pub content: String,
}

pub fn products(count: usize) -> Rc<Vec<Product>> {
    Rc::new(
        (0..count)
            .map(|i| Product {
                id: i,
                name: format!("Item {i}"),
                category: CATEGORIES[i % CATEGORIES.len()],
                price: price_for(i),
            })
            .collect(),
    )
}

pub fn articles(count: usize) -> Rc<Vec<Article>> {
    Rc::new(
        (0..count)
            .map(|i| Article {
                id: i,
                title: format!("Article {i}"),
                content: format!("Content about topic {}", i % 10),
            })
            .collect(),
    )
}

// Knuth multiplicative hash; stable across runs.
fn price_for(i: usize) -> u32 {
    let h = (i as u64).wrapping_mul(2_654_435_761) >> 7;
    10 + (h % 100) as u32
}

/// Case-insensitive substring match against any of `fields`. An empty query
/// matches everything.
pub fn matches(query: &str, fields: &[&str]) -> bool {
    let q = query.to_lowercase();
    q.is_empty() || fields.iter().any(|f| f.to_lowercase().contains(&q))
}

/// Indices of products whose name or category matches `query`.
pub fn filter_products(items: &[Product], query: &str) -> Rc<Vec<usize>> {
    Rc::new(
        items
            .iter()
            .filter(|p| matches(query, &[p.name.as_str(), p.category]))
            .map(|p| p.id)
            .collect(),
    )
}

/// Indices of articles whose title or content matches `query`.
pub fn filter_articles(items: &[Article], query: &str) -> Rc<Vec<usize>> {
    Rc::new(
        items
            .iter()
            .filter(|a| matches(query, &[a.title.as_str(), a.content.as_str()]))
            .map(|a| a.id)
            .collect(),
    )
}
