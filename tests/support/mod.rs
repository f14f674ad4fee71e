#![allow(dead_code)]

use async_trait::async_trait;
use shelfmark::provider::{BookSearchProvider, SearchFilter};
use shelfmark::Book;
use std::sync::Mutex;

/// Provider returning canned results and recording every call it receives.
pub struct StubProvider {
    name: &'static str,
    results: Vec<Book>,
    calls: Mutex<Vec<String>>,
}

impl StubProvider {
    pub fn new(name: &'static str, results: Vec<Book>) -> Self {
        Self {
            name,
            results,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn empty(name: &'static str) -> Self {
        Self::new(name, Vec::new())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookSearchProvider for StubProvider {
    fn id(&self) -> &str {
        self.name
    }

    async fn search(&self, query: &str, filter: SearchFilter) -> Vec<Book> {
        self.calls.lock().unwrap().push(format!("search:{filter}:{query}"));
        self.results.clone()
    }

    async fn search_by_category(&self, genre: &str) -> Vec<Book> {
        self.calls.lock().unwrap().push(format!("category:{genre}"));
        self.results.clone()
    }
}

pub fn book(id: &str, title: &str) -> Book {
    Book::new(id, title)
}

/// Candidate with the fields the recommendation rules look at.
pub fn candidate(id: &str, author: &str, categories: &[&str], pages: u32, description_len: usize) -> Book {
    let mut book = Book::new(id, id);
    book.authors = vec![author.to_string()];
    book.categories = categories.iter().map(ToString::to_string).collect();
    book.page_count = pages;
    book.description = "d".repeat(description_len);
    book
}
