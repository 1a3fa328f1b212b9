//! Book catalog endpoints

use crate::{
    api::ApiClient,
    error::AppResult,
    models::{Book, BookForm, BookInstance},
};

/// Page size used by the admin screens when they need the whole collection
pub const FULL_LIST_SIZE: u32 = 100;

/// Field used by the server-side search endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Title,
    Author,
    Category,
}

impl SearchField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Author => "author",
            SearchField::Category => "category",
        }
    }
}

#[derive(Clone)]
pub struct BooksService {
    client: ApiClient,
}

impl BooksService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// One page of books
    pub async fn list(&self, page: u32, size: u32) -> AppResult<Vec<Book>> {
        self.client
            .get_query("/books", &[("page", page), ("size", size)])
            .await
    }

    pub async fn get(&self, id: i64) -> AppResult<Book> {
        self.client.get(&format!("/books/{}", id)).await
    }

    pub async fn search(&self, field: SearchField, term: &str) -> AppResult<Vec<Book>> {
        let key = field.as_str();
        self.client
            .get_query(&format!("/books/search/{}", key), &[(key, term)])
            .await
    }

    pub async fn categories(&self) -> AppResult<Vec<String>> {
        self.client.get("/books/categories").await
    }

    pub async fn publication_years(&self) -> AppResult<Vec<i32>> {
        self.client.get("/books/years").await
    }

    pub async fn create(&self, form: &BookForm) -> AppResult<Book> {
        self.client.post("/books", form).await
    }

    pub async fn update(&self, id: i64, form: &BookForm) -> AppResult<Book> {
        self.client.put(&format!("/books/{}", id), form).await
    }

    pub async fn delete(&self, id: i64) -> AppResult<()> {
        self.client.delete(&format!("/books/{}", id)).await
    }

    pub async fn instances(&self, book_id: i64) -> AppResult<Vec<BookInstance>> {
        self.client
            .get(&format!("/book-instances/book/{}", book_id))
            .await
    }

    pub async fn available_instances(&self, book_id: i64) -> AppResult<Vec<BookInstance>> {
        self.client
            .get(&format!("/book-instances/book/{}/available", book_id))
            .await
    }
}
