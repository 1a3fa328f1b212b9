//! Book (bibliographic record) model and related types

use serde::{Deserialize, Serialize};

use super::book_instance::BookInstance;
use super::enums::BookStatus;

/// Book as returned by the catalog endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub year_of_published: Option<i32>,
    #[serde(default)]
    pub total_copies: i64,
    #[serde(default)]
    pub available_copies: i64,
}

impl Book {
    pub fn is_available(&self) -> bool {
        self.available_copies > 0
    }
}

/// Create/update book request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookForm {
    pub title: String,
    pub author: String,
    pub isbn: String,
    pub category: String,
    pub language: String,
    pub publisher: String,
    pub year_of_published: i32,
}

impl BookForm {
    /// Empty form as offered by the "add book" dialog
    pub fn blank(current_year: i32) -> Self {
        Self {
            title: String::new(),
            author: String::new(),
            isbn: String::new(),
            category: String::new(),
            language: "English".to_string(),
            publisher: String::new(),
            year_of_published: current_year,
        }
    }
}

impl From<&Book> for BookForm {
    fn from(book: &Book) -> Self {
        Self {
            title: book.title.clone(),
            author: book.author.clone(),
            isbn: book.isbn.clone().unwrap_or_default(),
            category: book.category.clone().unwrap_or_default(),
            language: book.language.clone().unwrap_or_default(),
            publisher: book.publisher.clone().unwrap_or_default(),
            year_of_published: book.year_of_published.unwrap_or_default(),
        }
    }
}

/// Copies of one book held by one library
#[derive(Debug, Clone, PartialEq)]
pub struct LibraryHolding {
    pub library_id: i64,
    pub library_name: Option<String>,
    pub total_copies: usize,
    pub available_copies: usize,
    pub instances: Vec<BookInstance>,
}

impl LibraryHolding {
    /// First copy on the shelf, if any
    pub fn first_available(&self) -> Option<&BookInstance> {
        self.instances.iter().find(|i| i.bk_status == BookStatus::Available)
    }
}

/// Book enriched with per-library availability, as shown in the catalog
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogBook {
    pub book: Book,
    pub holdings: Vec<LibraryHolding>,
}

impl CatalogBook {
    /// Group a book's instances by library, keeping first-seen library order.
    /// Only AVAILABLE copies count as available.
    pub fn new(book: Book, instances: Vec<BookInstance>) -> Self {
        let mut holdings: Vec<LibraryHolding> = Vec::new();

        for instance in instances {
            let idx = match holdings.iter().position(|h| h.library_id == instance.library_id) {
                Some(idx) => idx,
                None => {
                    holdings.push(LibraryHolding {
                        library_id: instance.library_id,
                        library_name: instance.library_name.clone(),
                        total_copies: 0,
                        available_copies: 0,
                        instances: Vec::new(),
                    });
                    holdings.len() - 1
                }
            };

            let holding = &mut holdings[idx];
            holding.total_copies += 1;
            if instance.bk_status == BookStatus::Available {
                holding.available_copies += 1;
            }
            holding.instances.push(instance);
        }

        Self { book, holdings }
    }

    pub fn holding(&self, library_id: i64) -> Option<&LibraryHolding> {
        self.holdings.iter().find(|h| h.library_id == library_id)
    }

    /// Whether the given library has at least one copy on the shelf
    pub fn available_at(&self, library_id: i64) -> bool {
        self.holding(library_id).map_or(false, |h| h.available_copies > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::enums::BookCondition;

    fn instance(id: i64, library_id: i64, status: BookStatus) -> BookInstance {
        BookInstance {
            bk_instance_id: id,
            book_id: 1,
            book_title: Some("Dune".to_string()),
            library_id,
            library_name: Some(format!("Branch {}", library_id)),
            bk_status: status,
            bk_condition: BookCondition::Good,
            acquisition_date: None,
        }
    }

    fn book() -> Book {
        serde_json::from_value(serde_json::json!({
            "bookId": 1,
            "title": "Dune",
            "author": "Frank Herbert",
            "totalCopies": 3,
            "availableCopies": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_book_deserialize_defaults() {
        let b = book();
        assert_eq!(b.isbn, None);
        assert!(b.is_available());
    }

    #[test]
    fn test_group_instances_by_library() {
        let catalog = CatalogBook::new(
            book(),
            vec![
                instance(10, 2, BookStatus::Borrowed),
                instance(11, 1, BookStatus::Available),
                instance(12, 2, BookStatus::Available),
                instance(13, 2, BookStatus::Damaged),
            ],
        );

        assert_eq!(catalog.holdings.len(), 2);
        let second = catalog.holding(2).unwrap();
        assert_eq!(second.total_copies, 3);
        assert_eq!(second.available_copies, 1);
        assert_eq!(second.first_available().unwrap().bk_instance_id, 12);
        assert_eq!(catalog.holdings[0].library_id, 2);
        assert!(catalog.available_at(1));
        assert!(!catalog.available_at(3));
    }
}
