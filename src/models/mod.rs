//! Data models mirrored from the library REST API

pub mod admin;
pub mod auth;
pub mod book;
pub mod book_instance;
pub mod borrow;
pub mod dates;
pub mod enums;
pub mod library;
pub mod member;
pub mod notification;

// Re-export commonly used types
pub use admin::{AdminStats, Administrator, AdministratorForm};
pub use auth::{SessionUser, SessionUserUpdate};
pub use book::{Book, BookForm, CatalogBook, LibraryHolding};
pub use book_instance::{BookInstance, BookInstanceForm};
pub use borrow::{Borrow, BorrowStats, DueStatus};
pub use enums::{BookCondition, BookStatus, BorrowStatus, MemberStatus, NotificationType, UserType};
pub use library::{Library, LibraryForm, LibraryStats};
pub use member::{Member, MemberStats};
pub use notification::Notification;
