//! Resource services over the REST API

pub mod admins;
pub mod auth;
pub mod book_instances;
pub mod books;
pub mod borrows;
pub mod libraries;
pub mod members;
pub mod notifications;

use crate::api::ApiClient;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub auth: auth::AuthService,
    pub books: books::BooksService,
    pub book_instances: book_instances::BookInstancesService,
    pub borrows: borrows::BorrowsService,
    pub members: members::MembersService,
    pub admins: admins::AdminsService,
    pub libraries: libraries::LibrariesService,
    pub notifications: notifications::NotificationsService,
}

impl Services {
    /// Create all services sharing one client
    pub fn new(client: ApiClient) -> Self {
        Self {
            auth: auth::AuthService::new(client.clone()),
            books: books::BooksService::new(client.clone()),
            book_instances: book_instances::BookInstancesService::new(client.clone()),
            borrows: borrows::BorrowsService::new(client.clone()),
            members: members::MembersService::new(client.clone()),
            admins: admins::AdminsService::new(client.clone()),
            libraries: libraries::LibrariesService::new(client.clone()),
            notifications: notifications::NotificationsService::new(client),
        }
    }
}
