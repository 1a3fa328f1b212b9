//! End-to-end flows against a mocked library API

use std::sync::Arc;

use library_client::{
    config::{ApiConfig, AppConfig},
    error::AppError,
    models::{auth::RegistrationForm, SessionUser, UserType},
    pages::{
        book_details::BookDetailsPage, catalog::CatalogPage, login::LoginPage, register::RegisterPage,
        Outcome, Page,
    },
    router::Route,
    session::{FileSessionStore, MemorySessionStore, SessionStore},
    ui::Prompt,
    App,
};
use mockall::mock;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mock! {
    pub Terminal {}

    impl Prompt for Terminal {
        fn confirm(&self, message: &str) -> bool;
        fn alert(&self, message: &str);
        fn input(&self, message: &str) -> Option<String>;
    }
}

fn config_for(server: &MockServer) -> AppConfig {
    AppConfig {
        api: ApiConfig {
            base_url: format!("{}/api", server.uri()),
            timeout_secs: 5,
        },
        ..AppConfig::default()
    }
}

fn member_user() -> SessionUser {
    SessionUser {
        id: 7,
        username: "jane".to_string(),
        full_name: Some("Jane Doe".to_string()),
        user_type: UserType::Member,
    }
}

fn quiet_prompt() -> Arc<dyn Prompt> {
    let mut prompt = MockTerminal::new();
    prompt.expect_alert().returning(|_| ());
    prompt.expect_confirm().returning(|_| true);
    prompt.expect_input().returning(|_| None);
    Arc::new(prompt)
}

/// App whose store already holds a member session accepted by `/auth/me`
async fn logged_in_member(server: &MockServer) -> (App, Arc<MemorySessionStore>) {
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": 7,
            "userName": "jane",
            "fullName": "Jane Doe",
            "userType": "MEMBER"
        })))
        .mount(server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.save_session("tok-7", &member_user()).unwrap();

    let app = App::new(config_for(server), store.clone()).unwrap();
    app.auth.initialize().await;
    assert!(app.auth.is_authenticated());
    (app, store)
}

#[tokio::test]
async fn test_login_persists_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_partial_json(json!({ "userName": "jane", "password": "secret123" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "userId": 7,
            "userName": "jane",
            "fullName": "Jane Doe",
            "userType": "MEMBER"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let session_path = dir.path().join("session.json");
    let store = Arc::new(FileSessionStore::open(&session_path).unwrap());
    let app = App::new(config_for(&server), store).unwrap();

    let mut page = LoginPage::new(app.context(quiet_prompt()));
    page.username = "  jane ".to_string();
    page.password = "secret123".to_string();
    page.submit().await.unwrap();

    assert_eq!(app.navigator.current(), "/dashboard");
    assert!(app.auth.is_authenticated());
    assert!(!app.auth.is_admin());

    let reopened = FileSessionStore::open(&session_path).unwrap();
    assert_eq!(reopened.token().as_deref(), Some("abc"));
    assert_eq!(reopened.user(), Some(member_user()));
}

#[tokio::test]
async fn test_login_rejection_is_shown_on_the_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "Invalid username or password" })),
        )
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let app = App::new(config_for(&server), store.clone()).unwrap();

    let mut page = LoginPage::new(app.context(quiet_prompt()));
    page.username = "jane".to_string();
    page.password = "wrong-password".to_string();

    assert!(matches!(page.submit().await, Err(AppError::InvalidCredentials)));
    assert_eq!(
        page.general.as_deref(),
        Some("Invalid username or password. Please check your credentials and try again.")
    );
    assert_eq!(app.navigator.current(), "/login");
    assert!(store.token().is_none());
    assert!(!app.auth.is_authenticated());
}

#[tokio::test]
async fn test_requests_carry_the_bearer_token() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/books/3"))
        .and(header("Authorization", "Bearer tok-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookId": 3,
            "title": "Dune",
            "author": "Frank Herbert",
            "totalCopies": 2,
            "availableCopies": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let book = app.services.books.get(3).await.unwrap();
    assert_eq!(book.title, "Dune");
    assert!(book.is_available());
}

#[tokio::test]
async fn test_logout_clears_session_even_when_server_fails() {
    let server = MockServer::start().await;
    let (app, store) = logged_in_member(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    app.auth.logout().await.unwrap();

    assert!(store.token().is_none());
    assert!(store.user().is_none());
    assert!(app.auth.user().is_none());
}

#[tokio::test]
async fn test_unauthorized_response_ends_session_and_opens_login() {
    let server = MockServer::start().await;
    let (app, store) = logged_in_member(&server).await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/api/(borrows|books|notifications)"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let (route, page) = app.open("/dashboard", quiet_prompt()).await;

    assert_eq!(route, Route::Login);
    assert_eq!(app.navigator.current(), "/login");
    assert!(store.token().is_none());
    assert!(store.user().is_none());
    assert!(!app.auth.is_authenticated());
    assert!(page.render().contains("Login"));
}

#[tokio::test]
async fn test_anonymous_unauthorized_response_still_clears_leftover_user() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/books/3"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "message": "Full authentication is required" })))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    store.save_user(&member_user()).unwrap();
    let app = App::new(config_for(&server), store.clone()).unwrap();

    let err = app.services.books.get(3).await.unwrap_err();

    assert!(matches!(err, AppError::Api { status: 401, .. }));
    assert_eq!(app.navigator.current(), "/login");
    assert!(store.user().is_none());
    assert!(store.token().is_none());
}

#[tokio::test]
async fn test_guest_is_redirected_away_from_member_pages() {
    let server = MockServer::start().await;
    let app = App::new(config_for(&server), Arc::new(MemorySessionStore::new())).unwrap();

    let (route, _page) = app.open("/borrow-history", quiet_prompt()).await;
    assert_eq!(route, Route::Login);

    let (route, _page) = app.open("/no/such/page", quiet_prompt()).await;
    assert_eq!(route, Route::NotFound);
}

async fn mount_book_with_copy(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/books/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookId": 3,
            "title": "Dune",
            "author": "Frank Herbert",
            "totalCopies": 1,
            "availableCopies": 1
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/book-instances/book/3/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "bkInstanceId": 30,
            "bookId": 3,
            "bookTitle": "Dune",
            "libraryId": 1,
            "libraryName": "Central Library",
            "bkStatus": "AVAILABLE",
            "bkCondition": "GOOD",
            "acquisitionDate": "2023-04-01"
        }])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_cancelled_borrow_sends_no_request() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;
    mount_book_with_copy(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt
        .expect_confirm()
        .withf(|message: &str| message.contains("\"Dune\" from Central Library") && message.contains("21 days"))
        .times(1)
        .returning(|_| false);
    prompt.expect_alert().never();

    let mut page = BookDetailsPage::new(app.context(Arc::new(prompt)), 3);
    page.load().await.unwrap();

    assert_eq!(page.borrow().await.unwrap(), Outcome::Cancelled);
}

#[tokio::test]
async fn test_confirmed_borrow_posts_member_and_copy() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;
    mount_book_with_copy(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .and(query_param("memberId", "7"))
        .and(query_param("bookInstanceId", "30"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().times(1).returning(|_| true);
    prompt
        .expect_alert()
        .withf(|message: &str| message == "Book borrowed successfully!")
        .times(1)
        .returning(|_| ());

    let mut page = BookDetailsPage::new(app.context(Arc::new(prompt)), 3);
    page.load().await.unwrap();

    assert_eq!(page.borrow().await.unwrap(), Outcome::Done);
}

#[tokio::test]
async fn test_overdue_block_offers_borrow_history() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;
    mount_book_with_copy(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "message": "Cannot borrow: member has overdue books"
        })))
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().times(2).returning(|_| true);
    prompt.expect_alert().never();

    let mut page = BookDetailsPage::new(app.context(Arc::new(prompt)), 3);
    page.load().await.unwrap();

    let err = page.borrow().await.unwrap_err();
    assert!(matches!(err, AppError::OverdueBlocked(_)));
    assert_eq!(app.navigator.current(), "/borrow-history");
}

#[tokio::test]
async fn test_guest_borrow_goes_to_login() {
    let server = MockServer::start().await;
    mount_book_with_copy(&server).await;
    let app = App::new(config_for(&server), Arc::new(MemorySessionStore::new())).unwrap();

    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().never();
    prompt.expect_alert().returning(|_| ());

    let mut page = BookDetailsPage::new(app.context(Arc::new(prompt)), 3);
    page.load().await.unwrap();

    assert!(matches!(page.borrow().await, Err(AppError::LoginRequired)));
    assert_eq!(app.navigator.current(), "/login");
}

#[test]
fn test_registration_mismatch_never_reaches_the_server() {
    let app = App::new(AppConfig::default(), Arc::new(MemorySessionStore::new())).unwrap();
    let mut page = RegisterPage::new(app.context(quiet_prompt()));
    page.form = RegistrationForm {
        first_name: "Jane".to_string(),
        last_name: "Doe".to_string(),
        username: "jane".to_string(),
        email: "jane@example.org".to_string(),
        phone: String::new(),
        password: "secret123".to_string(),
        confirm_password: "secret124".to_string(),
    };

    let result = tokio_test::block_on(page.submit());

    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(
        page.errors.get("confirmPassword").map(String::as_str),
        Some("Passwords do not match")
    );
    assert!(!page.success);
}

fn copy_json(id: i64, library_id: i64, library_name: &str, status: &str) -> serde_json::Value {
    json!({
        "bkInstanceId": id,
        "bookId": 3,
        "bookTitle": "Dune",
        "libraryId": library_id,
        "libraryName": library_name,
        "bkStatus": status,
        "bkCondition": "GOOD",
        "acquisitionDate": "2023-04-01"
    })
}

fn dune_json() -> serde_json::Value {
    json!({
        "bookId": 3,
        "title": "Dune",
        "author": "Frank Herbert",
        "category": "Science Fiction",
        "totalCopies": 4,
        "availableCopies": 2
    })
}

/// Catalog endpoints besides the book list itself
async fn mount_catalog_extras(server: &MockServer, copies: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/book-instances/book/3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(copies))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Science Fiction"])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/libraries/public"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

async fn mount_catalog(server: &MockServer, copies: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .and(query_param("page", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune_json()])))
        .mount(server)
        .await;
    mount_catalog_extras(server, copies).await;
}

fn mixed_copies() -> serde_json::Value {
    json!([
        copy_json(40, 1, "Central Library", "AVAILABLE"),
        copy_json(41, 2, "Branch Library", "BORROWED"),
        copy_json(42, 2, "Branch Library", "AVAILABLE"),
        copy_json(43, 2, "Branch Library", "AVAILABLE"),
        copy_json(44, 3, "East Library", "BORROWED"),
        copy_json(45, 3, "East Library", "MAINTENANCE")
    ])
}

#[tokio::test]
async fn test_catalog_borrow_takes_first_shelved_copy_at_library() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;
    mount_catalog(&server, mixed_copies()).await;

    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .and(query_param("memberId", "7"))
        .and(query_param("bookInstanceId", "42"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt
        .expect_confirm()
        .withf(|message: &str| message.contains("\"Dune\" from Branch Library"))
        .times(1)
        .returning(|_| true);
    prompt
        .expect_alert()
        .withf(|message: &str| message == "Book borrowed successfully from Branch Library!")
        .times(1)
        .returning(|_| ());

    let mut page = CatalogPage::new(app.context(Arc::new(prompt)));
    page.load().await.unwrap();

    assert_eq!(page.borrow(3, 2).await.unwrap(), Outcome::Done);
    assert!(page.error.is_none());
}

#[tokio::test]
async fn test_catalog_borrow_refuses_library_without_shelved_copies() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;
    mount_catalog(&server, mixed_copies()).await;

    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().never();
    prompt.expect_alert().times(1).returning(|_| ());

    let mut page = CatalogPage::new(app.context(Arc::new(prompt)));
    page.load().await.unwrap();

    let holding = page.books[0].holding(3).unwrap();
    assert_eq!((holding.total_copies, holding.available_copies), (2, 0));
    assert!(matches!(page.borrow(3, 3).await, Err(AppError::NoAvailableCopies)));
}

#[tokio::test]
async fn test_catalog_borrow_is_refused_to_administrators() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "userId": 1,
            "userName": "root",
            "fullName": "Head Librarian",
            "userType": "ADMIN"
        })))
        .mount(&server)
        .await;
    mount_catalog(&server, mixed_copies()).await;
    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let store = Arc::new(MemorySessionStore::new());
    let admin = SessionUser {
        id: 1,
        username: "root".to_string(),
        full_name: Some("Head Librarian".to_string()),
        user_type: UserType::Admin,
    };
    store.save_session("admin-token", &admin).unwrap();
    let app = App::new(config_for(&server), store).unwrap();
    app.auth.initialize().await;
    assert!(app.auth.is_admin());

    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().never();
    prompt.expect_alert().times(1).returning(|_| ());

    let mut page = CatalogPage::new(app.context(Arc::new(prompt)));
    page.load().await.unwrap();

    assert!(matches!(page.borrow(3, 1).await, Err(AppError::MembersOnly)));
}

#[tokio::test]
async fn test_declined_catalog_borrow_keeps_availability() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune_json()])))
        .expect(1)
        .mount(&server)
        .await;
    mount_catalog_extras(&server, mixed_copies()).await;
    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().times(1).returning(|_| false);
    prompt.expect_alert().never();

    let mut page = CatalogPage::new(app.context(Arc::new(prompt)));
    page.load().await.unwrap();
    let before = page.books.clone();

    assert_eq!(page.borrow(3, 2).await.unwrap(), Outcome::Cancelled);
    assert_eq!(page.books, before);
    assert_eq!(page.books[0].holding(2).unwrap().available_copies, 2);
}

#[tokio::test]
async fn test_catalog_borrow_survives_failed_refresh() {
    let server = MockServer::start().await;
    let (app, _store) = logged_in_member(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([dune_json()])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/books"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "Database unavailable" })))
        .mount(&server)
        .await;
    mount_catalog_extras(&server, mixed_copies()).await;
    Mock::given(method("POST"))
        .and(path("/api/borrows/borrow"))
        .and(query_param("bookInstanceId", "40"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().times(1).returning(|_| true);
    prompt
        .expect_alert()
        .withf(|message: &str| message == "Book borrowed successfully from Central Library!")
        .times(1)
        .returning(|_| ());

    let mut page = CatalogPage::new(app.context(Arc::new(prompt)));
    page.load().await.unwrap();

    assert_eq!(page.borrow(3, 1).await.unwrap(), Outcome::Done);
    assert!(page.error.as_deref().unwrap_or_default().starts_with("Failed to load books"));
    assert!(page.render().contains("Failed to load books"));
}
