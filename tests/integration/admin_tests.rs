//! Administrator screens against a mocked library API

use std::sync::Arc;

use library_client::{
    config::{ApiConfig, AppConfig},
    error::AppError,
    models::NotificationType,
    pages::{
        admin_book_instances::AdminBookInstancesPage, admin_members::AdminMembersPage,
        admin_notifications::AdminNotificationsPage, login::LoginPage, Outcome, Page,
    },
    router::Route,
    session::{MemorySessionStore, SessionStore},
    ui::Prompt,
    App,
};
use mockall::mock;
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, method, path, path_regex};
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

fn agreeable_prompt() -> Arc<dyn Prompt> {
    let mut prompt = MockTerminal::new();
    prompt.expect_confirm().returning(|_| true);
    prompt.expect_alert().returning(|_| ());
    Arc::new(prompt)
}

async fn logged_in_admin(server: &MockServer) -> App {
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "admin-token",
            "userId": 1,
            "userName": "root",
            "fullName": "Head Librarian",
            "userType": "ADMIN"
        })))
        .mount(server)
        .await;

    let app = App::new(config_for(server), Arc::new(MemorySessionStore::new())).unwrap();
    let mut login = LoginPage::new(app.context(agreeable_prompt()));
    login.username = "root".to_string();
    login.password = "admin-password".to_string();
    login.submit().await.unwrap();
    app
}

fn member_json(id: i64, first: &str, status: &str) -> serde_json::Value {
    json!({
        "memberId": id,
        "firstName": first,
        "lastName": "Reader",
        "userName": first.to_lowercase(),
        "email": format!("{}@example.org", first.to_lowercase()),
        "memberStatus": status
    })
}

#[tokio::test]
async fn test_admin_login_lands_on_admin_dashboard() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;

    assert_eq!(app.navigator.current(), "/admin/dashboard");
    assert!(app.auth.is_admin());
    assert_eq!(app.store.token().as_deref(), Some("admin-token"));

    let (route, _page) = app.open("/login", agreeable_prompt()).await;
    assert_eq!(route, Route::AdminDashboard);
}

async fn mount_empty_instance_lists(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path_regex(r"^/api/(book-instances|books|libraries/public)$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_single_selection_uses_single_transfer() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;
    mount_empty_instance_lists(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/book-instances/30/transfer"))
        .and(body_json(json!({ "newLibraryId": 2 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = AdminBookInstancesPage::new(app.context(agreeable_prompt()));
    page.toggle(30);

    assert_eq!(page.transfer_selected(2).await.unwrap(), Outcome::Done);
    assert!(page.selected.is_empty());
}

#[tokio::test]
async fn test_several_selected_instances_move_together() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;
    mount_empty_instance_lists(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/book-instances/transfer-multiple"))
        .and(body_json(json!({ "bookInstanceIds": [30, 31, 33], "newLibraryId": 2 })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt
        .expect_alert()
        .withf(|message: &str| message == "3 book instance(s) transferred successfully!")
        .times(1)
        .returning(|_| ());

    let mut page = AdminBookInstancesPage::new(app.context(Arc::new(prompt)));
    for id in [30, 31, 32, 33] {
        page.toggle(id);
    }
    page.toggle(32);

    assert_eq!(page.transfer_selected(2).await.unwrap(), Outcome::Done);
}

#[tokio::test]
async fn test_transfer_without_selection_is_refused() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;

    let mut prompt = MockTerminal::new();
    prompt
        .expect_alert()
        .withf(|message: &str| message == "Please select at least one book instance to transfer.")
        .times(1)
        .returning(|_| ());

    let mut page = AdminBookInstancesPage::new(app.context(Arc::new(prompt)));
    assert!(matches!(page.transfer_selected(2).await, Err(AppError::Validation(_))));
}

#[tokio::test]
async fn test_declined_suspension_leaves_member_untouched() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/members/5/suspend"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt
        .expect_confirm()
        .withf(|message: &str| message == "Are you sure you want to suspend this member?")
        .times(1)
        .returning(|_| false);
    prompt.expect_alert().never();

    let mut page = AdminMembersPage::new(app.context(Arc::new(prompt)));
    assert_eq!(page.suspend(5).await.unwrap(), Outcome::Cancelled);
}

#[tokio::test]
async fn test_approval_refreshes_member_list() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/members/5/approve"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            member_json(5, "Ada", "ACTIVE"),
            member_json(6, "Bob", "PENDING")
        ])))
        .mount(&server)
        .await;

    let mut page = AdminMembersPage::new(app.context(agreeable_prompt()));
    assert_eq!(page.approve(5).await.unwrap(), Outcome::Done);

    assert_eq!(page.members.len(), 2);
    let counts = page.status_counts();
    assert_eq!(counts.values().sum::<usize>(), 2);
}

#[tokio::test]
async fn test_reminder_targets_the_earliest_due_borrow() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([member_json(5, "Ada", "ACTIVE")])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/borrows/member/5/active"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "borrowId": 1,
                "bookTitle": "Emma",
                "borrowDate": "2024-05-01",
                "dueDate": "2024-05-22",
                "status": "ACTIVE"
            },
            {
                "borrowId": 2,
                "bookTitle": "Dune",
                "borrowDate": "2024-04-20",
                "dueDate": "2024-05-11",
                "status": "ACTIVE"
            }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/notifications/reminder"))
        .and(body_partial_json(json!({
            "memberId": 5,
            "bookTitle": "Dune",
            "dueDate": "2024-05-11"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = AdminNotificationsPage::new(app.context(agreeable_prompt()));
    page.load().await.unwrap();

    page.send(5, NotificationType::Reminder, "Your book is due soon")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_declined_bulk_send_posts_nothing() {
    let server = MockServer::start().await;
    let app = logged_in_admin(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/notifications/bulk"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut prompt = MockTerminal::new();
    prompt
        .expect_confirm()
        .withf(|message: &str| message.ends_with("\"Closed on Monday\""))
        .times(1)
        .returning(|_| false);

    let mut page = AdminNotificationsPage::new(app.context(Arc::new(prompt)));
    assert_eq!(page.send_bulk("Closed on Monday").await.unwrap(), Outcome::Cancelled);
}
