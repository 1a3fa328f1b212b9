//! In-memory filter and sort over fetched lists.
//!
//! Text search is a case-insensitive substring match; a blank term matches
//! everything. Sorting is stable, strings compare lowercased, and a missing
//! value sorts before any present one in ascending order.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::models::{
    Administrator, Book, BookCondition, BookInstance, BookStatus, Borrow, BorrowStatus, CatalogBook,
    Library, Member, MemberStatus, Notification, NotificationType,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggle(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(format!("Invalid sort order: {}", s)),
        }
    }
}

/// Comparable projection of one record field
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortValue {
    Missing,
    Int(i64),
    Date(NaiveDate),
    Text(String),
}

impl SortValue {
    fn text(value: &str) -> Self {
        SortValue::Text(value.to_lowercase())
    }

    fn opt_text(value: Option<&str>) -> Self {
        value.map_or(SortValue::Missing, SortValue::text)
    }

    fn opt_int(value: Option<i64>) -> Self {
        value.map_or(SortValue::Missing, SortValue::Int)
    }
}

/// Stable sort on a single key
pub fn sort_by_key<T, K, F>(items: &mut [T], order: SortOrder, key: F)
where
    K: Ord,
    F: Fn(&T) -> K,
{
    items.sort_by(|a, b| order.apply(key(a).cmp(&key(b))));
}

/// Case-insensitive search over several optional fields
pub fn matches_any(fields: &[Option<&str>], term: &str) -> bool {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    fields
        .iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&needle))
}

macro_rules! sort_keys {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $wire:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
        pub enum $name {
            #[default]
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire,)+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($wire => Ok($name::$variant),)+
                    _ => Err(format!("Invalid sort key: {}", s)),
                }
            }
        }
    };
}

sort_keys! {
    /// Member list sort key
    MemberSort {
        FirstName => "firstName",
        LastName => "lastName",
        UserName => "userName",
        Email => "email",
        MemberStatus => "memberStatus",
    }
}

sort_keys! {
    BookSort {
        Title => "title",
        Author => "author",
        YearOfPublished => "yearOfPublished",
        Category => "category",
    }
}

sort_keys! {
    LibrarySort {
        LibraryName => "libraryName",
        LbAddress => "lbAddress",
        TotalBooks => "totalBooks",
        AvailableBooks => "availableBooks",
    }
}

sort_keys! {
    BorrowSort {
        BorrowDate => "borrowDate",
        DueDate => "dueDate",
        ReturnDate => "returnDate",
        BookTitle => "bookTitle",
    }
}

sort_keys! {
    /// Which field the catalog search box looks at
    CatalogSearch {
        Title => "title",
        Author => "author",
        Isbn => "isbn",
        All => "all",
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemberQuery {
    pub search: String,
    pub status: Option<MemberStatus>,
    pub sort: MemberSort,
    pub order: SortOrder,
}

impl MemberQuery {
    pub fn matches(&self, member: &Member) -> bool {
        let fields = [
            Some(member.first_name.as_str()),
            Some(member.last_name.as_str()),
            Some(member.user_name.as_str()),
            Some(member.email.as_str()),
        ];
        matches_any(&fields, &self.search) && self.status.map_or(true, |s| member.member_status == s)
    }

    fn key(&self, member: &Member) -> SortValue {
        match self.sort {
            MemberSort::FirstName => SortValue::text(&member.first_name),
            MemberSort::LastName => SortValue::text(&member.last_name),
            MemberSort::UserName => SortValue::text(&member.user_name),
            MemberSort::Email => SortValue::text(&member.email),
            MemberSort::MemberStatus => SortValue::text(member.member_status.as_str()),
        }
    }

    pub fn apply(&self, members: &[Member]) -> Vec<Member> {
        let mut out: Vec<Member> = members.iter().filter(|m| self.matches(m)).cloned().collect();
        sort_by_key(&mut out, self.order, |m| self.key(m));
        out
    }
}

/// Number of members per status
pub fn status_counts(members: &[Member]) -> BTreeMap<MemberStatus, usize> {
    let mut counts = BTreeMap::new();
    for member in members {
        *counts.entry(member.member_status).or_insert(0) += 1;
    }
    counts
}

#[derive(Debug, Clone, Default)]
pub struct BookQuery {
    pub search: String,
    pub category: Option<String>,
    pub sort: BookSort,
    pub order: SortOrder,
}

impl BookQuery {
    pub fn matches(&self, book: &Book) -> bool {
        let fields = [
            Some(book.title.as_str()),
            Some(book.author.as_str()),
            book.isbn.as_deref(),
        ];
        matches_any(&fields, &self.search)
            && self
                .category
                .as_deref()
                .map_or(true, |c| book.category.as_deref() == Some(c))
    }

    fn key(&self, book: &Book) -> SortValue {
        match self.sort {
            BookSort::Title => SortValue::text(&book.title),
            BookSort::Author => SortValue::text(&book.author),
            BookSort::YearOfPublished => SortValue::opt_int(book.year_of_published.map(i64::from)),
            BookSort::Category => SortValue::opt_text(book.category.as_deref()),
        }
    }

    pub fn apply(&self, books: &[Book]) -> Vec<Book> {
        let mut out: Vec<Book> = books.iter().filter(|b| self.matches(b)).cloned().collect();
        sort_by_key(&mut out, self.order, |b| self.key(b));
        out
    }
}

/// Distinct non-empty categories, in first-seen order
pub fn categories(books: &[Book]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for category in books.iter().filter_map(|b| b.category.as_deref()) {
        if !category.is_empty() && !seen.iter().any(|c| c == category) {
            seen.push(category.to_string());
        }
    }
    seen
}

/// Catalog filters; there is no sort on this list
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    pub search: String,
    pub search_type: CatalogSearch,
    pub category: Option<String>,
    /// Only books with an available copy at this library
    pub library_id: Option<i64>,
    pub available_only: bool,
}

impl CatalogQuery {
    pub fn matches(&self, entry: &CatalogBook) -> bool {
        let book = &entry.book;
        let text_ok = match self.search_type {
            CatalogSearch::Title => matches_any(&[Some(book.title.as_str())], &self.search),
            CatalogSearch::Author => matches_any(&[Some(book.author.as_str())], &self.search),
            CatalogSearch::Isbn => matches_any(&[book.isbn.as_deref()], &self.search),
            CatalogSearch::All => matches_any(
                &[Some(book.title.as_str()), Some(book.author.as_str())],
                &self.search,
            ),
        };

        text_ok
            && self
                .category
                .as_deref()
                .map_or(true, |c| book.category.as_deref() == Some(c))
            && self.library_id.map_or(true, |id| entry.available_at(id))
            && (!self.available_only || book.available_copies > 0)
    }

    pub fn apply(&self, entries: &[CatalogBook]) -> Vec<CatalogBook> {
        entries.iter().filter(|e| self.matches(e)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct LibraryQuery {
    pub search: String,
    pub sort: LibrarySort,
    pub order: SortOrder,
}

impl LibraryQuery {
    pub fn matches(&self, library: &Library) -> bool {
        matches_any(
            &[Some(library.library_name.as_str()), library.lb_address.as_deref()],
            &self.search,
        )
    }

    fn key(&self, library: &Library) -> SortValue {
        match self.sort {
            LibrarySort::LibraryName => SortValue::text(&library.library_name),
            LibrarySort::LbAddress => SortValue::opt_text(library.lb_address.as_deref()),
            LibrarySort::TotalBooks => SortValue::opt_int(library.total_books),
            LibrarySort::AvailableBooks => SortValue::opt_int(library.available_books),
        }
    }

    pub fn apply(&self, libraries: &[Library]) -> Vec<Library> {
        let mut out: Vec<Library> = libraries.iter().filter(|l| self.matches(l)).cloned().collect();
        sort_by_key(&mut out, self.order, |l| self.key(l));
        out
    }
}

#[derive(Debug, Clone, Default)]
pub struct InstanceQuery {
    pub search: String,
    pub status: Option<BookStatus>,
    pub condition: Option<BookCondition>,
    pub library_id: Option<i64>,
}

impl InstanceQuery {
    pub fn matches(&self, instance: &BookInstance) -> bool {
        let id = instance.bk_instance_id.to_string();
        let text_ok = matches_any(
            &[
                instance.book_title.as_deref(),
                instance.library_name.as_deref(),
                Some(id.as_str()),
            ],
            &self.search,
        );

        text_ok
            && self.status.map_or(true, |s| instance.bk_status == s)
            && self.condition.map_or(true, |c| instance.bk_condition == c)
            && self.library_id.map_or(true, |l| instance.library_id == l)
    }

    pub fn apply(&self, instances: &[BookInstance]) -> Vec<BookInstance> {
        instances.iter().filter(|i| self.matches(i)).cloned().collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationQuery {
    pub search: String,
    pub ntf_type: Option<NotificationType>,
}

impl NotificationQuery {
    pub fn matches(&self, notification: &Notification) -> bool {
        let type_ok = self
            .ntf_type
            .as_ref()
            .map_or(true, |t| &notification.ntf_type == t);

        type_ok
            && matches_any(
                &[
                    Some(notification.ntf_message.as_str()),
                    notification.member_name.as_deref(),
                    Some(notification.ntf_type.as_str()),
                ],
                &self.search,
            )
    }

    pub fn apply(&self, notifications: &[Notification]) -> Vec<Notification> {
        notifications.iter().filter(|n| self.matches(n)).cloned().collect()
    }
}

/// Number of notifications of the given type
pub fn count_of_type(notifications: &[Notification], ntf_type: &NotificationType) -> usize {
    notifications.iter().filter(|n| &n.ntf_type == ntf_type).count()
}

#[derive(Debug, Clone, Default)]
pub struct AdminQuery {
    pub search: String,
}

impl AdminQuery {
    pub fn apply(&self, admins: &[Administrator]) -> Vec<Administrator> {
        admins
            .iter()
            .filter(|a| {
                matches_any(
                    &[
                        a.first_name.as_deref(),
                        a.last_name.as_deref(),
                        a.user_name.as_deref(),
                        a.email.as_deref(),
                    ],
                    &self.search,
                )
            })
            .cloned()
            .collect()
    }
}

/// Status filter of the borrow history page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BorrowFilter {
    #[default]
    All,
    Only(BorrowStatus),
}

impl std::str::FromStr for BorrowFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(BorrowFilter::All);
        }
        s.parse::<BorrowStatus>().map(BorrowFilter::Only)
    }
}

#[derive(Debug, Clone)]
pub struct BorrowQuery {
    pub filter: BorrowFilter,
    pub sort: BorrowSort,
    pub order: SortOrder,
}

impl Default for BorrowQuery {
    /// Newest borrows first
    fn default() -> Self {
        Self {
            filter: BorrowFilter::All,
            sort: BorrowSort::BorrowDate,
            order: SortOrder::Desc,
        }
    }
}

impl BorrowQuery {
    pub fn matches(&self, borrow: &Borrow) -> bool {
        match self.filter {
            BorrowFilter::All => true,
            BorrowFilter::Only(status) => borrow.status == status,
        }
    }

    fn key(&self, borrow: &Borrow) -> SortValue {
        match self.sort {
            BorrowSort::BorrowDate => SortValue::Date(borrow.borrow_date),
            BorrowSort::DueDate => SortValue::Date(borrow.due_date),
            // a missing return date compares as 1970-01-01
            BorrowSort::ReturnDate => SortValue::Date(borrow.return_date.unwrap_or_default()),
            BorrowSort::BookTitle => SortValue::opt_text(borrow.book_title.as_deref()),
        }
    }

    pub fn apply(&self, borrows: &[Borrow]) -> Vec<Borrow> {
        let mut out: Vec<Borrow> = borrows.iter().filter(|b| self.matches(b)).cloned().collect();
        sort_by_key(&mut out, self.order, |b| self.key(b));
        out
    }
}
