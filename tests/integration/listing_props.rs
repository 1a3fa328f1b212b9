//! Properties of the in-memory list filters and sorts

use chrono::NaiveDate;
use library_client::listing::{
    matches_any, BorrowFilter, BorrowQuery, BorrowSort, MemberQuery, MemberSort, SortOrder,
};
use library_client::models::{Borrow, BorrowStatus, Member, MemberStatus};
use proptest::prelude::*;

fn status_strategy() -> impl Strategy<Value = BorrowStatus> {
    prop::sample::select(BorrowStatus::ALL.to_vec())
}

fn borrow_strategy() -> impl Strategy<Value = Borrow> {
    (1i64..10_000, 0i64..365, 0i64..60, status_strategy(), prop::option::of("[a-z ]{1,12}")).prop_map(
        |(id, start, loan, status, title)| {
            let base = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
            let borrow_date = base + chrono::Duration::days(start);
            Borrow {
                borrow_id: id,
                member_id: Some(7),
                member_name: None,
                bk_instance_id: Some(id * 10),
                book_title: title,
                library_name: None,
                borrow_date,
                due_date: borrow_date + chrono::Duration::days(loan),
                return_date: None,
                status,
                fine: None,
            }
        },
    )
}

fn member_strategy() -> impl Strategy<Value = Member> {
    (
        1i64..10_000,
        "[A-Za-z]{1,10}",
        "[A-Za-z]{1,10}",
        prop::sample::select(MemberStatus::ALL.to_vec()),
    )
        .prop_map(|(id, first, last, status)| Member {
            member_id: id,
            user_name: format!("{}{}", first.to_lowercase(), id),
            email: format!("{}@example.org", id),
            first_name: first,
            last_name: last,
            phone: None,
            member_status: status,
            active_borrow_count: None,
        })
}

fn due_dates(borrows: &[Borrow]) -> Vec<NaiveDate> {
    borrows.iter().map(|b| b.due_date).collect()
}

proptest! {
    #[test]
    fn prop_status_filter_keeps_exactly_matching_borrows(
        borrows in prop::collection::vec(borrow_strategy(), 0..40),
        status in status_strategy(),
    ) {
        let query = BorrowQuery {
            filter: BorrowFilter::Only(status),
            ..BorrowQuery::default()
        };
        let visible = query.apply(&borrows);

        prop_assert!(visible.iter().all(|b| b.status == status));
        prop_assert_eq!(visible.len(), borrows.iter().filter(|b| b.status == status).count());
    }

    #[test]
    fn prop_member_status_filter_keeps_only_that_status(
        members in prop::collection::vec(member_strategy(), 0..40),
        status in prop::sample::select(MemberStatus::ALL.to_vec()),
    ) {
        let query = MemberQuery {
            status: Some(status),
            ..MemberQuery::default()
        };
        let visible = query.apply(&members);

        prop_assert!(visible.iter().all(|m| m.member_status == status));
        prop_assert_eq!(visible.len(), members.iter().filter(|m| m.member_status == status).count());
    }

    #[test]
    fn prop_member_sort_orders_are_mirror_images(
        members in prop::collection::vec(member_strategy(), 0..40),
    ) {
        let asc = MemberQuery {
            sort: MemberSort::LastName,
            ..MemberQuery::default()
        };
        let desc = MemberQuery {
            order: SortOrder::Desc,
            ..asc.clone()
        };

        let up: Vec<String> = asc.apply(&members).iter().map(|m| m.last_name.to_lowercase()).collect();
        let mut down: Vec<String> = desc.apply(&members).iter().map(|m| m.last_name.to_lowercase()).collect();
        down.reverse();
        prop_assert_eq!(up, down);
    }

    #[test]
    fn prop_all_filter_keeps_everything(borrows in prop::collection::vec(borrow_strategy(), 0..40)) {
        let visible = BorrowQuery::default().apply(&borrows);
        prop_assert_eq!(visible.len(), borrows.len());
    }

    #[test]
    fn prop_descending_is_ascending_reversed_up_to_ties(
        borrows in prop::collection::vec(borrow_strategy(), 0..40),
    ) {
        let asc = BorrowQuery {
            filter: BorrowFilter::All,
            sort: BorrowSort::DueDate,
            order: SortOrder::Asc,
        };
        let desc = BorrowQuery {
            order: SortOrder::Desc,
            ..asc.clone()
        };

        let up = due_dates(&asc.apply(&borrows));
        let mut down = due_dates(&desc.apply(&borrows));

        prop_assert!(up.windows(2).all(|w| w[0] <= w[1]));
        down.reverse();
        prop_assert_eq!(up, down);
    }

    #[test]
    fn prop_search_is_case_insensitive(field in "[a-zA-Z]{1,20}", start in 0usize..20, len in 1usize..5) {
        let start = start.min(field.len() - 1);
        let end = (start + len).min(field.len());
        let term = field[start..end].to_uppercase();

        prop_assert!(matches_any(&[None, Some(field.as_str())], &term));
        prop_assert!(matches_any(&[Some(field.as_str())], "   "));
    }
}
