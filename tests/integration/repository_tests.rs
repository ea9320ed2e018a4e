//! Repository and service tests against a live PostgreSQL database
//!
//! Requires DATABASE_URL. Run with: cargo test --test repository_tests -- --ignored
//!
//! Session-level tests never commit, so their rows vanish on drop. Service-level
//! tests commit and clean up after themselves.

use std::str::FromStr;

use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;
use textbook_exchange::{
    error::AppError,
    models::{
        book::{Book, BookFilter, BookOrder, CreateBook},
        listing::{ListingFilter, NewListing},
        user::{CreateUser, User, UserFilter},
    },
    repository::{Repository, Session},
    services::Services,
};

async fn repository() -> Repository {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("Failed to connect to database");
    let repository = Repository::new(pool);
    repository.migrate().await.expect("Failed to apply schema");
    repository
}

fn listing(isbn: i64, owner: &str, price: &str) -> NewListing {
    NewListing::new(
        Decimal::from_str(price).unwrap(),
        "good".to_string(),
        isbn,
        owner.to_string(),
        "available".to_string(),
    )
}

async fn seed_owner_and_book(session: &mut Session, user_id: i32, isbn: i64) -> (User, Book) {
    let user = User::new(user_id, format!("Student {}", user_id), Some(2), None);
    session.users_insert(&user).await.unwrap();
    let book = Book::new(isbn, format!("Title {}", isbn), "Some Author".to_string(), Some(user_id));
    session.books_insert(&book).await.unwrap();
    (user, book)
}

#[tokio::test]
#[ignore]
async fn test_book_round_trip() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let book = Book::new(9_100_000_001, "Signals and Systems".into(), "Alan V. Oppenheim".into(), None);
    session.books_insert(&book).await.unwrap();

    let found = session.books_find_by_id(9_100_000_001).await.unwrap().unwrap();
    assert_eq!(found.title, "Signals and Systems");
    assert_eq!(found.author, "Alan V. Oppenheim");
    assert!(found.listings.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_missing_book_has_no_side_effects() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let before = session.books_list_all(None).await.unwrap().len();
    assert!(session.books_find_by_id(9_100_000_002).await.unwrap().is_none());
    assert_eq!(session.books_list_all(None).await.unwrap().len(), before);
}

#[tokio::test]
#[ignore]
async fn test_duplicate_insert_is_conflict() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let book = Book::new(9_100_000_003, "First".into(), "A".into(), None);
    session.books_insert(&book).await.unwrap();

    let again = Book::new(9_100_000_003, "Second".into(), "B".into(), None);
    let err = session.books_insert(&again).await.unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore]
async fn test_save_is_upsert_by_identity() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let mut book = Book::new(9_100_000_004, "Draft".into(), "A".into(), None);
    session.books_save(&book).await.unwrap();
    book.title = "Final".into();
    session.books_save(&book).await.unwrap();
    session.books_save(&book).await.unwrap();

    let found = session.books_find_by(BookFilter::Title("Final".into())).await.unwrap();
    assert_eq!(found.iter().filter(|b| b.isbn == 9_100_000_004).count(), 1);
}

#[tokio::test]
#[ignore]
async fn test_find_listings_by_isbn() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let (user, _) = seed_owner_and_book(&mut session, 910_001, 9_100_000_010).await;
    session.books_insert(&Book::new(9_100_000_011, "Other".into(), "B".into(), None)).await.unwrap();

    let a = session.listings_insert(&listing(9_100_000_010, &user.token, "10.00")).await.unwrap();
    let b = session.listings_insert(&listing(9_100_000_010, &user.token, "12.50")).await.unwrap();
    session.listings_insert(&listing(9_100_000_011, &user.token, "5")).await.unwrap();

    let found = session.listings_find_by(ListingFilter::Isbn(9_100_000_010)).await.unwrap();
    assert_eq!(found, vec![a, b]);

    let none = session.listings_find_by(ListingFilter::Isbn(9_100_000_099)).await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_book_lists_nest_listings() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let (user, _) = seed_owner_and_book(&mut session, 910_002, 9_100_000_020).await;
    let created = session.listings_insert(&listing(9_100_000_020, &user.token, "80")).await.unwrap();
    assert_eq!(created.price.to_string(), "80.00");

    let books = session.books_find_by(BookFilter::PostedBy(910_002)).await.unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].listings, vec![created]);
}

#[tokio::test]
#[ignore]
async fn test_delete_book_cascades_to_listings() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let (user, book) = seed_owner_and_book(&mut session, 910_003, 9_100_000_030).await;
    let l1 = session.listings_insert(&listing(book.isbn, &user.token, "1.00")).await.unwrap();
    let l2 = session.listings_insert(&listing(book.isbn, &user.token, "2.00")).await.unwrap();

    session.books_delete(&book).await.unwrap();

    assert!(session.listings_find_by_id(l1.listing_id).await.unwrap().is_none());
    assert!(session.listings_find_by_id(l2.listing_id).await.unwrap().is_none());
    assert!(session.users_find_by_id(user.id).await.unwrap().is_some());
}

#[tokio::test]
#[ignore]
async fn test_delete_user_cascades_to_books_and_listings() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    let (user, book) = seed_owner_and_book(&mut session, 910_004, 9_100_000_040).await;
    let offer = session.listings_insert(&listing(book.isbn, &user.token, "3.00")).await.unwrap();

    session.users_delete(&user).await.unwrap();

    assert!(session.books_find_by_id(book.isbn).await.unwrap().is_none());
    assert!(session.listings_find_by_id(offer.listing_id).await.unwrap().is_none());
}

#[tokio::test]
#[ignore]
async fn test_listing_with_unknown_owner_is_storage_error() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    session.books_insert(&Book::new(9_100_000_050, "T".into(), "A".into(), None)).await.unwrap();
    let err = session
        .listings_insert(&listing(9_100_000_050, "no-such-token", "1.00"))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Database(_)));
}

#[tokio::test]
#[ignore]
async fn test_ordering_and_user_filters() {
    let repository = repository().await;
    let mut session = repository.session().await.unwrap();

    session.users_insert(&User::new(910_005, "Ordering Student".into(), Some(1), None)).await.unwrap();
    for (isbn, title) in [(9_100_000_061, "Zeta"), (9_100_000_062, "Alpha"), (9_100_000_063, "Mu")] {
        session
            .books_insert(&Book::new(isbn, title.into(), "A".into(), Some(910_005)))
            .await
            .unwrap();
    }

    let books = session
        .books_query(&[BookFilter::PostedBy(910_005)], Some(BookOrder::Title))
        .await
        .unwrap();
    let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
    assert_eq!(titles, vec!["Alpha", "Mu", "Zeta"]);

    let found = session.books_find_by(BookFilter::TitleContains("et".into())).await.unwrap();
    assert!(found.iter().any(|b| b.isbn == 9_100_000_061));

    let users = session.users_find_by(UserFilter::FullName("Ordering Student".into())).await.unwrap();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].token, "910005");
}

#[tokio::test]
#[ignore]
async fn test_marketplace_scenario() {
    let repository = repository().await;
    let services = Services::new(repository);

    // Leftovers from an interrupted run
    let _ = services.books.delete(1610020243).await;
    let _ = services.users.delete(1111).await;

    services
        .users
        .create(1111, CreateUser { full_name: "Wayne Gretsky".into(), class_year: Some(4), token: None })
        .await
        .unwrap();
    services
        .books
        .create(
            1610020243,
            CreateBook {
                title: "Textbook of Neonatal Resuscitation".into(),
                author: "Gary M Weiner".into(),
                user_id: None,
            },
        )
        .await
        .unwrap();

    let created = services.listings.create(listing(1610020243, "1111", "80.00")).await.unwrap();

    let fetched = services.listings.get_by_id(created.listing_id).await.unwrap();
    assert_eq!(fetched.price.to_string(), "80.00");
    assert_eq!(fetched.condition, "good");
    assert_eq!(fetched.isbn, 1610020243);
    assert_eq!(fetched.owner_token, "1111");
    assert_eq!(fetched.status, "available");

    let book = services.books.get_by_isbn(1610020243).await.unwrap();
    assert_eq!(book.listings, vec![fetched]);

    // A second create leaves the original untouched
    let err = services
        .books
        .create(1610020243, CreateBook { title: "Other".into(), author: "Other".into(), user_id: None })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));
    assert_eq!(services.books.get_by_isbn(1610020243).await.unwrap().title, "Textbook of Neonatal Resuscitation");

    services.books.delete(1610020243).await.unwrap();
    assert!(matches!(
        services.listings.get_by_id(created.listing_id).await,
        Err(AppError::NotFound(_))
    ));
    services.users.delete(1111).await.unwrap();
}
