use movielog_core::db::migrations::latest_version;
use movielog_core::db::open_db_in_memory;
use movielog_core::{
    FieldUpdate, Movie, MoviePatch, MovieRepository, MovieService, RepoError,
    SqliteMovieRepository,
};
use rusqlite::Connection;
use uuid::Uuid;

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Stalker", "Tarkovsky", 1979);
    movie.genre = Some("Sci-Fi".to_string());
    movie.rating = Some(9.5);
    movie.watched_date = Some("12/03/2024".to_string());
    repo.create_movie(&movie).unwrap();

    let loaded = repo.get_movie(&movie.id.to_string()).unwrap().unwrap();
    assert_eq!(loaded, movie);
}

#[test]
fn get_absent_id_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let absent = Uuid::new_v4().to_string();
    assert!(repo.get_movie(&absent).unwrap().is_none());
}

#[test]
fn get_with_non_uuid_shaped_id_returns_none_not_error() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    // Candidate ids are raw text at this layer; malformed input is
    // simply an id that matches nothing.
    assert!(repo.get_movie("not-a-uuid").unwrap().is_none());
    assert!(repo.get_movie("").unwrap().is_none());
}

#[test]
fn create_duplicate_id_fails_and_leaves_original_unmodified() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let original = Movie::new("Alien", "Scott", 1979);
    repo.create_movie(&original).unwrap();

    let intruder = Movie::with_id(original.id, "Aliens", "Cameron", 1986);
    let err = repo.create_movie(&intruder).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(id) if id == original.id.to_string()));

    let stored = repo.get_movie(&original.id.to_string()).unwrap().unwrap();
    assert_eq!(stored, original);
}

#[test]
fn update_merges_only_patched_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Heat", "Mann", 1995);
    movie.genre = Some("Crime".to_string());
    movie.rating = Some(8.0);
    repo.create_movie(&movie).unwrap();

    let patch = MoviePatch {
        rating: FieldUpdate::Set(9.0),
        ..MoviePatch::default()
    };
    let updated = repo.update_movie(&movie.id.to_string(), &patch).unwrap();

    assert_eq!(updated.rating, Some(9.0));
    assert_eq!(updated.title, movie.title);
    assert_eq!(updated.director, movie.director);
    assert_eq!(updated.release_year, movie.release_year);
    assert_eq!(updated.genre, movie.genre);
    assert_eq!(updated.watched_date, movie.watched_date);
}

#[test]
fn update_distinguishes_clear_from_keep() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::new("Ran", "Kurosawa", 1985);
    movie.genre = Some("Drama".to_string());
    movie.rating = Some(9.0);
    movie.watched_date = Some("01/01/2020".to_string());
    repo.create_movie(&movie).unwrap();

    let patch = MoviePatch {
        genre: FieldUpdate::Clear,
        rating: FieldUpdate::Keep,
        watched_date: FieldUpdate::Set("02/02/2022".to_string()),
        ..MoviePatch::default()
    };
    let updated = repo.update_movie(&movie.id.to_string(), &patch).unwrap();

    assert_eq!(updated.genre, None);
    assert_eq!(updated.rating, Some(9.0));
    assert_eq!(updated.watched_date.as_deref(), Some("02/02/2022"));
}

#[test]
fn update_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let absent = Uuid::new_v4().to_string();
    let patch = MoviePatch {
        title: Some("Renamed".to_string()),
        ..MoviePatch::default()
    };
    let err = repo.update_movie(&absent, &patch).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == absent));
}

#[test]
fn update_with_empty_patch_returns_current_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let movie = Movie::new("Brazil", "Gilliam", 1985);
    repo.create_movie(&movie).unwrap();

    let unchanged = repo
        .update_movie(&movie.id.to_string(), &MoviePatch::default())
        .unwrap();
    assert_eq!(unchanged, movie);

    let absent = Uuid::new_v4().to_string();
    let err = repo.update_movie(&absent, &MoviePatch::default()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn delete_removes_record() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let movie = Movie::new("Seven", "Fincher", 1995);
    repo.create_movie(&movie).unwrap();

    repo.delete_movie(&movie.id.to_string()).unwrap();
    assert!(repo.get_movie(&movie.id.to_string()).unwrap().is_none());
}

#[test]
fn delete_not_found_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let absent = Uuid::new_v4().to_string();
    let err = repo.delete_movie(&absent).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == absent));

    // Delete is not idempotent: a second delete of the same id fails too.
    let movie = Movie::new("Gone", "Nobody", 2000);
    repo.create_movie(&movie).unwrap();
    repo.delete_movie(&movie.id.to_string()).unwrap();
    let err = repo.delete_movie(&movie.id.to_string()).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(_)));
}

#[test]
fn list_returns_records_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let first = Movie::new("Yojimbo", "Kurosawa", 1961);
    let second = Movie::new("Sanjuro", "Kurosawa", 1962);
    let third = Movie::new("High and Low", "Kurosawa", 1963);
    repo.create_movie(&first).unwrap();
    repo.create_movie(&second).unwrap();
    repo.create_movie(&third).unwrap();

    let all = repo.list_movies().unwrap();
    let ids: Vec<_> = all.into_iter().map(|movie| movie.id).collect();
    assert_eq!(ids, vec![first.id, second.id, third.id]);
}

#[test]
fn list_on_empty_store_returns_empty_sequence() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    assert!(repo.list_movies().unwrap().is_empty());
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let blank_title = Movie::new("   ", "Someone", 2001);
    let create_err = repo.create_movie(&blank_title).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));

    let movie = Movie::new("Solaris", "Tarkovsky", 1972);
    repo.create_movie(&movie).unwrap();

    let patch = MoviePatch {
        genre: FieldUpdate::Set(String::new()),
        ..MoviePatch::default()
    };
    let update_err = repo.update_movie(&movie.id.to_string(), &patch).unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));

    // Failed writes leave the record untouched.
    let stored = repo.get_movie(&movie.id.to_string()).unwrap().unwrap();
    assert_eq!(stored, movie);
}

#[test]
fn corrupt_persisted_id_surfaces_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO movies (id, title, director, release_year)
         VALUES ('broken-id', 'Ghost', 'Unknown', 1990);",
        [],
    )
    .unwrap();

    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let err = repo.get_movie("broken-id").unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_wraps_repository_calls() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();
    let service = MovieService::new(repo);

    let movie = Movie::new("Paprika", "Kon", 2006);
    service.create_movie(&movie).unwrap();

    let fetched = service.get_movie(&movie.id.to_string()).unwrap().unwrap();
    assert_eq!(fetched.title, "Paprika");

    let patch = MoviePatch {
        rating: FieldUpdate::Set(8.5),
        ..MoviePatch::default()
    };
    let updated = service.update_movie(&movie.id.to_string(), &patch).unwrap();
    assert_eq!(updated.rating, Some(8.5));

    service.delete_movie(&movie.id.to_string()).unwrap();
    assert!(service.list_movies().unwrap().is_empty());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteMovieRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_movies_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteMovieRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("movies"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE movies (
            id TEXT PRIMARY KEY NOT NULL,
            title TEXT NOT NULL,
            director TEXT NOT NULL,
            release_year INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteMovieRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "movies",
            column: "genre"
        })
    ));
}

#[test]
fn full_lifecycle_create_list_update_delete() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteMovieRepository::try_new(&conn).unwrap();

    let mut movie = Movie::with_id(
        Uuid::parse_str("00000000-0000-4000-8000-00000000000a").unwrap(),
        "Dune",
        "Villeneuve",
        2021,
    );
    movie.genre = Some("Sci-Fi".to_string());
    movie.rating = Some(9.0);
    repo.create_movie(&movie).unwrap();

    let all = repo.list_movies().unwrap();
    assert_eq!(all, vec![movie.clone()]);

    let patch = MoviePatch {
        rating: FieldUpdate::Set(10.0),
        ..MoviePatch::default()
    };
    let updated = repo.update_movie(&movie.id.to_string(), &patch).unwrap();
    assert_eq!(updated.rating, Some(10.0));
    assert_eq!(updated.title, "Dune");
    assert_eq!(updated.director, "Villeneuve");
    assert_eq!(updated.release_year, 2021);
    assert_eq!(updated.genre.as_deref(), Some("Sci-Fi"));
    assert_eq!(updated.watched_date, None);

    repo.delete_movie(&movie.id.to_string()).unwrap();
    assert!(repo.list_movies().unwrap().is_empty());
}
