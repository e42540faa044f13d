use chrono::DateTime;
use paper_archive::storage::models::{NewFile, NewPaper};
use paper_archive::storage::{Database, DatabaseError};

fn test_db() -> (tempfile::TempDir, Database) {
    let dir = tempfile::tempdir().unwrap();
    let db = Database::open(dir.path().join("data")).unwrap();
    (dir, db)
}

fn sample_file(filename: &str, identifier: &str) -> NewFile {
    NewFile {
        filename: filename.to_string(),
        identifier: identifier.to_string(),
    }
}

fn sample_paper(title: &str) -> NewPaper {
    NewPaper {
        title: title.to_string(),
        description: "description".to_string(),
        abstract_text: "abstract".to_string(),
        link: "https://example.org".to_string(),
        author: "author".to_string(),
        stored_file_name: format!("{}.pdf", uuid::Uuid::new_v4()),
        publication_date: DateTime::parse_from_rfc3339("2022-03-04T05:06:07Z").unwrap(),
    }
}

#[test]
fn test_insert_and_find_file() {
    let (_dir, db) = test_db();

    let stored = db.insert_file(sample_file("a.txt", "uuid-1")).unwrap();
    assert_eq!(stored.id, 1);
    assert_eq!(stored.filename, "a.txt");

    let found = db
        .find_file_by_identifier("uuid-1")
        .unwrap()
        .expect("file should exist");
    assert_eq!(found, stored);
}

#[test]
fn test_find_file_not_found() {
    let (_dir, db) = test_db();
    assert!(db.find_file_by_identifier("nonexistent").unwrap().is_none());
}

#[test]
fn test_generated_identifiers_are_unique() {
    let a = NewFile::generate("same.txt");
    let b = NewFile::generate("same.txt");
    assert_ne!(a.identifier, b.identifier);
    assert_eq!(a.identifier.len(), 36);
}

#[test]
fn test_insert_file_duplicate_identifier() {
    let (_dir, db) = test_db();
    db.insert_file(sample_file("a.txt", "dup")).unwrap();

    let result = db.insert_file(sample_file("b.txt", "dup"));
    assert!(matches!(result, Err(DatabaseError::Constraint(_))));

    let found = db.find_file_by_identifier("dup").unwrap().unwrap();
    assert_eq!(found.filename, "a.txt");
}

#[test]
fn test_insert_files_bulk() {
    let (_dir, db) = test_db();

    let stored = db
        .insert_files(vec![
            sample_file("a.txt", "uuid-a"),
            sample_file("b.txt", "uuid-b"),
        ])
        .unwrap();

    let ids: Vec<u64> = stored.iter().map(|f| f.id).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(db.get_all_files().unwrap().len(), 2);
}

#[test]
fn test_insert_files_all_or_nothing() {
    let (_dir, db) = test_db();
    db.insert_file(sample_file("existing.txt", "taken")).unwrap();

    let result = db.insert_files(vec![
        sample_file("new.txt", "fresh"),
        sample_file("clash.txt", "taken"),
    ]);
    assert!(matches!(result, Err(DatabaseError::Constraint(_))));

    // The first row of the failed batch was rolled back with the rest
    assert!(db.find_file_by_identifier("fresh").unwrap().is_none());
    assert_eq!(db.get_all_files().unwrap().len(), 1);

    // ...and so was its id reservation
    let next = db.insert_file(sample_file("next.txt", "next")).unwrap();
    assert_eq!(next.id, 2);
}

#[test]
fn test_insert_files_duplicate_within_batch() {
    let (_dir, db) = test_db();

    let result = db.insert_files(vec![
        sample_file("a.txt", "twin"),
        sample_file("b.txt", "twin"),
    ]);
    assert!(matches!(result, Err(DatabaseError::Constraint(_))));
    assert!(db.get_all_files().unwrap().is_empty());
}

#[test]
fn test_delete_file() {
    let (_dir, db) = test_db();
    let stored = db.insert_file(sample_file("gone.txt", "uuid-gone")).unwrap();

    assert!(db.delete_file(&stored).unwrap());
    assert!(db.find_file_by_identifier("uuid-gone").unwrap().is_none());
    assert!(!db.delete_file(&stored).unwrap());
}

#[test]
fn test_ids_are_not_reused_after_delete() {
    let (_dir, db) = test_db();
    let first = db.insert_file(sample_file("a.txt", "uuid-a")).unwrap();
    let second = db.insert_file(sample_file("b.txt", "uuid-b")).unwrap();
    db.delete_file(&second).unwrap();

    let third = db.insert_file(sample_file("c.txt", "uuid-c")).unwrap();
    assert_eq!(first.id, 1);
    assert_eq!(third.id, 3);
}

#[test]
fn test_records_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let db = Database::open(dir.path()).unwrap();
        db.insert_file(sample_file("kept.txt", "uuid-kept")).unwrap();
        db.insert_paper(sample_paper("Kept")).unwrap();
    }

    let db = Database::open(dir.path()).unwrap();
    assert!(db.find_file_by_identifier("uuid-kept").unwrap().is_some());
    assert_eq!(db.list_papers().unwrap().len(), 1);

    let next = db.insert_file(sample_file("more.txt", "uuid-more")).unwrap();
    assert_eq!(next.id, 2);
}

#[test]
fn test_insert_and_find_paper() {
    let (_dir, db) = test_db();
    let new_paper = sample_paper("On Storage");

    let stored = db.insert_paper(new_paper.clone()).unwrap();
    assert_eq!(stored.id, 1);
    assert_eq!(stored.title, "On Storage");
    assert_eq!(stored.stored_file_name, new_paper.stored_file_name);
    assert_eq!(stored.publication_date, new_paper.publication_date);

    let found = db.find_paper(1).unwrap().expect("paper should exist");
    assert_eq!(found, stored);
}

#[test]
fn test_find_paper_not_found() {
    let (_dir, db) = test_db();
    assert!(db.find_paper(99).unwrap().is_none());
}

#[test]
fn test_list_papers_in_insertion_order() {
    let (_dir, db) = test_db();
    for title in ["first", "second", "third"] {
        db.insert_paper(sample_paper(title)).unwrap();
    }

    let titles: Vec<String> = db
        .list_papers()
        .unwrap()
        .into_iter()
        .map(|p| p.title)
        .collect();
    assert_eq!(titles, vec!["first", "second", "third"]);
}

#[test]
fn test_file_and_paper_ids_are_independent() {
    let (_dir, db) = test_db();
    db.insert_file(sample_file("a.txt", "uuid-a")).unwrap();
    db.insert_file(sample_file("b.txt", "uuid-b")).unwrap();

    let paper = db.insert_paper(sample_paper("Only paper")).unwrap();
    assert_eq!(paper.id, 1);
}
