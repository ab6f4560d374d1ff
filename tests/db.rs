mod common;

#[test]
fn test_creates_and_removes_db_files() {
    let (db_path, dir) = {
        let test_db = common::TestDb::new("test_connection.db");
        let conn = test_db.pool().get();
        assert!(conn.is_ok());
        assert!(test_db.path().exists());
        (test_db.path().to_path_buf(), test_db.dir().to_path_buf())
    };

    assert!(!db_path.exists());
    assert!(!dir.exists());
}

#[test]
fn test_pool_enables_foreign_keys() {
    use diesel::prelude::*;
    use diesel::sql_types::Integer;

    #[derive(QueryableByName)]
    struct Pragma {
        #[diesel(sql_type = Integer)]
        foreign_keys: i32,
    }

    let test_db = common::TestDb::new("test_pragmas.db");
    let mut conn = test_db.pool().get().expect("connection");
    let pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result::<Pragma>(&mut conn)
        .expect("pragma query");

    assert_eq!(pragma.foreign_keys, 1);
}
