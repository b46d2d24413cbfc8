#![allow(dead_code)]

use std::sync::Arc;

use builderx::drivers::InMemoryTestDriver;
use builderx::traits::{Column, DatabaseDriver, Table};
use builderx::{record, Database};

pub struct Users;
pub struct UsersColumns {
    pub id: UsersId,
    pub name: UsersName,
    pub email: UsersEmail,
}
pub struct UsersId;
pub struct UsersName;
pub struct UsersEmail;

impl Table for Users {
    type Columns = UsersColumns;
    fn table_name() -> &'static str {
        "users"
    }
    fn columns() -> Self::Columns {
        UsersColumns {
            id: UsersId,
            name: UsersName,
            email: UsersEmail,
        }
    }
}

impl Column for UsersId {
    fn column_name(&self) -> &'static str {
        "id"
    }
    fn table_name(&self) -> &'static str {
        "users"
    }
}

impl Column for UsersName {
    fn column_name(&self) -> &'static str {
        "name"
    }
    fn table_name(&self) -> &'static str {
        "users"
    }
}

impl Column for UsersEmail {
    fn column_name(&self) -> &'static str {
        "email"
    }
    fn table_name(&self) -> &'static str {
        "users"
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: Option<String>,
}

record!(User { id, name, email });

/// Opens a `Database` over the given in-memory driver, keeping a handle to
/// the driver for assertions.
pub async fn open(driver: InMemoryTestDriver) -> (Arc<InMemoryTestDriver>, Database) {
    let in_memory_test_driver = Arc::new(driver);
    let driver: Arc<dyn DatabaseDriver> =
        Arc::clone(&in_memory_test_driver) as Arc<dyn DatabaseDriver>;
    let db = Database::open(driver).await.unwrap();
    (in_memory_test_driver, db)
}
