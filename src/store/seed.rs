//! Demo fixtures loaded when the app starts

use super::memory::MemoryStore;
use crate::state::{Department, Seller};
use chrono::NaiveDate;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    // fixture dates are valid by construction
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Department store preloaded with the demo catalog
pub fn demo_departments() -> MemoryStore<Department> {
    MemoryStore::with_rows(["Computers", "Electronics", "Fashion", "Books"].map(|name| {
        Department {
            id: None,
            name: name.to_string(),
        }
    }))
}

/// Seller store preloaded with the demo roster
pub fn demo_sellers() -> MemoryStore<Seller> {
    let rows = [
        ("Bob Brown", "bob@gmail.com", date(1998, 4, 21), 1000.0, 1),
        ("Maria Green", "maria@gmail.com", date(1979, 12, 31), 3500.0, 2),
        ("Alex Grey", "alex@gmail.com", date(1988, 1, 15), 2200.0, 1),
        ("Martha Red", "martha@gmail.com", date(1993, 11, 30), 3000.0, 4),
        ("Donald Blue", "donald@gmail.com", date(2000, 1, 9), 4000.0, 3),
        ("Alex Pink", "bob.pink@gmail.com", date(1997, 3, 4), 3000.0, 2),
    ]
    .map(|(name, email, birth_date, base_salary, department_id)| Seller {
        id: None,
        name: name.to_string(),
        email: email.to_string(),
        birth_date,
        base_salary,
        department_id: Some(department_id),
    });
    MemoryStore::with_rows(rows)
}
