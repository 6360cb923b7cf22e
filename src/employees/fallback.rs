//! Built-in employee dataset served when upstream reads fail.

use crate::employees::model::Employee;

/// (id, name, salary, age)
const RECORDS: [(u64, &str, u64, u32); 24] = [
    (1, "Tiger Nixon", 320_800, 61),
    (2, "Garrett Winters", 170_750, 63),
    (3, "Ashton Cox", 86_000, 66),
    (4, "Cedric Kelly", 433_060, 22),
    (5, "Airi Satou", 162_700, 33),
    (6, "Brielle Williamson", 372_000, 61),
    (7, "Herrod Chandler", 137_500, 59),
    (8, "Rhona Davidson", 327_900, 55),
    (9, "Colleen Hurst", 205_500, 39),
    (10, "Sonya Frost", 103_600, 23),
    (11, "Jena Gaines", 90_560, 30),
    (12, "Quinn Flynn", 342_000, 22),
    (13, "Charde Marshall", 470_600, 36),
    (14, "Haley Kennedy", 313_500, 43),
    (15, "Tatyana Fitzpatrick", 385_750, 19),
    (16, "Michael Silva", 198_500, 66),
    (17, "Paul Byrd", 725_000, 64),
    (18, "Gloria Little", 237_500, 59),
    (19, "Bradley Greer", 132_000, 41),
    (20, "Dai Rios", 217_500, 35),
    (21, "Jenette Caldwell", 345_000, 30),
    (22, "Yuri Berry", 675_000, 40),
    (23, "Caesar Vance", 106_450, 21),
    (24, "Doris Wilder", 85_600, 23),
];

/// A fresh copy of the fallback employees, in id order.
pub fn employees() -> Vec<Employee> {
    RECORDS.iter().map(to_employee).collect()
}

/// Look up a single fallback employee.
pub fn find(id: u64) -> Option<Employee> {
    RECORDS.iter().find(|(record_id, ..)| *record_id == id).map(to_employee)
}

fn to_employee(&(id, name, salary, age): &(u64, &str, u64, u32)) -> Employee {
    Employee {
        id,
        name: name.to_string(),
        salary,
        age,
        profile_image: String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_dataset_shape() {
        let employees = employees();
        assert_eq!(employees.len(), 24);

        let ids: HashSet<u64> = employees.iter().map(|e| e.id).collect();
        assert_eq!(ids, (1..=24).collect());
        assert!(employees.iter().all(|e| e.age > 0 && !e.name.is_empty()));
    }

    #[test]
    fn test_find() {
        let cedric = find(4).unwrap();
        assert_eq!(cedric.name, "Cedric Kelly");
        assert_eq!(cedric.salary, 433_060);
        assert_eq!(cedric.age, 22);

        assert!(find(0).is_none());
        assert!(find(25).is_none());
    }
}
