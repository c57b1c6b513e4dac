#![allow(dead_code)]

use nestpath::{Record, Value};
use serde_json::json;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small object-rooted structure mixing all three container shapes.
pub fn simple() -> Value {
    Value::from(
        Record::new()
            .with("a", 1)
            .with("b", Value::from(json!([2, 3])))
            .with("c", Value::from(json!({"d": 4, "e": 5})))
            .with("d", Record::new().with("e", 6))
            .with(
                "e",
                Value::from(json!([{"a": 7, "b": 8}, {"b": 9, "c": 0}])),
            ),
    )
}

/// A wider structure exercised by the wildcard suites.
pub fn complex() -> Value {
    Value::from(
        Record::new()
            .with("aa", 1)
            .with("ba", Value::from(json!([2, 3])))
            .with("bb", Value::from(json!([4, 5])))
            .with("ca", Value::from(json!({"d": 6, "e": 7, "f": 8})))
            .with("cb", Record::new().with("e", 9))
            .with("ff", Value::from(json!([1, 2, 3, 4, 5, 6])))
            .with(
                "gg",
                Value::from(json!([
                    {"a": 1, "b": 2},
                    {"b": 3, "c": 4},
                    {"a": 5, "b": 6, "c": 7}
                ])),
            ),
    )
}

/// The meeting-agenda example structure.
pub fn agenda() -> Value {
    Value::from(json!({
        "meeting": "progress on project X",
        "date": "2017-8-14",
        "start_time": "10:00",
        "end_time": "11:00",
        "invited": ["Joe", "Ann", "Boo"],
        "items": [
            {
                "name": "opening",
                "duration": "5 minutes",
                "subjects": ["purpose of the meeting"],
            },
            {
                "name": "progress",
                "duration": "25 minutes",
                "subjects": ["milestones", "project delays", "actions"],
            },
            {
                "name": "closing",
                "duration": "5 minutes",
                "subjects": ["questions", "roundup"],
            },
        ]
    }))
}
