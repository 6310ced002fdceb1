#![allow(missing_docs, clippy::expect_used, clippy::unwrap_used)]

mod common;

use common::Fixture;
use predicates::prelude::*;
use serde_json::Value;

fn search_json(fixture: &Fixture, query: &[&str]) -> Value {
    let stdout = fixture
        .cmd()
        .arg("search")
        .args(query)
        .args(fixture.source_args())
        .args(["--format", "json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    serde_json::from_slice(&stdout).unwrap()
}

#[test]
fn terms_filter_without_marking_partial_matches() {
    let fixture = Fixture::new();

    let payload = search_json(&fixture, &["out", "pri"]);

    assert_eq!(payload["query"], "out pri");
    let items = payload["items"].as_array().unwrap();
    let ids: Vec<&str> = items.iter().map(|i| i["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["kw-print", "kw-print"]);
    // The whole query never occurs, so nothing is marked.
    assert!(items.iter().all(|i| !i["title_markup"].as_str().unwrap().contains("<mark>")));
}

#[test]
fn categories_follow_visible_keywords() {
    let fixture = Fixture::new();

    let payload = search_json(&fixture, &["collection"]);

    let categories = payload["categories"].as_array().unwrap();
    assert_eq!(categories[0]["id"], "cat-input-output");
    assert_eq!(categories[0]["hidden"], true);
    assert_eq!(categories[1]["id"], "cat-loops");
    assert_eq!(categories[1]["hidden"], false);
    assert_eq!(categories[1]["open"], true);
}

#[test]
fn whole_query_is_marked() {
    let fixture = Fixture::new();

    let payload = search_json(&fixture, &["console"]);

    let first = &payload["items"][0];
    assert_eq!(first["id"], "kw-print");
    assert_eq!(
        first["description_markup"],
        "Writes output to the <mark>console</mark>."
    );
}

#[test]
fn text_output_lists_matches() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["search", "console"])
        .args(fixture.source_args())
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("PRINT  #kw-print"))
        .stdout(predicate::str::contains("    Reads a line from the console."))
        .stdout(predicate::str::contains("4 of 8 entries"))
        .stdout(predicate::str::contains("Categories: Input & Output"))
        .stdout(predicate::str::contains("<mark>").not());
}

#[test]
fn text_output_without_matches() {
    let fixture = Fixture::new();

    fixture
        .cmd()
        .args(["search", "zzz"])
        .args(fixture.source_args())
        .args(["--format", "text"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No entries match 'zzz'"));
}

#[test]
fn empty_query_shows_everything() {
    let fixture = Fixture::new();

    let payload = search_json(&fixture, &[]);

    assert_eq!(payload["items"].as_array().unwrap().len(), 8);
    assert!(
        payload["categories"]
            .as_array()
            .unwrap()
            .iter()
            .all(|c| c["hidden"] == false && c["open"] == false)
    );
}
