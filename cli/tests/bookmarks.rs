use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt as _;
use predicates::str::contains;
use std::path::Path;
use tempfile::tempdir;

fn bookmarky(home: &Path, probe: &str) -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("bookmarky")?;
    cmd.env("BOOKMARKY_HOME", home)
        .env_remove("BOOKMARKY_BACKEND")
        .env_remove("BOOKMARKY_LOG")
        .env_remove("HTTP_PROXY")
        .env_remove("http_proxy")
        .env_remove("ALL_PROXY")
        .env_remove("all_proxy")
        .args(["--probe", probe]);
    Ok(cmd)
}

fn exported_ids(home: &Path) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let out = bookmarky(home, "off")?.arg("export").output()?;
    let value: serde_json::Value = serde_json::from_slice(&out.stdout)?;
    Ok(value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|b| b["id"].as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default())
}

fn import(home: &Path, count: usize) -> Result<(), Box<dyn std::error::Error>> {
    let drafts: Vec<_> = (0..count)
        .map(|n| {
            serde_json::json!({
                "url": format!("https://example.com/{n}"),
                "title": format!("Example {n}"),
            })
        })
        .collect();
    bookmarky(home, "off")?
        .arg("import")
        .write_stdin(serde_json::to_string(&drafts)?)
        .assert()
        .success()
        .stdout(contains(format!("Imported {count} bookmarks")));
    Ok(())
}

#[test]
fn add_shows_results_then_lists() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;

    bookmarky(home.path(), "off")?
        .args(["add", "--url", "https://www.rust-lang.org", "--title", "Rust"])
        .assert()
        .success()
        .stdout(contains("Bookmark Submission Result"))
        .stdout(contains("Title: Rust"))
        .stdout(contains("URL:   https://www.rust-lang.org"));

    bookmarky(home.path(), "off")?
        .arg("list")
        .assert()
        .success()
        .stdout(contains("   1. Rust"))
        .stdout(contains("Page 1 of 1 (1 bookmarks)"));

    let stored = std::fs::read_to_string(home.path().join("bookmarks.json"))?;
    let value: serde_json::Value = serde_json::from_str(&stored)?;
    assert_eq!(value[0]["title"], "Rust");
    Ok(())
}

#[test]
fn invalid_url_is_rejected_before_storage() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    bookmarky(home.path(), "off")?
        .args(["add", "--url", "not-a-url", "--title", "x"])
        .assert()
        .failure()
        .stderr(contains("URL must be a valid absolute URL"));
    assert!(!home.path().join("bookmarks.json").exists());
    Ok(())
}

#[test]
fn unreachable_url_is_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
    let port = listener.local_addr()?.port();
    drop(listener);

    bookmarky(home.path(), "opaque")?
        .args([
            "add",
            "--url",
            &format!("http://127.0.0.1:{port}/"),
            "--title",
            "Nobody home",
        ])
        .assert()
        .failure()
        .stderr(contains("URL not reachable"));
    assert!(!home.path().join("bookmarks.json").exists());
    Ok(())
}

#[test]
fn edit_keeps_omitted_fields() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    import(home.path(), 2)?;
    let ids = exported_ids(home.path())?;
    let id = &ids[1];

    bookmarky(home.path(), "off")?
        .args(["edit", id, "--title", "Renamed"])
        .assert()
        .success()
        .stdout(contains(format!("Updated bookmark {id}")))
        .stdout(contains("   2. Renamed"));

    bookmarky(home.path(), "off")?
        .args(["show", id])
        .assert()
        .success()
        .stdout(contains("Title: Renamed"))
        .stdout(contains("URL:   https://example.com/1"));
    Ok(())
}

#[test]
fn edit_unknown_id_falls_back_to_overview() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    import(home.path(), 1)?;
    let before = std::fs::read_to_string(home.path().join("bookmarks.json"))?;

    bookmarky(home.path(), "off")?
        .args(["edit", "nope", "--title", "Ghost"])
        .assert()
        .success()
        .stderr(contains("bookmark not found: nope; showing overview"))
        .stdout(contains("Bookmark Overview").and(contains("Ghost").not()));

    let after = std::fs::read_to_string(home.path().join("bookmarks.json"))?;
    assert_eq!(before, after);
    Ok(())
}

#[test]
fn rm_asks_before_deleting() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    import(home.path(), 2)?;
    let ids = exported_ids(home.path())?;

    bookmarky(home.path(), "off")?
        .args(["rm", &ids[0]])
        .write_stdin("n\n")
        .assert()
        .success()
        .stdout(contains("Kept bookmark"));
    assert_eq!(exported_ids(home.path())?.len(), 2);

    bookmarky(home.path(), "off")?
        .args(["rm", &ids[0]])
        .write_stdin("y\n")
        .assert()
        .success()
        .stdout(contains(format!("Deleted bookmark {}", ids[0])));

    bookmarky(home.path(), "off")?
        .args(["rm", "--yes", &ids[1]])
        .assert()
        .success();
    assert!(exported_ids(home.path())?.is_empty());

    bookmarky(home.path(), "off")?
        .args(["rm", "--yes", &ids[1]])
        .assert()
        .failure()
        .stderr(contains("bookmark not found"));
    Ok(())
}

#[test]
fn list_pages_through_the_collection() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    import(home.path(), 45)?;

    bookmarky(home.path(), "off")?
        .args(["list", "--page", "3"])
        .assert()
        .success()
        .stdout(contains("  41. Example 40"))
        .stdout(contains("  45. Example 44"))
        .stdout(contains("Page 3 of 3 (45 bookmarks)"));

    bookmarky(home.path(), "off")?
        .args(["list", "--page", "9"])
        .assert()
        .success()
        .stderr(contains("page 9 does not exist; showing page 1"))
        .stdout(contains("Page 1 of 3"));

    bookmarky(home.path(), "off")?
        .args(["--page-size", "50", "list"])
        .assert()
        .success()
        .stdout(contains("Page 1 of 1 (45 bookmarks)"));
    Ok(())
}

#[test]
fn migrate_file_to_sqlite() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    import(home.path(), 2)?;

    bookmarky(home.path(), "off")?
        .args(["migrate", "--from", "file", "--to", "sqlite"])
        .assert()
        .success()
        .stdout(contains("Migrated 2 bookmarks from file to sqlite"));

    assert!(home.path().join("bookmarks.db").exists());
    bookmarky(home.path(), "off")?
        .args(["--backend", "sqlite", "list"])
        .assert()
        .success()
        .stdout(contains("(2 bookmarks)"));
    Ok(())
}

#[test]
fn migrate_from_empty_backend_keeps_existing_bookmarks() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    import(home.path(), 2)?;

    bookmarky(home.path(), "off")?
        .args(["migrate", "--from", "sqlite", "--to", "file"])
        .assert()
        .failure()
        .stderr(contains("cannot migrate from sqlite"));

    assert_eq!(exported_ids(home.path())?.len(), 2);
    Ok(())
}

#[test]
fn empty_store_lists_nothing() -> Result<(), Box<dyn std::error::Error>> {
    let home = tempdir()?;
    bookmarky(home.path(), "off")?
        .arg("list")
        .assert()
        .success()
        .stdout(contains("No bookmarks yet."));
    Ok(())
}
