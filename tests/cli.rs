use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CATALOG: &str = r#"{
  "repositories": [
    {
      "name": "shortener",
      "description": "Glassmorphism URL shortener",
      "language": "JavaScript",
      "topics": ["url-shortener"],
      "stars": 4,
      "forks": 1,
      "updated": "2025-11-02T08:00:00Z",
      "url": "https://github.com/octo/shortener"
    },
    {
      "name": "rpg",
      "language": "Python",
      "stars": 5,
      "updated_at": "2025-11-03",
      "url": "https://github.com/octo/rpg"
    },
    {
      "name": "mover",
      "language": "Python",
      "description": null,
      "topics": null,
      "stars": null,
      "url": "https://github.com/octo/mover"
    }
  ],
  "stats": { "totalRepos": 3, "followers": 2, "yearsActive": 4 },
  "skills": [{ "name": "Python", "level": 90 }]
}"#;

struct Fixture {
    home: TempDir,
    catalog: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let home = tempfile::tempdir().unwrap();
        let catalog = home.path().join("repos.json");
        std::fs::write(&catalog, CATALOG).unwrap();
        Self { home, catalog }
    }

    fn cmd(&self) -> Command {
        folio(self.home.path(), Some(&self.catalog))
    }
}

fn folio(home: &Path, source: Option<&Path>) -> Command {
    let mut cmd = Command::cargo_bin("folio").unwrap();
    cmd.env("FOLIO_HOME", home).env_remove("FOLIO_LOG").arg("--no-color");
    if let Some(source) = source {
        cmd.arg("--source").arg(source);
    }
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn projects_lists_cards() {
    let fx = Fixture::new();
    fx.cmd()
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("shortener"))
        .stdout(predicate::str::contains("No description available"))
        .stdout(predicate::str::contains("https://github.dev/octo/rpg"));
}

#[test]
fn projects_filter_by_category_and_search() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--format", "names", "projects", "--category", "python"])
        .assert()
        .success()
        .stdout("rpg\nmover\n");
    fx.cmd()
        .args(["--format", "names", "projects", "--search", "GLASS"])
        .assert()
        .success()
        .stdout("shortener\n");
    fx.cmd()
        .args(["--format", "names", "projects", "--category", "url", "--search", "short"])
        .assert()
        .success()
        .stdout("shortener\n");
}

#[test]
fn placeholder_text_is_not_searchable() {
    let fx = Fixture::new();
    fx.cmd()
        .args(["--format", "names", "projects", "--search", "available"])
        .assert()
        .success()
        .stdout("");
}

#[test]
fn missing_source_shows_placeholder() {
    let home = tempfile::tempdir().unwrap();
    folio(home.path(), Some(&home.path().join("missing.json")))
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Repositories Found"));
}

#[test]
fn malformed_source_shows_placeholder() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("repos.json");
    std::fs::write(&path, "{ not json").unwrap();
    folio(home.path(), Some(&path))
        .arg("projects")
        .assert()
        .success()
        .stdout(predicate::str::contains("No Repositories Found"));
}

#[test]
fn projects_json_distinguishes_no_matches() {
    let fx = Fixture::new();
    let value = stdout_json(fx.cmd().args(["--format", "json", "projects", "--category", "haskell"]));
    assert_eq!(value["view"], "no_matches");
    assert_eq!(value["filter"]["active_category"], "haskell");

    let value = stdout_json(fx.cmd().args(["--format", "json", "projects"]));
    assert_eq!(value["view"], "cards");
    assert_eq!(value["cards"].as_array().unwrap().len(), 3);
}

#[test]
fn stats_report() {
    let fx = Fixture::new();
    let value = stdout_json(fx.cmd().args(["--format", "json", "stats"]));
    assert_eq!(value["summary"]["total_stars"], 9);
    assert_eq!(value["summary"]["distinct_languages"], 2);
    assert_eq!(value["highlight"]["language"], "Python");
    assert_eq!(value["highlight"]["percentage"], 67);
    assert_eq!(value["languages"][0]["language"], "Python");

    fx.cmd()
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Languages"))
        .stdout(predicate::str::contains("Skills"));
}

#[test]
fn activity_window() {
    let fx = Fixture::new();
    let value = stdout_json(fx.cmd().args(["--format", "json", "activity", "--today", "2025-11-03", "--days", "7"]));
    let days = value["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[6]["date"], "2025-11-03");
    assert_eq!(days[6]["count"], 1);
    assert_eq!(days[5]["count"], 1);
    assert_eq!(days[0]["count"], 0);
}

#[test]
fn theme_toggle_persists() {
    let home = tempfile::tempdir().unwrap();
    folio(home.path(), None).arg("theme").assert().success().stdout("dark\n");
    folio(home.path(), None).args(["theme", "toggle"]).assert().success().stdout("light\n");
    folio(home.path(), None).arg("theme").assert().success().stdout("light\n");
    assert_eq!(std::fs::read_to_string(home.path().join("theme")).unwrap(), "light");
    folio(home.path(), None).args(["theme", "dark"]).assert().success().stdout("dark\n");
}

#[test]
fn contact_cycles_button_labels() {
    let home = tempfile::tempdir().unwrap();
    folio(home.path(), None)
        .args(["contact", "--instant", "--name", "Ada", "--email", "ada@example.com", "--message", "Hi"])
        .assert()
        .success()
        .stdout("Sending...\nMessage Sent!\nSend Message\n");
}

#[test]
fn contact_rejects_bad_email() {
    let home = tempfile::tempdir().unwrap();
    folio(home.path(), None)
        .args(["contact", "--instant", "--name", "Ada", "--email", "nope", "--message", "Hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an email address"));
}

#[test]
fn hero_types_and_erases_configured_phrase() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.toml"), "[hero]\nphrases = [\"Hi\"]\n").unwrap();
    let output = folio(home.path(), None)
        .args(["--format", "json", "hero", "--instant", "--cycles", "1"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let frames: Vec<(u64, String)> = String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| {
            let v: serde_json::Value = serde_json::from_str(line).unwrap();
            (v["at"].as_u64().unwrap(), v["text"].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(
        frames,
        vec![
            (0, "H".to_string()),
            (100, "Hi".to_string()),
            (2100, "H".to_string()),
            (2150, String::new()),
        ]
    );
}

#[test]
fn dashboard_settles_on_final_values() {
    let fx = Fixture::new();
    let value = stdout_json(fx.cmd().args(["--format", "json", "dashboard", "--instant"]));
    assert_eq!(value["stat-total-repos"], "3");
    assert_eq!(value["stat-years-active"], "4");
    assert_eq!(value["stat-highlight"], "67");
    assert_eq!(value["total-stars"], "9");
    assert_eq!(value["skill-python"], "90%");
    assert!(value.get("typing-text").is_none());
}

#[test]
fn bad_config_is_an_error() {
    let home = tempfile::tempdir().unwrap();
    std::fs::write(home.path().join("config.toml"), "[hero\n").unwrap();
    folio(home.path(), None)
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("config error"));
}

#[test]
fn schema_describes_catalog_document() {
    let home = tempfile::tempdir().unwrap();
    let value = stdout_json(folio(home.path(), None).arg("schema"));
    assert!(value["properties"]["repositories"].is_object());
    assert!(value["properties"]["stats"].is_object());
}

#[test]
fn malformed_record_does_not_empty_the_catalog() {
    let home = tempfile::tempdir().unwrap();
    let path = home.path().join("repos.json");
    std::fs::write(
        &path,
        r#"{"repositories": [{"name": "a"}, {"name": "b", "topics": "cli"}], "stats": {"followers": null}}"#,
    )
    .unwrap();
    folio(home.path(), Some(&path))
        .args(["--format", "names", "projects"])
        .assert()
        .success()
        .stdout("a\n");
}
