//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

const DUMP_TIMESTAMP: &str = "2010-04-28T06:54:19.472104";

/// Builder for a temp directory holding dump files and a store directory
pub struct DumpDirBuilder {
    temp_dir: TempDir,
}

impl DumpDirBuilder {
    /// Create a new builder with an empty temp directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        Self { temp_dir }
    }

    /// Add an authors dump with the given raw content
    pub fn with_authors_dump(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("authors.txt"), content)
            .expect("Failed to write authors dump");
        self
    }

    /// Add an authors dump built from author lines
    pub fn with_authors(self, authors: &[AuthorLineBuilder]) -> Self {
        let content = authors.iter().map(|a| a.to_line()).collect::<Vec<_>>().join("\n");
        self.with_authors_dump(&content)
    }

    /// Add a works dump with the given raw content
    pub fn with_works_dump(self, content: &str) -> Self {
        fs::write(self.temp_dir.path().join("works.txt"), content)
            .expect("Failed to write works dump");
        self
    }

    /// Add a works dump built from work lines
    pub fn with_works(self, works: &[WorkLineBuilder]) -> Self {
        let content = works.iter().map(|w| w.to_line()).collect::<Vec<_>>().join("\n");
        self.with_works_dump(&content)
    }

    /// Build and return the temp directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for DumpDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn authors_dump(dir: &Path) -> PathBuf {
    dir.join("authors.txt")
}

pub fn works_dump(dir: &Path) -> PathBuf {
    dir.join("works.txt")
}

pub fn store_dir(dir: &Path) -> PathBuf {
    dir.join("store")
}

/// Builder for author dump lines
pub struct AuthorLineBuilder {
    key: Option<String>,
    name: Option<String>,
    personal_name: Option<String>,
}

impl AuthorLineBuilder {
    /// Create an author line with the given id (`/authors/` is prepended)
    pub fn new(id: &str) -> Self {
        Self { key: Some(format!("/authors/{id}")), name: None, personal_name: None }
    }

    /// Create an author line with no `key` field
    pub fn without_key() -> Self {
        Self { key: None, name: None, personal_name: None }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn personal_name(mut self, personal_name: &str) -> Self {
        self.personal_name = Some(personal_name.to_string());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut record = json!({ "type": { "key": "/type/author" }, "revision": 1 });
        if let Some(key) = &self.key {
            record["key"] = json!(key);
        }
        if let Some(name) = &self.name {
            record["name"] = json!(name);
        }
        if let Some(personal_name) = &self.personal_name {
            record["personal_name"] = json!(personal_name);
        }
        record
    }

    /// Render as a tab-separated dump line
    pub fn to_line(&self) -> String {
        let key = self.key.as_deref().unwrap_or("");
        format!("/type/author\t{key}\t1\t{DUMP_TIMESTAMP}\t{}", self.to_json())
    }
}

/// Builder for work dump lines
pub struct WorkLineBuilder {
    key: Option<String>,
    title: Option<String>,
    description: Option<Value>,
    created: Option<String>,
    covers: Option<Vec<i64>>,
    authors: Option<Vec<String>>,
}

impl WorkLineBuilder {
    /// Create a work line with the given id (`/works/` is prepended)
    pub fn new(id: &str) -> Self {
        Self {
            key: Some(format!("/works/{id}")),
            title: None,
            description: None,
            created: None,
            covers: None,
            authors: None,
        }
    }

    /// Create a work line with no `key` field
    pub fn without_key() -> Self {
        Self { key: None, ..Self::new("") }
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(title.to_string());
        self
    }

    /// Set a `/type/text` description
    pub fn description(mut self, text: &str) -> Self {
        self.description = Some(json!({ "type": "/type/text", "value": text }));
        self
    }

    /// Set `created.value` verbatim
    pub fn created(mut self, value: &str) -> Self {
        self.created = Some(value.to_string());
        self
    }

    pub fn covers(mut self, covers: &[i64]) -> Self {
        self.covers = Some(covers.to_vec());
        self
    }

    /// Set author references by id (`/authors/` is prepended)
    pub fn authors(mut self, ids: &[&str]) -> Self {
        self.authors = Some(ids.iter().map(|id| id.to_string()).collect());
        self
    }

    pub fn to_json(&self) -> Value {
        let mut record = json!({ "type": { "key": "/type/work" }, "revision": 4 });
        if let Some(key) = &self.key {
            record["key"] = json!(key);
        }
        if let Some(title) = &self.title {
            record["title"] = json!(title);
        }
        if let Some(description) = &self.description {
            record["description"] = description.clone();
        }
        if let Some(created) = &self.created {
            record["created"] = json!({ "type": "/type/datetime", "value": created });
        }
        if let Some(covers) = &self.covers {
            record["covers"] = json!(covers);
        }
        if let Some(authors) = &self.authors {
            let roles: Vec<Value> = authors
                .iter()
                .map(|id| {
                    json!({
                        "type": { "key": "/type/author_role" },
                        "author": { "key": format!("/authors/{id}") }
                    })
                })
                .collect();
            record["authors"] = Value::Array(roles);
        }
        record
    }

    /// Render as a tab-separated dump line
    pub fn to_line(&self) -> String {
        let key = self.key.as_deref().unwrap_or("");
        format!("/type/work\t{key}\t4\t{DUMP_TIMESTAMP}\t{}", self.to_json())
    }
}

/// A small but realistic dump pair: three authors, four works, one broken line in each
pub fn realistic_dump_dir() -> TempDir {
    let authors = [
        AuthorLineBuilder::new("OL1A").name("Mark Twain").personal_name("Samuel Clemens").to_line(),
        "/type/author\t/authors/OL404A\t1\ttruncated line without a record".to_string(),
        AuthorLineBuilder::new("OL2A").name("Jane Austen").to_line(),
        AuthorLineBuilder::new("OL3A").name("Charles Dickens").to_line(),
    ]
    .join("\n");

    let works = [
        WorkLineBuilder::new("OL1W")
            .title("Adventures of Huckleberry Finn")
            .description("A boy and a raft")
            .created("2009-12-11T01:57:19.964652")
            .covers(&[295577, 6640418])
            .authors(&["OL1A"])
            .to_line(),
        WorkLineBuilder::new("OL2W").title("Pride and Prejudice").authors(&["OL2A"]).to_line(),
        "/type/work\t/works/OL9W\t2\t2010-01-01T00:00:00.000000\t{\"key\": \"/works/OL9W\",".to_string(),
        WorkLineBuilder::new("OL3W")
            .title("Collected Letters")
            .authors(&["OL3A", "OL99A", "OL1A"])
            .to_line(),
        WorkLineBuilder::new("OL4W").title("Anonymous Ballads").to_line(),
    ]
    .join("\n");

    DumpDirBuilder::new().with_authors_dump(&authors).with_works_dump(&works).build()
}
