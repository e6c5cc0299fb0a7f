//! Shared fixtures for pipeline integration tests.
//!
//! Provides:
//! - DOCX and lexicon builders writing into a temp directory
//! - A whitespace segmenter for exact token control
//! - Helpers to unpack a produced `.apkg` and read its cards in study order

use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tempfile::TempDir;
use vocab_core::{Segmenter, Token};
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Temp workspace for one test.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Write a DOCX whose body has one paragraph per entry.
    pub fn write_docx(&self, name: &str, paragraphs: &[&str]) -> PathBuf {
        let body: String = paragraphs
            .iter()
            .map(|p| format!("<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>", p))
            .collect();
        let document = format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
             <w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\">\
             <w:body>{}</w:body></w:document>",
            body
        );

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut zip = ZipWriter::new(&mut buffer);
            zip.start_file("[Content_Types].xml", SimpleFileOptions::default())
                .expect("start content types");
            zip.write_all(b"<Types/>").expect("write content types");
            zip.start_file("word/document.xml", SimpleFileOptions::default())
                .expect("start document");
            zip.write_all(document.as_bytes()).expect("write document");
            zip.finish().expect("finish docx");
        }

        let path = self.path(name);
        std::fs::write(&path, buffer.into_inner()).expect("write docx");
        path
    }

    /// Write a lexicon file from `(headword, type, result)` rows.
    pub fn write_lexicon(&self, name: &str, rows: &[(&str, &str, &str)]) -> PathBuf {
        let entries: Vec<serde_json::Value> = rows
            .iter()
            .map(|(search, kind, result)| {
                serde_json::json!({ "search": search, "type": kind, "result": result })
            })
            .collect();
        let path = self.path(name);
        std::fs::write(&path, serde_json::to_string(&entries).expect("encode lexicon"))
            .expect("write lexicon");
        path
    }
}

/// Splits on ASCII spaces only.
pub struct SpaceSegmenter;

impl Segmenter for SpaceSegmenter {
    fn segment(&self, text: &str) -> Vec<Token> {
        text.split(' ').filter_map(Token::new).collect()
    }
}

/// `(front, back)` pairs from a package, in due order.
pub fn read_cards(apkg: &Path) -> Vec<(String, String)> {
    let bytes = std::fs::read(apkg).expect("read package");
    let mut archive = ZipArchive::new(Cursor::new(bytes)).expect("open package");
    let mut collection = Vec::new();
    archive
        .by_name("collection.anki2")
        .expect("collection entry")
        .read_to_end(&mut collection)
        .expect("read collection");

    let dir = tempfile::tempdir().expect("create temp dir");
    let db_path = dir.path().join("collection.anki2");
    std::fs::write(&db_path, collection).expect("write collection");

    let conn = Connection::open(&db_path).expect("open collection");
    let mut stmt = conn
        .prepare("SELECT n.flds FROM cards c JOIN notes n ON n.id = c.nid ORDER BY c.due")
        .expect("prepare");
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .expect("query")
        .map(|flds| {
            let flds = flds.expect("row");
            let (front, back) = flds.split_once('\u{1f}').expect("two fields");
            (front.to_string(), back.to_string())
        })
        .collect();
    rows
}

pub fn pair(front: &str, back: &str) -> (String, String) {
    (front.to_string(), back.to_string())
}
