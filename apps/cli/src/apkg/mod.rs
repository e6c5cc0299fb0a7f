//! Anki package (`.apkg`) serialization.
//!
//! A package is a zip archive holding a `collection.anki2` SQLite database
//! and a `media` manifest. Each card becomes one Basic note with one card in
//! a deck named after the source document. New-card `due` positions follow
//! card order, so Anki introduces words in rank order.

pub mod schema;

use chrono::Utc;
use rusqlite::{params, Connection};
use sha1::Sha1;
use sha2::{Digest, Sha256};
use std::io::{Cursor, Write};
use vocab_core::{Card, Deck, DeckSerializer, SerializeError};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use schema::FIELD_SEPARATOR;

/// Name of the collection database inside the package.
pub const COLLECTION_FILE: &str = "collection.anki2";

/// Name of the media manifest inside the package.
pub const MEDIA_FILE: &str = "media";

/// A deck being assembled into an Anki package.
pub struct ApkgDeck {
    name: String,
    cards: Vec<Card>,
    created_ms: i64,
}

impl ApkgDeck {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_timestamp(name, Utc::now().timestamp_millis())
    }

    /// Fix the creation time; ids are derived from it.
    pub fn with_timestamp(name: impl Into<String>, created_ms: i64) -> Self {
        Self {
            name: name.into(),
            cards: Vec::new(),
            created_ms,
        }
    }

    pub fn add_card(&mut self, front: impl Into<String>, back: impl Into<String>) {
        self.cards.push(Card {
            front: front.into(),
            back: back.into(),
        });
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Produce the package bytes.
    pub fn save(&self) -> Result<Vec<u8>, SerializeError> {
        let dir = tempfile::tempdir()?;
        let db_path = dir.path().join(COLLECTION_FILE);

        let conn = Connection::open(&db_path).map_err(db_error)?;
        self.write_collection(&conn)?;
        conn.close().map_err(|(_, e)| db_error(e))?;

        let collection = std::fs::read(&db_path)?;
        package(&collection)
    }

    fn write_collection(&self, conn: &Connection) -> Result<(), SerializeError> {
        let now_ms = self.created_ms;
        let now_secs = now_ms / 1000;
        let deck_id = now_ms;
        let model_id = now_ms + 1;

        conn.execute_batch(schema::SCHEMA).map_err(db_error)?;

        conn.execute(
            "INSERT INTO col (id, crt, mod, scm, ver, dty, usn, ls, conf, models, decks, dconf, tags)
             VALUES (1, ?1, ?2, ?2, ?3, 0, 0, 0, ?4, ?5, ?6, ?7, '{}')",
            params![
                now_secs,
                now_ms,
                schema::SCHEMA_VERSION,
                schema::collection_conf(model_id).to_string(),
                schema::basic_models(model_id, deck_id, now_secs).to_string(),
                schema::decks(deck_id, &self.name, now_secs).to_string(),
                schema::deck_conf().to_string(),
            ],
        )
        .map_err(db_error)?;

        conn.execute_batch("BEGIN").map_err(db_error)?;
        for (position, card) in self.cards.iter().enumerate() {
            let id = now_ms + position as i64;
            let front = escape_html(&card.front);
            let back = escape_html(&card.back);
            let fields = format!("{}{}{}", front, FIELD_SEPARATOR, back);

            conn.execute(
                "INSERT INTO notes (id, guid, mid, mod, usn, tags, flds, sfld, csum, flags, data)
                 VALUES (?1, ?2, ?3, ?4, -1, '', ?5, ?6, ?7, 0, '')",
                params![
                    id,
                    note_guid(&self.name, &card.front),
                    model_id,
                    now_secs,
                    fields,
                    front,
                    field_checksum(&front),
                ],
            )
            .map_err(db_error)?;

            conn.execute(
                "INSERT INTO cards (id, nid, did, ord, mod, usn, type, queue, due, ivl, factor, reps, lapses, left, odue, odid, flags, data)
                 VALUES (?1, ?1, ?2, 0, ?3, -1, 0, 0, ?4, 0, 0, 0, 0, 0, 0, 0, 0, '')",
                params![id, deck_id, now_secs, position as i64 + 1],
            )
            .map_err(db_error)?;
        }
        conn.execute_batch("COMMIT").map_err(db_error)?;

        Ok(())
    }
}

/// Serializer handed to the pipeline.
#[derive(Debug, Default, Clone, Copy)]
pub struct ApkgSerializer;

impl DeckSerializer for ApkgSerializer {
    fn format(&self) -> &'static str {
        "apkg"
    }

    fn serialize(&self, deck: &Deck) -> Result<Vec<u8>, SerializeError> {
        let mut apkg = ApkgDeck::new(deck.name.clone());
        for card in &deck.cards {
            apkg.add_card(card.front.clone(), card.back.clone());
        }
        apkg.save()
    }
}

fn package(collection: &[u8]) -> Result<Vec<u8>, SerializeError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

    zip.start_file(COLLECTION_FILE, deflated()).map_err(zip_error)?;
    zip.write_all(collection)?;
    zip.start_file(MEDIA_FILE, deflated()).map_err(zip_error)?;
    zip.write_all(b"{}")?;

    let cursor = zip.finish().map_err(zip_error)?;
    Ok(cursor.into_inner())
}

fn deflated() -> SimpleFileOptions {
    SimpleFileOptions::default().compression_method(CompressionMethod::Deflated)
}

/// Stable note id across rebuilds of the same deck.
pub fn note_guid(deck_name: &str, front: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(deck_name.as_bytes());
    hasher.update([0x1f]);
    hasher.update(front.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..16].to_string()
}

/// First 32 bits of the SHA-1 of the sort field, as Anki computes `csum`.
pub fn field_checksum(field: &str) -> i64 {
    let digest = Sha1::digest(field.as_bytes());
    i64::from(u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn db_error(e: rusqlite::Error) -> SerializeError {
    SerializeError::Database(e.to_string())
}

fn zip_error(e: zip::result::ZipError) -> SerializeError {
    SerializeError::Archive(e.to_string())
}
