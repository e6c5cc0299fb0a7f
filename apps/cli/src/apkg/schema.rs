//! Anki collection schema (version 11) and collection metadata.

use serde_json::{json, Value};

/// Schema version written to `col.ver`.
pub const SCHEMA_VERSION: i64 = 11;

/// Id of the built-in default deck and deck options group.
pub const DEFAULT_DECK_ID: i64 = 1;

/// Field separator inside `notes.flds`.
pub const FIELD_SEPARATOR: char = '\u{1f}';

/// Complete schema for the collection database.
pub const SCHEMA: &str = r#"
CREATE TABLE col (
    id              integer primary key,
    crt             integer not null,
    mod             integer not null,
    scm             integer not null,
    ver             integer not null,
    dty             integer not null,
    usn             integer not null,
    ls              integer not null,
    conf            text not null,
    models          text not null,
    decks           text not null,
    dconf           text not null,
    tags            text not null
);

CREATE TABLE notes (
    id              integer primary key,
    guid            text not null,
    mid             integer not null,
    mod             integer not null,
    usn             integer not null,
    tags            text not null,
    flds            text not null,
    sfld            integer not null,
    csum            integer not null,
    flags           integer not null,
    data            text not null
);

CREATE TABLE cards (
    id              integer primary key,
    nid             integer not null,
    did             integer not null,
    ord             integer not null,
    mod             integer not null,
    usn             integer not null,
    type            integer not null,
    queue           integer not null,
    due             integer not null,
    ivl             integer not null,
    factor          integer not null,
    reps            integer not null,
    lapses          integer not null,
    left            integer not null,
    odue            integer not null,
    odid            integer not null,
    flags           integer not null,
    data            text not null
);

CREATE TABLE revlog (
    id              integer primary key,
    cid             integer not null,
    usn             integer not null,
    ease            integer not null,
    ivl             integer not null,
    lastIvl         integer not null,
    factor          integer not null,
    time            integer not null,
    type            integer not null
);

CREATE TABLE graves (
    usn             integer not null,
    oid             integer not null,
    type            integer not null
);

CREATE INDEX ix_notes_usn ON notes (usn);
CREATE INDEX ix_cards_usn ON cards (usn);
CREATE INDEX ix_revlog_usn ON revlog (usn);
CREATE INDEX ix_cards_nid ON cards (nid);
CREATE INDEX ix_cards_sched ON cards (did, queue, due);
CREATE INDEX ix_revlog_cid ON revlog (cid);
CREATE INDEX ix_notes_csum ON notes (csum);
"#;

const CARD_CSS: &str = ".card {\n font-family: arial;\n font-size: 20px;\n text-align: center;\n color: black;\n background-color: white;\n}\n";

const LATEX_PRE: &str = "\\documentclass[12pt]{article}\n\\special{papersize=3in,5in}\n\\usepackage[utf8]{inputenc}\n\\usepackage{amssymb,amsmath}\n\\pagestyle{empty}\n\\setlength{\\parindent}{0in}\n\\begin{document}\n";

fn field(name: &str, ord: u32) -> Value {
    json!({
        "name": name,
        "ord": ord,
        "sticky": false,
        "rtl": false,
        "font": "Arial",
        "size": 20,
        "media": [],
    })
}

/// Collection-wide configuration (`col.conf`).
pub fn collection_conf(model_id: i64) -> Value {
    json!({
        "nextPos": 1,
        "estTimes": true,
        "activeDecks": [DEFAULT_DECK_ID],
        "sortType": "noteFld",
        "timeLim": 0,
        "sortBackwards": false,
        "addToCur": true,
        "curDeck": DEFAULT_DECK_ID,
        "newBury": true,
        "newSpread": 0,
        "dueCounts": true,
        "curModel": model_id.to_string(),
        "collapseTime": 1200,
    })
}

/// Basic front/back note type (`col.models`).
pub fn basic_models(model_id: i64, deck_id: i64, modified_secs: i64) -> Value {
    let model = json!({
        "id": model_id,
        "name": "Basic (vocab-deck)",
        "type": 0,
        "mod": modified_secs,
        "usn": -1,
        "sortf": 0,
        "did": deck_id,
        "tmpls": [{
            "name": "Card 1",
            "ord": 0,
            "qfmt": "{{Front}}",
            "afmt": "{{FrontSide}}\n\n<hr id=answer>\n\n{{Back}}",
            "did": null,
            "bqfmt": "",
            "bafmt": "",
        }],
        "flds": [field("Front", 0), field("Back", 1)],
        "css": CARD_CSS,
        "latexPre": LATEX_PRE,
        "latexPost": "\\end{document}",
        "tags": [],
        "vers": [],
        "req": [[0, "any", [0]]],
    });
    json!({ model_id.to_string(): model })
}

fn deck(id: i64, name: &str, modified_secs: i64) -> Value {
    json!({
        "id": id,
        "name": name,
        "desc": "",
        "mod": modified_secs,
        "usn": -1,
        "collapsed": false,
        "newToday": [0, 0],
        "revToday": [0, 0],
        "lrnToday": [0, 0],
        "timeToday": [0, 0],
        "dyn": 0,
        "extendNew": 10,
        "extendRev": 50,
        "conf": DEFAULT_DECK_ID,
    })
}

/// Default deck plus the generated deck (`col.decks`).
pub fn decks(deck_id: i64, name: &str, modified_secs: i64) -> Value {
    json!({
        DEFAULT_DECK_ID.to_string(): deck(DEFAULT_DECK_ID, "Default", modified_secs),
        deck_id.to_string(): deck(deck_id, name, modified_secs),
    })
}

/// Default deck options group (`col.dconf`).
pub fn deck_conf() -> Value {
    json!({
        DEFAULT_DECK_ID.to_string(): {
            "id": DEFAULT_DECK_ID,
            "name": "Default",
            "mod": 0,
            "usn": 0,
            "maxTaken": 60,
            "autoplay": true,
            "timer": 0,
            "replayq": true,
            "dyn": false,
            "new": {
                "delays": [1, 10],
                "ints": [1, 4, 7],
                "initialFactor": 2500,
                "separate": true,
                "order": 1,
                "perDay": 20,
                "bury": false,
            },
            "lapse": {
                "delays": [10],
                "mult": 0,
                "minInt": 1,
                "leechFails": 8,
                "leechAction": 0,
            },
            "rev": {
                "perDay": 200,
                "ease4": 1.3,
                "fuzz": 0.05,
                "minSpace": 1,
                "ivlFct": 1,
                "maxIvl": 36500,
                "bury": false,
            },
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn models_keyed_by_id() {
        let models = basic_models(42, 7, 0);
        let model = &models["42"];
        assert_eq!(model["did"], 7);
        assert_eq!(model["flds"][1]["name"], "Back");
        assert_eq!(model["tmpls"][0]["qfmt"], "{{Front}}");
    }

    #[test]
    fn decks_include_default() {
        let decks = decks(99, "lesson.pdf", 0);
        assert_eq!(decks["1"]["name"], "Default");
        assert_eq!(decks["99"]["name"], "lesson.pdf");
    }
}
