use std::collections::HashMap;
use std::sync::LazyLock;

use crate::response::{Language, LanguagesData};
use crate::text::words;

/// ISO 639-3 reference names and codes of widely spoken languages.
const LANGUAGES: &[(&str, &str)] = &[
    ("Afrikaans", "afr"),
    ("Albanian", "sqi"),
    ("Amharic", "amh"),
    ("Arabic", "ara"),
    ("Armenian", "hye"),
    ("Azerbaijani", "aze"),
    ("Basque", "eus"),
    ("Belarusian", "bel"),
    ("Bengali", "ben"),
    ("Bosnian", "bos"),
    ("Bulgarian", "bul"),
    ("Burmese", "mya"),
    ("Catalan", "cat"),
    ("Chinese", "zho"),
    ("Croatian", "hrv"),
    ("Czech", "ces"),
    ("Danish", "dan"),
    ("Dutch", "nld"),
    ("English", "eng"),
    ("Esperanto", "epo"),
    ("Estonian", "est"),
    ("Filipino", "fil"),
    ("Finnish", "fin"),
    ("French", "fra"),
    ("Galician", "glg"),
    ("Georgian", "kat"),
    ("German", "deu"),
    ("Greek", "ell"),
    ("Gujarati", "guj"),
    ("Hausa", "hau"),
    ("Hebrew", "heb"),
    ("Hindi", "hin"),
    ("Hungarian", "hun"),
    ("Icelandic", "isl"),
    ("Igbo", "ibo"),
    ("Indonesian", "ind"),
    ("Irish", "gle"),
    ("Italian", "ita"),
    ("Japanese", "jpn"),
    ("Javanese", "jav"),
    ("Kannada", "kan"),
    ("Kazakh", "kaz"),
    ("Khmer", "khm"),
    ("Korean", "kor"),
    ("Kurdish", "kur"),
    ("Lao", "lao"),
    ("Latin", "lat"),
    ("Latvian", "lav"),
    ("Lithuanian", "lit"),
    ("Luxembourgish", "ltz"),
    ("Macedonian", "mkd"),
    ("Malagasy", "mlg"),
    ("Malay", "msa"),
    ("Malayalam", "mal"),
    ("Maltese", "mlt"),
    ("Mandarin", "cmn"),
    ("Marathi", "mar"),
    ("Mongolian", "mon"),
    ("Nepali", "nep"),
    ("Norwegian", "nor"),
    ("Pashto", "pus"),
    ("Persian", "fas"),
    ("Polish", "pol"),
    ("Portuguese", "por"),
    ("Punjabi", "pan"),
    ("Romanian", "ron"),
    ("Russian", "rus"),
    ("Serbian", "srp"),
    ("Sinhala", "sin"),
    ("Slovak", "slk"),
    ("Slovenian", "slv"),
    ("Somali", "som"),
    ("Spanish", "spa"),
    ("Swahili", "swa"),
    ("Swedish", "swe"),
    ("Tagalog", "tgl"),
    ("Tamil", "tam"),
    ("Telugu", "tel"),
    ("Thai", "tha"),
    ("Tibetan", "bod"),
    ("Turkish", "tur"),
    ("Ukrainian", "ukr"),
    ("Urdu", "urd"),
    ("Uzbek", "uzb"),
    ("Vietnamese", "vie"),
    ("Welsh", "cym"),
    ("Wolof", "wol"),
    ("Xhosa", "xho"),
    ("Yiddish", "yid"),
    ("Yoruba", "yor"),
    ("Zulu", "zul"),
];

static BY_NAME: LazyLock<HashMap<String, (&'static str, &'static str)>> = LazyLock::new(|| {
    LANGUAGES
        .iter()
        .map(|&(name, code)| (name.to_lowercase(), (name, code)))
        .collect()
});

/// Language names mentioned as whole words in `text`, in order of first
/// mention. Names shorter than `min_len` are ignored.
#[must_use]
pub fn parse_languages(text: &str, min_len: usize) -> LanguagesData {
    let mut languages: Vec<Language> = Vec::new();

    for word in words(text) {
        let Some(&(name, code)) = BY_NAME.get(&word) else {
            continue;
        };
        if name.len() < min_len || languages.iter().any(|l| l.code == code) {
            continue;
        }
        languages.push(Language {
            code: code.to_string(),
            name: name.to_string(),
            description: String::new(),
        });
    }

    LanguagesData { languages }
}
