use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const FALLBACK_LANG: &str = "eng";
const PACK_EXTENSION: &str = "traineddata";

/// Locale to tesseract language-pack mapping and its inverse, built together
/// once from the embedded table.
#[derive(Debug, Clone)]
pub struct LanguageTable {
    to_ocr: HashMap<String, String>,
    to_locale: HashMap<String, String>,
}

impl LanguageTable {
    pub fn load() -> Result<Self> {
        let raw = include_str!("locales.json");
        let parsed: LocaleData =
            serde_json::from_str(raw).with_context(|| "failed to parse locale mapping data")?;
        let to_locale = parsed
            .locales
            .iter()
            .map(|(locale, lang)| (lang.clone(), locale.clone()))
            .collect();
        Ok(Self {
            to_ocr: parsed.locales,
            to_locale,
        })
    }

    pub fn ocr_lang(&self, locale: &str) -> Option<&str> {
        self.to_ocr.get(locale).map(String::as_str)
    }

    pub fn locale(&self, ocr_lang: &str) -> Option<&str> {
        self.to_locale.get(ocr_lang).map(String::as_str)
    }

    /// Language pack for a locale: exact hit first, then the bare language
    /// code without its region suffix, then English.
    pub fn default_ocr_lang(&self, locale: &str) -> &str {
        if let Some(lang) = self.ocr_lang(locale) {
            return lang;
        }
        locale
            .split_once('_')
            .and_then(|(base, _)| self.ocr_lang(base))
            .unwrap_or(FALLBACK_LANG)
    }
}

/// Sorted stems of the `*.traineddata` files under a tessdata directory.
pub fn available_languages(tessdata_dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(tessdata_dir)
        .with_context(|| format!("failed to read tessdata dir: {}", tessdata_dir.display()))?;
    let mut langs = Vec::new();
    for entry in entries {
        let entry = entry.with_context(|| "failed to read tessdata dir entry")?;
        let path = entry.path();
        if path.extension().and_then(|ext| ext.to_str()) != Some(PACK_EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            langs.push(stem.to_string());
        }
    }
    langs.sort();
    Ok(langs)
}

#[derive(Debug, Deserialize)]
struct LocaleData {
    locales: HashMap<String, String>,
}
