//! Page → translation-file manifest, regenerated from the catalog by the
//! offline tooling and checked against the files actually shipped.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::catalog::flatten::Catalog;

/// Where a page's translation lives and where its strings mount in the
/// translation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    pub id: String,
    /// The page body path, carried through from the catalog.
    pub file: String,
    /// Translation file path relative to a per-language locale root.
    pub translation: String,
    /// Dotted mount point in the loaded translation tree.
    pub mount_point: String,
    pub title: String,
    pub module: String,
}

/// The generated `pages-manifest.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslationManifest {
    pub pages: Vec<ManifestEntry>,
}

/// A consistency problem found by `verify`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ManifestIssue {
    /// The page body named by the catalog does not exist.
    HtmlMissing { page_id: String, file: String },
    /// A catalog page has no manifest entry.
    ManifestEntryMissing { page_id: String },
    /// A (language × page) translation file does not exist.
    JsonMissing { lang: String, path: String },
}

/// Map a page id to its translation path and mount point.
///
/// `m1-p1` → `m1/p1.json` mounting at `m1.p1`; the intro page and two
/// historical renames keep their special mappings so existing locale trees
/// stay valid.
pub fn translation_info(page_id: &str) -> (String, String) {
    let (prefix, suffix) = match page_id.split_once('-') {
        Some((p, s)) => (p, s),
        None => (page_id, ""),
    };

    if prefix == "intro" {
        return ("intro.json".to_string(), "intro".to_string());
    }

    if prefix.starts_with('m') || prefix == "extras" {
        match page_id {
            "m1-p5" => return ("m1/p6.json".to_string(), "m1.p6".to_string()),
            "extras-questionarios" => {
                return ("extras/quiz.json".to_string(), "extras.quiz".to_string())
            }
            _ => return (format!("{prefix}/{suffix}.json"), format!("{prefix}.{suffix}")),
        }
    }

    (format!("{page_id}.json"), page_id.to_string())
}

impl TranslationManifest {
    /// Regenerate the manifest from a loaded catalog.
    pub fn generate(catalog: &Catalog) -> Self {
        let pages = catalog
            .pages()
            .iter()
            .map(|page| {
                let (translation, mount_point) = translation_info(&page.id);
                ManifestEntry {
                    id: page.id.clone(),
                    file: page.file.clone(),
                    translation,
                    mount_point,
                    title: page.title.clone(),
                    module: page.module_id.clone(),
                }
            })
            .collect();
        Self { pages }
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Check every catalog page for a body file, a manifest entry, and one
    /// translation file per language. `present` holds the shipped file paths:
    /// page bodies as-is, translations as `locales/<lang>/<translation>`.
    pub fn verify(
        &self,
        catalog: &Catalog,
        languages: &[&str],
        present: &HashSet<String>,
    ) -> Vec<ManifestIssue> {
        let by_id: HashMap<&str, &ManifestEntry> =
            self.pages.iter().map(|e| (e.id.as_str(), e)).collect();
        let mut issues = Vec::new();

        for page in catalog.pages() {
            if !present.contains(&page.file) {
                issues.push(ManifestIssue::HtmlMissing {
                    page_id: page.id.clone(),
                    file: page.file.clone(),
                });
            }

            let Some(entry) = by_id.get(page.id.as_str()) else {
                issues.push(ManifestIssue::ManifestEntryMissing { page_id: page.id.clone() });
                continue;
            };

            for lang in languages {
                let path = format!("locales/{lang}/{}", entry.translation);
                if !present.contains(&path) {
                    issues.push(ManifestIssue::JsonMissing {
                        lang: lang.to_string(),
                        path: entry.translation.clone(),
                    });
                }
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::from_json(
            r#"{
                "modules": [
                    { "id": "intro", "title": "Intro", "pages": [
                        { "id": "intro", "title": "Boas-vindas", "file": "paginas/intro.html" }
                    ] },
                    { "id": "m1", "title": "M1", "pages": [
                        { "id": "m1-p1", "title": "P1", "file": "paginas/m1/p1.html" },
                        { "id": "m1-p5", "title": "P5", "file": "paginas/m1/p5.html" }
                    ] },
                    { "id": "extras", "title": "Extras", "pages": [
                        { "id": "extras-questionarios", "title": "Quiz", "file": "paginas/extras/q.html" }
                    ] }
                ]
            }"#,
            "extras",
        )
        .unwrap()
    }

    #[test]
    fn standard_and_special_mappings() {
        assert_eq!(
            translation_info("m1-p1"),
            ("m1/p1.json".to_string(), "m1.p1".to_string())
        );
        assert_eq!(
            translation_info("intro"),
            ("intro.json".to_string(), "intro".to_string())
        );
        // Historical renames keep their remapped paths.
        assert_eq!(
            translation_info("m1-p5"),
            ("m1/p6.json".to_string(), "m1.p6".to_string())
        );
        assert_eq!(
            translation_info("extras-questionarios"),
            ("extras/quiz.json".to_string(), "extras.quiz".to_string())
        );
        assert_eq!(
            translation_info("extras-arraste"),
            ("extras/arraste.json".to_string(), "extras.arraste".to_string())
        );
    }

    #[test]
    fn generate_covers_every_page() {
        let manifest = TranslationManifest::generate(&catalog());
        assert_eq!(manifest.pages.len(), 4);
        let entry = &manifest.pages[1];
        assert_eq!(entry.id, "m1-p1");
        assert_eq!(entry.translation, "m1/p1.json");
        assert_eq!(entry.mount_point, "m1.p1");
        assert_eq!(entry.module, "m1");
    }

    #[test]
    fn manifest_json_uses_camel_case() {
        let manifest = TranslationManifest::generate(&catalog());
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"mountPoint\""));
        let back = TranslationManifest::from_json(&json).unwrap();
        assert_eq!(back.pages, manifest.pages);
    }

    #[test]
    fn verify_flags_missing_files_per_language() {
        let catalog = catalog();
        let manifest = TranslationManifest::generate(&catalog);

        let mut present: HashSet<String> = catalog.pages().iter().map(|p| p.file.clone()).collect();
        for entry in &manifest.pages {
            present.insert(format!("locales/pt/{}", entry.translation));
            present.insert(format!("locales/en/{}", entry.translation));
        }
        // Break one body and one English translation.
        present.remove("paginas/m1/p1.html");
        present.remove("locales/en/intro.json");

        let issues = manifest.verify(&catalog, &["pt", "en"], &present);
        assert_eq!(issues.len(), 2);
        assert!(issues.contains(&ManifestIssue::HtmlMissing {
            page_id: "m1-p1".to_string(),
            file: "paginas/m1/p1.html".to_string(),
        }));
        assert!(issues.contains(&ManifestIssue::JsonMissing {
            lang: "en".to_string(),
            path: "intro.json".to_string(),
        }));
    }

    #[test]
    fn verify_flags_missing_manifest_entry() {
        let catalog = catalog();
        let mut manifest = TranslationManifest::generate(&catalog);
        manifest.pages.retain(|e| e.id != "m1-p1");

        let mut present: HashSet<String> = catalog.pages().iter().map(|p| p.file.clone()).collect();
        for entry in &manifest.pages {
            present.insert(format!("locales/pt/{}", entry.translation));
        }

        let issues = manifest.verify(&catalog, &["pt"], &present);
        assert!(issues.contains(&ManifestIssue::ManifestEntryMissing {
            page_id: "m1-p1".to_string(),
        }));
    }
}
