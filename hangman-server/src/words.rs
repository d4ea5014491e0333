use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use hangman_core::{WordCatalog, WordCategory};
use tracing::info;

use crate::config::Config;

/// The catalog the server plays with: word lists from `WORDS_DIRECTORY` when
/// set, otherwise the compiled-in categories.
pub fn load_catalog(config: &Config) -> Result<WordCatalog> {
    let categories = match &config.words_directory {
        Some(dir) => load_categories(dir)?,
        None => WordCatalog::builtin().categories().to_vec(),
    };

    let catalog = WordCatalog::new(categories, &config.default_category)
        .with_context(|| format!("Default category '{}' is not available", config.default_category))?
        .with_policy(config.category_policy);

    info!(
        "Word catalog ready: {} categories, default '{}', {} policy",
        catalog.categories().len(),
        catalog.default_category().name(),
        catalog.policy()
    );
    Ok(catalog)
}

/// One category per `<name>.txt` file, in file-name order.
pub fn load_categories(dir: &Path) -> Result<Vec<WordCategory>> {
    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).with_context(|| format!("Cannot read {}", dir.display()))? {
        let path = entry?.path();
        if path.extension().is_some_and(|ext| ext == "txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut categories = Vec::with_capacity(paths.len());
    for path in paths {
        let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
            continue;
        };
        let contents =
            fs::read_to_string(&path).with_context(|| format!("Cannot read {}", path.display()))?;
        let category = WordCategory::from_word_list(name, &contents)
            .with_context(|| format!("Invalid word list {}", path.display()))?;
        info!(
            "Loaded category '{}' from {}",
            category.name(),
            path.display()
        );
        categories.push(category);
    }

    if categories.is_empty() {
        bail!("No .txt word lists found in {}", dir.display());
    }
    Ok(categories)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangman_core::CategoryPolicy;
    use hangman_types::WordDifficulty;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hangman-words-{}-{}", name, uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_builtin_catalog_by_default() {
        let catalog = load_catalog(&Config::default()).unwrap();
        assert_eq!(catalog.default_category().name(), "general");
        assert!(catalog.categories().len() > 1);
    }

    #[test]
    fn test_builtin_catalog_with_other_default() {
        let config = Config {
            default_category: "Animals".to_string(),
            category_policy: CategoryPolicy::Strict,
            ..Config::default()
        };
        let catalog = load_catalog(&config).unwrap();
        assert_eq!(catalog.default_category().name(), "animals");
        assert_eq!(catalog.policy(), CategoryPolicy::Strict);
    }

    #[test]
    fn test_unknown_default_is_an_error() {
        let config = Config {
            default_category: "dinosaurs".to_string(),
            ..Config::default()
        };
        assert!(load_catalog(&config).is_err());
    }

    #[test]
    fn test_loads_directory() {
        let dir = scratch_dir("load");
        fs::write(dir.join("birds.txt"), "[easy]\nowl\nemu\n[medium]\npelican\n").unwrap();
        fs::write(dir.join("general.txt"), "[easy]\ncat\n").unwrap();
        fs::write(dir.join("README.md"), "not a word list").unwrap();

        let config = Config {
            words_directory: Some(dir.clone()),
            ..Config::default()
        };
        let catalog = load_catalog(&config).unwrap();
        let names: Vec<_> = catalog.categories().iter().map(|c| c.name().to_string()).collect();
        assert_eq!(names, vec!["birds", "general"]);
        assert_eq!(catalog.categories()[0].word_count(WordDifficulty::Easy), 2);

        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_empty_directory_is_an_error() {
        let dir = scratch_dir("empty");
        assert!(load_categories(&dir).is_err());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_bad_word_is_an_error() {
        let dir = scratch_dir("bad");
        fs::write(dir.join("general.txt"), "[easy]\nc4t\n").unwrap();
        assert!(load_categories(&dir).is_err());
        fs::remove_dir_all(dir).unwrap();
    }
}
