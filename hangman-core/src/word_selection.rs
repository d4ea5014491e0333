use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use hangman_types::{CategoryInfo, WordDifficulty};
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::builtin::BUILTIN_CATEGORIES;
use crate::letters::is_valid_word;
use crate::{EngineError, EngineResult};

/// Named word lists, one per difficulty. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCategory {
    name: String,
    words: HashMap<WordDifficulty, Vec<String>>,
}

impl WordCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            words: HashMap::new(),
        }
    }

    /// Add words for a difficulty. Words are uppercased; anything other than
    /// ASCII letters is rejected.
    pub fn with_words<I, S>(mut self, difficulty: WordDifficulty, words: I) -> EngineResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for (index, word) in words.into_iter().enumerate() {
            self.push_word(difficulty, word.as_ref(), index + 1)?;
        }
        Ok(self)
    }

    /// Parse a word list of the form:
    ///
    /// ```text
    /// # comment
    /// [easy]
    /// cat
    /// [medium]
    /// giraffe
    /// ```
    pub fn from_word_list(name: &str, word_list: &str) -> EngineResult<Self> {
        let mut category = Self::new(name.trim().to_lowercase());
        let mut current: Option<WordDifficulty> = None;

        for (index, raw_line) in word_list.lines().enumerate() {
            let line_number = index + 1;
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(section) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let difficulty = section.parse::<WordDifficulty>().map_err(|e| {
                    EngineError::InvalidWordList {
                        category: category.name.clone(),
                        line: line_number,
                        reason: e.to_string(),
                    }
                })?;
                current = Some(difficulty);
                continue;
            }

            let Some(difficulty) = current else {
                return Err(EngineError::InvalidWordList {
                    category: category.name.clone(),
                    line: line_number,
                    reason: "word appears before any [difficulty] section".to_string(),
                });
            };

            category.push_word(difficulty, line, line_number)?;
        }

        Ok(category)
    }

    fn push_word(&mut self, difficulty: WordDifficulty, word: &str, line: usize) -> EngineResult<()> {
        let word = word.trim().to_ascii_uppercase();
        if !is_valid_word(&word) {
            return Err(EngineError::InvalidWordList {
                category: self.name.clone(),
                line,
                reason: format!("'{}' must contain only letters A-Z", word),
            });
        }

        let list = self.words.entry(difficulty).or_default();
        if !list.contains(&word) {
            list.push(word);
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn words(&self, difficulty: WordDifficulty) -> &[String] {
        self.words.get(&difficulty).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn word_count(&self, difficulty: WordDifficulty) -> usize {
        self.words(difficulty).len()
    }

    /// Difficulties that have at least one word, in easy-to-hard order.
    pub fn difficulties(&self) -> Vec<WordDifficulty> {
        WordDifficulty::ALL
            .into_iter()
            .filter(|d| self.word_count(*d) > 0)
            .collect()
    }
}

/// Pick a word uniformly at random from the category's list for `difficulty`.
pub fn select_random_word(difficulty: WordDifficulty, category: &WordCategory) -> EngineResult<String> {
    select_random_word_with_rng(difficulty, category, &mut rand::rng())
}

pub fn select_random_word_with_rng<R: Rng + ?Sized>(
    difficulty: WordDifficulty,
    category: &WordCategory,
    rng: &mut R,
) -> EngineResult<String> {
    category
        .words(difficulty)
        .choose(rng)
        .cloned()
        .ok_or_else(|| EngineError::NoWordsAvailable {
            category: category.name().to_string(),
            difficulty,
        })
}

/// What to do when a requested category name matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryPolicy {
    #[default]
    FallbackToDefault,
    Strict,
}

impl FromStr for CategoryPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fallback" | "default" => Ok(CategoryPolicy::FallbackToDefault),
            "strict" => Ok(CategoryPolicy::Strict),
            other => Err(format!("unknown category policy '{}'", other)),
        }
    }
}

impl fmt::Display for CategoryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryPolicy::FallbackToDefault => f.write_str("fallback"),
            CategoryPolicy::Strict => f.write_str("strict"),
        }
    }
}

/// The configured set of categories plus the lookup policy.
#[derive(Debug, Clone)]
pub struct WordCatalog {
    categories: Vec<WordCategory>,
    default_index: usize,
    policy: CategoryPolicy,
}

impl WordCatalog {
    pub fn new(categories: Vec<WordCategory>, default_category: &str) -> EngineResult<Self> {
        let default_index = categories
            .iter()
            .position(|c| c.name().eq_ignore_ascii_case(default_category))
            .ok_or_else(|| EngineError::UnknownCategory(default_category.to_string()))?;

        Ok(Self {
            categories,
            default_index,
            policy: CategoryPolicy::default(),
        })
    }

    /// Categories compiled into the crate, with "general" as the default.
    pub fn builtin() -> Self {
        let categories = BUILTIN_CATEGORIES
            .iter()
            .map(|(name, lists)| {
                let mut category = WordCategory::new(*name);
                for (difficulty, words) in lists.iter() {
                    category
                        .words
                        .insert(*difficulty, words.iter().map(|w| w.to_string()).collect());
                }
                category
            })
            .collect();

        Self {
            categories,
            default_index: 0,
            policy: CategoryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: CategoryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> CategoryPolicy {
        self.policy
    }

    pub fn categories(&self) -> &[WordCategory] {
        &self.categories
    }

    pub fn default_category(&self) -> &WordCategory {
        &self.categories[self.default_index]
    }

    /// Case-insensitive lookup. `None` or blank selects the default category;
    /// an unmatched name falls back to the default or fails, per policy.
    pub fn resolve(&self, name: Option<&str>) -> EngineResult<&WordCategory> {
        let name = match name.map(str::trim) {
            Some(n) if !n.is_empty() => n,
            _ => return Ok(self.default_category()),
        };

        match self.categories.iter().find(|c| c.name().eq_ignore_ascii_case(name)) {
            Some(category) => Ok(category),
            None => match self.policy {
                CategoryPolicy::FallbackToDefault => Ok(self.default_category()),
                CategoryPolicy::Strict => Err(EngineError::UnknownCategory(name.to_string())),
            },
        }
    }

    pub fn select_random_word(&self, difficulty: WordDifficulty, category: &str) -> EngineResult<String> {
        select_random_word(difficulty, self.resolve(Some(category))?)
    }

    pub fn category_info(&self) -> Vec<CategoryInfo> {
        self.categories
            .iter()
            .enumerate()
            .map(|(index, category)| CategoryInfo {
                name: category.name().to_string(),
                is_default: index == self.default_index,
                difficulties: category.difficulties(),
            })
            .collect()
    }
}
