//! A blog article whose excerpt and word count are derived from its text.
//!
//! The derived fields are only recomputed on save when the text changed.

use recompute::{Attributes, Error, Immediate, Lifecycle, Recomputable, Record, computed};

fn main() -> Result<(), Error> {
    let mut article = Article::load("Incremental computation is fun.");

    // [Skip] Nothing changed since loading.
    article.save()?;
    println!("excerpt after load: {:?}", article.field("excerpt"));

    // [Run] The text is dirty.
    article.attributes.set("text", "Computed attributes stay in sync.".into());
    article.save()?;
    println!("excerpt: {:?}", article.field("excerpt"));
    println!("words: {:?}", article.field("words"));

    // [Skip] Saved again without changes.
    article.save()?;

    // [Run] Deferred, on a copy, regardless of dirtiness.
    article.recompute_async(&Immediate)?;

    Ok(())
}

/// A blog article.
#[derive(Clone)]
struct Article {
    attributes: Attributes<String>,
}

#[computed]
impl Article {
    fn compute_excerpt_attribute(text: String) -> String {
        text.chars().take(12).collect()
    }

    fn compute_words_attribute(text: String) -> String {
        text.split_whitespace().count().to_string()
    }
}

impl Article {
    fn load(text: &str) -> Self {
        Self { attributes: Attributes::from_loaded([("text", text.to_string())]) }
    }

    fn field(&self, field: &str) -> Option<&str> {
        self.attributes.get(field).map(String::as_str)
    }

    fn lifecycle() -> &'static Lifecycle<Self> {
        static LIFECYCLE: std::sync::LazyLock<Lifecycle<Article>> =
            std::sync::LazyLock::new(Lifecycle::recomputing);
        &LIFECYCLE
    }
}

impl Record for Article {
    type Value = String;

    fn is_dirty(&self, field: &str) -> bool {
        self.attributes.is_dirty(field)
    }

    fn get_field(&self, field: &str) -> Option<String> {
        self.attributes.get(field).cloned()
    }

    fn set_field(&mut self, field: &str, value: String) -> Result<(), Error> {
        self.attributes.set(field, value);
        Ok(())
    }
}

impl Recomputable for Article {
    fn save(&mut self) -> Result<(), Error> {
        Self::lifecycle().fire_saving(self)?;
        println!("persisting {} dirty fields", self.attributes.dirty().count());
        self.attributes.sync();
        Ok(())
    }
}
