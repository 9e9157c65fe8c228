use std::collections::HashSet;
use std::path::PathBuf;

use yaku_config::history::HistoryLimit;
use yaku_core::types::TranslationRecord;

/// JSON file of accepted translations, deduplicated by translated text and
/// bounded by the configured history limit.
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Appends one record. Entries with the same translated text are kept
    /// once (first occurrence wins); entries beyond the limit are evicted
    /// oldest first. A disabled limit clears the stored history instead.
    pub async fn save(
        &self,
        record: TranslationRecord,
        limit: HistoryLimit,
    ) -> Result<(), anyhow::Error> {
        if limit.is_disabled() {
            return self.clear().await;
        }

        let mut records = self.load_raw().await;
        records.push(record);

        let mut seen = HashSet::new();
        records.retain(|r| seen.insert(r.translated_text.clone()));

        if let HistoryLimit::Keep(max) = limit {
            while records.len() > max {
                records.remove(0);
            }
        }

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(&records)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }

    /// Stored records, newest first. Unreadable entries are skipped.
    pub async fn load(&self) -> Vec<TranslationRecord> {
        let mut records = self.load_raw().await;
        records.reverse();
        records
    }

    pub async fn clear(&self) -> Result<(), anyhow::Error> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn load_raw(&self) -> Vec<TranslationRecord> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(_) => return Vec::new(),
        };
        let entries: Vec<serde_json::Value> = match serde_json::from_str(&content) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("unreadable history file, starting fresh: {e}");
                return Vec::new();
            }
        };
        entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value(entry).ok())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(translated: &str, saved_at: u64) -> TranslationRecord {
        TranslationRecord {
            provider: "deepl".to_string(),
            original_text: "hello".to_string(),
            translated_text: translated.to_string(),
            source_lang: "EN".to_string(),
            target_lang: "KO".to_string(),
            saved_at,
        }
    }

    fn store(dir: &tempfile::TempDir) -> HistoryStore {
        HistoryStore::new(dir.path().join("history.json"))
    }

    #[tokio::test]
    async fn duplicate_translated_text_does_not_grow_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let limit = HistoryLimit::Keep(10);

        store.save(record("annyeong", 1), limit).await.unwrap();
        store.save(record("annyeong", 2), limit).await.unwrap();

        assert_eq!(store.load().await.len(), 1);
    }

    #[tokio::test]
    async fn overflow_evicts_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let limit = HistoryLimit::Keep(2);

        store.save(record("one", 1), limit).await.unwrap();
        store.save(record("two", 2), limit).await.unwrap();
        store.save(record("three", 3), limit).await.unwrap();

        let records = store.load().await;
        assert_eq!(records.len(), 2);
        assert!(records.iter().all(|r| r.translated_text != "one"));
    }

    #[tokio::test]
    async fn load_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);
        let limit = HistoryLimit::Keep(10);

        store.save(record("one", 1), limit).await.unwrap();
        store.save(record("two", 2), limit).await.unwrap();

        let records = store.load().await;
        assert_eq!(records[0].translated_text, "two");
        assert_eq!(records[1].translated_text, "one");
    }

    #[tokio::test]
    async fn disabled_limit_clears_stored_history() {
        let dir = tempfile::tempdir().unwrap();
        let store = store(&dir);

        store
            .save(record("one", 1), HistoryLimit::Keep(10))
            .await
            .unwrap();
        assert_eq!(store.load().await.len(), 1);

        store.save(record("two", 2), HistoryLimit::None).await.unwrap();
        assert!(store.load().await.is_empty());
    }

    #[tokio::test]
    async fn unreadable_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        tokio::fs::write(
            &path,
            r#"[{"bogus": true},
                {"provider":"deepl","original_text":"hello","translated_text":"annyeong",
                 "source_lang":"EN","target_lang":"KO","saved_at":1}]"#,
        )
        .await
        .unwrap();

        let store = HistoryStore::new(path);
        let records = store.load().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].translated_text, "annyeong");
    }
}
