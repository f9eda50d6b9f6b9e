use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::{Path, PathBuf};

use crate::api::Folder;

/// Last known folder listing, shown when the server can't be reached at startup
pub struct CacheDb {
    conn: Connection,
}

impl CacheDb {
    pub fn new() -> Result<Self> {
        let cache_dir = Self::get_cache_dir();
        std::fs::create_dir_all(&cache_dir)
            .with_context(|| format!("Failed to create cache dir {}", cache_dir.display()))?;

        Self::open(&cache_dir.join("cache.db"))
    }

    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open cache at {}", db_path.display()))?;

        let mut cache = CacheDb { conn };
        cache.init_schema()?;

        Ok(cache)
    }

    fn get_cache_dir() -> PathBuf {
        match dirs::cache_dir() {
            Some(cache_dir) => cache_dir.join("foldertui"),
            // Fallback to the temp dir if no cache dir is available
            None => crate::utils::get_cache_fallback_path(),
        }
    }

    fn init_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS folders (
                position INTEGER NOT NULL,
                folder_id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                created_at TEXT,
                is_zipped INTEGER NOT NULL DEFAULT 0
            );
            ",
        )?;

        Ok(())
    }

    /// Replace the cached listing with `folders`, keeping their order
    pub fn save_folders(&mut self, folders: &[Folder]) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM folders", [])?;

        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO folders (position, folder_id, name, created_at, is_zipped)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            for (position, folder) in folders.iter().enumerate() {
                stmt.execute(params![
                    position as i64,
                    folder.id,
                    folder.name,
                    folder.created_at,
                    folder.is_zipped,
                ])?;
            }
        }

        tx.commit()?;
        Ok(())
    }

    pub fn get_all_folders(&self) -> Result<Vec<Folder>> {
        let mut stmt = self.conn.prepare(
            "SELECT folder_id, name, created_at, is_zipped FROM folders ORDER BY position",
        )?;

        let folders = stmt
            .query_map([], |row| {
                Ok(Folder {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    created_at: row.get(2)?,
                    is_zipped: row.get(3)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(folders)
    }

    pub fn clear(&self) -> Result<()> {
        self.conn.execute("DELETE FROM folders", [])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_cache() -> (tempfile::TempDir, CacheDb) {
        let dir = tempfile::tempdir().unwrap();
        let cache = CacheDb::open(&dir.path().join("cache.db")).unwrap();
        (dir, cache)
    }

    #[test]
    fn test_empty_cache() {
        let (_dir, cache) = temp_cache();
        assert!(cache.get_all_folders().unwrap().is_empty());
    }

    #[test]
    fn test_save_keeps_server_order() {
        let (_dir, mut cache) = temp_cache();
        let mut zipped = Folder::new(9, "Archive");
        zipped.is_zipped = true;
        zipped.created_at = Some("2024-01-02 03:04:05".to_string());

        cache
            .save_folders(&[zipped.clone(), Folder::new(2, "Docs")])
            .unwrap();

        let folders = cache.get_all_folders().unwrap();
        assert_eq!(folders, vec![zipped, Folder::new(2, "Docs")]);
    }

    #[test]
    fn test_save_replaces_previous_listing() {
        let (_dir, mut cache) = temp_cache();
        cache.save_folders(&[Folder::new(1, "Old")]).unwrap();
        cache.save_folders(&[Folder::new(2, "New")]).unwrap();

        let folders = cache.get_all_folders().unwrap();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].id, 2);

        cache.clear().unwrap();
        assert!(cache.get_all_folders().unwrap().is_empty());
    }
}
