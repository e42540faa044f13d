use redb::ReadableTable;

use super::db::{next_id, Database, DatabaseError};
use super::models::{NewPaper, PaperRecord};
use super::tables::*;

impl Database {
    // ========================================================================
    // Paper operations
    // ========================================================================

    /// Insert a paper record, assigning its id
    pub fn insert_paper(&self, paper: NewPaper) -> Result<PaperRecord, DatabaseError> {
        debug_assert!(
            !paper.stored_file_name.is_empty(),
            "stored file name must not be empty"
        );

        let write_txn = self.begin_write()?;
        let record = {
            let id = next_id(&write_txn, "papers")?;
            let record = paper.with_id(id);
            let data = rmp_serde::to_vec_named(&record)?;
            let mut table = write_txn.open_table(PAPERS)?;
            table.insert(id, data.as_slice())?;
            record
        };
        write_txn.commit()?;
        Ok(record)
    }

    /// List all papers in insertion order
    pub fn list_papers(&self) -> Result<Vec<PaperRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PAPERS)?;

        let mut papers = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let paper: PaperRecord = rmp_serde::from_slice(value.value())?;
            papers.push(paper);
        }

        Ok(papers)
    }

    /// Get a paper by its id
    pub fn find_paper(&self, id: u64) -> Result<Option<PaperRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PAPERS)?;

        match table.get(id)? {
            Some(data) => {
                let paper: PaperRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(paper))
            }
            None => Ok(None),
        }
    }
}
