use redb::ReadableTable;

use super::db::{next_id, Database, DatabaseError};
use super::models::{FileRecord, NewFile};
use super::tables::*;

impl Database {
    // ========================================================================
    // File operations
    // ========================================================================

    /// Insert a file record, assigning its id. Fails if the identifier is taken.
    pub fn insert_file(&self, file: NewFile) -> Result<FileRecord, DatabaseError> {
        let mut stored = self.insert_files(vec![file])?;
        stored
            .pop()
            .ok_or_else(|| DatabaseError::Constraint("no record inserted".to_string()))
    }

    /// Insert several file records in one transaction: either every row is
    /// stored or none is.
    pub fn insert_files(&self, files: Vec<NewFile>) -> Result<Vec<FileRecord>, DatabaseError> {
        let write_txn = self.begin_write()?;
        let mut stored = Vec::with_capacity(files.len());
        {
            let mut table = write_txn.open_table(FILES)?;
            let mut identifiers = write_txn.open_table(FILE_IDENTIFIERS)?;

            for file in files {
                debug_assert!(!file.identifier.is_empty(), "identifier must not be empty");

                if identifiers.get(file.identifier.as_str())?.is_some() {
                    // Dropping the transaction aborts the whole batch
                    return Err(DatabaseError::Constraint(format!(
                        "identifier '{}' already exists",
                        file.identifier
                    )));
                }

                let id = next_id(&write_txn, "files")?;
                let record = file.with_id(id);
                let data = rmp_serde::to_vec_named(&record)?;
                table.insert(id, data.as_slice())?;
                identifiers.insert(record.identifier.as_str(), id)?;
                stored.push(record);
            }
        }
        write_txn.commit()?;
        Ok(stored)
    }

    /// Get a file by its generated identifier
    pub fn find_file_by_identifier(
        &self,
        identifier: &str,
    ) -> Result<Option<FileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let identifiers = read_txn.open_table(FILE_IDENTIFIERS)?;

        let id = match identifiers.get(identifier)? {
            Some(id) => id.value(),
            None => return Ok(None),
        };

        let table = read_txn.open_table(FILES)?;
        match table.get(id)? {
            Some(data) => {
                let file: FileRecord = rmp_serde::from_slice(data.value())?;
                Ok(Some(file))
            }
            None => Ok(None),
        }
    }

    /// Delete a file record and its identifier index entry.
    /// Returns false when the record was already gone.
    pub fn delete_file(&self, file: &FileRecord) -> Result<bool, DatabaseError> {
        let write_txn = self.begin_write()?;
        let deleted = {
            let mut table = write_txn.open_table(FILES)?;
            let removed = table.remove(file.id)?.is_some();
            drop(table);

            let mut identifiers = write_txn.open_table(FILE_IDENTIFIERS)?;
            identifiers.remove(file.identifier.as_str())?;
            removed
        };
        write_txn.commit()?;
        Ok(deleted)
    }

    /// Get all file records in id order
    pub fn get_all_files(&self) -> Result<Vec<FileRecord>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(FILES)?;

        let mut files = Vec::new();
        for result in table.iter()? {
            let (_, value) = result?;
            let file: FileRecord = rmp_serde::from_slice(value.value())?;
            files.push(file);
        }

        Ok(files)
    }
}
