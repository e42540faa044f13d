use redb::TableDefinition;

/// File records: id -> FileRecord (msgpack)
pub const FILES: TableDefinition<u64, &[u8]> = TableDefinition::new("files");

/// Identifier index: uuid -> file id (unique)
pub const FILE_IDENTIFIERS: TableDefinition<&str, u64> = TableDefinition::new("file_identifiers");

/// Paper records: id -> PaperRecord (msgpack)
pub const PAPERS: TableDefinition<u64, &[u8]> = TableDefinition::new("papers");

/// Last issued id per table name. Ids are never reused.
pub const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");
