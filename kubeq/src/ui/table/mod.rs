//! Plain-text tables for query results.
//!
//! Every supported kind implements [`TableRow`]; [`ResourceListExt`] renders
//! a slice of them with a header row.

mod deployment;
mod namespace;
mod pod;
mod service;

/// One table row per object.
pub trait TableRow {
    const HEADER: &'static [&'static str];

    fn row(&self) -> Vec<String>;
}

pub trait ResourceListExt {
    /// Renders the objects into a human-readable table string.
    fn render_table(&self) -> String;
}

impl<K> ResourceListExt for [K]
where
    K: TableRow,
{
    fn render_table(&self) -> String {
        comfy_table::Table::new()
            .load_preset(comfy_table::presets::NOTHING)
            .set_content_arrangement(comfy_table::ContentArrangement::Dynamic)
            .set_header(K::HEADER.to_vec())
            .add_rows(self.iter().map(TableRow::row))
            .to_string()
    }
}
