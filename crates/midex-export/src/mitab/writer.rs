//! MITAB row writer

use super::{BinaryInteraction, MitabField, EMPTY};
use flate2::write::GzEncoder;
use flate2::Compression;
use midex_common::{MidexError, Result};
use midex_core::model::Publication;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Header line written ahead of the records
const HEADER: &[&str] = &[
    "#ID(s) interactor A",
    "ID(s) interactor B",
    "Alt. ID(s) interactor A",
    "Alt. ID(s) interactor B",
    "Alias(es) interactor A",
    "Alias(es) interactor B",
    "Interaction detection method(s)",
    "Publication 1st author(s)",
    "Publication Identifier(s)",
    "Taxid interactor A",
    "Taxid interactor B",
    "Interaction type(s)",
    "Source database(s)",
    "Interaction identifier(s)",
    "Confidence value(s)",
    "Expansion method(s)",
    "Checksum(s) interactor A",
    "Checksum(s) interactor B",
    "Interaction Checksum(s)",
    "Annotation(s)",
];

/// Writes binary interactions as tab-separated records
pub struct MitabWriter {
    /// Source database label stamped into each row (e.g. "intact")
    source: String,
    /// Whether to emit the `#`-prefixed header line
    header: bool,
}

impl MitabWriter {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            header: true,
        }
    }

    pub fn without_header(mut self) -> Self {
        self.header = false;
        self
    }

    /// Render all publications to one MITAB document
    pub fn write_string(&self, publications: &[Publication]) -> Result<String> {
        let mut csv_writer = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(csv::QuoteStyle::Never)
            .from_writer(Vec::new());

        if self.header {
            csv_writer
                .write_record(HEADER)
                .map_err(|e| MidexError::Csv(e.to_string()))?;
        }

        for publication in publications {
            for row in super::binary_interactions(publication, &self.source) {
                csv_writer
                    .write_record(render_row(&row))
                    .map_err(|e| MidexError::Csv(e.to_string()))?;
            }
        }

        let bytes = csv_writer
            .into_inner()
            .map_err(|e| MidexError::Csv(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| MidexError::Csv(e.to_string()))
    }

    /// Write the document to a file, gzip-compressed when requested
    pub fn write_file(&self, publications: &[Publication], path: &Path, gzip: bool) -> Result<()> {
        let document = self.write_string(publications)?;
        if gzip {
            let file = std::fs::File::create(path)?;
            let mut encoder = GzEncoder::new(file, Compression::default());
            encoder.write_all(document.as_bytes())?;
            encoder.finish()?;
        } else {
            std::fs::write(path, &document)?;
        }
        info!(
            path = %path.display(),
            publications = publications.len(),
            gzip,
            "Wrote MITAB export"
        );
        Ok(())
    }
}

fn join_fields(fields: &[MitabField]) -> String {
    if fields.is_empty() {
        EMPTY.to_string()
    } else {
        fields
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("|")
    }
}

fn single_field(field: &Option<MitabField>) -> String {
    field
        .as_ref()
        .map(|f| f.to_string())
        .unwrap_or_else(|| EMPTY.to_string())
}

fn render_row(row: &BinaryInteraction) -> Vec<String> {
    vec![
        single_field(&row.id_a),
        single_field(&row.id_b),
        join_fields(&row.alt_ids_a),
        join_fields(&row.alt_ids_b),
        join_fields(&row.aliases_a),
        join_fields(&row.aliases_b),
        join_fields(&row.detection_methods),
        row.first_author.clone().unwrap_or_else(|| EMPTY.to_string()),
        join_fields(&row.publications),
        join_fields(&row.taxid_a),
        join_fields(&row.taxid_b),
        join_fields(&row.interaction_types),
        join_fields(&row.source_databases),
        join_fields(&row.interaction_ids),
        join_fields(&row.confidences),
        row.expansion.clone().unwrap_or_else(|| EMPTY.to_string()),
        single_field(&row.checksum_a),
        single_field(&row.checksum_b),
        single_field(&row.interaction_checksum),
        join_fields(&row.annotations),
    ]
}
