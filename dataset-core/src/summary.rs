//! # Resumo do Dataset
//!
//! Estatísticas simples de um documento: quantos exemplos de cada sentimento,
//! quantas menções por personagem e quantos registros de sinônimos existem.
//! Ajuda a decidir quais personagens precisam de mais exemplos.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DatasetDocument;
use crate::entry::Sentiment;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub examples: usize,
    pub positive: usize,
    pub negative: usize,
    /// Exemplos sem nenhuma entidade anotada.
    pub without_entities: usize,
    /// Menções por nome canônico (ordenado alfabeticamente).
    pub mentions: BTreeMap<String, usize>,
    pub synonym_records: usize,
}

/// Nomes canônicos distintos usados nos exemplos, na ordem em que aparecem.
pub fn distinct_characters(document: &DatasetDocument) -> Vec<String> {
    let mut seen = Vec::new();
    for span in document.examples().iter().flat_map(|e| e.entities()) {
        if !seen.contains(&span.value) {
            seen.push(span.value.clone());
        }
    }
    seen
}

pub fn summarize(document: &DatasetDocument) -> DatasetSummary {
    let mut summary = DatasetSummary {
        synonym_records: document.synonyms().len(),
        ..Default::default()
    };

    for example in document.examples() {
        summary.examples += 1;
        match example.intent() {
            Sentiment::Positive => summary.positive += 1,
            Sentiment::Negative => summary.negative += 1,
        }
        if example.entities().is_empty() {
            summary.without_entities += 1;
        }
        for span in example.entities() {
            *summary.mentions.entry(span.value.clone()).or_insert(0) += 1;
        }
    }

    summary
}

impl fmt::Display for DatasetSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "examples:         {}", self.examples)?;
        writeln!(f, "  positive:       {}", self.positive)?;
        writeln!(f, "  negative:       {}", self.negative)?;
        writeln!(f, "  no entities:    {}", self.without_entities)?;
        writeln!(f, "synonym records:  {}", self.synonym_records)?;
        if !self.mentions.is_empty() {
            writeln!(f, "mentions:")?;
            let width = self.mentions.keys().map(|k| k.chars().count()).max().unwrap_or(0);
            for (name, count) in &self.mentions {
                writeln!(f, "  {name:<width$}  {count}")?;
            }
        }
        Ok(())
    }
}
