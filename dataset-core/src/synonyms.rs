//! # Escritor da Seção de Sinônimos
//!
//! Reescreve apenas `entity_synonyms` de um documento existente. A seção
//! `common_examples` e tudo o que vem depois dela ficam intactos.
//!
//! Para cada nome canônico, na ordem dada, um registro é montado com os
//! sinônimos fornecidos por uma fonte externa (possivelmente nenhum).

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::document::{DatasetDocument, DocumentSink, SynonymRecord};
use crate::error::Result;
use crate::input::LineSource;

/// Resumo da reescrita.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynonymReport {
    pub path: PathBuf,
    pub records: usize,
    pub synonyms: usize,
    /// Registros que existiam antes e foram substituídos.
    pub replaced: usize,
}

/// Monta os registros chamando `gather` uma vez por nome, na ordem.
pub fn build_synonym_records<N, F>(names: &[N], mut gather: F) -> Result<Vec<SynonymRecord>>
where
    N: AsRef<str>,
    F: FnMut(&str) -> Result<Vec<String>>,
{
    names
        .iter()
        .map(|name| {
            let value = name.as_ref().to_string();
            let synonyms = gather(&value)?;
            Ok(SynonymRecord { value, synonyms })
        })
        .collect()
}

/// Lê sinônimos de `source` para um personagem até uma linha vazia.
pub fn read_synonyms<S: LineSource + ?Sized>(source: &mut S, name: &str) -> Result<Vec<String>> {
    let prompt = format!("Enter a synonym for {name}, or an empty line to move on");
    let mut synonyms = Vec::new();
    loop {
        let line = source.read_line(&prompt, "a synonym or an empty line")?;
        if line.is_empty() {
            return Ok(synonyms);
        }
        synonyms.push(line);
    }
}

/// Substitui a seção de sinônimos do documento em memória.
///
/// Devolve quantos registros anteriores foram descartados.
pub fn rewrite_synonyms(document: &mut DatasetDocument, records: Vec<SynonymRecord>) -> usize {
    let previous = document.replace_synonyms(records);
    if !previous.is_empty() {
        warn!(replaced = previous.len(), "overwriting existing synonym records");
    }
    previous.len()
}

/// Reescreve a seção de sinônimos do documento em `path`.
///
/// `gather` fornece a lista de sinônimos de cada nome. Nada é gravado se
/// qualquer chamada falhar.
pub fn write_synonym_section<N, F>(path: &Path, names: &[N], gather: F) -> Result<SynonymReport>
where
    N: AsRef<str>,
    F: FnMut(&str) -> Result<Vec<String>>,
{
    let mut document = DatasetDocument::load(path)?;
    let sink = DocumentSink::open(path)?;

    let records = build_synonym_records(names, gather)?;
    let report_records = records.len();
    let synonyms = records.iter().map(|r| r.synonyms.len()).sum();
    let replaced = rewrite_synonyms(&mut document, records);

    sink.commit(&document)?;
    info!(path = %path.display(), records = report_records, synonyms, "synonym section written");

    Ok(SynonymReport {
        path: path.to_path_buf(),
        records: report_records,
        synonyms,
        replaced,
    })
}
