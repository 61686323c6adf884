//! # Montador de Documentos: Sessões de Coleta
//!
//! Orquestra a coleta interativa de exemplos e a escrita do documento.
//!
//! ## Máquina de Estados (por sessão)
//!
//! ```text
//! Início → AguardandoFrase ─ "quit" ─→ Finalizando → Finalizado
//!                 │
//!                 └ frase → AguardandoSentimento → AguardandoEntidades* → Acrescentar → AguardandoFrase
//! ```
//!
//! ## Modos
//! - **Criação** ([`create_document`]): começa de um documento vazio.
//! - **Emenda** ([`splice_document`]): relê um documento gerado anteriormente e
//!   acrescenta novos exemplos depois dos existentes.
//!
//! Em ambos os modos nada é gravado até o usuário digitar `quit`: o documento
//! é montado em memória e persistido de uma só vez pelo [`DocumentSink`].
//! A separação por vírgulas entre exemplos fica a cargo do serializador, então
//! não existe estado de "primeiro exemplo" a ser propagado entre chamadas.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::document::{DatasetDocument, DocumentSink};
use crate::entry::{build_entry, Sentiment, TrainingExample};
use crate::error::Result;
use crate::input::LineSource;
use crate::text::to_lower;

/// Sentinela que encerra a coleta de frases (comparado após normalização).
pub const QUIT_SENTINEL: &str = "quit";

const PHRASE_PROMPT: &str = "Enter a high sentiment phrase or \"quit\"";
const SENTIMENT_PROMPT: &str = "Enter 1 for positive sentiment or 0 for negative";
const ENTITY_NAME_PROMPT: &str = "Enter a character name mentioned in this phrase, or an empty line to finish";

/// O que fazer quando uma entrada do usuário é inválida
/// (gatilho ausente, listas desiguais, sentimento não numérico).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum InvalidEntryPolicy {
    /// Aborta a sessão inteira; nenhum arquivo é alterado.
    #[default]
    Abort,
    /// Descarta só a frase atual e volta a pedir uma nova.
    Skip,
}

/// Configuração de uma sessão de coleta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionConfig {
    pub on_invalid_entry: InvalidEntryPolicy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionMode {
    Create,
    Splice,
}

/// Resumo de uma sessão concluída.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    pub path: PathBuf,
    pub mode: SessionMode,
    /// Exemplos acrescentados nesta sessão.
    pub added: usize,
    /// Frases descartadas pela política [`InvalidEntryPolicy::Skip`].
    pub skipped: usize,
    /// Total de exemplos no documento gravado.
    pub total_examples: usize,
}

/// Contadores do laço de coleta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollectStats {
    pub added: usize,
    pub skipped: usize,
}

/// Lê as anotações de entidade até uma linha vazia.
///
/// Devolve as listas paralelas de nomes e gatilhos. Uma linha vazia no lugar
/// do gatilho também encerra a lista, deixando os nomes com um item a mais.
fn read_entities<S: LineSource + ?Sized>(source: &mut S) -> Result<(Vec<String>, Vec<String>)> {
    let mut names = Vec::new();
    let mut triggers = Vec::new();

    loop {
        let name = source.read_line(ENTITY_NAME_PROMPT, "a character name or an empty line")?;
        if name.is_empty() {
            break;
        }
        let prompt = format!("Enter the text in the phrase that refers to {name}");
        names.push(name);

        let trigger = source.read_line(&prompt, "an entity trigger")?;
        if trigger.is_empty() {
            break;
        }
        triggers.push(trigger);
    }

    Ok((names, triggers))
}

/// Lê uma entrada completa (frase, sentimento, entidades).
///
/// `Ok(None)` significa que o usuário digitou o sentinela.
fn read_entry<S: LineSource + ?Sized>(source: &mut S) -> Result<Option<TrainingExample>> {
    let phrase = to_lower(&source.read_line(PHRASE_PROMPT, "a phrase or \"quit\"")?);
    if phrase == QUIT_SENTINEL {
        return Ok(None);
    }

    let selector = source.read_line(SENTIMENT_PROMPT, "a sentiment selector")?;
    let sentiment = Sentiment::from_selector(&selector)?;

    let (names, triggers) = read_entities(source)?;
    build_entry(&phrase, sentiment, &names[..], &triggers[..]).map(Some)
}

/// Laço principal: acrescenta exemplos a `document` até o sentinela.
pub fn collect_examples<S: LineSource + ?Sized>(
    source: &mut S,
    document: &mut DatasetDocument,
    config: &SessionConfig,
) -> Result<CollectStats> {
    let mut stats = CollectStats::default();

    loop {
        match read_entry(source) {
            Ok(None) => break,
            Ok(Some(example)) => {
                document.push_example(example);
                stats.added += 1;
            }
            Err(err) if err.is_entry_error() && config.on_invalid_entry == InvalidEntryPolicy::Skip => {
                warn!("discarding entry: {err}");
                stats.skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(stats)
}

fn finalize(
    sink: DocumentSink,
    document: &DatasetDocument,
    mode: SessionMode,
    stats: CollectStats,
) -> Result<SessionReport> {
    let path = sink.path().to_path_buf();
    sink.commit(document)?;

    let report = SessionReport {
        path,
        mode,
        added: stats.added,
        skipped: stats.skipped,
        total_examples: document.examples().len(),
    };
    info!(
        path = %report.path.display(),
        added = report.added,
        skipped = report.skipped,
        total = report.total_examples,
        "document written"
    );
    Ok(report)
}

/// Modo de criação: grava um documento novo em `path` (substituindo o que houver).
pub fn create_document<S: LineSource + ?Sized>(
    path: &Path,
    source: &mut S,
    config: &SessionConfig,
) -> Result<SessionReport> {
    let sink = DocumentSink::open(path)?;
    info!(path = %path.display(), "creating new document");

    let mut document = DatasetDocument::new();
    let stats = collect_examples(source, &mut document, config)?;
    finalize(sink, &document, SessionMode::Create, stats)
}

/// Modo de emenda: acrescenta exemplos a um documento existente.
///
/// Os exemplos e sinônimos já gravados são preservados na mesma ordem.
pub fn splice_document<S: LineSource + ?Sized>(
    path: &Path,
    source: &mut S,
    config: &SessionConfig,
) -> Result<SessionReport> {
    let mut document = DatasetDocument::load(path)?;
    let sink = DocumentSink::open(path)?;
    info!(
        path = %path.display(),
        existing = document.examples().len(),
        "appending to existing document"
    );

    let stats = collect_examples(source, &mut document, config)?;
    finalize(sink, &document, SessionMode::Splice, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::EntitySpan;
    use crate::error::DatasetError;
    use crate::input::ScriptedLines;
    use std::fs;

    fn skip_config() -> SessionConfig {
        SessionConfig {
            on_invalid_entry: InvalidEntryPolicy::Skip,
        }
    }

    #[test]
    fn test_create_then_splice_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiments.json");
        let config = SessionConfig::default();

        let mut first = ScriptedLines::new(["hello world", "1", "", "quit"]);
        let report = create_document(&path, &mut first, &config).unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(report.mode, SessionMode::Create);

        let mut second = ScriptedLines::new(["may the force be with you", "0", "FORCE", "force", "", "quit"]);
        let report = splice_document(&path, &mut second, &config).unwrap();
        assert_eq!(report.added, 1);
        assert_eq!(report.total_examples, 2);

        let doc = DatasetDocument::load(&path).unwrap();
        let examples = doc.examples();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0].text(), "hello world");
        assert_eq!(examples[0].intent(), Sentiment::Positive);
        assert!(examples[0].entities().is_empty());
        assert_eq!(examples[1].text(), "may the force be with you");
        assert_eq!(examples[1].intent(), Sentiment::Negative);
        assert_eq!(
            examples[1].entities(),
            &[EntitySpan {
                start: 8,
                end: 13,
                value: "FORCE".to_string(),
                entity: "character".to_string(),
            }]
        );
    }

    #[test]
    fn test_immediate_quit_writes_empty_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.json");

        let mut source = ScriptedLines::new(["QUIT"]);
        let report = create_document(&path, &mut source, &SessionConfig::default()).unwrap();
        assert_eq!(report.added, 0);

        let text = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["rasa_nlu_data"]["entity_synonyms"], serde_json::json!([]));
        assert_eq!(value["rasa_nlu_data"]["common_examples"], serde_json::json!([]));
    }

    #[test]
    fn test_phrase_is_lowercased_but_not_trimmed() {
        let mut doc = DatasetDocument::new();
        let mut source = ScriptedLines::new(["  It's A Trap ", "0", "", "quit"]);
        let stats = collect_examples(&mut source, &mut doc, &SessionConfig::default()).unwrap();
        assert_eq!(stats.added, 1);
        assert_eq!(doc.examples()[0].text(), "  it's a trap ");

        // " quit" não é o sentinela: vira uma frase e o "quit" seguinte cai no prompt de sentimento.
        let mut doc = DatasetDocument::new();
        let mut source = ScriptedLines::new(["  It's A Trap ", "0", "", " quit", "quit"]);
        let err = collect_examples(&mut source, &mut doc, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MalformedNumericInput { .. }));
    }

    #[test]
    fn test_multiple_entities_in_order() {
        let mut doc = DatasetDocument::new();
        let mut source = ScriptedLines::new([
            "Luke and Leia hug",
            "1",
            "luke",
            "Luke",
            "Leia",
            "LEIA",
            "",
            "quit",
        ]);
        collect_examples(&mut source, &mut doc, &SessionConfig::default()).unwrap();

        let spans = doc.examples()[0].entities();
        assert_eq!(spans.len(), 2);
        assert_eq!((spans[0].value.as_str(), spans[0].start, spans[0].end), ("LUKE", 0, 4));
        assert_eq!((spans[1].value.as_str(), spans[1].start, spans[1].end), ("LEIA", 9, 13));
    }

    #[test]
    fn test_missing_trigger_aborts_without_touching_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiments.json");

        let mut first = ScriptedLines::new(["hello world", "1", "", "quit"]);
        create_document(&path, &mut first, &SessionConfig::default()).unwrap();
        let before = fs::read_to_string(&path).unwrap();

        let mut second = ScriptedLines::new(["good morning", "1", "", "hello there", "1", "KENOBI", "kenobi", ""]);
        let err = splice_document(&path, &mut second, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, DatasetError::EntityTriggerNotFound { ref trigger, .. } if trigger == "kenobi"));

        assert_eq!(fs::read_to_string(&path).unwrap(), before);
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never.json");

        let mut source = ScriptedLines::new(["hello world", "1", ""]);
        let err = create_document(&path, &mut source, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, DatasetError::UnexpectedEndOfInput { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_skip_policy_discards_only_bad_entries() {
        let mut doc = DatasetDocument::new();
        let mut source = ScriptedLines::new([
            "hello there",
            "1",
            "KENOBI",
            "kenobi",
            "",
            "general kenobi",
            "yes",
            "general kenobi",
            "1",
            "KENOBI",
            "",
            "general kenobi",
            "1",
            "KENOBI",
            "kenobi",
            "",
            "quit",
        ]);
        let stats = collect_examples(&mut source, &mut doc, &skip_config()).unwrap();

        // gatilho ausente, sentimento não numérico e listas desiguais são descartados
        assert_eq!(stats, CollectStats { added: 1, skipped: 3 });
        assert_eq!(doc.examples()[0].entities()[0].start, 8);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_mismatched_lists_abort_by_default() {
        let mut doc = DatasetDocument::new();
        let mut source = ScriptedLines::new(["general kenobi", "1", "KENOBI", ""]);
        let err = collect_examples(&mut source, &mut doc, &SessionConfig::default()).unwrap_err();
        assert!(matches!(err, DatasetError::MismatchedEntityLists { names: 1, triggers: 0 }));
        assert!(doc.examples().is_empty());
    }

    #[test]
    fn test_splice_into_document_without_examples() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiments.json");

        create_document(&path, &mut ScriptedLines::new(["quit"]), &SessionConfig::default()).unwrap();
        let report = splice_document(
            &path,
            &mut ScriptedLines::new(["i love you", "1", "", "quit"]),
            &SessionConfig::default(),
        )
        .unwrap();

        assert_eq!(report.total_examples, 1);
    }

    #[cfg(unix)]
    #[test]
    fn test_splice_keeps_file_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sentiments.json");
        create_document(&path, &mut ScriptedLines::new(["quit"]), &SessionConfig::default()).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        splice_document(&path, &mut ScriptedLines::new(["hi", "1", "", "quit"]), &SessionConfig::default()).unwrap();

        assert_eq!(fs::metadata(&path).unwrap().permissions().mode() & 0o777, 0o644);
    }

    #[test]
    fn test_splice_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = splice_document(
            &dir.path().join("missing.json"),
            &mut ScriptedLines::new(["quit"]),
            &SessionConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, DatasetError::FileOpen { .. }));
    }
}
