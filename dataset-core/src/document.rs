//! # Documento de Treinamento (formato rasa_nlu)
//!
//! O documento é mantido como uma árvore tipada e serializado com `serde_json`,
//! em vez de ser montado linha a linha. Reabrir um documento para acrescentar
//! exemplos passa a ser: ler → desserializar → alterar a árvore → serializar.
//!
//! ## Estrutura
//!
//! ```text
//! {
//!     "rasa_nlu_data": {
//!         "entity_synonyms": [ <registro>, ... ],
//!         "common_examples": [ <exemplo>, ... ]
//!     }
//! }
//! ```
//!
//! Somente esta estrutura fechada é aceita na leitura (`deny_unknown_fields`):
//! o utilitário relê apenas o que ele mesmo gerou.
//!
//! ## Escrita atômica
//!
//! [`DocumentSink`] abre um arquivo temporário no mesmo diretório do destino e só
//! o renomeia por cima do destino em [`DocumentSink::commit`]. Se a sessão falhar
//! no meio, o temporário é descartado e o documento anterior continua intacto.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;

use crate::entry::TrainingExample;
use crate::error::{DatasetError, Result};

/// Indentação usada pelo formato (4 espaços).
const INDENT: &[u8] = b"    ";

/// Registro de sinônimos de um personagem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SynonymRecord {
    /// Nome canônico do personagem.
    pub value: String,
    /// Sinônimos na ordem em que foram digitados (pode ser vazio).
    pub synonyms: Vec<String>,
}

/// Conteúdo sob a chave raiz `rasa_nlu_data`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NluData {
    #[serde(default)]
    pub entity_synonyms: Vec<SynonymRecord>,
    #[serde(default)]
    pub common_examples: Vec<TrainingExample>,
}

/// O documento completo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DatasetDocument {
    pub rasa_nlu_data: NluData,
}

impl DatasetDocument {
    /// Documento vazio: as duas seções abertas e sem itens.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn examples(&self) -> &[TrainingExample] {
        &self.rasa_nlu_data.common_examples
    }

    pub fn synonyms(&self) -> &[SynonymRecord] {
        &self.rasa_nlu_data.entity_synonyms
    }

    pub fn push_example(&mut self, example: TrainingExample) {
        self.rasa_nlu_data.common_examples.push(example);
    }

    /// Substitui a seção de sinônimos inteira, devolvendo a anterior.
    pub fn replace_synonyms(&mut self, records: Vec<SynonymRecord>) -> Vec<SynonymRecord> {
        std::mem::replace(&mut self.rasa_nlu_data.entity_synonyms, records)
    }

    /// Interpreta o texto de um documento gerado por este utilitário.
    pub fn parse(source: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(source).map_err(|source| DatasetError::MalformedDocument {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Lê e interpreta um documento existente.
    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path).map_err(|source| DatasetError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&source, path)
    }

    /// Serializa com indentação de 4 espaços e quebra de linha final.
    pub fn to_pretty_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
        self.serialize(&mut ser).map_err(std::io::Error::from)?;
        buf.push(b'\n');
        String::from_utf8(buf).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e).into())
    }
}

/// Permissões de um documento novo: `rw-r--r--`, legível pelo pipeline de treinamento.
#[cfg(unix)]
fn new_document_permissions() -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn new_document_permissions() -> Option<fs::Permissions> {
    None
}

/// Destino de escrita de um documento, com descarte automático em caso de erro.
///
/// Abrir o sink logo no início da sessão falha cedo se o diretório não existir
/// ou não aceitar escrita, antes de o usuário digitar qualquer coisa.
pub struct DocumentSink {
    path: PathBuf,
    temp: NamedTempFile,
}

impl DocumentSink {
    pub fn open(path: &Path) -> Result<Self> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir).map_err(|source| DatasetError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            temp,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Permissões que o arquivo gravado deve ter: as do destino, se ele já existir.
    fn target_permissions(&self) -> Option<fs::Permissions> {
        match fs::metadata(&self.path) {
            Ok(meta) => Some(meta.permissions()),
            Err(_) => new_document_permissions(),
        }
    }

    /// Grava o documento e substitui o destino atomicamente.
    ///
    /// O temporário nasce com modo `0600`; antes da troca ele recebe as
    /// permissões do destino (ou `0644` para um documento novo).
    pub fn commit(mut self, document: &DatasetDocument) -> Result<()> {
        let rendered = document.to_pretty_string()?;
        let write_err = |source: std::io::Error| DatasetError::FileWrite {
            path: self.path.clone(),
            source,
        };

        self.temp.write_all(rendered.as_bytes()).map_err(write_err)?;
        if let Some(permissions) = self.target_permissions() {
            self.temp.as_file().set_permissions(permissions).map_err(write_err)?;
        }
        self.temp.as_file().sync_all().map_err(write_err)?;
        self.temp
            .persist(&self.path)
            .map_err(|e| DatasetError::FileWrite {
                path: self.path.clone(),
                source: e.error,
            })?;
        Ok(())
    }
}
