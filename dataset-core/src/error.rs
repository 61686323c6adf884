//! # Erros do Construtor de Dataset
//!
//! Todas as falhas estruturais interrompem a operação imediatamente (fail-fast),
//! mas em vez de encerrar o processo elas sobem pela pilha como [`DatasetError`],
//! deixando o chamador decidir entre abortar ou pedir a entrada novamente.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DatasetError>;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("invalid mode selection: {0}")]
    InvalidModeSelection(i64),

    #[error("could not open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("entity trigger \"{trigger}\" not found in phrase \"{phrase}\"")]
    EntityTriggerNotFound { trigger: String, phrase: String },

    #[error("{names} entity names but {triggers} triggers")]
    MismatchedEntityLists { names: usize, triggers: usize },

    #[error("expected an integer, got \"{input}\"")]
    MalformedNumericInput { input: String },

    #[error("{} is not a dataset document: {source}", .path.display())]
    MalformedDocument {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("input ended while waiting for {expected}")]
    UnexpectedEndOfInput { expected: &'static str },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    /// Erros causados por uma única entrada mal formada do usuário.
    ///
    /// São os únicos que a política [`InvalidEntryPolicy::Skip`](crate::assembler::InvalidEntryPolicy)
    /// pode descartar; falhas de arquivo ou fim de entrada sempre abortam.
    pub fn is_entry_error(&self) -> bool {
        matches!(
            self,
            DatasetError::EntityTriggerNotFound { .. }
                | DatasetError::MismatchedEntityLists { .. }
                | DatasetError::MalformedNumericInput { .. }
        )
    }
}
