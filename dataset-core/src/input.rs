//! # Fonte de Linhas
//!
//! O núcleo não conhece o terminal: ele pede linhas a um [`LineSource`],
//! sempre acompanhadas do texto do prompt. O fim de uma lista é sinalizado
//! pelo usuário (`quit` ou linha vazia), nunca pelo fim do fluxo; fim de
//! fluxo no meio de uma sessão é um erro.

use std::collections::VecDeque;
use std::io::{BufRead, Write};

use crate::error::{DatasetError, Result};

/// Fornece linhas de texto sob demanda.
pub trait LineSource {
    /// Exibe `prompt` e devolve a próxima linha, sem o terminador.
    ///
    /// `expected` descreve o que se esperava, para a mensagem de erro de fim de entrada.
    fn read_line(&mut self, prompt: &str, expected: &'static str) -> Result<String>;
}

/// Remove `\n` ou `\r\n` do final da linha; o restante é preservado.
fn strip_terminator(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

/// Fonte interativa: escreve o prompt em `output` e lê de `input`.
pub struct PromptedLines<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptedLines<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> LineSource for PromptedLines<R, W> {
    fn read_line(&mut self, prompt: &str, expected: &'static str) -> Result<String> {
        writeln!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(DatasetError::UnexpectedEndOfInput { expected });
        }
        Ok(strip_terminator(line))
    }
}

/// Fonte roteirizada: devolve linhas pré-definidas, em ordem.
///
/// Usada em testes e em execuções não interativas.
#[derive(Debug, Default)]
pub struct ScriptedLines {
    lines: VecDeque<String>,
    prompts: Vec<String>,
}

impl ScriptedLines {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
        }
    }

    /// Prompts exibidos até agora.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ScriptedLines {
    fn read_line(&mut self, prompt: &str, expected: &'static str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        self.lines
            .pop_front()
            .ok_or(DatasetError::UnexpectedEndOfInput { expected })
    }
}
