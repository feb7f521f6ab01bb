//! # Tipos de Valor Compartilhados pelo Pipeline
//!
//! Define as unidades que fluem entre os estágios: [`Token`], [`Sentence`] e
//! [`Entity`]. São agregados de valor imutáveis do ponto de vista do
//! consumidor — cada estágio produz uma sequência nova em vez de mutar a
//! anterior, e a ordem dos tokens nunca muda.

use serde::{Deserialize, Serialize};

/// Um token do texto, progressivamente enriquecido pelo pipeline.
///
/// O tokenizador produz tokens com `tag` e `label` vazios; o tagger preenche
/// `tag` (Penn Treebank, ex: `NN`, `NNP`, `VBD`) e o classificador preenche
/// `label` (esquema IOB, ex: `O`, `B-PERSON`, `I-GPE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// A forma de superfície, exatamente como aparece no texto.
    pub text: String,
    /// POS tag Penn Treebank. Vazia até o tagger rodar.
    pub tag: String,
    /// Rótulo de entidade IOB. Vazio até o classificador rodar.
    pub label: String,
}

impl Token {
    /// Cria um token ainda não anotado (`tag` e `label` vazios).
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tag: String::new(),
            label: String::new(),
        }
    }
}

/// Uma sentença detectada pelo segmentador.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// O texto da sentença, sem espaços em branco nas bordas.
    pub text: String,
    /// Número de palavras (delimitadas por espaço). Informativo apenas;
    /// nenhum estágio posterior depende deste valor.
    pub length: usize,
}

impl Sentence {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let length = text.split_whitespace().count();
        Self { text, length }
    }
}

/// Uma entidade nomeada: spans de um ou mais tokens agrupados pelo chunker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Texto da entidade — os tokens constituintes unidos por espaço
    /// (ex: "Barack Obama").
    pub text: String,
    /// Classe da entidade: a parte após o prefixo `B-`/`I-` do primeiro
    /// token (ex: "PERSON", "GPE").
    pub label: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_starts_unannotated() {
        let tok = Token::new("Brasil");
        assert_eq!(tok.text, "Brasil");
        assert!(tok.tag.is_empty());
        assert!(tok.label.is_empty());
    }

    #[test]
    fn test_sentence_word_count() {
        let s = Sentence::new("Mr. Smith went to Washington.");
        assert_eq!(s.length, 5);

        let vazia = Sentence::new("");
        assert_eq!(vazia.length, 0);
    }
}
