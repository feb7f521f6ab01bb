//! # Segmentador de Sentenças (Punkt)
//!
//! Detecta fronteiras de sentença sobre pontuação ambígua no estilo do
//! algoritmo Punkt: um ponto final pode terminar uma sentença, uma
//! abreviação ("Mr.", "etc.") ou ambos ao mesmo tempo. A decisão combina:
//!
//! - **Lista de abreviações** aprendida (mais pontos internos e iniciais de
//!   uma letra, como em "U.S." e "J. Smith");
//! - **Colocações** — pares (palavra, seguidora capitalizada) que atravessam
//!   um ponto sem iniciar sentença (ex: "St. Louis");
//! - **Iniciadores de sentença** frequentes;
//! - **Contexto ortográfico** — com que capitalização cada palavra costuma
//!   aparecer no corpus de treino.
//!
//! `!` e `?` terminam sentença incondicionalmente; aspas e parênteses de
//! fechamento após a pontuação pertencem à sentença anterior.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::token::Sentence;

/// A palavra já foi vista com inicial maiúscula no meio de texto.
pub const ORTHO_UPPER: u32 = 1;
/// A palavra já foi vista com inicial minúscula.
pub const ORTHO_LOWER: u32 = 2;

/// Candidato a fronteira: um ou mais terminadores, seguidos de zero ou mais
/// fechadores (aspas, parênteses), que ficam presos à sentença anterior.
static CANDIDATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[.!?]+[)\]}»”’"']*"#).expect("regex de candidato a fronteira"));

/// Tabelas pré-treinadas do segmentador, carregadas de `Punkt/english.json`.
///
/// Imutáveis após a carga, como todas as tabelas de modelo da crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PunktModel {
    /// Abreviações em minúsculas, sem o ponto final (ex: "mr", "u.s").
    pub abbreviations: HashSet<String>,
    /// Pares (anterior, seguidora) que não iniciam sentença mesmo com a
    /// seguidora capitalizada.
    pub collocations: HashSet<(String, String)>,
    /// Palavras que frequentemente iniciam sentenças.
    pub sentence_starters: HashSet<String>,
    /// Flags [`ORTHO_UPPER`]/[`ORTHO_LOWER`] por palavra (minúscula).
    pub ortho_context: HashMap<String, u32>,
}

/// O segmentador propriamente dito: uma função pura de (texto, modelo).
pub struct SentenceSegmenter<'m> {
    model: &'m PunktModel,
}

impl<'m> SentenceSegmenter<'m> {
    pub fn new(model: &'m PunktModel) -> Self {
        Self { model }
    }

    /// Divide o texto em sentenças, preservando a ordem e o espaçamento
    /// interno. Texto vazio produz sequência vazia; texto sem terminador
    /// produz uma única sentença aparada.
    pub fn segment(&self, text: &str) -> Vec<Sentence> {
        let mut sentences = Vec::new();
        if text.trim().is_empty() {
            return sentences;
        }

        let mut start = 0;
        for m in CANDIDATE.find_iter(text) {
            let prev = previous_token(text, m.start());
            let next = following_token(text, m.end());
            if self.is_boundary(prev, m.as_str(), next) {
                let raw = text[start..m.end()].trim();
                if !raw.is_empty() {
                    sentences.push(Sentence::new(raw));
                }
                start = m.end();
            }
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(Sentence::new(rest));
        }
        sentences
    }

    /// Decide se o candidato encerra uma sentença.
    fn is_boundary(&self, prev: &str, punct: &str, next: Option<&str>) -> bool {
        // Fim do texto: sempre fronteira.
        let Some(next) = next else { return true };

        // `!` e `?` não participam do jogo de abreviações.
        if punct.starts_with('!') || punct.starts_with('?') {
            return true;
        }

        let prev_type = token_type(prev);
        let next_type = token_type(next);
        let next_cap = next
            .chars()
            .next()
            .map(|c| c.is_uppercase())
            .unwrap_or(false);

        let abbreviation = self.model.abbreviations.contains(&prev_type)
            || prev_type.contains('.')
            || (prev.chars().count() == 1 && prev.chars().all(|c| c.is_alphabetic()));

        if abbreviation {
            // Uma abreviação ainda pode coincidir com o fim da sentença: só
            // aceitamos quando a seguidora capitalizada é um iniciador
            // frequente de sentença.
            return next_cap && self.model.sentence_starters.contains(&next_type);
        }

        if next_cap {
            // Terminador, a menos que (anterior, seguidora) seja uma
            // colocação conhecida.
            return !self
                .model
                .collocations
                .contains(&(prev_type, next_type));
        }

        // Seguidora minúscula: o contexto ortográfico resolve o caso ambíguo.
        match self.ortho(&next_type) {
            ORTHO_UPPER => true,
            f if f & ORTHO_LOWER != 0 => false,
            _ => false,
        }
    }

    fn ortho(&self, word: &str) -> u32 {
        self.model.ortho_context.get(word).copied().unwrap_or(0)
    }
}

/// Palavra imediatamente anterior à posição `at` (exclusiva).
fn previous_token(text: &str, at: usize) -> &str {
    let before = &text[..at];
    match before.rfind(char::is_whitespace) {
        Some(i) => {
            let ws_len = before[i..].chars().next().map(char::len_utf8).unwrap_or(1);
            &before[i + ws_len..]
        }
        None => before,
    }
}

/// Primeira palavra após a posição `from`, ignorando aspas e parênteses de
/// abertura da próxima sentença.
fn following_token(text: &str, from: usize) -> Option<&str> {
    let rest = text[from..]
        .trim_start()
        .trim_start_matches(['"', '\'', '`', '(', '[', '{', '«', '“', '‘']);
    rest.split_whitespace().next()
}

/// Forma canônica de uma palavra para consulta nas tabelas: minúsculas, sem
/// pontuação nas bordas (pontos internos preservados, como em "u.s").
fn token_type(word: &str) -> String {
    word.trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> PunktModel {
        PunktModel {
            abbreviations: ["mr", "mrs", "dr", "etc", "st"]
                .into_iter()
                .map(String::from)
                .collect(),
            collocations: [("st".to_string(), "louis".to_string())].into_iter().collect(),
            sentence_starters: ["the", "he", "she", "it", "but"]
                .into_iter()
                .map(String::from)
                .collect(),
            ortho_context: [("november".to_string(), ORTHO_UPPER)].into_iter().collect(),
        }
    }

    fn texts(sentences: &[Sentence]) -> Vec<&str> {
        sentences.iter().map(|s| s.text.as_str()).collect()
    }

    #[test]
    fn test_empty_input_yields_no_sentences() {
        let m = model();
        assert!(SentenceSegmenter::new(&m).segment("").is_empty());
        assert!(SentenceSegmenter::new(&m).segment("   \n ").is_empty());
    }

    #[test]
    fn test_no_terminator_yields_single_sentence() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("  one two three  ");
        assert_eq!(texts(&got), vec!["one two three"]);
        assert_eq!(got[0].length, 3);
    }

    #[test]
    fn test_basic_split() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("This is one. This is two.");
        assert_eq!(texts(&got), vec!["This is one.", "This is two."]);
    }

    #[test]
    fn test_abbreviation_does_not_split() {
        let m = model();
        let got =
            SentenceSegmenter::new(&m).segment("Mr. Smith went to Washington. He smiled.");
        assert_eq!(
            texts(&got),
            vec!["Mr. Smith went to Washington.", "He smiled."]
        );
    }

    #[test]
    fn test_internal_periods_and_single_initial() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("The U.S. Senate met.");
        assert_eq!(texts(&got), vec!["The U.S. Senate met."]);

        let got = SentenceSegmenter::new(&m).segment("J. Smith arrived late.");
        assert_eq!(texts(&got), vec!["J. Smith arrived late."]);
    }

    #[test]
    fn test_learned_abbreviation_before_proper_noun() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("They flew to St. Louis yesterday.");
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn test_collocation_blocks_boundary() {
        let mut m = model();
        m.collocations
            .insert(("sec".to_string(), "navy".to_string()));
        let got = SentenceSegmenter::new(&m).segment("He briefed the Sec. Navy officials agreed.");
        assert_eq!(got.len(), 1);
    }

    #[test]
    fn test_abbreviation_before_frequent_starter_splits() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("She lives on Elm St. The house is old.");
        assert_eq!(
            texts(&got),
            vec!["She lives on Elm St.", "The house is old."]
        );
    }

    #[test]
    fn test_exclamation_and_question_always_split() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("Stop! Why? Because.");
        assert_eq!(texts(&got), vec!["Stop!", "Why?", "Because."]);
    }

    #[test]
    fn test_closing_quote_stays_with_previous_sentence() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("He said \"Stop!\" Then he left.");
        assert_eq!(texts(&got), vec!["He said \"Stop!\"", "Then he left."]);
    }

    #[test]
    fn test_lowercase_follower_is_not_a_boundary() {
        let m = model();
        let got = SentenceSegmenter::new(&m).segment("It cost 3.14 dollars in total.");
        assert_eq!(got.len(), 1);
    }
}
