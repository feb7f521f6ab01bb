//! # Classificador de Entidades — Máxima Entropia
//!
//! Modelo log-linear sobre features booleanas esparsas. A inferência se
//! reduz a somas de pesos: cada tripla `(feature, valor, rótulo)` vira a
//! chave `"<nome>-<valor>-<rótulo>"`, consultada no `mapping` para obter o
//! índice do peso correspondente. Triplas ausentes valem zero.
//!
//! A decodificação é gulosa, da esquerda para a direita, com um histórico
//! dos rótulos anteriores **simplificados** (ver [`simplify_pos`]): o
//! histórico guarda só o prefixo IOB, nunca a classe completa.
//!
//! ## Nota sobre Unicode
//!
//! `suffix3`/`prefix3`/`wordlen` operam em codepoints, não em bytes. As
//! tabelas embutidas foram construídas sob a mesma convenção.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ProsaError, Result};
use crate::token::Token;

static NON_WORD_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\W+$").expect("regex de sufixo não-palavra"));
static WORD_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+$").expect("regex de sufixo palavra"));

/// Tabelas pré-treinadas do classificador MaxEnt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaxentModel {
    /// `"<feature>-<valor>-<rótulo>"` → índice em `weights`.
    pub mapping: HashMap<String, usize>,
    /// Vetor plano de pesos, indexado via `mapping`.
    pub weights: Vec<f64>,
    /// Rótulos IOB que o modelo conhece (ex: `B-PERSON`, `O`).
    pub labels: Vec<String>,
    /// Vocabulário "en-wordlist": palavras inglesas conhecidas.
    pub words: HashSet<String>,
}

/// O extrator de entidades: classifica tokens já etiquetados com POS.
pub struct EntityExtractor<'m> {
    model: &'m MaxentModel,
}

impl<'m> EntityExtractor<'m> {
    pub fn new(model: &'m MaxentModel) -> Self {
        Self { model }
    }

    /// Atribui um rótulo IOB a cada token, preservando ordem, `text` e
    /// `tag`. Os tokens devem chegar com `tag` preenchida.
    pub fn classify(&self, tokens: &[Token]) -> Result<Vec<Token>> {
        if self.model.labels.is_empty() {
            return Err(ProsaError::invalid_model(
                "labels",
                "o conjunto de rótulos do classificador está vazio",
            ));
        }

        // Ordem lexicográfica fixa o desempate do argmax.
        let mut ordered: Vec<&str> = self.model.labels.iter().map(String::as_str).collect();
        ordered.sort_unstable();

        let mut history: Vec<String> = Vec::with_capacity(tokens.len());
        let mut labeled = Vec::with_capacity(tokens.len());

        for (i, tok) in tokens.iter().enumerate() {
            let feats = extract_features(i, tokens, &history, &self.model.words);

            let mut best_label = ordered[0];
            let mut best_score = f64::NEG_INFINITY;
            for &label in &ordered {
                let mut total = 0.0;
                for (name, value) in &feats {
                    let key = format!("{name}-{value}-{label}");
                    if let Some(&idx) = self.model.mapping.get(&key) {
                        total += self.model.weights.get(idx).copied().unwrap_or(0.0);
                    }
                }
                if total > best_score {
                    best_score = total;
                    best_label = label;
                }
            }

            labeled.push(Token {
                text: tok.text.clone(),
                tag: tok.tag.clone(),
                label: best_label.to_string(),
            });
            history.push(simplify_pos(best_label));
        }
        Ok(labeled)
    }

    /// Agrupa tokens já classificados em entidades. Atalho para
    /// [`crate::chunker::tokens_to_entities`].
    pub fn chunk(&self, tokens: &[Token]) -> Vec<crate::token::Entity> {
        crate::chunker::tokens_to_entities(tokens)
    }
}

/// As 17 features da posição `i`, como pares (nome, valor).
fn extract_features(
    i: usize,
    ctx: &[Token],
    history: &[String],
    vocab: &HashSet<String>,
) -> Vec<(&'static str, String)> {
    let word = &ctx[i].text;
    let lower = word.to_lowercase();
    let mut prev_shape = "None".to_string();

    let mut feats: Vec<(&'static str, String)> = Vec::with_capacity(17);
    feats.push(("bias", "True".to_string()));
    feats.push(("word", word.clone()));
    feats.push(("pos", ctx[i].tag.clone()));
    feats.push((
        "en-wordlist",
        if vocab.contains(word) { "True" } else { "False" }.to_string(),
    ));
    feats.push(("word.lower", lower.clone()));
    feats.push(("suffix3", take_last(&lower, 3)));
    feats.push(("prefix3", take_first(&lower, 3)));
    feats.push(("shape", shape(word).to_string()));
    feats.push(("wordlen", word.chars().count().to_string()));

    let (prevtag, prevword, prevpos) = if i == 0 {
        ("None".to_string(), "None".to_string(), "None".to_string())
    } else {
        if i >= 2 {
            prev_shape = shape(&ctx[i - 1].text).to_string();
        }
        (
            history[i - 1].clone(),
            ctx[i - 1].text.to_lowercase(),
            ctx[i - 1].tag.clone(),
        )
    };
    feats.push(("prevtag", prevtag.clone()));
    feats.push(("prevword", prevword));
    feats.push(("prevpos", prevpos));

    let (nextword, nextpos) = if i == ctx.len() - 1 {
        ("None".to_string(), "None".to_string())
    } else {
        (
            ctx[i + 1].text.to_lowercase(),
            ctx[i + 1].tag.to_lowercase(),
        )
    };
    feats.push(("nextword", nextword));
    feats.push(("word+nextpos", format!("{lower}+{nextpos}")));
    feats.push(("nextpos", nextpos));

    feats.push(("pos+prevtag", format!("{}+{}", ctx[i].tag, prevtag)));
    feats.push(("shape+prevtag", format!("{prev_shape}+{prevtag}")));

    feats
}

/// Classe grosseira da palavra: número, pontuação ou padrão de caixa.
///
/// Os dois regexes são casados sem âncora inicial, como no modelo de
/// referência: basta a palavra *terminar* em caracteres da classe.
pub fn shape(word: &str) -> &'static str {
    if word.parse::<f64>().is_ok() {
        "number"
    } else if NON_WORD_SUFFIX.is_match(word) {
        "punct"
    } else if WORD_SUFFIX.is_match(word) {
        if word == word.to_lowercase() {
            "downcase"
        } else if is_titlecase(word) {
            "upcase"
        } else {
            "mixedcase"
        }
    } else {
        "other"
    }
}

/// Primeira letra maiúscula, restante sem maiúsculas.
fn is_titlecase(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.is_uppercase() && chars.all(|c| !c.is_uppercase()),
        None => false,
    }
}

/// Reduz um rótulo ao que o histórico precisa: rótulos verbais viram `"v"`,
/// os demais ficam só com o prefixo antes do primeiro `-`.
///
/// ```rust
/// use prosa_core::maxent::simplify_pos;
///
/// assert_eq!(simplify_pos("VBD"), "v");
/// assert_eq!(simplify_pos("B-PERSON"), "B");
/// assert_eq!(simplify_pos("O"), "O");
/// ```
pub fn simplify_pos(label: &str) -> String {
    if label.starts_with('V') {
        "v".to_string()
    } else {
        label.split('-').next().unwrap_or(label).to_string()
    }
}

/// Últimos `n` codepoints, em minúsculas já aplicadas pelo chamador.
fn take_last(s: &str, n: usize) -> String {
    let count = s.chars().count();
    s.chars().skip(count.saturating_sub(n)).collect()
}

/// Primeiros `n` codepoints.
fn take_first(s: &str, n: usize) -> String {
    s.chars().take(n).collect()
}
